//! Player identity resolution against the home and away rosters.

use crate::models::{placeholder_name, Player, PlayerId, TeamSide};

/// Identity of a referenced player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub name: String,
    pub jersey_number: Option<u32>,
    pub team: TeamSide,
}

/// Read-only view over both rosters for one aggregation call.
#[derive(Debug, Clone, Copy)]
pub struct PlayerRegistry<'a> {
    home: &'a [Player],
    away: &'a [Player],
}

impl<'a> PlayerRegistry<'a> {
    pub fn new(home: &'a [Player], away: &'a [Player]) -> Self {
        Self { home, away }
    }

    fn roster(&self, side: TeamSide) -> &'a [Player] {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    /// Resolve `id` against the hinted roster only, or home then away
    /// without a hint. A miss on the hinted roster yields a placeholder
    /// identity on that side; without a hint a miss resolves to `None`.
    pub fn resolve(&self, id: &PlayerId, team_hint: Option<TeamSide>) -> Option<PlayerIdentity> {
        let sides: &[TeamSide] = match team_hint {
            Some(TeamSide::Home) => &[TeamSide::Home],
            Some(TeamSide::Away) => &[TeamSide::Away],
            None => &[TeamSide::Home, TeamSide::Away],
        };
        for &side in sides {
            if let Some(player) = self.roster(side).iter().find(|p| &p.id == id) {
                return Some(PlayerIdentity {
                    name: player.display_name(),
                    jersey_number: player.jersey_number,
                    team: side,
                });
            }
        }

        team_hint.map(|team| PlayerIdentity {
            name: placeholder_name(id),
            jersey_number: None,
            team,
        })
    }
}
