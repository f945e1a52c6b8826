use serde::{Deserialize, Serialize};

use super::events::{PlayerId, TeamSide};

/// Roster entry supplied by the caller. Read-only to the aggregation core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Older rosters carry the display name here instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default, alias = "number", skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamSide>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            player_name: None,
            jersey_number: None,
            team: None,
        }
    }

    pub fn with_number(mut self, jersey_number: u32) -> Self {
        self.jersey_number = Some(jersey_number);
        self
    }

    /// `name`, then `player_name`, then `Player {id}`.
    pub fn display_name(&self) -> String {
        [self.name.as_deref(), self.player_name.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_name(&self.id))
    }
}

/// Name used for players missing from both rosters.
pub fn placeholder_name(id: &PlayerId) -> String {
    format!("Player {}", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name_fallbacks() {
        let named = Player::new("H1", "Home Player 1");
        assert_eq!(named.display_name(), "Home Player 1");

        let legacy: Player = serde_json::from_value(json!({"id": 4, "player_name": "P. Four"})).unwrap();
        assert_eq!(legacy.display_name(), "P. Four");

        let anonymous: Player = serde_json::from_value(json!({"id": 5, "name": ""})).unwrap();
        assert_eq!(anonymous.display_name(), "Player 5");
    }

    #[test]
    fn test_number_alias() {
        let player: Player = serde_json::from_value(json!({"id": "A1", "name": "Keeper", "number": 1})).unwrap();
        assert_eq!(player.jersey_number, Some(1));
    }
}
