use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Player identifier as produced by trackers.
///
/// Trackers emit both numeric and string ids; they are normalised to their
/// string form so `10` and `"10"` refer to the same player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id names no player.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for PlayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PlayerIdVisitor;

        impl Visitor<'_> for PlayerIdVisitor {
            type Value = PlayerId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer player id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PlayerId, E> {
                Ok(PlayerId(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<PlayerId, E> {
                Ok(PlayerId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<PlayerId, E> {
                Ok(PlayerId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<PlayerId, E> {
                Ok(PlayerId(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<PlayerId, E> {
                let integral = v.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&v);
                if integral {
                    Ok(PlayerId(format!("{}", v as i64)))
                } else {
                    Err(E::invalid_value(de::Unexpected::Float(v), &self))
                }
            }
        }

        deserializer.deserialize_any(PlayerIdVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn as_str(self) -> &'static str {
        match self {
            TeamSide::Home => "home",
            TeamSide::Away => "away",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "home" => Some(TeamSide::Home),
            "away" => Some(TeamSide::Away),
            _ => None,
        }
    }
}

/// Pitch position in metres: x along the length (0-105), y across (0-68).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Coordinates) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Every event kind the tracker UI can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum EventKind {
    // Attacking
    Shot,
    Goal,
    Assist,
    OwnGoal,
    Pass,
    Cross,
    Dribble,
    SuccessfulDribble,

    // Pass subtypes (always completed)
    SupportPass,
    OffensivePass,
    LongPass,
    ForwardPass,
    BackwardPass,
    LateralPass,
    DecisivePass,
    SuccessfulCross,

    // Defending
    Tackle,
    Interception,
    Clearance,
    Block,
    Save,
    Pressure,

    // Ball control
    BallRecovered,
    BallLost,
    Contact,
    AerialDuelWon,
    AerialDuelLost,

    // Discipline
    Foul,
    Card,
    YellowCard,
    RedCard,

    // Set pieces and restarts
    Corner,
    Offside,
    FreeKick,
    Penalty,
    ThrowIn,
    GoalKick,
    SixMeterViolation,
    Substitution,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Shot => "shot",
            EventKind::Goal => "goal",
            EventKind::Assist => "assist",
            EventKind::OwnGoal => "ownGoal",
            EventKind::Pass => "pass",
            EventKind::Cross => "cross",
            EventKind::Dribble => "dribble",
            EventKind::SuccessfulDribble => "successfulDribble",
            EventKind::SupportPass => "supportPass",
            EventKind::OffensivePass => "offensivePass",
            EventKind::LongPass => "longPass",
            EventKind::ForwardPass => "forwardPass",
            EventKind::BackwardPass => "backwardPass",
            EventKind::LateralPass => "lateralPass",
            EventKind::DecisivePass => "decisivePass",
            EventKind::SuccessfulCross => "successfulCross",
            EventKind::Tackle => "tackle",
            EventKind::Interception => "interception",
            EventKind::Clearance => "clearance",
            EventKind::Block => "block",
            EventKind::Save => "save",
            EventKind::Pressure => "pressure",
            EventKind::BallRecovered => "ballRecovered",
            EventKind::BallLost => "ballLost",
            EventKind::Contact => "contact",
            EventKind::AerialDuelWon => "aerialDuelWon",
            EventKind::AerialDuelLost => "aerialDuelLost",
            EventKind::Foul => "foul",
            EventKind::Card => "card",
            EventKind::YellowCard => "yellowCard",
            EventKind::RedCard => "redCard",
            EventKind::Corner => "corner",
            EventKind::Offside => "offside",
            EventKind::FreeKick => "freeKick",
            EventKind::Penalty => "penalty",
            EventKind::ThrowIn => "throwIn",
            EventKind::GoalKick => "goalKick",
            EventKind::SixMeterViolation => "sixMeterViolation",
            EventKind::Substitution => "substitution",
        }
    }

    /// Parse a tracker tag, accepting the legacy hyphenated spellings.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "shot" => EventKind::Shot,
            "goal" => EventKind::Goal,
            "assist" => EventKind::Assist,
            "ownGoal" => EventKind::OwnGoal,
            "pass" => EventKind::Pass,
            "cross" => EventKind::Cross,
            "dribble" => EventKind::Dribble,
            "successfulDribble" => EventKind::SuccessfulDribble,
            "supportPass" => EventKind::SupportPass,
            "offensivePass" => EventKind::OffensivePass,
            "longPass" => EventKind::LongPass,
            "forwardPass" => EventKind::ForwardPass,
            "backwardPass" => EventKind::BackwardPass,
            "lateralPass" => EventKind::LateralPass,
            "decisivePass" => EventKind::DecisivePass,
            "successfulCross" => EventKind::SuccessfulCross,
            "tackle" => EventKind::Tackle,
            "interception" => EventKind::Interception,
            "clearance" => EventKind::Clearance,
            "block" => EventKind::Block,
            "save" => EventKind::Save,
            "pressure" => EventKind::Pressure,
            "ballRecovered" => EventKind::BallRecovered,
            "ballLost" => EventKind::BallLost,
            "contact" => EventKind::Contact,
            "aerialDuelWon" => EventKind::AerialDuelWon,
            "aerialDuelLost" => EventKind::AerialDuelLost,
            "foul" => EventKind::Foul,
            "card" => EventKind::Card,
            "yellowCard" => EventKind::YellowCard,
            "redCard" => EventKind::RedCard,
            "corner" => EventKind::Corner,
            "offside" => EventKind::Offside,
            "freeKick" | "free-kick" => EventKind::FreeKick,
            "penalty" => EventKind::Penalty,
            "throwIn" | "throw-in" => EventKind::ThrowIn,
            "goalKick" | "goal-kick" => EventKind::GoalKick,
            "sixMeterViolation" | "6MeterViolation" => EventKind::SixMeterViolation,
            "substitution" => EventKind::Substitution,
            _ => return None,
        };
        Some(kind)
    }

    /// Specialised pass kinds, each recorded as a completed pass.
    pub fn is_pass_subtype(self) -> bool {
        matches!(
            self,
            EventKind::SupportPass
                | EventKind::OffensivePass
                | EventKind::LongPass
                | EventKind::ForwardPass
                | EventKind::BackwardPass
                | EventKind::LateralPass
                | EventKind::DecisivePass
                | EventKind::SuccessfulCross
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        EventKind::from_tag(&tag)
            .ok_or_else(|| de::Error::custom(format!("unknown event type '{}'", tag)))
    }
}

/// A single tracked match event.
///
/// Decoding is lenient: an unrecognised `type` or `team` decodes to `None`
/// and malformed coordinates are discarded, so one bad field never rejects
/// a whole batch. The aggregator drops events without kind or team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub match_id: String,
    /// Seconds from kick-off
    #[serde(default)]
    pub timestamp: f64,
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: Option<EventKind>,
    #[serde(default, deserialize_with = "lenient_team")]
    pub team: Option<TeamSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub event_data: Value,
}

fn lenient_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<EventKind>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(tag)) => EventKind::from_tag(&tag),
        _ => None,
    })
}

fn lenient_team<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<TeamSide>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(tag)) => TeamSide::from_tag(&tag),
        _ => None,
    })
}

/// Decode a field, falling back to its default when the value has the
/// wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

impl MatchEvent {
    pub fn new(kind: EventKind, team: TeamSide) -> Self {
        Self {
            id: String::new(),
            match_id: String::new(),
            timestamp: 0.0,
            kind: Some(kind),
            team: Some(team),
            player_id: None,
            coordinates: None,
            event_data: Value::Null,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_player(mut self, player_id: impl Into<PlayerId>) -> Self {
        self.player_id = Some(player_id.into());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.coordinates = Some(Coordinates::new(x, y));
        self
    }

    pub fn with_timestamp(mut self, seconds: f64) -> Self {
        self.timestamp = seconds;
        self
    }

    pub fn with_data(mut self, event_data: Value) -> Self {
        self.event_data = event_data;
        self
    }

    /// Decode the kind-specific payload, falling back to its default.
    pub fn payload<T>(&self) -> T
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        match T::deserialize(&self.event_data) {
            Ok(payload) => payload,
            Err(err) => {
                if !self.event_data.is_null() {
                    log::debug!("Event '{}': unreadable event_data ({}), using defaults", self.id, err);
                }
                T::default()
            }
        }
    }
}

/// Payload of `shot` events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShotEventData {
    #[serde(deserialize_with = "lenient")]
    pub on_target: bool,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub is_goal: Option<bool>,
    #[serde(
        deserialize_with = "lenient",
        rename = "isHeader",
        alias = "is_header",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_header: Option<bool>,
    #[serde(
        deserialize_with = "lenient",
        rename = "hitPost",
        alias = "hit_post",
        skip_serializing_if = "Option::is_none"
    )]
    pub hit_post: Option<bool>,
    /// open_play, fast_break, corner_related, direct_free_kick, penalty, ...
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub situation: Option<String>,
    /// normal, volley, half_volley, lob, header, ...
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<String>,
    /// right_foot, left_foot, head, other
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub body_part_used: Option<String>,
    /// through_ball, cross, pull_back, cut_back, rebound, ...
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub assist_type: Option<String>,
}

/// Payload of `pass` events and the pass subtypes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PassEventData {
    #[serde(deserialize_with = "lenient")]
    pub success: bool,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub recipient_player_id: Option<PlayerId>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub end_coordinates: Option<Coordinates>,
}

/// Payload of `pressure` events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PressureEventData {
    /// regain_possession, forced_turnover_error, forced_pass_backwards, no_effect, foul_won
    #[serde(deserialize_with = "lenient")]
    pub outcome: String,
}

impl PressureEventData {
    pub fn is_successful(&self) -> bool {
        matches!(
            self.outcome.as_str(),
            "regain_possession" | "forced_turnover_error" | "foul_won"
        )
    }

    pub fn is_regain(&self) -> bool {
        self.outcome == "regain_possession"
    }
}

/// Payload of generic `card` events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CardEventData {
    /// yellow or red
    #[serde(deserialize_with = "lenient")]
    pub card_type: String,
}
