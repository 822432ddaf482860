//! Player identification and attributes.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Ids are opaque strings chosen by the
//! caller at game start ("H1", "R3", ...); insertion order at `StartGame`
//! defines the turn order.
//!
//! ## PlayerAttrs
//!
//! Open player record. The engine only ever reads `brain` and `color`;
//! any extra fields supplied at game start are preserved verbatim through
//! a serialization round-trip.

use serde::{Deserialize, Serialize};

/// Player identifier.
///
/// Serialized as a bare JSON string, so state blobs keep the caller's ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// What drives a player's decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brain {
    Human,
    Robot,
}

impl Brain {
    /// Check whether this brain auto-plays its turns.
    #[must_use]
    pub fn is_robot(self) -> bool {
        matches!(self, Brain::Robot)
    }
}

/// Per-player attributes, fixed at game start.
///
/// The record is open: fields beyond `brain` and `color` are captured in
/// `extra` and flattened back on serialization, so callers can attach
/// their own metadata without the engine interpreting it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerAttrs {
    /// Human or robot. Robots auto-skip their turns.
    pub brain: Brain,

    /// Opaque display tag; the engine never interprets it.
    pub color: String,

    /// Caller-supplied fields the engine carries but ignores.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PlayerAttrs {
    /// Create attributes with no extra fields.
    #[must_use]
    pub fn new(brain: Brain, color: impl Into<String>) -> Self {
        Self {
            brain,
            color: color.into(),
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let id = PlayerId::new("H1");

        assert_eq!(id.as_str(), "H1");
        assert_eq!(format!("{}", id), "H1");
        assert_eq!(PlayerId::from("H1"), id);
    }

    #[test]
    fn test_player_id_serializes_as_string() {
        let id = PlayerId::new("R3");
        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, "\"R3\"");

        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_brain_serde_names() {
        assert_eq!(serde_json::to_string(&Brain::Human).unwrap(), "\"human\"");
        assert_eq!(serde_json::to_string(&Brain::Robot).unwrap(), "\"robot\"");

        let brain: Brain = serde_json::from_str("\"robot\"").unwrap();
        assert!(brain.is_robot());
        assert!(!Brain::Human.is_robot());
    }

    #[test]
    fn test_attrs_round_trip() {
        let attrs = PlayerAttrs::new(Brain::Human, "blue");
        let json = serde_json::to_string(&attrs).unwrap();
        let back: PlayerAttrs = serde_json::from_str(&json).unwrap();

        assert_eq!(back, attrs);
    }

    #[test]
    fn test_attrs_preserve_extra_fields() {
        let json = r#"{"brain":"robot","color":"green","mood":"grumpy","level":3}"#;
        let attrs: PlayerAttrs = serde_json::from_str(json).unwrap();

        assert!(attrs.brain.is_robot());
        assert_eq!(attrs.color, "green");
        assert_eq!(attrs.extra["mood"], "grumpy");
        assert_eq!(attrs.extra["level"], 3);

        let back = serde_json::to_string(&attrs).unwrap();
        let reparsed: PlayerAttrs = serde_json::from_str(&back).unwrap();
        assert_eq!(reparsed, attrs);
    }
}
