use blockfall_engine::SessionRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::key_bindings::KeyBindings;

/// A game saved from the pause menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Name entered by the player (may be empty)
    pub name: String,
    /// Timestamp when the game was saved (ISO 8601 format)
    pub saved_at: DateTime<Utc>,
    /// Key bindings in effect when the game was saved
    pub key_bindings: KeyBindings,
    /// Cheats, score, level, and locked pieces
    #[serde(flatten)]
    pub session: SessionRecord,
}

impl SavedGame {
    /// Name shown in menus: the entered name, or a placeholder.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "(unnamed)"
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Cheat, CheatSet};

    use super::*;

    #[test]
    fn test_session_fields_are_flattened() {
        let saved = SavedGame {
            name: "lunch break".to_owned(),
            saved_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            key_bindings: KeyBindings::default(),
            session: SessionRecord {
                cheats: [Cheat::SlowGame].into_iter().collect::<CheatSet>(),
                score: 42,
                level: 3,
                locked_pieces: vec![],
            },
        };
        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["score"], 42);
        assert_eq!(json["level"], 3);
        assert_eq!(json["cheats"], serde_json::json!(["SlowGame"]));
        assert_eq!(json["saved_at"], "2023-11-14T22:13:20Z");
        assert!(json.get("session").is_none());

        let parsed: SavedGame = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, saved);
    }

    #[test]
    fn test_display_name_placeholder() {
        let saved: SavedGame = serde_json::from_value(serde_json::json!({
            "name": "  ",
            "saved_at": "2024-01-01T00:00:00Z",
            "key_bindings": KeyBindings::default(),
            "score": 0,
            "level": 0,
            "locked_pieces": [],
        }))
        .unwrap();
        assert_eq!(saved.display_name(), "(unnamed)");
        assert!(saved.session.cheats.is_empty());
    }
}
