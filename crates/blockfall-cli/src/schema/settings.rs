use serde::{Deserialize, Serialize};

use crate::model::key_bindings::KeyBindings;

/// Preferences remembered between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key bindings used for the most recent game
    pub key_bindings: KeyBindings,
}
