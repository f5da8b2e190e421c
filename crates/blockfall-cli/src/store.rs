use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    model::leaderboard::Leaderboard,
    schema::{save::SavedGame, settings::Settings},
    util,
};

/// Maximum number of saved games.
pub const MAX_SAVES: usize = 5;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("all {MAX_SAVES} save slots are in use, delete a saved game first")]
pub struct SaveSlotsFull;

/// An occupied save slot.
///
/// `game` holds the read error when the file cannot be parsed, so the slot
/// can still be listed and deleted.
#[derive(Debug, Clone)]
pub struct SaveSlot {
    pub slot: usize,
    pub game: Result<SavedGame, String>,
}

/// JSON files under the data directory.
///
/// ```text
/// <root>/settings.json
/// <root>/leaderboard.json
/// <root>/saves/game1.json .. game5.json
/// ```
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    fn leaderboard_path(&self) -> PathBuf {
        self.root.join("leaderboard.json")
    }

    fn save_path(&self, slot: usize) -> PathBuf {
        self.root.join("saves").join(format!("game{slot}.json"))
    }

    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        util::read_json_file_or_default("settings", self.settings_path())
    }

    pub fn save_settings(&self, settings: &Settings) -> anyhow::Result<()> {
        util::write_json_file("settings", self.settings_path(), settings)
    }

    pub fn load_leaderboard(&self) -> anyhow::Result<Leaderboard> {
        let mut leaderboard: Leaderboard =
            util::read_json_file_or_default("leaderboard", self.leaderboard_path())?;
        leaderboard.normalize();
        Ok(leaderboard)
    }

    pub fn save_leaderboard(&self, leaderboard: &Leaderboard) -> anyhow::Result<()> {
        util::write_json_file("leaderboard", self.leaderboard_path(), leaderboard)
    }

    fn slot_in_use(&self, slot: usize) -> anyhow::Result<bool> {
        let path = self.save_path(slot);
        path.try_exists()
            .with_context(|| format!("Failed to check save file: {}", path.display()))
    }

    /// Lists occupied save slots in slot order.
    ///
    /// A slot whose file fails to load is listed with its error.
    pub fn list_saves(&self) -> anyhow::Result<Vec<SaveSlot>> {
        let mut saves = vec![];
        for slot in 1..=MAX_SAVES {
            if !self.slot_in_use(slot)? {
                continue;
            }
            let game = self.load_game(slot).map_err(|err| {
                log::warn!("saved game in slot {slot} is unreadable: {err:#}");
                format!("{err:#}")
            });
            saves.push(SaveSlot { slot, game });
        }
        Ok(saves)
    }

    /// Writes `game` into the first free slot and returns that slot.
    pub fn save_game(&self, game: &SavedGame) -> anyhow::Result<usize> {
        for slot in 1..=MAX_SAVES {
            if !self.slot_in_use(slot)? {
                util::write_json_file("saved game", self.save_path(slot), game)?;
                log::info!("saved game {:?} to slot {slot}", game.name);
                return Ok(slot);
            }
        }
        Err(SaveSlotsFull.into())
    }

    pub fn load_game(&self, slot: usize) -> anyhow::Result<SavedGame> {
        util::read_json_file("saved game", self.save_path(slot))
    }

    pub fn delete_game(&self, slot: usize) -> anyhow::Result<()> {
        let path = self.save_path(slot);
        fs::remove_file(&path)
            .with_context(|| format!("Failed to delete saved game: {}", path.display()))?;
        log::info!("deleted saved game in slot {slot}");
        Ok(())
    }
}
