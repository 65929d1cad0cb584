//! JSON save-file persistence.
//!
//! The whole game state serializes as one pretty-printed JSON document.
//! Loading is forgiving: a missing or corrupt save yields a fresh state
//! (the corrupt file is removed so the next save starts clean), and
//! derived fields are recomputed rather than trusted from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::constants::SAVE_FILE_NAME;
use crate::economy;
use crate::state::GameState;

#[derive(Debug, Clone)]
pub struct SaveStore {
    save_path: PathBuf,
}

impl SaveStore {
    /// Opens the platform-default save location, creating the data
    /// directory if needed.
    pub fn new() -> io::Result<Self> {
        let dirs = ProjectDirs::from("", "", "gymsim").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no home directory available")
        })?;
        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            save_path: data_dir.join(SAVE_FILE_NAME),
        })
    }

    /// Uses an explicit save file path instead of the platform default.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Writes the state to disk, stamping the save time first.
    pub fn save(&self, state: &mut GameState) -> io::Result<()> {
        state.last_saved_at = chrono::Utc::now().timestamp();
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.save_path, json)
    }

    /// Reads the save file, falling back to a fresh state when the file
    /// is missing or unreadable. Derived fields are recomputed on load.
    pub fn load(&self) -> GameState {
        let mut state = match fs::read_to_string(&self.save_path) {
            Ok(contents) => match serde_json::from_str::<GameState>(&contents) {
                Ok(state) => state,
                Err(_) => {
                    // Drop the corrupt file so the next autosave replaces it.
                    let _ = fs::remove_file(&self.save_path);
                    GameState::new()
                }
            },
            Err(_) => GameState::new(),
        };

        state.gains_per_second = economy::gains_per_second(state.upgrades.auto_clicker.level);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;

    fn temp_save_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("gymsim-test-{}-{}", std::process::id(), name));
        path
    }

    #[test]
    fn load_without_file_yields_fresh_state() {
        let store = SaveStore::at_path(temp_save_path("missing.json"));
        let state = store.load();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = temp_save_path("roundtrip.json");
        let store = SaveStore::at_path(&path);

        let mut state = GameState::new();
        state.gains = 12_345;
        state.prestige_count = 2;
        state.multiplier = 1.4;
        state.upgrades.auto_clicker.level = 3;
        state.unlock_achievement(AchievementId::FirstClick);

        store.save(&mut state).unwrap();
        assert!(state.last_saved_at > 0);

        let loaded = store.load();
        assert_eq!(loaded.gains, 12_345);
        assert_eq!(loaded.prestige_count, 2);
        assert_eq!(loaded.multiplier, 1.4);
        assert!(loaded.has_achievement(AchievementId::FirstClick));
        // Recomputed from the auto-clicker level, not read from disk.
        assert_eq!(loaded.gains_per_second, 4);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupt_save_is_discarded() {
        let path = temp_save_path("corrupt.json");
        fs::write(&path, "{ not json at all").unwrap();

        let store = SaveStore::at_path(&path);
        let state = store.load();
        assert_eq!(state, GameState::new());
        // The unreadable file is gone.
        assert!(!path.exists());
    }

    #[test]
    fn unknown_fields_do_not_break_loading() {
        let path = temp_save_path("forward.json");
        fs::write(&path, r#"{"gains": 7, "someFutureField": true}"#).unwrap();

        let store = SaveStore::at_path(&path);
        let state = store.load();
        assert_eq!(state.gains, 7);

        let _ = fs::remove_file(&path);
    }
}
