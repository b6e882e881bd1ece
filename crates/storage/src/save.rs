//! Persistent player state: preferences, unlocked achievements, and where
//! the player left off.
//!
//! The format is intentionally forgiving. Saves written by older or newer
//! builds load field-by-field, unknown fields are ignored, and a blob that
//! does not parse at all yields a default state rather than an error; a
//! broken save file should never stop a game from starting.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use types::{Difficulty, GameMode};

use crate::error::StorageError;

/// Player preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub tutorial_seen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            tutorial_seen: false,
        }
    }
}

/// Everything written to disk between games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveState {
    pub settings: Settings,
    /// Unlocked achievement ids, in unlock order.
    pub achievements: Vec<String>,
    /// Screen to restore on launch.
    pub game_screen: String,
    pub difficulty: Difficulty,
    pub game_mode: GameMode,
    pub game_in_progress: bool,
}

impl Default for SaveState {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            achievements: Vec::new(),
            game_screen: "menu".to_string(),
            difficulty: Difficulty::Normal,
            game_mode: GameMode::Classic,
            game_in_progress: false,
        }
    }
}

impl SaveState {
    /// Parses a save blob. Missing fields fill from defaults; a blob that is
    /// not valid JSON at all yields the default state.
    pub fn from_json(raw: &str) -> SaveState {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Records an achievement id, keeping the list free of duplicates.
    pub fn record_achievement(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.achievements.contains(&id) {
            self.achievements.push(id);
        }
    }
}

/// Handle on the save file's location.
#[derive(Debug, Clone)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the save state. A missing or unreadable-as-JSON file is a
    /// default state; only real I/O failures surface as errors.
    pub fn load(&self) -> Result<SaveState, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SaveState::default()),
            Err(e) => return Err(StorageError::Io(e)),
        };
        Ok(SaveState::from_json(&raw))
    }

    /// Writes the save state, creating parent directories as needed.
    pub fn save(&self, state: &SaveState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, state.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = SaveFile::new(dir.path().join("save.json"));

        let mut state = SaveState::default();
        state.settings.sound_enabled = false;
        state.difficulty = Difficulty::Hard;
        state.game_mode = GameMode::Meltdown;
        state.game_in_progress = true;
        state.record_achievement("first_profit");

        file.save(&state).unwrap();
        assert_eq!(file.load().unwrap(), state);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = SaveFile::new(dir.path().join("absent.json"));
        assert_eq!(file.load().unwrap(), SaveState::default());
    }

    #[test]
    fn test_partial_blob_fills_missing_fields() {
        let state = SaveState::from_json(r#"{"difficulty":"hard"}"#);
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(state.game_mode, GameMode::Classic);
        assert_eq!(state.settings, Settings::default());
        assert!(state.achievements.is_empty());
    }

    #[test]
    fn test_malformed_blob_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = SaveFile::new(dir.path().join("save.json"));
        fs::write(file.path(), "{ this is not json").unwrap();
        assert_eq!(file.load().unwrap(), SaveState::default());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let state = SaveState::from_json(r#"{"difficulty":"easy","shiny_new_field":123}"#);
        assert_eq!(state.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = SaveFile::new(dir.path().join("nested").join("deeper").join("save.json"));
        file.save(&SaveState::default()).unwrap();
        assert!(file.path().exists());
    }

    #[test]
    fn test_record_achievement_deduplicates() {
        let mut state = SaveState::default();
        state.record_achievement("bear_hunter");
        state.record_achievement("bear_hunter");
        state.record_achievement("all_in");
        assert_eq!(state.achievements, vec!["bear_hunter", "all_in"]);
    }
}
