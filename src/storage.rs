//! High score and settings persistence
//!
//! The storage backend is an explicit dependency injected into the game
//! rather than a process-wide singleton, so tests run against the in-memory
//! store and the host picks the real backend. Persistence failures never
//! reach the simulation: load falls back to defaults, save logs and moves on.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::settings::GameSettings;

/// Persistence hook for the high score. Read once at scoreboard
/// construction, written whenever the high score increases.
pub trait HighScoreStore {
    fn load_high_score(&self) -> u32;
    fn save_high_score(&mut self, score: u32);
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    high_score: u32,
    save_count: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            save_count: 0,
        }
    }

    /// Number of times `save_high_score` has been called; lets tests verify
    /// the persist-once-per-exceedance contract.
    pub fn save_count(&self) -> u32 {
        self.save_count
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> u32 {
        self.high_score
    }

    fn save_high_score(&mut self, score: u32) {
        self.high_score = score;
        self.save_count += 1;
    }
}

/// On-disk JSON envelope shared by the high score and settings.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredData {
    #[serde(default)]
    high_score: u32,
    #[serde(default)]
    settings: GameSettings,
}

/// JSON-file-backed store for native builds.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read(&self) -> StoredData {
        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => data,
                Err(err) => {
                    log::warn!("corrupt save file {:?}, starting fresh: {err}", self.path);
                    StoredData::default()
                }
            },
            Err(_) => StoredData::default(),
        }
    }

    fn write(&self, data: &StoredData) {
        let json = match serde_json::to_string_pretty(data) {
            Ok(json) => json,
            Err(err) => {
                log::error!("failed to serialize save data: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::error!("failed to write {:?}: {err}", self.path);
        }
    }

    pub fn load_settings(&self) -> GameSettings {
        self.read().settings.sanitized()
    }

    pub fn save_settings(&mut self, settings: &GameSettings) {
        let mut data = self.read();
        data.settings = settings.clone();
        self.write(&data);
        log::info!("settings saved");
    }
}

impl HighScoreStore for JsonFileStore {
    fn load_high_score(&self) -> u32 {
        self.read().high_score
    }

    fn save_high_score(&mut self, score: u32) {
        let mut data = self.read();
        data.high_score = score;
        self.write(&data);
        log::debug!("high score saved: {score}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_path(tag: &str) -> PathBuf {
        env::temp_dir().join(format!("slide-plane-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_high_score(), 0);

        store.save_high_score(1234);
        assert_eq!(store.load_high_score(), 1234);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load_high_score(), 0);

        store.save_high_score(777);
        store.save_settings(&GameSettings {
            sound_enabled: false,
            music_enabled: true,
            volume: 0.5,
        });

        // A fresh store reading the same file sees both values
        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load_high_score(), 777);
        assert!(!reopened.load_settings().sound_enabled);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json at all {{{").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load_high_score(), 0);
        assert_eq!(store.load_settings(), GameSettings::default());

        let _ = fs::remove_file(&path);
    }
}
