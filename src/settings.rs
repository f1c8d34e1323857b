//! Game settings and preferences
//!
//! Persisted alongside the high score through the storage layer. The core
//! simulation never reads these; they exist for the host UI/audio layers.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            volume: 0.7,
        }
    }
}

impl GameSettings {
    /// Clamp volume into the valid range after deserializing untrusted data
    pub fn sanitized(mut self) -> Self {
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }
}
