//! Core types for playback management

use coogs_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Player state
///
/// Derived from the current track and the play flag; never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// No current track
    Idle,

    /// Current track set, not playing
    Loaded,

    /// Currently playing
    Playing,
}

/// Configuration for the player store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Maximum history size (default: 50)
    pub history_size: usize,

    /// Initial volume (0-100, default: 80)
    pub volume: u8,

    /// Initial repeat flag (default: false)
    pub repeat: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            history_size: 50,
            volume: 80,
            repeat: false,
        }
    }
}

/// Read-only view of everything the play bar and pages render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    /// Now playing
    pub current_track: Option<Track>,

    /// Whether audio should be playing
    pub playing: bool,

    /// Current queue
    pub queue: Vec<Track>,

    /// Index of the current track in the queue
    pub position: usize,

    /// Playback time within the current track
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,

    /// Volume (0-100)
    pub volume: u8,

    /// Repeat current track
    pub repeat: bool,
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}
