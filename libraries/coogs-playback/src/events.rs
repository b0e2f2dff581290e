//! Player Events
//!
//! Event-based communication for UI synchronization. Events queue up inside
//! the player and are drained by whichever view renders now-playing state.

use crate::types::PlayerState;
use coogs_core::SongId;
use serde::{Deserialize, Serialize};

/// Events emitted by the player store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Player state changed (idle, loaded, playing)
    StateChanged {
        /// The new state
        state: PlayerState,
    },

    /// Now-playing track changed
    TrackChanged {
        /// ID of the new (current) track
        song_id: SongId,
        /// ID of the previous track (if any)
        previous_song_id: Option<SongId>,
    },

    /// Current track restarted from the beginning (repeat or previous)
    TrackRestarted {
        /// ID of the restarted track
        song_id: SongId,
    },

    /// Queue replaced
    QueueChanged {
        /// New queue length
        length: usize,
        /// Index of the current track
        position: usize,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Repeat flag changed
    RepeatChanged {
        /// New repeat flag
        repeat: bool,
    },

    /// Reached the end of the queue without repeat
    PlaybackEnded {
        /// ID of the last track played
        last_song_id: SongId,
    },
}
