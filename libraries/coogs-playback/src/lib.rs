//! Coogs Music - Playback
//!
//! Platform-agnostic now-playing state for the Coogs Music client.
//!
//! This crate provides:
//! - The player store: one current track, play/pause, queue, repeat
//! - Play-all and play-shuffled (unseeded Fisher-Yates)
//! - Best-effort play-count telemetry that never blocks playback
//! - The play bar: binding of the store to a single audio element
//!
//! # Architecture
//!
//! `coogs-playback` holds no audio output and no network client:
//! - Audio output is provided via the `AudioElement` trait
//! - Play reports leave through the `PlayTelemetry` trait
//!
//! The store is an explicit value passed to whoever needs it; there is no
//! global instance.
//!
//! # Example: Play an album
//!
//! ```rust
//! use coogs_core::{SongId, Track};
//! use coogs_playback::{PlayerState, PlayerStore};
//!
//! let mut player = PlayerStore::default();
//!
//! let album = vec![
//!     Track::new(SongId::new(1), "Intro", "The Coogs"),
//!     Track::new(SongId::new(2), "Night Drive", "The Coogs"),
//! ];
//! player.play_list(album, 0);
//! assert_eq!(player.state(), PlayerState::Playing);
//!
//! // Audio element reports the end of the first track
//! player.on_track_ended();
//! assert_eq!(player.position(), 1);
//!
//! player.toggle();
//! assert_eq!(player.state(), PlayerState::Loaded);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use coogs_core::Track;
//! use coogs_playback::{AudioElement, PlayBar, PlayerStore, Result};
//! use std::time::Duration;
//!
//! // Implement AudioElement for your platform
//! struct MyAudio {
//!     // ... platform-specific player handle
//! }
//!
//! impl AudioElement for MyAudio {
//!     fn load(&mut self, track: &Track) -> Result<()> { Ok(()) }
//!     fn unload(&mut self) {}
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn set_volume(&mut self, volume: f64) {}
//!     fn set_loop(&mut self, looping: bool) {}
//!     fn seek(&mut self, position: Duration) -> Result<()> { Ok(()) }
//!     fn current_time(&self) -> Duration { Duration::ZERO }
//!     fn duration(&self) -> Option<Duration> { None }
//! }
//!
//! let mut player = PlayerStore::default();
//! let mut bar = PlayBar::new(MyAudio {});
//!
//! // Wire element events to the bar
//! bar.on_time_update(&mut player);
//! bar.on_ended(&mut player);
//! bar.sync(&player);
//! ```

mod audio;
mod error;
mod events;
mod history;
mod play_bar;
mod player;
mod queue;
mod shuffle;
mod telemetry;
pub mod types;
mod volume;

// Public exports
pub use audio::AudioElement;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use play_bar::PlayBar;
pub use player::PlayerStore;
pub use shuffle::{shuffle_tracks, shuffle_tracks_with};
pub use telemetry::{NoopTelemetry, PlayReport, PlayTelemetry};
pub use types::{PlaybackSnapshot, PlayerConfig, PlayerState};
