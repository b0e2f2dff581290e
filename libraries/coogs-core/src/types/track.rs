/// Track domain type
use crate::types::SongId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Song as projected by the backend for playback and display
///
/// Responses are untyped JSON, so every field is defaulted. A track whose
/// `song_id` is missing is treated as invalid by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Backend song identifier
    #[serde(default, alias = "song_id")]
    pub song_id: Option<SongId>,

    /// Song title
    #[serde(default)]
    pub title: String,

    /// Display name of the performing artist
    #[serde(default, alias = "artist_name")]
    pub artist_name: String,

    /// Duration in whole seconds
    #[serde(default, alias = "duration_seconds")]
    pub duration_seconds: u32,

    /// Cover art URL
    #[serde(default, alias = "cover_url", skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,

    /// Streamable audio URL
    #[serde(default, alias = "audio_url", skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(song_id: SongId, title: impl Into<String>, artist_name: impl Into<String>) -> Self {
        Self {
            song_id: Some(song_id),
            title: title.into(),
            artist_name: artist_name.into(),
            duration_seconds: 0,
            cover_url: None,
            audio_url: None,
        }
    }

    /// Set the duration in seconds
    #[must_use]
    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration_seconds = seconds;
        self
    }

    /// Set the audio URL
    #[must_use]
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_seconds))
    }

    /// Whether the track carries a song id
    pub fn is_valid(&self) -> bool {
        self.song_id.is_some()
    }
}
