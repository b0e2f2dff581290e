//! Play-count telemetry
//!
//! Every started track produces a `PlayReport`. Dispatch is best-effort:
//! implementations must return immediately and swallow their own failures,
//! so reporting can never hold up playback.

use chrono::{DateTime, Utc};
use coogs_core::{ListenerId, SongId};
use serde::{Deserialize, Serialize};

/// One play of one song by one listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayReport {
    /// Listener who played the song
    pub listener_id: ListenerId,
    /// Song that started playing
    pub song_id: SongId,
    /// When playback started
    pub played_at: DateTime<Utc>,
}

impl PlayReport {
    /// Report a play starting now
    pub fn now(listener_id: ListenerId, song_id: SongId) -> Self {
        Self {
            listener_id,
            song_id,
            played_at: Utc::now(),
        }
    }
}

/// Non-blocking sink for play reports
///
/// The caller never learns whether the report reached the backend.
pub trait PlayTelemetry: Send + Sync {
    /// Hand off a report without waiting
    fn dispatch(&self, report: PlayReport);
}

/// Telemetry sink that drops every report
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl PlayTelemetry for NoopTelemetry {
    fn dispatch(&self, _report: PlayReport) {}
}
