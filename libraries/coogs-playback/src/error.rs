//! Error types for playback

use thiserror::Error;

/// Playback errors
///
/// Player operations never fail; these come from the audio element binding.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The element has no source loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Track has no playable source
    #[error("Track has no audio source: {0}")]
    MissingSource(String),

    /// Invalid seek position
    #[error("Invalid seek position: {0:?}")]
    InvalidSeekPosition(std::time::Duration),

    /// The element refused to start (autoplay policy, decode failure)
    #[error("Play rejected: {0}")]
    PlayRejected(String),

    /// Audio element error
    #[error("Audio element error: {0}")]
    Element(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
