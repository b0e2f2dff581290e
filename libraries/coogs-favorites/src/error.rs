//! Error types for the favorites cache

use thiserror::Error;

/// Errors reported by a favorites backend
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// Request to the backend failed
    #[error("Backend request failed: {0}")]
    Backend(String),

    /// Backend answered with something unusable
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

impl FavoritesError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Result type for favorites operations
pub type Result<T> = std::result::Result<T, FavoritesError>;
