//! Backend trait for favorites and pins
//!
//! Abstracts the REST endpoints so the cache can run against the real client,
//! a test double, or an offline store.

use crate::error::Result;
use crate::types::SongStatus;
use async_trait::async_trait;
use coogs_core::{ListenerId, SongId};

/// Persistence for likes and the single pin
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesBackend: Send + Sync {
    /// Favorite/pin status for a batch of songs
    async fn fetch_status(&self, listener_id: ListenerId, song_ids: &[SongId])
        -> Result<SongStatus>;

    /// Like a song
    async fn add_favorite(&self, listener_id: ListenerId, song_id: SongId) -> Result<()>;

    /// Remove a like
    async fn remove_favorite(&self, listener_id: ListenerId, song_id: SongId) -> Result<()>;

    /// Pin a song, replacing any previous pin
    async fn set_pin(&self, listener_id: ListenerId, song_id: SongId) -> Result<()>;

    /// Remove the listener's pin
    async fn clear_pin(&self, listener_id: ListenerId) -> Result<()>;
}
