//! Likes, pin and song status endpoints.

use crate::client::{expect_success, read_json, CoogsClient};
use crate::error::Result;
use crate::types::{ListenerAction, SongAction};
use async_trait::async_trait;
use coogs_core::{ListenerId, SongId};
use coogs_favorites::{FavoritesBackend, SongStatus};
use tracing::debug;

impl CoogsClient {
    /// Favorite/pin status for a batch of songs.
    ///
    /// An empty batch answers locally without a request.
    pub async fn song_status(
        &self,
        listener_id: ListenerId,
        song_ids: &[SongId],
    ) -> Result<SongStatus> {
        if song_ids.is_empty() {
            return Ok(SongStatus::default());
        }

        let url = self.endpoint("/songs/status");
        let ids = song_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        debug!(url = %url, listener_id = %listener_id, ids = %ids, "Fetching song status");

        let request = self
            .http
            .get(&url)
            .query(&[("listenerId", listener_id.to_string()), ("ids", ids)]);
        let response = self.send(request).await?;
        let status: SongStatus = read_json(response, "song status").await?;

        debug!(
            favorites = status.favorites.len(),
            pinned = ?status.pinned_song_id,
            "Fetched song status"
        );
        Ok(status)
    }

    /// Like a song.
    pub async fn like(&self, listener_id: ListenerId, song_id: SongId) -> Result<()> {
        let url = self.endpoint("/likes");
        debug!(url = %url, listener_id = %listener_id, song_id = %song_id, "Liking song");

        let body = SongAction {
            listener_id,
            song_id,
        };
        let response = self.send(self.http.post(&url).json(&body)).await?;
        expect_success(response).await
    }

    /// Remove a like.
    pub async fn unlike(&self, listener_id: ListenerId, song_id: SongId) -> Result<()> {
        let url = self.endpoint("/likes");
        debug!(url = %url, listener_id = %listener_id, song_id = %song_id, "Unliking song");

        let body = SongAction {
            listener_id,
            song_id,
        };
        let response = self.send(self.http.delete(&url).json(&body)).await?;
        expect_success(response).await
    }

    /// Pin a song; the backend drops any previous pin.
    pub async fn pin(&self, listener_id: ListenerId, song_id: SongId) -> Result<()> {
        let url = self.endpoint("/pin");
        debug!(url = %url, listener_id = %listener_id, song_id = %song_id, "Pinning song");

        let body = SongAction {
            listener_id,
            song_id,
        };
        let response = self.send(self.http.post(&url).json(&body)).await?;
        expect_success(response).await
    }

    /// Remove the listener's pin.
    pub async fn unpin(&self, listener_id: ListenerId) -> Result<()> {
        let url = self.endpoint("/pin");
        debug!(url = %url, listener_id = %listener_id, "Removing pin");

        let body = ListenerAction { listener_id };
        let response = self.send(self.http.delete(&url).json(&body)).await?;
        expect_success(response).await
    }
}

#[async_trait]
impl FavoritesBackend for CoogsClient {
    async fn fetch_status(
        &self,
        listener_id: ListenerId,
        song_ids: &[SongId],
    ) -> coogs_favorites::Result<SongStatus> {
        Ok(self.song_status(listener_id, song_ids).await?)
    }

    async fn add_favorite(
        &self,
        listener_id: ListenerId,
        song_id: SongId,
    ) -> coogs_favorites::Result<()> {
        Ok(self.like(listener_id, song_id).await?)
    }

    async fn remove_favorite(
        &self,
        listener_id: ListenerId,
        song_id: SongId,
    ) -> coogs_favorites::Result<()> {
        Ok(self.unlike(listener_id, song_id).await?)
    }

    async fn set_pin(&self, listener_id: ListenerId, song_id: SongId) -> coogs_favorites::Result<()> {
        Ok(self.pin(listener_id, song_id).await?)
    }

    async fn clear_pin(&self, listener_id: ListenerId) -> coogs_favorites::Result<()> {
        Ok(self.unpin(listener_id).await?)
    }
}
