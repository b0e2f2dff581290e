//! Playlist and advertisement endpoints.

use crate::client::{expect_success, read_json, CoogsClient};
use crate::error::Result;
use crate::types::{Advertisement, Playlist, PlaylistTrackRequest};
use coogs_core::{ListenerId, PlaylistId, SongId};
use tracing::debug;

impl CoogsClient {
    /// Playlists owned by a listener.
    pub async fn playlists(&self, listener_id: ListenerId) -> Result<Vec<Playlist>> {
        let url = self.endpoint("/playlists");
        debug!(url = %url, listener_id = %listener_id, "Fetching playlists");

        let request = self
            .http
            .get(&url)
            .query(&[("listenerId", listener_id.get())]);
        let response = self.send(request).await?;
        let playlists: Vec<Playlist> = read_json(response, "playlists").await?;

        debug!(count = playlists.len(), "Fetched playlists");
        Ok(playlists)
    }

    /// Append a song to a playlist.
    pub async fn add_to_playlist(&self, playlist_id: PlaylistId, song_id: SongId) -> Result<()> {
        let url = self.endpoint("/playlist_tracks");
        debug!(url = %url, playlist_id = %playlist_id, song_id = %song_id, "Adding song to playlist");

        let body = PlaylistTrackRequest {
            playlist_id,
            song_id,
        };
        let response = self.send(self.http.post(&url).json(&body)).await?;
        expect_success(response).await
    }

    /// Advertisements currently in rotation.
    pub async fn advertisements(&self) -> Result<Vec<Advertisement>> {
        let url = self.endpoint("/advertisements");
        debug!(url = %url, "Fetching advertisements");

        let response = self.send(self.http.get(&url)).await?;
        read_json(response, "advertisements").await
    }
}
