//! Coogs Music API Client
//!
//! HTTP client for the Coogs Music REST backend.
//!
//! # Features
//!
//! - **Favorites**: likes, the single pin, batched song status
//! - **Plays**: play-count reporting, including a background reporter that
//!   plugs into the player as its telemetry sink
//! - **Library**: playlists and advertisements
//! - **Listeners**: profiles and subscriptions
//!
//! `CoogsClient` implements [`coogs_favorites::FavoritesBackend`], so it can
//! back a `FavoritesPinsStore` directly.
//!
//! # Example
//!
//! ```ignore
//! use coogs_client::{ClientConfig, CoogsClient, PlayCountReporter};
//! use coogs_favorites::FavoritesPinsStore;
//! use coogs_playback::{PlayerConfig, PlayerStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoogsClient::new(ClientConfig::new("https://api.coogs.example"))?;
//!
//!     // Favorites cache backed by the API
//!     let favorites = FavoritesPinsStore::new(Arc::new(client.clone()));
//!
//!     // Player reporting plays in the background
//!     let (reporter, _worker) = PlayCountReporter::spawn(client);
//!     let player = PlayerStore::new(PlayerConfig::default(), Arc::new(reporter));
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod favorites;
mod library;
mod listeners;
mod plays;
mod types;

pub use client::CoogsClient;
pub use error::{ClientError, Result};
pub use plays::PlayCountReporter;
pub use types::{
    Advertisement, ClientConfig, ListenerProfile, NewSubscription, Playlist,
    PlaylistTrackRequest, Subscription, DEFAULT_TIMEOUT_SECS,
};
