//! Coogs Music - Favorites
//!
//! Lazy cache of the listener's likes and single pinned song.
//!
//! Only songs currently on screen are tracked. The UI reports the visible
//! window, the store asks the backend about exactly those ids, and toggles
//! update local state before the write goes out. What happens to local state
//! when a write fails is decided by [`ReconcilePolicy`].
//!
//! # Example
//!
//! ```rust,no_run
//! use coogs_core::{ListenerId, SongId};
//! use coogs_favorites::{FavoritesBackend, FavoritesPinsStore};
//! use std::sync::Arc;
//!
//! # async fn example(backend: Arc<dyn FavoritesBackend>) {
//! let store = FavoritesPinsStore::new(backend);
//! store.set_listener(Some(ListenerId::new(7)));
//!
//! store.set_visible_ids([SongId::new(1), SongId::new(2)]).await;
//!
//! if !store.is_favorite(SongId::new(1)) {
//!     store.toggle_favorite(SongId::new(1)).await;
//! }
//! # }
//! ```

mod backend;
mod error;
mod store;
mod types;

pub use backend::FavoritesBackend;
pub use error::{FavoritesError, Result};
pub use store::FavoritesPinsStore;
pub use types::{FavoritesPinsState, HydrateOutcome, ReconcilePolicy, SongStatus};
