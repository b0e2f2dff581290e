//! Favorites and pin cache
//!
//! Holds the liked/pinned state for the songs currently on screen. State is
//! hydrated lazily from the backend for the visible window and updated
//! optimistically on toggles, then persisted in the background.

use crate::backend::FavoritesBackend;
use crate::types::{FavoritesPinsState, HydrateOutcome, ReconcilePolicy};
use coogs_core::{ListenerId, SongId, Toast, ToastPublisher};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct State {
    listener_id: Option<ListenerId>,
    visible_ids: Vec<SongId>,
    favorite_ids: HashSet<SongId>,
    pinned_song_id: Option<SongId>,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<State>,
    /// Bumped by every hydrate and listener change; answers carrying an older
    /// value are discarded
    generation: AtomicU64,
}

/// Shared favorites/pin cache
///
/// Cheap to clone; all clones see the same state. The lock is never held
/// across an await, so toggles made while a request is in flight are visible
/// immediately.
#[derive(Clone)]
pub struct FavoritesPinsStore {
    backend: Arc<dyn FavoritesBackend>,
    policy: ReconcilePolicy,
    toasts: Option<Arc<dyn ToastPublisher>>,
    shared: Arc<Shared>,
}

impl FavoritesPinsStore {
    /// Create an empty store backed by `backend`
    pub fn new(backend: Arc<dyn FavoritesBackend>) -> Self {
        Self {
            backend,
            policy: ReconcilePolicy::default(),
            toasts: None,
            shared: Arc::new(Shared::default()),
        }
    }

    /// Set the write-failure policy
    pub fn with_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Publish an error toast when a write fails
    pub fn with_toasts(mut self, toasts: Arc<dyn ToastPublisher>) -> Self {
        self.toasts = Some(toasts);
        self
    }

    /// Write-failure policy in use
    pub fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    /// Switch the listener the cache belongs to
    ///
    /// Changing listener drops the cached state and invalidates any hydrate
    /// still in flight.
    pub fn set_listener(&self, listener_id: Option<ListenerId>) {
        let mut state = self.lock();
        if state.listener_id == listener_id {
            return;
        }

        debug!(?listener_id, "Favorites listener changed");
        state.listener_id = listener_id;
        state.favorite_ids.clear();
        state.pinned_song_id = None;
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Listener the cache belongs to
    pub fn listener(&self) -> Option<ListenerId> {
        self.lock().listener_id
    }

    /// Replace the visible window and hydrate it
    ///
    /// Duplicate ids are dropped, keeping the first occurrence.
    pub async fn set_visible_ids<I>(&self, ids: I) -> HydrateOutcome
    where
        I: IntoIterator<Item = SongId>,
    {
        let mut seen = HashSet::new();
        let visible: Vec<SongId> = ids.into_iter().filter(|id| seen.insert(*id)).collect();

        self.lock().visible_ids = visible.clone();
        self.hydrate(&visible).await
    }

    /// Visible window, deduplicated
    pub fn visible_ids(&self) -> Vec<SongId> {
        self.lock().visible_ids.clone()
    }

    /// Hydrate the currently visible window again
    pub async fn refresh(&self) -> HydrateOutcome {
        let visible = self.visible_ids();
        self.hydrate(&visible).await
    }

    /// Fetch status for `ids` and replace local state with the answer
    ///
    /// No-op without a listener or with no ids. A failed request leaves state
    /// untouched. When several hydrates overlap only the newest one applies,
    /// even when the newest one was skipped.
    pub async fn hydrate(&self, ids: &[SongId]) -> HydrateOutcome {
        let (listener_id, generation) = {
            let state = self.lock();
            let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            match state.listener_id {
                Some(id) if !ids.is_empty() => (id, generation),
                _ => return HydrateOutcome::Skipped,
            }
        };

        debug!(listener_id = %listener_id, count = ids.len(), generation, "Hydrating favorites");

        let status = match self.backend.fetch_status(listener_id, ids).await {
            Ok(status) => status,
            Err(e) => {
                warn!(listener_id = %listener_id, error = %e, "Failed to hydrate favorites");
                return HydrateOutcome::Failed;
            }
        };

        let mut state = self.lock();
        if self.shared.generation.load(Ordering::SeqCst) != generation
            || state.listener_id != Some(listener_id)
        {
            debug!(generation, "Discarding stale favorites status");
            return HydrateOutcome::Stale;
        }

        state.favorite_ids = status.favorites.into_iter().collect();
        state.pinned_song_id = status.pinned_song_id;
        debug!(
            favorites = state.favorite_ids.len(),
            pinned = ?state.pinned_song_id,
            "Favorites hydrated"
        );
        HydrateOutcome::Applied
    }

    /// Flip the like on `song_id` and persist it
    ///
    /// Local state changes before the request goes out. Returns the
    /// membership once the write settled (after any rollback). Without a
    /// listener nothing changes.
    pub async fn toggle_favorite(&self, song_id: SongId) -> bool {
        let (listener_id, liked) = {
            let mut state = self.lock();
            let Some(listener_id) = state.listener_id else {
                debug!(song_id = %song_id, "Ignoring favorite toggle without listener");
                return state.favorite_ids.contains(&song_id);
            };
            let liked = if state.favorite_ids.remove(&song_id) {
                false
            } else {
                state.favorite_ids.insert(song_id);
                true
            };
            (listener_id, liked)
        };

        let result = if liked {
            self.backend.add_favorite(listener_id, song_id).await
        } else {
            self.backend.remove_favorite(listener_id, song_id).await
        };

        match result {
            Ok(()) => {
                info!(listener_id = %listener_id, song_id = %song_id, liked, "Favorite updated");
            }
            Err(e) => {
                warn!(
                    listener_id = %listener_id,
                    song_id = %song_id,
                    liked,
                    error = %e,
                    "Failed to persist favorite"
                );
                if self.policy == ReconcilePolicy::Rollback {
                    let mut state = self.lock();
                    // Only undo if nothing newer touched this song
                    if state.listener_id == Some(listener_id)
                        && state.favorite_ids.contains(&song_id) == liked
                    {
                        if liked {
                            state.favorite_ids.remove(&song_id);
                        } else {
                            state.favorite_ids.insert(song_id);
                        }
                    }
                }
                self.publish(Toast::error("Could not update your likes"));
            }
        }

        self.is_favorite(song_id)
    }

    /// Pin `song_id`, or unpin it if it already is the pin
    ///
    /// Returns the pinned song once the write settled.
    pub async fn toggle_pin(&self, song_id: SongId) -> Option<SongId> {
        let (listener_id, previous, pinned) = {
            let mut state = self.lock();
            let Some(listener_id) = state.listener_id else {
                debug!(song_id = %song_id, "Ignoring pin toggle without listener");
                return state.pinned_song_id;
            };
            let previous = state.pinned_song_id;
            let pinned = if previous == Some(song_id) {
                None
            } else {
                Some(song_id)
            };
            state.pinned_song_id = pinned;
            (listener_id, previous, pinned)
        };

        let result = match pinned {
            Some(id) => self.backend.set_pin(listener_id, id).await,
            None => self.backend.clear_pin(listener_id).await,
        };

        match result {
            Ok(()) => {
                info!(listener_id = %listener_id, pinned = ?pinned, "Pin updated");
            }
            Err(e) => {
                warn!(
                    listener_id = %listener_id,
                    pinned = ?pinned,
                    error = %e,
                    "Failed to persist pin"
                );
                if self.policy == ReconcilePolicy::Rollback {
                    let mut state = self.lock();
                    if state.listener_id == Some(listener_id) && state.pinned_song_id == pinned {
                        state.pinned_song_id = previous;
                    }
                }
                self.publish(Toast::error("Could not update your pinned song"));
            }
        }

        self.pinned_song_id()
    }

    /// Whether `song_id` is liked
    pub fn is_favorite(&self, song_id: SongId) -> bool {
        self.lock().favorite_ids.contains(&song_id)
    }

    /// Liked songs known locally
    pub fn favorite_ids(&self) -> HashSet<SongId> {
        self.lock().favorite_ids.clone()
    }

    /// Pinned song
    pub fn pinned_song_id(&self) -> Option<SongId> {
        self.lock().pinned_song_id
    }

    /// Whether `song_id` is the pin
    pub fn is_pinned(&self, song_id: SongId) -> bool {
        self.pinned_song_id() == Some(song_id)
    }

    /// Copy of the favorites/pin state
    pub fn snapshot(&self) -> FavoritesPinsState {
        let state = self.lock();
        FavoritesPinsState {
            favorite_ids: state.favorite_ids.clone(),
            pinned_song_id: state.pinned_song_id,
        }
    }

    /// Visible songs ordered for display: pin first, then likes, then the rest
    pub fn ordered_visible(&self) -> Vec<SongId> {
        let state = self.lock();
        let mut ordered = VecDeque::with_capacity(state.visible_ids.len());
        let mut rest = Vec::new();

        for id in &state.visible_ids {
            if state.pinned_song_id == Some(*id) {
                ordered.push_front(*id);
            } else if state.favorite_ids.contains(id) {
                ordered.push_back(*id);
            } else {
                rest.push(*id);
            }
        }

        ordered.extend(rest);
        ordered.into()
    }

    fn publish(&self, toast: Toast) {
        if let Some(toasts) = &self.toasts {
            toasts.publish(toast);
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for FavoritesPinsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesPinsStore")
            .field("policy", &self.policy)
            .field("state", &*self.lock())
            .finish_non_exhaustive()
    }
}
