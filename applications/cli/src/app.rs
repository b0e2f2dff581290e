/// Wiring of the client core for one CLI invocation
use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::play::{tracks_for, walk_queue, WalkOptions};
use coogs_client::{
    Advertisement, CoogsClient, ListenerProfile, PlayCountReporter, Playlist, Subscription,
};
use coogs_core::{ListenerId, Session, SessionStore, SongId, ToastBus};
use coogs_favorites::{FavoritesPinsStore, HydrateOutcome};
use coogs_playback::{PlaybackSnapshot, PlayerStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Favorites view of a batch of songs
#[derive(Debug, Clone)]
pub struct SongStatusView {
    /// Requested songs, pin first, then likes, then the rest
    pub ordered: Vec<SongId>,
    pub liked: Vec<SongId>,
    pub pinned: Option<SongId>,
}

/// Outcome of `coogs play`
#[derive(Debug, Clone)]
pub struct PlayRun {
    pub played: Vec<SongId>,
    pub reported: bool,
    pub snapshot: PlaybackSnapshot,
}

pub struct App {
    config: CliConfig,
    sessions: Arc<dyn SessionStore>,
    client: CoogsClient,
    toasts: ToastBus,
}

impl App {
    pub fn new(config: CliConfig, sessions: Arc<dyn SessionStore>) -> Result<Self> {
        config.validate()?;
        let client = CoogsClient::new(config.client_config())?;

        Ok(Self {
            config,
            sessions,
            client,
            toasts: ToastBus::default(),
        })
    }

    pub fn toasts(&self) -> &ToastBus {
        &self.toasts
    }

    pub fn client(&self) -> &CoogsClient {
        &self.client
    }

    // ===== Session =====

    pub fn save_session(&self, session: &Session) -> Result<()> {
        self.sessions.save(session)?;
        info!(username = %session.username, account = ?session.account_type, "Session saved");
        Ok(())
    }

    pub fn session(&self) -> Result<Option<Session>> {
        Ok(self.sessions.load()?)
    }

    pub fn clear_session(&self) -> Result<()> {
        self.sessions.clear()?;
        info!("Session cleared");
        Ok(())
    }

    /// Listener to act as: the explicit one, else the stored session's
    pub fn listener(&self, explicit: Option<ListenerId>) -> Result<ListenerId> {
        if let Some(id) = explicit {
            return Ok(id);
        }
        self.session()?
            .and_then(|s| s.listener_id())
            .ok_or(CliError::NoListener)
    }

    // ===== Listener data =====

    pub async fn profile(&self, listener_id: ListenerId) -> Result<ListenerProfile> {
        Ok(self.client.listener_profile(listener_id).await?)
    }

    pub async fn playlists(&self, listener_id: ListenerId) -> Result<Vec<Playlist>> {
        Ok(self.client.playlists(listener_id).await?)
    }

    pub async fn subscription(&self, listener_id: ListenerId) -> Result<Option<Subscription>> {
        Ok(self.client.subscription(listener_id).await?)
    }

    pub async fn advertisements(&self) -> Result<Vec<Advertisement>> {
        Ok(self.client.advertisements().await?)
    }

    // ===== Favorites =====

    fn favorites(&self, listener_id: ListenerId) -> FavoritesPinsStore {
        let store = FavoritesPinsStore::new(Arc::new(self.client.clone()))
            .with_policy(self.config.favorites.reconcile)
            .with_toasts(Arc::new(self.toasts.clone()));
        store.set_listener(Some(listener_id));
        store
    }

    pub async fn song_status(
        &self,
        listener_id: ListenerId,
        ids: &[SongId],
    ) -> Result<SongStatusView> {
        let store = self.favorites(listener_id);
        if store.set_visible_ids(ids.iter().copied()).await == HydrateOutcome::Failed {
            warn!("Showing unhydrated status");
        }

        let liked = store
            .visible_ids()
            .into_iter()
            .filter(|id| store.is_favorite(*id))
            .collect();

        Ok(SongStatusView {
            ordered: store.ordered_visible(),
            liked,
            pinned: store.pinned_song_id(),
        })
    }

    /// Favorites cache hydrated for `song_id`
    ///
    /// A toggle flips whatever the cache holds, so it must not run against an
    /// unhydrated one.
    async fn hydrated_for(
        &self,
        listener_id: ListenerId,
        song_id: SongId,
    ) -> Result<FavoritesPinsStore> {
        let store = self.favorites(listener_id);
        if store.set_visible_ids([song_id]).await == HydrateOutcome::Failed {
            warn!(song_id = %song_id, "Refusing to toggle without current status");
            return Err(CliError::StatusUnavailable(song_id));
        }
        Ok(store)
    }

    /// Flip the like on a song; returns whether it is liked afterwards
    pub async fn toggle_like(&self, listener_id: ListenerId, song_id: SongId) -> Result<bool> {
        let store = self.hydrated_for(listener_id, song_id).await?;
        Ok(store.toggle_favorite(song_id).await)
    }

    /// Flip the pin on a song; returns the pin afterwards
    pub async fn toggle_pin(
        &self,
        listener_id: ListenerId,
        song_id: SongId,
    ) -> Result<Option<SongId>> {
        let store = self.hydrated_for(listener_id, song_id).await?;
        Ok(store.toggle_pin(song_id).await)
    }

    // ===== Playback =====

    /// Walk a queue of songs headlessly, reporting plays for the session's
    /// listener
    pub async fn play(&self, ids: &[SongId], options: WalkOptions) -> Result<PlayRun> {
        let listener_id = self.session()?.and_then(|s| s.listener_id());

        let (reporter, worker) = PlayCountReporter::spawn(self.client.clone());
        let mut player = PlayerStore::new(self.config.player_config(), Arc::new(reporter));
        player.set_listener(listener_id);

        let played = walk_queue(&mut player, tracks_for(ids), options);
        let snapshot = player.snapshot();

        // Dropping the player closes the report queue so the worker can finish
        drop(player);
        if let Err(e) = worker.await {
            warn!(error = %e, "Play count worker failed");
        }

        Ok(PlayRun {
            played,
            reported: listener_id.is_some(),
            snapshot,
        })
    }
}
