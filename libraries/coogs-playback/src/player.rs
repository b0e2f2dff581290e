//! Player store - now-playing orchestration
//!
//! Holds the single current track, the play flag, the queue and the volume,
//! and exposes the operations pages call to start music. The store never
//! touches audio output; the play bar reads it and drives the element.

use crate::{
    events::PlayerEvent,
    history::History,
    queue::Queue,
    shuffle::shuffle_tracks,
    telemetry::{NoopTelemetry, PlayReport, PlayTelemetry},
    types::{PlaybackSnapshot, PlayerConfig, PlayerState},
    volume::Volume,
};
use coogs_core::{ListenerId, SongId, Track};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Within this much playback time, "previous" steps back instead of restarting
const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// Central now-playing state
///
/// State machine:
/// ```text
/// Idle --play--> Playing <--toggle--> Loaded
///                  |
///                  +-- track ended, repeat ----------> Playing (same track, t=0)
///                  +-- track ended, queue continues --> Playing (next track)
///                  +-- track ended, queue exhausted --> Idle
/// ```
///
/// Every operation is defensive: a track without a song id, an empty list or
/// an out-of-range index leaves the store untouched.
pub struct PlayerStore {
    // State
    current_track: Option<Track>,
    playing: bool,
    elapsed: Duration,
    /// Bumped whenever a track starts or restarts from zero
    play_generation: u64,

    // Queue and history
    queue: Queue,
    history: History,

    // Settings
    volume: Volume,
    repeat: bool,

    // Session and telemetry
    listener_id: Option<ListenerId>,
    telemetry: Arc<dyn PlayTelemetry>,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl PlayerStore {
    /// Create a new player store
    pub fn new(config: PlayerConfig, telemetry: Arc<dyn PlayTelemetry>) -> Self {
        Self {
            current_track: None,
            playing: false,
            elapsed: Duration::ZERO,
            play_generation: 0,
            queue: Queue::new(),
            history: History::new(config.history_size),
            volume: Volume::new(config.volume),
            repeat: config.repeat,
            listener_id: None,
            telemetry,
            pending_events: Vec::new(),
        }
    }

    /// Set the listener that play reports are attributed to
    ///
    /// `None` (logged out, artist session) disables play reports.
    pub fn set_listener(&mut self, listener_id: Option<ListenerId>) {
        self.listener_id = listener_id;
    }

    /// Listener play reports are attributed to
    pub fn listener(&self) -> Option<ListenerId> {
        self.listener_id
    }

    // ===== Playback Control =====

    /// Play a single track now
    ///
    /// If the track is already in the queue the cursor jumps to it; otherwise
    /// the queue is replaced by this one track. A song queued more than once
    /// keeps the cursor where it is when the cursor already points at it, and
    /// otherwise lands on its first occurrence.
    pub fn play_song(&mut self, track: Track) {
        let Some(song_id) = track.song_id else {
            debug!(title = %track.title, "Ignoring play request for track without song id");
            return;
        };

        let on_cursor = self
            .queue
            .current()
            .is_some_and(|t| t.song_id == Some(song_id))
            .then(|| self.queue.index());

        match on_cursor.or_else(|| self.queue.position_of(song_id)) {
            Some(index) => self.queue.set_index(index),
            None => {
                self.queue.replace(vec![track.clone()], 0);
                self.emit_queue_changed();
            }
        }

        self.start_track(track);
    }

    /// Replace the queue with `tracks` and play the one at `start_index`
    pub fn play_list(&mut self, tracks: Vec<Track>, start_index: usize) {
        let Some(track) = tracks.get(start_index) else {
            debug!(
                len = tracks.len(),
                start_index, "Ignoring play_list with out-of-range start"
            );
            return;
        };
        if !track.is_valid() {
            debug!(start_index, "Ignoring play_list starting on track without song id");
            return;
        }

        let track = track.clone();
        self.queue.replace(tracks, start_index);
        self.emit_queue_changed();
        self.start_track(track);
    }

    /// Shuffle `tracks` and play them from the top
    ///
    /// Not seeded: every call produces a new order.
    pub fn play_shuffled(&mut self, mut tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }

        shuffle_tracks(&mut tracks);

        // Land on a playable track first so one bad row doesn't block the list
        if let Some(first_valid) = tracks.iter().position(|t| t.is_valid()) {
            tracks.swap(0, first_valid);
            self.play_list(tracks, 0);
        }
    }

    /// Pause if playing, resume if loaded, ignore when idle
    pub fn toggle(&mut self) {
        match self.state() {
            PlayerState::Playing => self.pause(),
            PlayerState::Loaded => self.resume(),
            PlayerState::Idle => {}
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state() == PlayerState::Playing {
            self.playing = false;
            self.emit_state_changed();
        }
    }

    /// Resume playback of the current track
    pub fn resume(&mut self) {
        if self.state() == PlayerState::Loaded {
            self.playing = true;
            self.emit_state_changed();
        }
    }

    /// Stop playback
    ///
    /// Clears the current track but keeps the queue.
    pub fn stop(&mut self) {
        if let Some(track) = self.current_track.take() {
            self.history.push(track);
        }
        self.playing = false;
        self.elapsed = Duration::ZERO;
        self.emit_state_changed();
    }

    /// Handle the audio element reaching the end of the current track
    pub fn on_track_ended(&mut self) {
        let Some(song_id) = self.current_song_id() else {
            return;
        };

        if self.repeat {
            debug!(song_id = %song_id, "Repeating track");
            self.restart_current(song_id);
            if !self.playing {
                self.playing = true;
                self.emit_state_changed();
            }
            return;
        }

        self.advance();
    }

    /// Skip to the next track in the queue
    ///
    /// Ignores repeat; at the end of the queue the player goes idle.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        if self.current_track.is_some() {
            self.advance();
        }
    }

    /// Go to the previous track
    ///
    /// Restarts the current track when more than 3 seconds in, or when there
    /// is nothing before it.
    pub fn previous(&mut self) {
        let Some(song_id) = self.current_song_id() else {
            return;
        };

        if self.elapsed <= RESTART_THRESHOLD {
            if let Some(index) = self.queue.previous_playable() {
                if let Some(track) = self.queue.get(index).cloned() {
                    self.queue.set_index(index);
                    self.start_track(track);
                    return;
                }
            }
        }

        self.restart_current(song_id);
    }

    /// Record the playback time reported by the audio element
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        if self.current_track.is_some() {
            self.elapsed = elapsed;
        }
    }

    // ===== Volume & Repeat =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.emit_volume_changed();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.emit_volume_changed();
    }

    /// Set the repeat flag
    pub fn set_repeat(&mut self, repeat: bool) {
        if self.repeat != repeat {
            self.repeat = repeat;
            self.pending_events.push(PlayerEvent::RepeatChanged { repeat });
        }
    }

    // ===== State Queries =====

    /// Current player state
    pub fn state(&self) -> PlayerState {
        match (&self.current_track, self.playing) {
            (None, _) => PlayerState::Idle,
            (Some(_), false) => PlayerState::Loaded,
            (Some(_), true) => PlayerState::Playing,
        }
    }

    /// Now-playing track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Whether audio should be playing
    pub fn is_playing(&self) -> bool {
        self.state() == PlayerState::Playing
    }

    /// Queue in play order
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Index of the current track in the queue
    pub fn position(&self) -> usize {
        self.queue.index()
    }

    /// Playback time within the current track
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Counter that changes every time a track starts or restarts from zero
    ///
    /// Lets the audio side tell a replay of the loaded song from no change.
    pub fn play_generation(&self) -> u64 {
        self.play_generation
    }

    /// Volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    /// Whether audio is muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Volume for the audio element (`0.0..=1.0`, zero when muted)
    pub fn element_volume(&self) -> f64 {
        self.volume.element_volume()
    }

    /// Repeat flag
    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Recently played tracks (oldest first)
    pub fn history(&self) -> Vec<&Track> {
        self.history.get_all()
    }

    /// Copy of the full playback state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_track: self.current_track.clone(),
            playing: self.is_playing(),
            queue: self.queue.tracks().to_vec(),
            position: self.queue.index(),
            elapsed: self.elapsed,
            volume: self.volume.level(),
            repeat: self.repeat,
        }
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    fn current_song_id(&self) -> Option<SongId> {
        self.current_track.as_ref().and_then(|t| t.song_id)
    }

    /// Make `track` current and start playing it from zero
    fn start_track(&mut self, track: Track) {
        let Some(song_id) = track.song_id else {
            return;
        };

        let previous_song_id = self.current_song_id();
        if let Some(previous) = self.current_track.take() {
            self.history.push(previous);
        }

        info!(song_id = %song_id, title = %track.title, "Now playing");

        self.current_track = Some(track);
        self.elapsed = Duration::ZERO;
        self.play_generation += 1;
        self.pending_events.push(PlayerEvent::TrackChanged {
            song_id,
            previous_song_id,
        });

        self.playing = true;
        self.emit_state_changed();

        self.report_play(song_id);
    }

    fn restart_current(&mut self, song_id: SongId) {
        self.elapsed = Duration::ZERO;
        self.play_generation += 1;
        self.pending_events
            .push(PlayerEvent::TrackRestarted { song_id });
    }

    /// Move to the next playable queue entry or go idle
    fn advance(&mut self) {
        let next = self
            .queue
            .next_playable()
            .and_then(|index| self.queue.get(index).cloned().map(|t| (index, t)));

        match next {
            Some((index, track)) => {
                self.queue.set_index(index);
                self.start_track(track);
            }
            None => self.finish(),
        }
    }

    fn finish(&mut self) {
        let Some(track) = self.current_track.take() else {
            return;
        };

        debug!(queue_len = self.queue.len(), "Reached end of queue");

        let last_song_id = track.song_id;
        self.history.push(track);
        self.playing = false;
        self.elapsed = Duration::ZERO;

        if let Some(last_song_id) = last_song_id {
            self.pending_events
                .push(PlayerEvent::PlaybackEnded { last_song_id });
        }
        self.emit_state_changed();
    }

    fn report_play(&self, song_id: SongId) {
        match self.listener_id {
            Some(listener_id) => self
                .telemetry
                .dispatch(PlayReport::now(listener_id, song_id)),
            None => debug!(song_id = %song_id, "No listener, skipping play report"),
        }
    }

    fn emit_state_changed(&mut self) {
        let state = self.state();
        self.pending_events.push(PlayerEvent::StateChanged { state });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlayerEvent::QueueChanged {
            length: self.queue.len(),
            position: self.queue.index(),
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlayerEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new(PlayerConfig::default(), Arc::new(NoopTelemetry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTelemetry {
        reports: Mutex<Vec<PlayReport>>,
    }

    impl PlayTelemetry for RecordingTelemetry {
        fn dispatch(&self, report: PlayReport) {
            self.reports.lock().unwrap().push(report);
        }
    }

    fn create_test_track(id: u64) -> Track {
        Track::new(SongId::new(id), format!("Track {}", id), "Test Artist").with_duration(180)
    }

    fn recording_player() -> (PlayerStore, Arc<RecordingTelemetry>) {
        let telemetry = Arc::new(RecordingTelemetry::default());
        let mut player = PlayerStore::new(PlayerConfig::default(), telemetry.clone());
        player.set_listener(Some(ListenerId::new(11)));
        (player, telemetry)
    }

    #[test]
    fn starts_idle() {
        let player = PlayerStore::default();
        assert_eq!(player.state(), PlayerState::Idle);
        assert!(player.current_track().is_none());
        assert_eq!(player.volume(), 80);
    }

    #[test]
    fn play_song_reports_play_for_listener() {
        let (mut player, telemetry) = recording_player();
        player.play_song(create_test_track(5));

        let reports = telemetry.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].listener_id, ListenerId::new(11));
        assert_eq!(reports[0].song_id, SongId::new(5));
    }

    #[test]
    fn no_listener_no_report() {
        let (mut player, telemetry) = recording_player();
        player.set_listener(None);
        player.play_song(create_test_track(5));

        assert!(telemetry.reports.lock().unwrap().is_empty());
        assert!(player.is_playing());
    }

    #[test]
    fn invalid_track_is_ignored() {
        let (mut player, telemetry) = recording_player();
        let mut track = create_test_track(1);
        track.song_id = None;

        player.play_song(track);

        assert_eq!(player.state(), PlayerState::Idle);
        assert!(player.drain_events().is_empty());
        assert!(telemetry.reports.lock().unwrap().is_empty());
    }

    #[test]
    fn toggle_cycles_between_playing_and_loaded() {
        let mut player = PlayerStore::default();
        player.toggle();
        assert_eq!(player.state(), PlayerState::Idle);

        player.play_song(create_test_track(1));
        assert_eq!(player.state(), PlayerState::Playing);

        player.toggle();
        assert_eq!(player.state(), PlayerState::Loaded);

        player.toggle();
        assert_eq!(player.state(), PlayerState::Playing);
    }

    #[test]
    fn resume_does_not_report_a_new_play() {
        let (mut player, telemetry) = recording_player();
        player.play_song(create_test_track(1));
        player.toggle();
        player.toggle();

        assert_eq!(telemetry.reports.lock().unwrap().len(), 1);
    }

    #[test]
    fn repeat_restart_does_not_report() {
        let (mut player, telemetry) = recording_player();
        player.set_repeat(true);
        player.play_song(create_test_track(1));
        player.on_track_ended();
        player.on_track_ended();

        assert_eq!(telemetry.reports.lock().unwrap().len(), 1);
    }

    #[test]
    fn play_song_outside_queue_replaces_queue() {
        let mut player = PlayerStore::default();
        player.play_list(vec![create_test_track(1), create_test_track(2)], 0);
        player.play_song(create_test_track(9));

        assert_eq!(player.queue().len(), 1);
        assert_eq!(player.position(), 0);

        player.on_track_ended();
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn play_song_inside_queue_moves_cursor() {
        let mut player = PlayerStore::default();
        let tracks = vec![create_test_track(1), create_test_track(2), create_test_track(3)];
        player.play_list(tracks, 0);
        player.play_song(create_test_track(2));

        assert_eq!(player.queue().len(), 3);
        assert_eq!(player.position(), 1);

        player.on_track_ended();
        assert_eq!(
            player.current_track().and_then(|t| t.song_id),
            Some(SongId::new(3))
        );
    }

    #[test]
    fn play_song_keeps_cursor_on_repeated_song() {
        let mut player = PlayerStore::default();
        let tracks = vec![create_test_track(1), create_test_track(2), create_test_track(1)];
        player.play_list(tracks, 2);

        player.play_song(create_test_track(1));
        assert_eq!(player.position(), 2);

        player.on_track_ended();
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn play_song_elsewhere_jumps_to_first_occurrence() {
        let mut player = PlayerStore::default();
        let tracks = vec![create_test_track(1), create_test_track(2), create_test_track(1)];
        player.play_list(tracks, 1);

        player.play_song(create_test_track(1));
        assert_eq!(player.position(), 0);
    }

    #[test]
    fn replay_and_restart_bump_play_generation() {
        let mut player = PlayerStore::default();
        assert_eq!(player.play_generation(), 0);

        player.play_song(create_test_track(1));
        let first = player.play_generation();

        player.set_elapsed(Duration::from_secs(90));
        player.play_song(create_test_track(1));
        assert!(player.play_generation() > first);
        assert_eq!(player.elapsed(), Duration::ZERO);

        let replayed = player.play_generation();
        player.set_repeat(true);
        player.on_track_ended();
        assert!(player.play_generation() > replayed);

        let restarted = player.play_generation();
        player.toggle();
        player.set_volume(10);
        assert_eq!(player.play_generation(), restarted);
    }

    #[test]
    fn events_describe_track_change() {
        let mut player = PlayerStore::default();
        player.play_song(create_test_track(1));
        player.drain_events();

        player.play_list(vec![create_test_track(2)], 0);
        let events = player.drain_events();

        assert!(events.contains(&PlayerEvent::TrackChanged {
            song_id: SongId::new(2),
            previous_song_id: Some(SongId::new(1)),
        }));
        assert!(events.contains(&PlayerEvent::QueueChanged {
            length: 1,
            position: 0
        }));
        assert!(player.drain_events().is_empty());
    }

    #[test]
    fn stop_keeps_queue_and_records_history() {
        let mut player = PlayerStore::default();
        player.play_list(vec![create_test_track(1), create_test_track(2)], 0);
        player.stop();

        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.queue().len(), 2);
        assert_eq!(player.history().len(), 1);
    }

    #[test]
    fn previous_restarts_after_threshold() {
        let mut player = PlayerStore::default();
        player.play_list(vec![create_test_track(1), create_test_track(2)], 1);
        player.set_elapsed(Duration::from_secs(10));

        player.previous();
        assert_eq!(player.position(), 1);
        assert_eq!(player.elapsed(), Duration::ZERO);

        player.previous();
        assert_eq!(player.position(), 0);
        assert_eq!(
            player.current_track().and_then(|t| t.song_id),
            Some(SongId::new(1))
        );
    }

    #[test]
    fn next_ignores_repeat() {
        let mut player = PlayerStore::default();
        player.set_repeat(true);
        player.play_list(vec![create_test_track(1), create_test_track(2)], 0);

        player.next();
        assert_eq!(player.position(), 1);

        player.next();
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn set_elapsed_ignored_when_idle() {
        let mut player = PlayerStore::default();
        player.set_elapsed(Duration::from_secs(5));
        assert_eq!(player.elapsed(), Duration::ZERO);
    }

    #[test]
    fn volume_and_mute_reach_element_volume() {
        let mut player = PlayerStore::default();
        player.set_volume(40);
        assert!((player.element_volume() - 0.4).abs() < 1e-9);

        player.toggle_mute();
        assert!(player.is_muted());
        assert_eq!(player.element_volume(), 0.0);

        let events = player.drain_events();
        assert_eq!(
            events.last(),
            Some(&PlayerEvent::VolumeChanged {
                level: 40,
                is_muted: true
            })
        );
    }
}
