//! Integration tests for the player store
//!
//! These tests walk through the playback scenarios pages actually trigger.

use coogs_core::{ListenerId, SongId, Track};
use coogs_playback::{
    PlayReport, PlayTelemetry, PlayerConfig, PlayerEvent, PlayerState, PlayerStore,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ===== Test Helpers =====

#[derive(Default)]
struct RecordingTelemetry {
    reports: Mutex<Vec<PlayReport>>,
}

impl RecordingTelemetry {
    fn song_ids(&self) -> Vec<SongId> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.song_id)
            .collect()
    }
}

impl PlayTelemetry for RecordingTelemetry {
    fn dispatch(&self, report: PlayReport) {
        self.reports.lock().unwrap().push(report);
    }
}

fn create_test_track(id: u64) -> Track {
    Track::new(SongId::new(id), format!("Track {}", id), "Test Artist").with_duration(200)
}

fn current_id(player: &PlayerStore) -> Option<SongId> {
    player.current_track().and_then(|t| t.song_id)
}

fn listener_player() -> (PlayerStore, Arc<RecordingTelemetry>) {
    let telemetry = Arc::new(RecordingTelemetry::default());
    let mut player = PlayerStore::new(PlayerConfig::default(), telemetry.clone());
    player.set_listener(Some(ListenerId::new(1)));
    (player, telemetry)
}

// ===== Scenarios =====

#[test]
fn test_play_song_sequence_last_wins_and_resets_elapsed() {
    let mut player = PlayerStore::default();

    player.play_song(create_test_track(1));
    player.set_elapsed(Duration::from_secs(42));
    assert_eq!(player.elapsed(), Duration::from_secs(42));

    player.play_song(create_test_track(2));

    assert_eq!(current_id(&player), Some(SongId::new(2)));
    assert_eq!(player.elapsed(), Duration::ZERO);
    assert_eq!(player.state(), PlayerState::Playing);
}

#[test]
fn test_play_list_end_of_track_advances_without_repeat() {
    let mut player = PlayerStore::default();
    let tracks = vec![create_test_track(1), create_test_track(2), create_test_track(3)];

    player.play_list(tracks, 1);
    assert_eq!(current_id(&player), Some(SongId::new(2)));

    player.on_track_ended();

    assert_eq!(current_id(&player), Some(SongId::new(3)));
    assert_eq!(player.position(), 2);
    assert!(player.is_playing());
}

#[test]
fn test_play_list_end_of_track_repeats_current() {
    let mut player = PlayerStore::default();
    player.set_repeat(true);
    let tracks = vec![create_test_track(1), create_test_track(2), create_test_track(3)];

    player.play_list(tracks, 1);
    player.set_elapsed(Duration::from_secs(199));
    player.on_track_ended();

    assert_eq!(current_id(&player), Some(SongId::new(2)));
    assert_eq!(player.elapsed(), Duration::ZERO);
    assert_eq!(player.position(), 1);
    assert!(player.is_playing());
}

#[test]
fn test_end_of_queue_goes_idle() {
    let mut player = PlayerStore::default();
    player.play_list(vec![create_test_track(1), create_test_track(2)], 1);
    player.drain_events();

    player.on_track_ended();

    assert_eq!(player.state(), PlayerState::Idle);
    assert!(player.current_track().is_none());

    let events = player.drain_events();
    assert!(events.contains(&PlayerEvent::PlaybackEnded {
        last_song_id: SongId::new(2)
    }));
    assert_eq!(
        events.last(),
        Some(&PlayerEvent::StateChanged {
            state: PlayerState::Idle
        })
    );

    // Nothing to toggle once idle
    player.toggle();
    assert_eq!(player.state(), PlayerState::Idle);
}

#[test]
fn test_every_started_track_is_reported_once() {
    let (mut player, telemetry) = listener_player();
    player.play_list(
        vec![create_test_track(1), create_test_track(2), create_test_track(3)],
        0,
    );

    player.on_track_ended();
    player.toggle();
    player.toggle();
    player.on_track_ended();
    player.on_track_ended();

    assert_eq!(
        telemetry.song_ids(),
        vec![SongId::new(1), SongId::new(2), SongId::new(3)]
    );
    assert_eq!(player.state(), PlayerState::Idle);
}

#[test]
fn test_invalid_inputs_are_no_ops() {
    let (mut player, telemetry) = listener_player();
    player.play_song(create_test_track(7));
    player.drain_events();
    let before = player.snapshot();

    player.play_list(Vec::new(), 0);
    player.play_list(vec![create_test_track(1)], 3);

    let mut nameless = create_test_track(0);
    nameless.song_id = None;
    player.play_song(nameless.clone());
    player.play_list(vec![nameless.clone(), create_test_track(2)], 0);
    player.play_shuffled(Vec::new());
    player.play_shuffled(vec![nameless]);

    assert_eq!(player.snapshot(), before);
    assert!(player.drain_events().is_empty());
    assert_eq!(telemetry.song_ids(), vec![SongId::new(7)]);
}

#[test]
fn test_auto_advance_skips_rows_without_song_id() {
    let mut player = PlayerStore::default();
    let mut broken = create_test_track(0);
    broken.song_id = None;

    player.play_list(vec![create_test_track(1), broken, create_test_track(3)], 0);
    player.on_track_ended();

    assert_eq!(current_id(&player), Some(SongId::new(3)));
    assert_eq!(player.position(), 2);
}

#[test]
fn test_play_shuffled_starts_at_top_of_permutation() {
    let (mut player, telemetry) = listener_player();
    let tracks: Vec<Track> = (1..=20).map(create_test_track).collect();

    player.play_shuffled(tracks);

    assert_eq!(player.position(), 0);
    assert_eq!(player.queue().len(), 20);
    assert_eq!(current_id(&player), player.queue()[0].song_id);
    assert_eq!(telemetry.song_ids().len(), 1);
}

#[test]
fn test_repeat_toggle_mid_track() {
    let mut player = PlayerStore::default();
    player.play_list(vec![create_test_track(1), create_test_track(2)], 0);

    player.set_repeat(true);
    player.on_track_ended();
    assert_eq!(current_id(&player), Some(SongId::new(1)));

    player.set_repeat(false);
    player.on_track_ended();
    assert_eq!(current_id(&player), Some(SongId::new(2)));
}

#[test]
fn test_repeat_while_paused_restarts_playing() {
    let mut player = PlayerStore::default();
    player.set_repeat(true);
    player.play_song(create_test_track(1));
    player.pause();

    player.on_track_ended();
    assert_eq!(player.state(), PlayerState::Playing);
}

#[test]
fn test_history_tracks_played_songs() {
    let mut player = PlayerStore::new(
        PlayerConfig {
            history_size: 2,
            ..PlayerConfig::default()
        },
        Arc::new(coogs_playback::NoopTelemetry),
    );

    player.play_list((1..=4).map(create_test_track).collect(), 0);
    player.on_track_ended();
    player.on_track_ended();
    player.on_track_ended();

    let history: Vec<_> = player.history().iter().filter_map(|t| t.song_id).collect();
    assert_eq!(history, vec![SongId::new(2), SongId::new(3)]);
}

#[test]
fn test_snapshot_reflects_state() {
    let mut player = PlayerStore::default();
    player.set_volume(55);
    player.play_list(vec![create_test_track(1), create_test_track(2)], 1);
    player.set_elapsed(Duration::from_secs(12));
    player.pause();

    let snapshot = player.snapshot();
    assert_eq!(snapshot.current_track.and_then(|t| t.song_id), Some(SongId::new(2)));
    assert!(!snapshot.playing);
    assert_eq!(snapshot.queue.len(), 2);
    assert_eq!(snapshot.position, 1);
    assert_eq!(snapshot.elapsed, Duration::from_secs(12));
    assert_eq!(snapshot.volume, 55);
    assert!(!snapshot.repeat);
}
