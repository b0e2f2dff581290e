/// Headless player walk
///
/// Drives a `PlayerStore` through a queue as if each track played to the
/// end. Used by `coogs play` to exercise the queue and to send play reports
/// without an audio device.
use coogs_core::{SongId, Track};
use coogs_playback::{PlayerEvent, PlayerState, PlayerStore};
use tracing::{debug, info};

/// How to start the walk
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    pub shuffle: bool,
    pub start_index: usize,
    /// Upper bound on track ends; repeat never reaches the end of the queue
    pub max_plays: usize,
}

/// Tracks for bare song ids
pub fn tracks_for(ids: &[SongId]) -> Vec<Track> {
    ids.iter()
        .map(|id| Track::new(*id, format!("Song {}", id), "Unknown artist"))
        .collect()
}

/// Play the queue to its end (or `max_plays` starts) and return the songs
/// in the order they started
pub fn walk_queue(player: &mut PlayerStore, tracks: Vec<Track>, options: WalkOptions) -> Vec<SongId> {
    if options.shuffle {
        player.play_shuffled(tracks);
    } else {
        player.play_list(tracks, options.start_index);
    }

    let mut played = Vec::new();
    let limit = options.max_plays.max(1);

    loop {
        for event in player.drain_events() {
            match event {
                PlayerEvent::TrackChanged { song_id, .. } | PlayerEvent::TrackRestarted { song_id } => {
                    info!(song_id = %song_id, position = player.position(), "Playing");
                    played.push(song_id);
                }
                PlayerEvent::PlaybackEnded { last_song_id } => {
                    debug!(?last_song_id, "Queue finished");
                }
                other => debug!(event = ?other, "Player event"),
            }
        }

        if player.state() == PlayerState::Idle || played.len() >= limit {
            break;
        }
        player.on_track_ended();
    }

    played
}
