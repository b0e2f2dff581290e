//! Shuffle for play-all-shuffled
//!
//! Unseeded Fisher-Yates: every call produces a fresh permutation.

use coogs_core::Track;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

/// Shuffle tracks in place using the thread-local RNG
pub fn shuffle_tracks(tracks: &mut [Track]) {
    shuffle_tracks_with(tracks, &mut thread_rng());
}

/// Shuffle tracks in place with a caller-supplied RNG
///
/// Each track has equal probability of landing at any position.
pub fn shuffle_tracks_with<R: Rng + ?Sized>(tracks: &mut [Track], rng: &mut R) {
    tracks.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use coogs_core::SongId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn create_test_tracks(n: u64) -> Vec<Track> {
        (1..=n)
            .map(|id| Track::new(SongId::new(id), format!("Track {}", id), "Artist"))
            .collect()
    }

    fn ids(tracks: &[Track]) -> Vec<SongId> {
        tracks.iter().filter_map(|t| t.song_id).collect()
    }

    #[test]
    fn shuffle_preserves_all_tracks() {
        let mut tracks = create_test_tracks(10);
        shuffle_tracks(&mut tracks);

        let mut shuffled = ids(&tracks);
        shuffled.sort();
        assert_eq!(shuffled, ids(&create_test_tracks(10)));
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut a = create_test_tracks(8);
        let mut b = create_test_tracks(8);

        shuffle_tracks_with(&mut a, &mut StdRng::seed_from_u64(7));
        shuffle_tracks_with(&mut b, &mut StdRng::seed_from_u64(7));

        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn every_track_reaches_first_slot() {
        // Over many seeded runs each of three tracks should lead at least once
        let mut leaders: HashMap<SongId, usize> = HashMap::new();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..300 {
            let mut tracks = create_test_tracks(3);
            shuffle_tracks_with(&mut tracks, &mut rng);
            *leaders.entry(tracks[0].song_id.unwrap()).or_default() += 1;
        }

        assert_eq!(leaders.len(), 3);
        assert!(leaders.values().all(|&count| count > 50));
    }

    #[test]
    fn empty_and_single_are_untouched() {
        let mut empty: Vec<Track> = Vec::new();
        shuffle_tracks(&mut empty);
        assert!(empty.is_empty());

        let mut single = create_test_tracks(1);
        shuffle_tracks(&mut single);
        assert_eq!(ids(&single), vec![SongId::new(1)]);
    }
}
