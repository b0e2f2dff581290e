//! Play queue
//!
//! An ordered list of tracks with a cursor on the current one. The queue is
//! ephemeral: it lives only as long as the player that owns it.

use coogs_core::{SongId, Track};

/// Ordered play queue with a current position
///
/// ```text
/// tracks:  [ t1 ][ t2 ][ t3 ]
///                  ^
///                index (now playing)
/// ```
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    index: usize,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all tracks and move the cursor to `index`
    ///
    /// The caller guarantees `index < tracks.len()` for non-empty lists.
    pub fn replace(&mut self, tracks: Vec<Track>, index: usize) {
        self.tracks = tracks;
        self.index = index;
    }

    /// Track under the cursor
    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.index)
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Cursor position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the cursor
    ///
    /// Out-of-range indices are ignored.
    pub fn set_index(&mut self, index: usize) {
        if index < self.tracks.len() {
            self.index = index;
        }
    }

    /// First position holding `song_id`
    pub fn position_of(&self, song_id: SongId) -> Option<usize> {
        self.tracks
            .iter()
            .position(|t| t.song_id == Some(song_id))
    }

    /// Next playable position after the cursor
    ///
    /// Entries without a song id are skipped.
    pub fn next_playable(&self) -> Option<usize> {
        self.tracks
            .iter()
            .enumerate()
            .skip(self.index + 1)
            .find(|(_, t)| t.is_valid())
            .map(|(i, _)| i)
    }

    /// Closest playable position before the cursor
    pub fn previous_playable(&self) -> Option<usize> {
        self.tracks[..self.index.min(self.tracks.len())]
            .iter()
            .rposition(|t| t.is_valid())
    }

    /// All tracks in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: u64) -> Track {
        Track::new(SongId::new(id), format!("Track {}", id), "Test Artist")
    }

    fn invalid_track() -> Track {
        let mut track = create_test_track(0);
        track.song_id = None;
        track
    }

    #[test]
    fn replace_sets_cursor() {
        let mut queue = Queue::new();
        queue.replace(vec![create_test_track(1), create_test_track(2)], 1);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.index(), 1);
        assert_eq!(queue.current().unwrap().song_id, Some(SongId::new(2)));
    }

    #[test]
    fn next_playable_skips_invalid_entries() {
        let mut queue = Queue::new();
        queue.replace(
            vec![create_test_track(1), invalid_track(), create_test_track(3)],
            0,
        );

        assert_eq!(queue.next_playable(), Some(2));

        queue.set_index(2);
        assert_eq!(queue.next_playable(), None);
    }

    #[test]
    fn previous_playable_walks_back() {
        let mut queue = Queue::new();
        queue.replace(
            vec![create_test_track(1), invalid_track(), create_test_track(3)],
            2,
        );

        assert_eq!(queue.previous_playable(), Some(0));

        queue.set_index(0);
        assert_eq!(queue.previous_playable(), None);
    }

    #[test]
    fn set_index_ignores_out_of_range() {
        let mut queue = Queue::new();
        queue.replace(vec![create_test_track(1)], 0);
        queue.set_index(5);
        assert_eq!(queue.index(), 0);
    }

    #[test]
    fn position_of_finds_first_occurrence() {
        let mut queue = Queue::new();
        queue.replace(
            vec![create_test_track(7), create_test_track(8), create_test_track(7)],
            0,
        );

        assert_eq!(queue.position_of(SongId::new(7)), Some(0));
        assert_eq!(queue.position_of(SongId::new(9)), None);
    }

    #[test]
    fn clear_resets_cursor() {
        let mut queue = Queue::new();
        queue.replace(vec![create_test_track(1), create_test_track(2)], 1);
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.index(), 0);
        assert!(queue.current().is_none());
    }
}
