//! Types for the favorites cache

use coogs_core::SongId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Favorite/pin status for a batch of songs, as answered by the backend
///
/// `favorites` only lists ids from the requested batch; `pinned_song_id` is
/// the listener's pin regardless of the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongStatus {
    /// Requested songs the listener has liked
    #[serde(default)]
    pub favorites: Vec<SongId>,

    /// The listener's pinned song
    #[serde(default)]
    pub pinned_song_id: Option<SongId>,
}

/// Local favorites/pin state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesPinsState {
    /// Liked songs within the hydrated window
    pub favorite_ids: HashSet<SongId>,

    /// Pinned song (at most one)
    pub pinned_song_id: Option<SongId>,
}

/// What to do with local state when a write fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcilePolicy {
    /// Keep the optimistic value; the next hydrate corrects it
    #[default]
    KeepOptimistic,

    /// Undo the optimistic change unless something newer replaced it
    Rollback,
}

/// Result of a hydrate call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrateOutcome {
    /// Server answer replaced local state
    Applied,

    /// Nothing to do (no listener, empty window)
    Skipped,

    /// A newer hydrate or a listener change superseded this one
    Stale,

    /// Request failed; local state untouched
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_status_parses_backend_shape() {
        let status: SongStatus = serde_json::from_value(serde_json::json!({
            "favorites": [1, 2, 3],
            "pinnedSongId": 2
        }))
        .unwrap();

        assert_eq!(
            status.favorites,
            vec![SongId::new(1), SongId::new(2), SongId::new(3)]
        );
        assert_eq!(status.pinned_song_id, Some(SongId::new(2)));
    }

    #[test]
    fn song_status_tolerates_missing_fields() {
        let status: SongStatus = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(status.favorites.is_empty());
        assert!(status.pinned_song_id.is_none());

        let status: SongStatus =
            serde_json::from_value(serde_json::json!({ "pinnedSongId": null })).unwrap();
        assert!(status.pinned_song_id.is_none());
    }

    #[test]
    fn reconcile_policy_names() {
        let policy: ReconcilePolicy = serde_json::from_str("\"rollback\"").unwrap();
        assert_eq!(policy, ReconcilePolicy::Rollback);
        assert_eq!(
            serde_json::to_string(&ReconcilePolicy::KeepOptimistic).unwrap(),
            "\"keep-optimistic\""
        );
        assert_eq!(ReconcilePolicy::default(), ReconcilePolicy::KeepOptimistic);
    }
}
