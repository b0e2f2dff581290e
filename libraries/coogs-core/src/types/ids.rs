/// ID types for Coogs Music entities
///
/// The backend hands out auto-increment integer keys, so every id is a thin
/// `u64` newtype that serializes as a bare number.
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an id from its raw backend value
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw backend value
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| CoreError::InvalidId(s.to_string()))
            }
        }
    };
}

numeric_id!(
    /// Song identifier
    SongId
);

numeric_id!(
    /// Listener account identifier
    ListenerId
);

numeric_id!(
    /// Artist account identifier
    ArtistId
);

numeric_id!(
    /// Playlist identifier
    PlaylistId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_id_serializes_as_bare_number() {
        let json = serde_json::to_string(&SongId::new(42)).unwrap();
        assert_eq!(json, "42");

        let back: SongId = serde_json::from_str("17").unwrap();
        assert_eq!(back, SongId::new(17));
    }

    #[test]
    fn listener_id_parses_from_str() {
        assert_eq!(" 12 ".parse::<ListenerId>().unwrap(), ListenerId::new(12));
        assert!("abc".parse::<ListenerId>().is_err());
        assert!("-1".parse::<ListenerId>().is_err());
    }

    #[test]
    fn playlist_id_display() {
        assert_eq!(PlaylistId::new(456).to_string(), "456");
    }
}
