/// Session domain type
use crate::types::{ArtistId, ListenerId};
use serde::{Deserialize, Serialize};

/// Kind of account a session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Listener account (likes, pins, playback)
    Listener,

    /// Artist account (uploads, analytics)
    Artist,
}

/// Identity of the logged-in user
///
/// Stored as-is in client storage; the server re-validates every identifier
/// it receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Listener id (listener accounts only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listener_id: Option<ListenerId>,

    /// Artist id (artist accounts only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<ArtistId>,

    /// Account type
    pub account_type: AccountType,

    /// Display username
    pub username: String,
}

impl Session {
    /// Create a listener session
    pub fn listener(id: ListenerId, username: impl Into<String>) -> Self {
        Self {
            listener_id: Some(id),
            artist_id: None,
            account_type: AccountType::Listener,
            username: username.into(),
        }
    }

    /// Create an artist session
    pub fn artist(id: ArtistId, username: impl Into<String>) -> Self {
        Self {
            listener_id: None,
            artist_id: Some(id),
            account_type: AccountType::Artist,
            username: username.into(),
        }
    }

    /// Listener id, if this is a listener session
    pub fn listener_id(&self) -> Option<ListenerId> {
        match self.account_type {
            AccountType::Listener => self.listener_id,
            AccountType::Artist => None,
        }
    }

    /// Artist id, if this is an artist session
    pub fn artist_id(&self) -> Option<ArtistId> {
        match self.account_type {
            AccountType::Artist => self.artist_id,
            AccountType::Listener => None,
        }
    }
}
