//! Domain types for Coogs Music

mod ids;
mod session;
mod track;

pub use ids::{ArtistId, ListenerId, PlaylistId, SongId};
pub use session::{AccountType, Session};
pub use track::Track;
