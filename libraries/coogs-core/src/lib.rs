//! Coogs Music Core
//!
//! Platform-agnostic core types, session storage and notifications shared by
//! every Coogs Music client crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Session`, and the numeric id newtypes
//! - **Session Storage**: the `SessionStore` trait with file and in-memory backends
//! - **Notifications**: the `ToastBus` publish-subscribe channel
//! - **Error Handling**: unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use coogs_core::{ListenerId, MemorySessionStore, Session, SessionStore, SongId, Track};
//!
//! let store = MemorySessionStore::new();
//! store.save(&Session::listener(ListenerId::new(7), "ana")).unwrap();
//!
//! let session = store.load().unwrap().expect("session saved");
//! assert_eq!(session.listener_id(), Some(ListenerId::new(7)));
//!
//! let track = Track::new(SongId::new(42), "Night Drive", "The Coogs");
//! assert!(track.is_valid());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod notify;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use notify::{Toast, ToastBus, ToastKind, ToastPublisher};
pub use storage::{FileSessionStore, MemorySessionStore, SessionStore};
pub use types::{AccountType, ArtistId, ListenerId, PlaylistId, Session, SongId, Track};
