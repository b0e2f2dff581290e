//! Coogs Music command-line front end
//!
//! Thin wiring of the client core: configuration, session handling, the
//! favorites cache over the REST client, and a headless player walk.

pub mod app;
pub mod config;
pub mod error;
pub mod play;

pub use app::{App, PlayRun, SongStatusView};
pub use config::CliConfig;
pub use error::{CliError, Result};
