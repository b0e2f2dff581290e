/// CLI error types
use coogs_client::ClientError;
use coogs_core::{CoreError, SongId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No listener session; run `coogs session set --listener <ID> --username <NAME>`")]
    NoListener,

    #[error("Could not load the current status of song {0}; nothing was changed")]
    StatusUnavailable(SongId),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Session(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, CliError>;
