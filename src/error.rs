//! Error types for the fallible edges of the engine: config, snapshots and the CLI.
//! Visibility, partitioning, ordering and aggregation are total and never fail.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
