use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("storage file not found: {path}")]
    StorageNotFound { path: PathBuf },

    #[error("surface error: {0}")]
    Surface(String),

    #[error("validation probe error: {0}")]
    Probe(#[from] reqwest::Error),

    #[error("event channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, ShellError>;
