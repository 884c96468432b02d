use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HugError {
    #[error("Repository path does not exist or is a file: {}", .0.display())]
    InvalidRepository(PathBuf),

    #[error("Cannot safely initialize repository directory: {}", .0.display())]
    UnsafeInit(PathBuf),

    #[error("Path is not in the repository directory: {}", .0.display())]
    PathOutsideRepository(PathBuf),

    #[error("There are no changes to commit")]
    NothingToCommit,

    #[error("Repository appears to be corrupt: {0}")]
    CorruptRepository(String),

    #[error("Unknown revision '{0}'")]
    UnknownRevision(String),

    #[error("Mercurial executable not found: {0}")]
    HgNotFound(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HugError>;
