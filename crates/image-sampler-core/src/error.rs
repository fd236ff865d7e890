use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the image-sampler library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory or file not found error
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A path that must be a directory is something else
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Sampling stride below 1
    #[error("Sampling stride must be at least 1, got {0}")]
    InvalidStride(usize),

    /// Time-of-day string that is not HH:MM
    #[error("Time must be in HH:MM format, got {0}")]
    InvalidTime(String),

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Safety check failure
    #[error("Safety check failed: {0}")]
    SafetyCheck(String),

    /// Copying a selected image failed
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// Report serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
