//! Error types for the editor bridge.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while queueing editor commands.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Failed to append to the command file.
    #[error("failed to write command file {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the command file's directory.
    #[error("failed to create directory {}: {source}", .path.display())]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Command arguments could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
