//! Error types for tmux operations.

use thiserror::Error;

/// Errors that can occur while talking to tmux.
///
/// These never reach callers of [`TmuxGateway`](crate::TmuxGateway); the
/// gateway logs them and converts them into empty or `false` results.
#[derive(Error, Debug)]
pub enum TmuxError {
    /// tmux binary could not be spawned.
    #[error("tmux binary '{0}' not found")]
    NotFound(String),

    /// tmux exited with a nonzero status.
    #[error("tmux command failed: {0}")]
    CommandFailed(String),

    /// I/O error while spawning tmux.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse tmux output.
    #[error("parse error: {0}")]
    ParseError(String),
}

/// Result type alias for tmux operations.
pub type Result<T> = std::result::Result<T, TmuxError>;
