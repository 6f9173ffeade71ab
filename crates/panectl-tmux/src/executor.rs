//! Subprocess boundary for tmux.
//!
//! [`TmuxCommandRunner`] is the seam the rest of the crate talks through, so
//! tests can swap the real binary for a scripted fake.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use tracing::trace;

use crate::config::ControllerConfig;
use crate::{Result, TmuxError};

/// Runs a single tmux invocation.
///
/// Exit code 0 yields the captured stdout; anything else is an error.
pub trait TmuxCommandRunner: Send + Sync {
    fn run(&self, args: &[&str]) -> Result<String>;
}

impl<T: TmuxCommandRunner + ?Sized> TmuxCommandRunner for &T {
    fn run(&self, args: &[&str]) -> Result<String> {
        (**self).run(args)
    }
}

/// Real tmux executor using `std::process::Command`.
#[derive(Debug, Clone)]
pub struct TmuxExecutor {
    tmux_bin: String,
    socket_name: Option<String>,
    socket_path: Option<PathBuf>,
}

impl TmuxExecutor {
    /// Create an executor for the given tmux binary.
    pub fn new(tmux_bin: impl Into<String>) -> Self {
        Self {
            tmux_bin: tmux_bin.into(),
            socket_name: None,
            socket_path: None,
        }
    }

    /// Build an executor from controller configuration.
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            tmux_bin: config.tmux_bin.clone(),
            socket_name: config.socket_name.clone(),
            socket_path: config.socket_path.clone(),
        }
    }

    /// Use a named server socket (`tmux -L`).
    #[must_use]
    pub fn with_socket_name(mut self, name: impl Into<String>) -> Self {
        self.socket_name = Some(name.into());
        self
    }

    /// Use an explicit server socket path (`tmux -S`).
    #[must_use]
    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    /// The binary this executor spawns.
    pub fn tmux_bin(&self) -> &str {
        &self.tmux_bin
    }

    /// Check whether the configured binary resolves on `PATH`.
    pub fn is_available(&self) -> bool {
        which::which(&self.tmux_bin).is_ok()
    }
}

impl Default for TmuxExecutor {
    fn default() -> Self {
        Self::new("tmux")
    }
}

impl TmuxCommandRunner for TmuxExecutor {
    fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new(&self.tmux_bin);
        // Socket path takes precedence over socket name
        if let Some(ref path) = self.socket_path {
            cmd.arg("-S").arg(path);
        } else if let Some(ref name) = self.socket_name {
            cmd.args(["-L", name]);
        }
        cmd.args(args);

        trace!(args = ?args, "running tmux command");
        let output = cmd.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => TmuxError::NotFound(self.tmux_bin.clone()),
            _ => TmuxError::Io(e),
        })?;
        trace!(
            status = %output.status,
            stdout_len = output.stdout.len(),
            stderr_len = output.stderr.len(),
            "tmux command completed"
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TmuxError::CommandFailed(format!(
                "exit code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
