//! Controller configuration.
//!
//! # Environment Variables
//!
//! - `PANECTL_TMUX_BIN`: tmux binary to spawn
//! - `PANECTL_TMUX_SOCKET`: named server socket (`tmux -L`)
//! - `PANECTL_TMUX_SOCKET_PATH`: server socket path (`tmux -S`)
//! - `PANECTL_SETTLE_MS`: settle delay after each marker echo
//! - `PANECTL_WAIT_MS`: default execution budget for a command
//! - `PANECTL_CAPTURE_LINES`: scrollback window captured around a command

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// Environment variable for the tmux binary.
pub const TMUX_BIN_ENV: &str = "PANECTL_TMUX_BIN";

/// Environment variable for a named tmux socket.
pub const SOCKET_NAME_ENV: &str = "PANECTL_TMUX_SOCKET";

/// Environment variable for a tmux socket path.
pub const SOCKET_PATH_ENV: &str = "PANECTL_TMUX_SOCKET_PATH";

/// Environment variable for the settle delay in milliseconds.
pub const SETTLE_MS_ENV: &str = "PANECTL_SETTLE_MS";

/// Environment variable for the default wait in milliseconds.
pub const WAIT_MS_ENV: &str = "PANECTL_WAIT_MS";

/// Environment variable for the capture window in lines.
pub const CAPTURE_LINES_ENV: &str = "PANECTL_CAPTURE_LINES";

/// Default number of scrollback lines captured before and after a command.
pub const DEFAULT_CAPTURE_LINES: u32 = 500;

/// Configuration for a [`TmuxController`](crate::TmuxController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// tmux binary name or path.
    pub tmux_bin: String,
    /// Named server socket, passed as `-L`.
    pub socket_name: Option<String>,
    /// Server socket path, passed as `-S`. Wins over `socket_name`.
    pub socket_path: Option<PathBuf>,
    /// Pause after each marker echo so it lands before the next input.
    pub settle_delay: Duration,
    /// Execution budget used when the caller does not pass one.
    pub default_wait: Duration,
    /// Lines of scrollback captured around a command.
    pub capture_lines: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tmux_bin: "tmux".to_string(),
            socket_name: None,
            socket_path: None,
            settle_delay: Duration::from_millis(100),
            default_wait: Duration::from_millis(500),
            capture_lines: DEFAULT_CAPTURE_LINES,
        }
    }
}

impl ControllerConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with any `PANECTL_*` environment variables.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bin) = lookup(TMUX_BIN_ENV).filter(|s| !s.is_empty()) {
            self.tmux_bin = bin;
        }
        if let Some(name) = lookup(SOCKET_NAME_ENV).filter(|s| !s.is_empty()) {
            self.socket_name = Some(name);
        }
        if let Some(path) = lookup(SOCKET_PATH_ENV).filter(|s| !s.is_empty()) {
            self.socket_path = Some(PathBuf::from(path));
        }
        if let Some(ms) = parse_var::<u64>(&lookup, SETTLE_MS_ENV) {
            self.settle_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, WAIT_MS_ENV) {
            self.default_wait = Duration::from_millis(ms);
        }
        if let Some(lines) = parse_var::<u32>(&lookup, CAPTURE_LINES_ENV) {
            self.capture_lines = lines;
        }
        self
    }

    /// Sets the tmux binary.
    pub fn with_tmux_bin(mut self, bin: impl Into<String>) -> Self {
        self.tmux_bin = bin.into();
        self
    }

    /// Sets the named server socket.
    pub fn with_socket_name(mut self, name: impl Into<String>) -> Self {
        self.socket_name = Some(name.into());
        self
    }

    /// Sets the server socket path.
    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    /// Sets the settle delay.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Sets the default execution budget.
    pub fn with_default_wait(mut self, wait: Duration) -> Self {
        self.default_wait = wait;
        self
    }

    /// Sets the capture window.
    pub fn with_capture_lines(mut self, lines: u32) -> Self {
        self.capture_lines = lines;
        self
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = key, value = %raw, "ignoring unparseable environment value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ControllerConfig::default();

        assert_eq!(config.tmux_bin, "tmux");
        assert_eq!(config.settle_delay, Duration::from_millis(100));
        assert_eq!(config.default_wait, Duration::from_millis(500));
        assert_eq!(config.capture_lines, 500);
        assert!(config.socket_name.is_none());
        assert!(config.socket_path.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ControllerConfig::new()
            .with_tmux_bin("/usr/local/bin/tmux")
            .with_socket_name("ci")
            .with_settle_delay(Duration::from_millis(20))
            .with_default_wait(Duration::from_secs(2))
            .with_capture_lines(1000);

        assert_eq!(config.tmux_bin, "/usr/local/bin/tmux");
        assert_eq!(config.socket_name.as_deref(), Some("ci"));
        assert_eq!(config.settle_delay, Duration::from_millis(20));
        assert_eq!(config.default_wait, Duration::from_secs(2));
        assert_eq!(config.capture_lines, 1000);
    }

    #[test]
    fn test_overlay_reads_variables() {
        let config = ControllerConfig::default().overlay(env(&[
            (TMUX_BIN_ENV, "tmux-3.4"),
            (SOCKET_PATH_ENV, "/tmp/tmux-1000/default"),
            (SETTLE_MS_ENV, "250"),
            (WAIT_MS_ENV, " 1500 "),
            (CAPTURE_LINES_ENV, "2000"),
        ]));

        assert_eq!(config.tmux_bin, "tmux-3.4");
        assert_eq!(
            config.socket_path,
            Some(PathBuf::from("/tmp/tmux-1000/default"))
        );
        assert_eq!(config.settle_delay, Duration::from_millis(250));
        assert_eq!(config.default_wait, Duration::from_millis(1500));
        assert_eq!(config.capture_lines, 2000);
    }

    #[test]
    fn test_overlay_ignores_bad_values() {
        let config = ControllerConfig::default().overlay(env(&[
            (SETTLE_MS_ENV, "soon"),
            (CAPTURE_LINES_ENV, "-5"),
            (TMUX_BIN_ENV, ""),
        ]));

        assert_eq!(config, ControllerConfig::default());
    }
}
