//! Controller for one tmux session.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::ControllerConfig;
use crate::executor::{TmuxCommandRunner, TmuxExecutor};
use crate::gateway::TmuxGateway;
use crate::lock::PaneLocks;
use crate::marker::{CommandResult, Marker, MarkerProtocol};
use crate::pane::{ControlKey, PaneInfo};
use crate::target::PaneTarget;
use crate::wait::{FixedDelay, WaitStrategy};

/// Remote control for a single tmux session.
///
/// Holds the currently selected pane; every keystroke and capture goes to
/// that pane until [`select_pane`](Self::select_pane) changes it.
pub struct TmuxController<R = TmuxExecutor, W = FixedDelay> {
    target: PaneTarget,
    gateway: TmuxGateway<R>,
    wait: W,
    config: ControllerConfig,
    locks: Arc<PaneLocks>,
}

impl TmuxController {
    /// Controller for `session` using the real tmux binary and default timing.
    pub fn new(session: impl Into<String>) -> Self {
        Self::with_config(session, ControllerConfig::default())
    }

    /// Controller for `session` using the given configuration.
    pub fn with_config(session: impl Into<String>, config: ControllerConfig) -> Self {
        let runner = TmuxExecutor::from_config(&config);
        Self::with_parts(session, runner, FixedDelay, config)
    }

    /// Names of all running sessions on the default server.
    pub fn list_sessions() -> Vec<String> {
        TmuxGateway::new(TmuxExecutor::default()).list_sessions()
    }

    /// Whether the configured tmux binary is on `PATH`.
    pub fn is_available(&self) -> bool {
        self.gateway.is_available()
    }
}

impl<R: TmuxCommandRunner, W: WaitStrategy> TmuxController<R, W> {
    /// Controller built from an explicit runner and wait strategy.
    pub fn with_parts(
        session: impl Into<String>,
        runner: R,
        wait: W,
        config: ControllerConfig,
    ) -> Self {
        Self {
            target: PaneTarget::new(session),
            gateway: TmuxGateway::new(runner),
            wait,
            config,
            locks: PaneLocks::global(),
        }
    }

    /// Use a private lock registry instead of the process-wide one.
    #[must_use]
    pub fn with_locks(mut self, locks: Arc<PaneLocks>) -> Self {
        self.locks = locks;
        self
    }

    pub fn session_name(&self) -> &str {
        &self.target.session
    }

    /// The pane commands are currently sent to.
    pub fn target(&self) -> &PaneTarget {
        &self.target
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn gateway(&self) -> &TmuxGateway<R> {
        &self.gateway
    }

    /// Names of all sessions on this controller's server.
    pub fn sessions(&self) -> Vec<String> {
        self.gateway.list_sessions()
    }

    /// Whether the controlled session is running.
    pub fn session_exists(&self) -> bool {
        self.gateway.session_exists(&self.target.session)
    }

    /// Switch to another window/pane of the session.
    pub fn select_pane(&mut self, window: u32, pane: u32) {
        self.target.select_pane(window, pane);
        debug!(pane = %self.target, "selected pane");
    }

    /// Type `keys` into the pane, optionally followed by Enter.
    pub fn send_keys(&self, keys: &str, press_enter: bool) -> bool {
        self.gateway.send_keys(&self.target, keys, press_enter)
    }

    /// Type a shell command and press Enter.
    pub fn send_command(&self, command: &str) -> bool {
        self.send_keys(command, true)
    }

    /// Send a named key.
    pub fn send_control(&self, key: ControlKey) -> bool {
        self.gateway.send_control(&self.target, key)
    }

    /// Interrupt the foreground process.
    pub fn send_ctrl_c(&self) -> bool {
        self.send_control(ControlKey::Interrupt)
    }

    /// Send end-of-file.
    pub fn send_ctrl_d(&self) -> bool {
        self.send_control(ControlKey::Eof)
    }

    /// Run `clear` in the pane.
    pub fn clear_pane(&self) -> bool {
        self.send_command("clear")
    }

    /// Run a script file with bash.
    pub fn run_script(&self, script_path: &str) -> bool {
        self.send_command(&format!("bash {}", shell_quote(script_path)))
    }

    /// Capture lines `start_line..=end_line`; empty on failure.
    pub fn capture_pane(&self, start_line: i64, end_line: i64) -> String {
        self.gateway.capture_pane(&self.target, start_line, end_line)
    }

    /// Capture the visible area.
    pub fn capture_visible(&self) -> String {
        self.capture_pane(0, -1)
    }

    /// Capture the last `lines` lines of scrollback through the bottom of the
    /// visible area.
    pub fn capture_history(&self, lines: u32) -> String {
        self.capture_pane(-i64::from(lines), -1)
    }

    /// Pid, foreground command and size of the selected pane.
    pub fn pane_info(&self) -> Option<PaneInfo> {
        self.gateway.pane_info(&self.target)
    }

    /// Execute `command` and return only its output.
    ///
    /// `wait_time` defaults to the configured budget and `marker` to a fresh
    /// timestamp token. The selected pane is locked for the whole call.
    pub fn execute_and_capture(
        &self,
        command: &str,
        wait_time: Option<Duration>,
        marker: Option<Marker>,
    ) -> CommandResult {
        let address = self.target.address();
        let _lease = self.locks.acquire(&address);

        MarkerProtocol::new(
            &self.gateway,
            &self.wait,
            self.config.settle_delay,
            self.config.capture_lines,
        )
        .execute(
            &self.target,
            command,
            wait_time.unwrap_or(self.config.default_wait),
            marker,
        )
    }
}

/// Single-quote `s` for a POSIX shell.
fn shell_quote(s: &str) -> String {
    if !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c))
    {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', "'\"'\"'"))
}
