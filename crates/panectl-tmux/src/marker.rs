//! Marker-delimited command capture.
//!
//! A pane is an unstructured, scrolling text buffer with no notion of where a
//! command's output begins or ends. The protocol brackets the command with
//! two `echo` statements carrying a unique marker, waits, captures the
//! scrollback and keeps only what lies between the two markers.
//!
//! Known gaps: a command that prints the marker text corrupts the
//! boundaries, and more than `capture_lines` of unrelated pane traffic
//! between send and capture pushes the start marker out of the window.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, trace};

use crate::executor::TmuxCommandRunner;
use crate::gateway::TmuxGateway;
use crate::target::PaneTarget;
use crate::wait::{WaitPhase, WaitStrategy};

/// A unique sentinel token for one command execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker(String);

impl Marker {
    /// Wrap a caller-chosen token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Fresh token from the current time in milliseconds.
    pub fn generate() -> Self {
        Self(format!("__TMUX_CMD_{}__", Utc::now().timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text that opens the output region.
    pub fn start_token(&self) -> String {
        format!("{}_START", self.0)
    }

    /// Text that closes the output region.
    pub fn end_token(&self) -> String {
        format!("{}_END", self.0)
    }

    fn echo(token: &str) -> String {
        format!("echo '{}'", token)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the scan of the captured buffer found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Both markers were found.
    Matched,
    /// No line carried the start marker.
    MarkerNotFound,
    /// The start marker was found but the end marker never showed up.
    TimedOut,
}

/// Result of one command execution.
///
/// `success` only reports that the attempt was made; it is `true` even when
/// no marker was found. Look at `outcome` to tell the cases apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
    pub outcome: CaptureOutcome,
}

/// Pull the output of `command` out of a captured buffer.
///
/// Every line containing the start token (re)starts capturing and is
/// dropped. While capturing, lines whose trimmed text equals `command` are
/// dropped as the shell's echo of the input. The first line containing the
/// end token stops the scan and is dropped too. The kept lines are joined
/// and trimmed.
pub fn extract_output(buffer: &str, marker: &Marker, command: &str) -> (String, CaptureOutcome) {
    let start = marker.start_token();
    let end = marker.end_token();

    let mut lines = Vec::new();
    let mut capturing = false;
    let mut saw_start = false;
    let mut saw_end = false;

    for line in buffer.split('\n') {
        if line.contains(&start) {
            capturing = true;
            saw_start = true;
            continue;
        }
        if line.contains(&end) {
            saw_end = true;
            break;
        }
        if capturing {
            if line.trim() == command {
                continue;
            }
            lines.push(line);
        }
    }

    let outcome = match (saw_start, saw_end) {
        (false, _) => CaptureOutcome::MarkerNotFound,
        (true, false) => CaptureOutcome::TimedOut,
        (true, true) => CaptureOutcome::Matched,
    };
    (lines.join("\n").trim().to_string(), outcome)
}

/// Drives one marker-bracketed execution through a gateway.
pub struct MarkerProtocol<'a, R, W> {
    gateway: &'a TmuxGateway<R>,
    wait: &'a W,
    settle_delay: Duration,
    capture_lines: u32,
}

impl<'a, R: TmuxCommandRunner, W: WaitStrategy> MarkerProtocol<'a, R, W> {
    pub fn new(
        gateway: &'a TmuxGateway<R>,
        wait: &'a W,
        settle_delay: Duration,
        capture_lines: u32,
    ) -> Self {
        Self {
            gateway,
            wait,
            settle_delay,
            capture_lines,
        }
    }

    fn capture_window(&self, target: &PaneTarget) -> String {
        self.gateway
            .capture_pane(target, -i64::from(self.capture_lines), -1)
    }

    /// Run `command` on `target` and return the text printed between the
    /// markers.
    ///
    /// The sequence is: capture, echo start, settle, command, `wait_time`,
    /// echo end, settle, capture. Gateway failures are not distinguished;
    /// they surface as empty output with `success: true`.
    pub fn execute(
        &self,
        target: &PaneTarget,
        command: &str,
        wait_time: Duration,
        marker: Option<Marker>,
    ) -> CommandResult {
        let marker = marker.unwrap_or_else(Marker::generate);
        debug!(pane = %target, marker = %marker, command = %command, "executing with markers");

        // Pre-execution snapshot. Extraction does not read it; only its size
        // is traced.
        let before = self.capture_window(target);
        trace!(lines = before.trim().split('\n').count(), "captured pre-execution buffer");

        self.gateway
            .send_keys(target, &Marker::echo(&marker.start_token()), true);
        self.wait.wait(WaitPhase::Settle, self.settle_delay);

        self.gateway.send_keys(target, command, true);
        self.wait.wait(WaitPhase::Command, wait_time);

        self.gateway
            .send_keys(target, &Marker::echo(&marker.end_token()), true);
        self.wait.wait(WaitPhase::Settle, self.settle_delay);

        let after = self.capture_window(target);
        let (output, outcome) = extract_output(&after, &marker, command);
        debug!(outcome = ?outcome, output_len = output.len(), "command output extracted");

        CommandResult {
            success: true,
            output,
            error: None,
            outcome,
        }
    }
}
