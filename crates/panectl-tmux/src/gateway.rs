//! Primitive tmux operations against a session or pane.
//!
//! Every method here shells out once (twice for `send_keys` with Enter) and
//! never fails: tmux errors are logged at debug level and collapsed into
//! `false`, an empty string, an empty list or `None`.

use tracing::{debug, warn};

use crate::executor::{TmuxCommandRunner, TmuxExecutor};
use crate::pane::{ControlKey, PaneInfo, PANE_INFO_FORMAT};
use crate::target::PaneTarget;
use crate::Result;

/// Session gateway over a [`TmuxCommandRunner`].
#[derive(Debug, Clone, Default)]
pub struct TmuxGateway<R = TmuxExecutor> {
    runner: R,
}

impl<R: TmuxCommandRunner> TmuxGateway<R> {
    /// Wrap a runner.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// The underlying runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn run(&self, op: &'static str, args: &[&str]) -> Result<String> {
        self.runner.run(args).inspect_err(|e| {
            debug!(op, error = %e, "tmux operation failed");
        })
    }

    /// Names of all running sessions; empty when tmux is missing or idle.
    pub fn list_sessions(&self) -> Vec<String> {
        match self.run("list-sessions", &["list-sessions", "-F", "#{session_name}"]) {
            Ok(stdout) => stdout
                .lines()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Whether tmux reports the named session.
    pub fn session_exists(&self, name: &str) -> bool {
        self.run("has-session", &["has-session", "-t", name]).is_ok()
    }

    /// Send literal text, then optionally a separate Enter keystroke.
    ///
    /// The text goes through `send-keys -l` so words like `Enter` or `C-c`
    /// inside it are typed, not interpreted. Enter is its own invocation and
    /// is skipped if the text could not be delivered.
    pub fn send_keys(&self, target: &PaneTarget, text: &str, press_enter: bool) -> bool {
        let address = target.address();
        debug!(pane = %address, text = %text, press_enter, "sending keys");

        if !text.is_empty()
            && self
                .run("send-keys", &["send-keys", "-t", &address, "-l", "--", text])
                .is_err()
        {
            return false;
        }
        if press_enter {
            return self.send_control(target, ControlKey::Enter);
        }
        true
    }

    /// Send a named key such as `C-c` or `Enter`.
    pub fn send_control(&self, target: &PaneTarget, key: ControlKey) -> bool {
        let address = target.address();
        debug!(pane = %address, key = %key, "sending control key");
        self.run("send-keys", &["send-keys", "-t", &address, key.key_name()])
            .is_ok()
    }

    /// Capture pane text between two line offsets.
    ///
    /// `0` is the top of the visible area, negative values reach into
    /// scrollback and `-1` as the end bound is the last visible line. Ranges
    /// beyond the available history are passed through unchanged.
    pub fn capture_pane(&self, target: &PaneTarget, start_line: i64, end_line: i64) -> String {
        let address = target.address();
        let start = start_line.to_string();
        let end = end_bound(end_line);
        self.run(
            "capture-pane",
            &["capture-pane", "-t", &address, "-p", "-S", &start, "-E", &end],
        )
        .unwrap_or_default()
    }

    /// Query pid, foreground command and size of a pane.
    pub fn pane_info(&self, target: &PaneTarget) -> Option<PaneInfo> {
        let address = target.address();
        let stdout = self
            .run(
                "display-message",
                &["display-message", "-t", &address, "-p", PANE_INFO_FORMAT],
            )
            .ok()?;
        match PaneInfo::parse(&stdout) {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(pane = %address, error = %e, "failed to parse pane info");
                None
            }
        }
    }
}

/// Render an end offset for `capture-pane -E`.
///
/// tmux reads `-E -1` as the last line of history, above the visible area;
/// the bottom of the visible area is spelled `-`.
fn end_bound(end_line: i64) -> String {
    if end_line == -1 {
        "-".to_string()
    } else {
        end_line.to_string()
    }
}

impl TmuxGateway<TmuxExecutor> {
    /// Whether the configured tmux binary is on `PATH`.
    pub fn is_available(&self) -> bool {
        self.runner.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TmuxError;
    use std::sync::Mutex;

    /// Records every invocation and answers from a closure.
    struct Recorder<F> {
        calls: Mutex<Vec<Vec<String>>>,
        reply: F,
    }

    impl<F> Recorder<F>
    where
        F: Fn(&[&str]) -> Result<String> + Send + Sync,
    {
        fn new(reply: F) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl<F> TmuxCommandRunner for Recorder<F>
    where
        F: Fn(&[&str]) -> Result<String> + Send + Sync,
    {
        fn run(&self, args: &[&str]) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push(args.iter().map(|s| s.to_string()).collect());
            (self.reply)(args)
        }
    }

    fn ok(_: &[&str]) -> Result<String> {
        Ok(String::new())
    }

    fn failing(_: &[&str]) -> Result<String> {
        Err(TmuxError::CommandFailed("can't find pane: nope:0.0".to_string()))
    }

    #[test]
    fn test_list_sessions_parses_names() {
        let gw = TmuxGateway::new(Recorder::new(|_: &[&str]| {
            Ok("dev\n  build \n\nscratch\n".to_string())
        }));
        assert_eq!(gw.list_sessions(), vec!["dev", "build", "scratch"]);
        assert_eq!(
            gw.runner().calls()[0],
            vec!["list-sessions", "-F", "#{session_name}"]
        );
    }

    #[test]
    fn test_list_sessions_empty_when_tmux_missing() {
        let gw = TmuxGateway::new(Recorder::new(|_: &[&str]| {
            Err(TmuxError::NotFound("tmux".to_string()))
        }));
        assert!(gw.list_sessions().is_empty());
    }

    #[test]
    fn test_list_sessions_with_real_missing_binary() {
        let gw = TmuxGateway::new(TmuxExecutor::new("panectl-no-such-tmux-binary"));
        assert!(gw.list_sessions().is_empty());
        assert!(!gw.is_available());
    }

    #[test]
    fn test_session_exists() {
        let gw = TmuxGateway::new(Recorder::new(|args: &[&str]| {
            if args[2] == "dev" {
                Ok(String::new())
            } else {
                Err(TmuxError::CommandFailed("can't find session".to_string()))
            }
        }));
        assert!(gw.session_exists("dev"));
        assert!(!gw.session_exists("prod"));
    }

    #[test]
    fn test_send_keys_with_enter_is_two_invocations() {
        let gw = TmuxGateway::new(Recorder::new(ok));
        let target = PaneTarget::new("dev");

        assert!(gw.send_keys(&target, "echo Enter", true));

        let calls = gw.runner().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            vec!["send-keys", "-t", "dev:0.0", "-l", "--", "echo Enter"]
        );
        assert_eq!(calls[1], vec!["send-keys", "-t", "dev:0.0", "Enter"]);
    }

    #[test]
    fn test_send_keys_without_enter() {
        let gw = TmuxGateway::new(Recorder::new(ok));
        let target = PaneTarget::new("dev");

        assert!(gw.send_keys(&target, "partial", false));

        let calls = gw.runner().calls();
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].iter().any(|a| a == "Enter"));
    }

    #[test]
    fn test_send_keys_text_starting_with_dash() {
        let gw = TmuxGateway::new(Recorder::new(|args: &[&str]| {
            // tmux rejects unknown flags unless option parsing was ended.
            match args {
                ["send-keys", "-t", _, "-l", "--", _] | ["send-keys", "-t", _, "Enter"] => {
                    Ok(String::new())
                }
                _ => Err(TmuxError::CommandFailed(
                    "exit code 1: command send-keys: unknown flag -n".to_string(),
                )),
            }
        }));
        let target = PaneTarget::new("dev");

        assert!(gw.send_keys(&target, "-n 5", true));
        assert!(gw.send_keys(&target, "--help", false));

        let calls = gw.runner().calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], vec!["send-keys", "-t", "dev:0.0", "-l", "--", "-n 5"]);
        assert_eq!(calls[1], vec!["send-keys", "-t", "dev:0.0", "Enter"]);
        assert_eq!(calls[2][5], "--help");
    }

    #[test]
    fn test_send_keys_empty_text_only_enter() {
        let gw = TmuxGateway::new(Recorder::new(ok));
        assert!(gw.send_keys(&PaneTarget::new("dev"), "", true));
        assert_eq!(
            gw.runner().calls(),
            vec![vec!["send-keys", "-t", "dev:0.0", "Enter"]]
        );
    }

    #[test]
    fn test_send_keys_failure_skips_enter() {
        let gw = TmuxGateway::new(Recorder::new(failing));
        assert!(!gw.send_keys(&PaneTarget::new("nope"), "ls", true));
        assert_eq!(gw.runner().calls().len(), 1);
    }

    #[test]
    fn test_send_control() {
        let gw = TmuxGateway::new(Recorder::new(ok));
        let mut target = PaneTarget::new("dev");
        target.select_pane(1, 2);

        assert!(gw.send_control(&target, ControlKey::Interrupt));
        assert_eq!(
            gw.runner().calls()[0],
            vec!["send-keys", "-t", "dev:1.2", "C-c"]
        );
    }

    #[test]
    fn test_capture_pane_args() {
        let gw = TmuxGateway::new(Recorder::new(|_: &[&str]| Ok("line one\nline two\n".to_string())));
        let out = gw.capture_pane(&PaneTarget::new("dev"), -1000, -1);
        assert_eq!(out, "line one\nline two\n");
        assert_eq!(
            gw.runner().calls()[0],
            vec!["capture-pane", "-t", "dev:0.0", "-p", "-S", "-1000", "-E", "-"]
        );
    }

    #[test]
    fn test_capture_pane_other_end_bounds_pass_through() {
        let gw = TmuxGateway::new(Recorder::new(ok));
        let target = PaneTarget::new("dev");
        gw.capture_pane(&target, -50, -10);
        gw.capture_pane(&target, 0, 5);

        let calls = gw.runner().calls();
        assert_eq!(calls[0][7], "-10");
        assert_eq!(calls[1][7], "5");
    }

    #[test]
    fn test_capture_pane_failure_is_empty() {
        let gw = TmuxGateway::new(Recorder::new(failing));
        assert_eq!(gw.capture_pane(&PaneTarget::new("nope"), 0, -1), "");
    }

    #[test]
    fn test_pane_info() {
        let gw = TmuxGateway::new(Recorder::new(|_: &[&str]| Ok("901|bash|200|50\n".to_string())));
        let info = gw.pane_info(&PaneTarget::new("dev")).unwrap();
        assert_eq!(info.pid, 901);
        assert_eq!(info.current_command, "bash");
        assert_eq!(
            gw.runner().calls()[0],
            vec!["display-message", "-t", "dev:0.0", "-p", PANE_INFO_FORMAT]
        );
    }

    #[test]
    fn test_pane_info_failure_and_garbage() {
        let gw = TmuxGateway::new(Recorder::new(failing));
        assert!(gw.pane_info(&PaneTarget::new("nope")).is_none());

        let gw = TmuxGateway::new(Recorder::new(|_: &[&str]| Ok("901|bash\n".to_string())));
        assert!(gw.pane_info(&PaneTarget::new("dev")).is_none());
    }
}
