//! A fake tmux server that behaves like a shell with an empty prompt.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use panectl_tmux::{Result, TmuxCommandRunner, TmuxError, WaitPhase, WaitStrategy};

/// Rows in the simulated visible area.
pub const SCREEN_HEIGHT: usize = 24;

#[derive(Default)]
struct Pane {
    lines: Vec<String>,
    pending: String,
}

#[derive(Default)]
struct State {
    panes: HashMap<String, Pane>,
    calls: Vec<Vec<String>>,
}

/// In-memory stand-in for the tmux binary.
///
/// Typed input is echoed as its own line (empty prompt). `echo X` prints X
/// with surrounding single quotes removed; commands registered with
/// [`FakeTmux::program`] print their canned output; anything else prints
/// nothing.
#[derive(Default)]
pub struct FakeTmux {
    sessions: Vec<String>,
    programs: HashMap<String, Vec<String>>,
    state: Mutex<State>,
}

impl FakeTmux {
    pub fn with_sessions(names: &[&str]) -> Self {
        Self {
            sessions: names.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn program(mut self, command: &str, output: &[&str]) -> Self {
        self.programs.insert(
            command.to_string(),
            output.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn program_lines(mut self, command: &str, output: Vec<String>) -> Self {
        self.programs.insert(command.to_string(), output);
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn screen(&self, address: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .panes
            .get(address)
            .map(|p| p.lines.clone())
            .unwrap_or_default()
    }

    fn check_target(&self, address: &str) -> Result<()> {
        let session = address.split(':').next().unwrap_or_default();
        if self.sessions.iter().any(|s| s == session) {
            Ok(())
        } else {
            Err(TmuxError::CommandFailed(format!(
                "exit code 1: can't find session: {}",
                session
            )))
        }
    }

    fn execute(&self, pane: &mut Pane, line: String) {
        pane.lines.push(line.clone());
        if let Some(arg) = line.strip_prefix("echo ") {
            let arg = arg
                .strip_prefix('\'')
                .and_then(|a| a.strip_suffix('\''))
                .unwrap_or(arg);
            pane.lines.push(arg.to_string());
        } else if let Some(output) = self.programs.get(line.trim()) {
            pane.lines.extend(output.iter().cloned());
        } else if line.trim() == "clear" {
            pane.lines.clear();
        }
    }
}

impl TmuxCommandRunner for FakeTmux {
    fn run(&self, args: &[&str]) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(args.iter().map(|s| s.to_string()).collect());

        match args {
            ["list-sessions", ..] => {
                if self.sessions.is_empty() {
                    return Err(TmuxError::CommandFailed(
                        "exit code 1: no server running".to_string(),
                    ));
                }
                Ok(self.sessions.join("\n") + "\n")
            }
            ["has-session", "-t", name] => self.check_target(name).map(|_| String::new()),
            ["send-keys", "-t", address, "-l", "--", text] => {
                self.check_target(address)?;
                let pane = state.panes.entry(address.to_string()).or_default();
                pane.pending.push_str(text);
                Ok(String::new())
            }
            ["send-keys", "-t", address, key] => {
                self.check_target(address)?;
                let mut pane = state.panes.remove(*address).unwrap_or_default();
                match *key {
                    "Enter" => {
                        let line = std::mem::take(&mut pane.pending);
                        self.execute(&mut pane, line);
                    }
                    "C-c" => {
                        pane.pending.clear();
                        pane.lines.push("^C".to_string());
                    }
                    _ => {}
                }
                state.panes.insert(address.to_string(), pane);
                Ok(String::new())
            }
            ["capture-pane", "-t", address, "-p", "-S", start, "-E", end] => {
                self.check_target(address)?;
                let lines = state
                    .panes
                    .get(*address)
                    .map(|p| p.lines.clone())
                    .unwrap_or_default();
                Ok(capture(&lines, start, end))
            }
            ["display-message", "-t", address, "-p", _format] => {
                self.check_target(address)?;
                Ok("4242|bash|80|24\n".to_string())
            }
            other => Err(TmuxError::CommandFailed(format!(
                "unexpected tmux call: {:?}",
                other
            ))),
        }
    }
}

/// `capture-pane -p -S start -E end` over a pane's output, the way tmux
/// resolves the bounds.
///
/// Output fills the visible area top-down; once it is full, older lines
/// scroll into history. Row `0` is the top of the visible area, negative
/// rows are history (`-1` is the newest history line) and `-` is the top of
/// history for `-S` or the bottom of the visible area for `-E`. Bounds are
/// clamped to what exists, and the visible area always has
/// [`SCREEN_HEIGHT`] rows, blank ones included.
pub fn capture(lines: &[String], start: &str, end: &str) -> String {
    let history = lines.len().saturating_sub(SCREEN_HEIGHT) as i64;
    let last = history + SCREEN_HEIGHT as i64 - 1;
    let resolve = |bound: &str, dash: i64| -> i64 {
        let row = match bound {
            "-" => dash,
            n => history + n.parse::<i64>().expect("numeric capture bound"),
        };
        row.clamp(0, last)
    };

    let mut top = resolve(start, 0);
    let mut bottom = resolve(end, last);
    if bottom < top {
        std::mem::swap(&mut top, &mut bottom);
    }

    let rows: Vec<&str> = (top..=bottom)
        .map(|i| lines.get(i as usize).map(String::as_str).unwrap_or(""))
        .collect();
    rows.join("\n") + "\n"
}

/// Records every pause without sleeping.
#[derive(Default)]
pub struct RecordingWait {
    pub pauses: Mutex<Vec<(WaitPhase, Duration)>>,
}

impl RecordingWait {
    pub fn pauses(&self) -> Vec<(WaitPhase, Duration)> {
        self.pauses.lock().unwrap().clone()
    }
}

impl WaitStrategy for RecordingWait {
    fn wait(&self, phase: WaitPhase, duration: Duration) {
        self.pauses.lock().unwrap().push((phase, duration));
    }
}
