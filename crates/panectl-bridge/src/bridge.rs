//! Append-only command file shared with the editor extension.
//!
//! The bridge only ever appends. The extension reads the file, acts on each
//! record and truncates it; there is no acknowledgement channel.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::command::{actions, BridgeCommand, FocusTarget, OpenFile, Panel, TerminalSpec};
use crate::error::{BridgeError, Result};

/// Environment variable overriding the command file location.
pub const COMMAND_FILE_ENV: &str = "PANECTL_BRIDGE_FILE";

/// Where the extension watches for commands by default.
pub const DEFAULT_COMMAND_FILE: &str = "/tmp/vscode-bridge-commands";

/// Client side of the file-based editor bridge.
#[derive(Debug, Clone)]
pub struct EditorBridge {
    command_file: PathBuf,
}

impl EditorBridge {
    /// Bridge writing to `command_file`; a leading `~` is expanded.
    pub fn new(command_file: impl AsRef<str>) -> Self {
        let expanded = shellexpand::tilde(command_file.as_ref());
        Self {
            command_file: PathBuf::from(expanded.as_ref()),
        }
    }

    /// Bridge writing to `PANECTL_BRIDGE_FILE`, or the default file.
    pub fn from_env() -> Self {
        let path = std::env::var(COMMAND_FILE_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_COMMAND_FILE.to_string());
        Self::new(path)
    }

    pub fn command_file(&self) -> &Path {
        &self.command_file
    }

    /// Append one command record.
    pub fn send(&self, command: &BridgeCommand) -> Result<()> {
        let record = command.to_record()?;
        debug!(file = %self.command_file.display(), verb = command.verb(), "queueing editor command");
        self.append(record.as_bytes())
    }

    fn append(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.command_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| BridgeError::DirectoryError {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let write_err = |source: std::io::Error| BridgeError::WriteError {
            path: self.command_file.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.command_file)
            .map_err(write_err)?;
        // Single write so concurrent appenders don't interleave a record.
        file.write_all(data).map_err(write_err)?;
        Ok(())
    }

    /// Open an editor terminal attached to a tmux session.
    pub fn open_tmux_terminal(&self, session: &str, attach: bool) -> Result<()> {
        self.send(&BridgeCommand::Tmux {
            session: session.to_string(),
            attach,
        })
    }

    pub fn open_terminal(&self, spec: TerminalSpec) -> Result<()> {
        self.send(&BridgeCommand::Terminal(spec))
    }

    pub fn toggle_panel(&self, panel: Panel) -> Result<()> {
        self.send(&BridgeCommand::Panel(panel))
    }

    pub fn focus(&self, target: FocusTarget) -> Result<()> {
        self.send(&BridgeCommand::Focus(target))
    }

    pub fn open_file(&self, open: OpenFile) -> Result<()> {
        self.send(&BridgeCommand::Editor(open))
    }

    /// Run an editor command by id with positional arguments.
    pub fn execute_command(&self, command: &str, args: Vec<Value>) -> Result<()> {
        self.send(&BridgeCommand::Vscode {
            command: command.to_string(),
            args,
        })
    }

    pub fn show_command_palette(&self) -> Result<()> {
        self.execute_command(actions::SHOW_COMMANDS, Vec::new())
    }

    pub fn toggle_sidebar(&self) -> Result<()> {
        self.execute_command(actions::TOGGLE_SIDEBAR, Vec::new())
    }

    pub fn new_file(&self) -> Result<()> {
        self.execute_command(actions::NEW_UNTITLED_FILE, Vec::new())
    }

    pub fn save_file(&self) -> Result<()> {
        self.execute_command(actions::SAVE, Vec::new())
    }

    pub fn save_all(&self) -> Result<()> {
        self.execute_command(actions::SAVE_ALL, Vec::new())
    }

    pub fn close_editor(&self) -> Result<()> {
        self.execute_command(actions::CLOSE_ACTIVE_EDITOR, Vec::new())
    }

    pub fn split_editor(&self) -> Result<()> {
        self.execute_command(actions::SPLIT_EDITOR, Vec::new())
    }

    pub fn run_task(&self, task_name: &str) -> Result<()> {
        self.execute_command(actions::RUN_TASK, vec![Value::from(task_name)])
    }

    pub fn start_debugging(&self) -> Result<()> {
        self.execute_command(actions::DEBUG_START, Vec::new())
    }

    pub fn stop_debugging(&self) -> Result<()> {
        self.execute_command(actions::DEBUG_STOP, Vec::new())
    }

    pub fn open_settings(&self) -> Result<()> {
        self.execute_command(actions::OPEN_SETTINGS, Vec::new())
    }

    pub fn reload_window(&self) -> Result<()> {
        self.execute_command(actions::RELOAD_WINDOW, Vec::new())
    }
}

impl Default for EditorBridge {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_FILE)
    }
}
