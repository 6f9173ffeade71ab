//! Commands understood by the editor extension and their record format.
//!
//! One record per line: the verb, a space and a JSON object of arguments, or
//! the bare verb when there are none.

use serde::Serialize;
use serde_json::Value;

use crate::Result;

/// Session name used when the caller doesn't name one.
pub const DEFAULT_TMUX_SESSION: &str = "vscode-tmux";

/// Editor panels that can be toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Terminal,
    Output,
    Problems,
    Debug,
}

impl Panel {
    pub fn as_str(self) -> &'static str {
        match self {
            Panel::Terminal => "terminal",
            Panel::Output => "output",
            Panel::Problems => "problems",
            Panel::Debug => "debug",
        }
    }
}

/// Editor areas that can take focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FocusTarget {
    Editor,
    Terminal,
    Sidebar,
    Explorer,
}

impl FocusTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            FocusTarget::Editor => "editor",
            FocusTarget::Terminal => "terminal",
            FocusTarget::Sidebar => "sidebar",
            FocusTarget::Explorer => "explorer",
        }
    }
}

/// A new integrated terminal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminalSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

impl TerminalSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: None,
            cwd: None,
            shell: None,
        }
    }
}

impl Default for TerminalSpec {
    fn default() -> Self {
        Self::new("Terminal")
    }
}

/// A file to open in the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenFile {
    pub file: String,
    pub preview: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl OpenFile {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            preview: true,
            line: None,
            column: None,
        }
    }

    /// Jump to a line; 0 means "no line".
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = (line > 0).then_some(line);
        self
    }

    /// Jump to a column; 0 means "no column".
    #[must_use]
    pub fn at_column(mut self, column: u32) -> Self {
        self.column = (column > 0).then_some(column);
        self
    }
}

#[derive(Serialize)]
struct TmuxArgs<'a> {
    session: &'a str,
    attach: bool,
}

#[derive(Serialize)]
struct PanelArgs {
    panel: Panel,
}

#[derive(Serialize)]
struct FocusArgs {
    target: FocusTarget,
}

#[derive(Serialize)]
struct VscodeArgs<'a> {
    command: &'a str,
    args: &'a [Value],
}

/// One request for the editor extension.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeCommand {
    /// Open an integrated terminal attached to a tmux session.
    Tmux { session: String, attach: bool },
    /// Open a plain integrated terminal.
    Terminal(TerminalSpec),
    /// Toggle a panel.
    Panel(Panel),
    /// Move focus.
    Focus(FocusTarget),
    /// Open a file.
    Editor(OpenFile),
    /// Run any editor command by id.
    Vscode { command: String, args: Vec<Value> },
}

impl BridgeCommand {
    /// Attach-to-session request for `session`.
    pub fn tmux(session: impl Into<String>) -> Self {
        BridgeCommand::Tmux {
            session: session.into(),
            attach: true,
        }
    }

    /// The record verb.
    pub fn verb(&self) -> &'static str {
        match self {
            BridgeCommand::Tmux { .. } => "TMUX",
            BridgeCommand::Terminal(_) => "TERMINAL",
            BridgeCommand::Panel(_) => "PANEL",
            BridgeCommand::Focus(_) => "FOCUS",
            BridgeCommand::Editor(_) => "EDITOR",
            BridgeCommand::Vscode { .. } => "VSCODE",
        }
    }

    /// JSON-encoded arguments, fields in the order the extension documents.
    pub fn args_json(&self) -> Result<String> {
        let json = match self {
            BridgeCommand::Tmux { session, attach } => serde_json::to_string(&TmuxArgs {
                session,
                attach: *attach,
            })?,
            BridgeCommand::Terminal(spec) => serde_json::to_string(spec)?,
            BridgeCommand::Panel(panel) => serde_json::to_string(&PanelArgs { panel: *panel })?,
            BridgeCommand::Focus(target) => {
                serde_json::to_string(&FocusArgs { target: *target })?
            }
            BridgeCommand::Editor(open) => serde_json::to_string(open)?,
            BridgeCommand::Vscode { command, args } => {
                serde_json::to_string(&VscodeArgs { command, args })?
            }
        };
        Ok(json)
    }

    /// Full newline-terminated record.
    pub fn to_record(&self) -> Result<String> {
        Ok(format_record(self.verb(), Some(&self.args_json()?)))
    }
}

/// `VERB {json}\n`, or `VERB\n` without arguments.
pub fn format_record(verb: &str, args_json: Option<&str>) -> String {
    match args_json {
        Some(args) => format!("{} {}\n", verb, args),
        None => format!("{}\n", verb),
    }
}

/// Workbench command ids for common editor actions.
pub mod actions {
    pub const SHOW_COMMANDS: &str = "workbench.action.showCommands";
    pub const TOGGLE_SIDEBAR: &str = "workbench.action.toggleSidebarVisibility";
    pub const NEW_UNTITLED_FILE: &str = "workbench.action.files.newUntitledFile";
    pub const SAVE: &str = "workbench.action.files.save";
    pub const SAVE_ALL: &str = "workbench.action.files.saveAll";
    pub const CLOSE_ACTIVE_EDITOR: &str = "workbench.action.closeActiveEditor";
    pub const SPLIT_EDITOR: &str = "workbench.action.splitEditor";
    pub const RUN_TASK: &str = "workbench.action.tasks.runTask";
    pub const DEBUG_START: &str = "workbench.action.debug.start";
    pub const DEBUG_STOP: &str = "workbench.action.debug.stop";
    pub const OPEN_SETTINGS: &str = "workbench.action.openSettings";
    pub const RELOAD_WINDOW: &str = "workbench.action.reloadWindow";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tmux_record() {
        let record = BridgeCommand::tmux("dev").to_record().unwrap();
        assert_eq!(record, "TMUX {\"session\":\"dev\",\"attach\":true}\n");
    }

    #[test]
    fn test_terminal_skips_missing_fields() {
        let mut spec = TerminalSpec::new("build");
        spec.cwd = Some("/srv/app".to_string());
        let record = BridgeCommand::Terminal(spec).to_record().unwrap();
        assert_eq!(
            record,
            "TERMINAL {\"name\":\"build\",\"cwd\":\"/srv/app\"}\n"
        );
    }

    #[test]
    fn test_panel_and_focus_are_lowercase() {
        assert_eq!(
            BridgeCommand::Panel(Panel::Problems).args_json().unwrap(),
            "{\"panel\":\"problems\"}"
        );
        assert_eq!(
            BridgeCommand::Focus(FocusTarget::Explorer).args_json().unwrap(),
            "{\"target\":\"explorer\"}"
        );
    }

    #[test]
    fn test_open_file_line_zero_is_dropped() {
        let open = OpenFile::new("src/main.rs").at_line(0).at_column(4);
        let args = BridgeCommand::Editor(open).args_json().unwrap();
        assert_eq!(
            args,
            "{\"file\":\"src/main.rs\",\"preview\":true,\"column\":4}"
        );
    }

    #[test]
    fn test_vscode_args_are_json() {
        let cmd = BridgeCommand::Vscode {
            command: actions::RUN_TASK.to_string(),
            args: vec![json!("build")],
        };
        let record = cmd.to_record().unwrap();
        assert!(record.starts_with("VSCODE "));
        let parsed: Value = serde_json::from_str(record["VSCODE ".len()..].trim_end()).unwrap();
        assert_eq!(
            parsed,
            json!({"command": "workbench.action.tasks.runTask", "args": ["build"]})
        );
    }

    #[test]
    fn test_bare_verb_record() {
        assert_eq!(format_record("PING", None), "PING\n");
        assert_eq!(format_record("PING", Some("{}")), "PING {}\n");
    }
}
