//! Command-line interface for the editor bridge.

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::bridge::DEFAULT_COMMAND_FILE;
use crate::command::{BridgeCommand, FocusTarget, OpenFile, Panel, TerminalSpec, DEFAULT_TMUX_SESSION};

/// Send commands to the editor through the bridge file
#[derive(Parser, Debug)]
#[command(name = "panectl-bridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Command file path
    #[arg(short, long, env = "PANECTL_BRIDGE_FILE", default_value = DEFAULT_COMMAND_FILE)]
    pub file: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a terminal attached to a tmux session
    Tmux {
        /// Session name
        #[arg(short, long, default_value = DEFAULT_TMUX_SESSION)]
        session: String,

        /// Open the terminal without attaching
        #[arg(long)]
        no_attach: bool,
    },

    /// Open a terminal
    Terminal {
        /// Terminal name
        #[arg(short, long, default_value = "Terminal")]
        name: String,

        /// Command to run
        #[arg(short = 'c', long = "cmd")]
        command: Option<String>,

        /// Working directory
        #[arg(long)]
        cwd: Option<String>,

        /// Shell to launch
        #[arg(long)]
        shell: Option<String>,
    },

    /// Toggle a panel
    Panel {
        #[arg(value_enum)]
        name: Panel,
    },

    /// Focus an element
    Focus {
        #[arg(value_enum)]
        target: FocusTarget,
    },

    /// Open a file
    Open {
        /// File path
        path: String,

        /// Line number
        #[arg(short, long)]
        line: Option<u32>,

        /// Column number
        #[arg(long)]
        column: Option<u32>,
    },

    /// Execute an editor command by id
    Vscode {
        /// Command id, e.g. workbench.action.files.saveAll
        command_id: String,

        /// Arguments; each is parsed as JSON, falling back to a string
        args: Vec<String>,
    },
}

impl Commands {
    /// Translate into the record to queue.
    pub fn to_bridge_command(&self) -> BridgeCommand {
        match self {
            Commands::Tmux { session, no_attach } => BridgeCommand::Tmux {
                session: session.clone(),
                attach: !no_attach,
            },
            Commands::Terminal {
                name,
                command,
                cwd,
                shell,
            } => BridgeCommand::Terminal(TerminalSpec {
                name: name.clone(),
                command: command.clone(),
                cwd: cwd.clone(),
                shell: shell.clone(),
            }),
            Commands::Panel { name } => BridgeCommand::Panel(*name),
            Commands::Focus { target } => BridgeCommand::Focus(*target),
            Commands::Open { path, line, column } => BridgeCommand::Editor(
                OpenFile::new(path.clone())
                    .at_line(line.unwrap_or(0))
                    .at_column(column.unwrap_or(0)),
            ),
            Commands::Vscode { command_id, args } => BridgeCommand::Vscode {
                command: command_id.clone(),
                args: args.iter().map(|a| parse_arg(a)).collect(),
            },
        }
    }

    /// Confirmation line printed after queueing.
    pub fn summary(&self) -> String {
        match self {
            Commands::Tmux { session, .. } => format!("Sent: Open TMux session '{}'", session),
            Commands::Terminal { name, .. } => format!("Sent: Open terminal '{}'", name),
            Commands::Panel { name } => format!("Sent: Toggle {} panel", name.as_str()),
            Commands::Focus { target } => format!("Sent: Focus {}", target.as_str()),
            Commands::Open { path, .. } => format!("Sent: Open {}", path),
            Commands::Vscode { command_id, .. } => {
                format!("Sent: VSCode command '{}'", command_id)
            }
        }
    }
}

fn parse_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

impl Cli {
    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
