//! CLI argument definitions.

use std::time::Duration;

use clap::Parser;
use panectl_tmux::ControllerConfig;

/// Control tmux panes and capture command output
#[derive(Parser, Debug)]
#[command(name = "panectl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// List tmux sessions
    #[arg(short, long)]
    pub list: bool,

    /// Session to control
    #[arg(short, long, env = "PANECTL_SESSION", required_unless_present = "list")]
    pub session: Option<String>,

    /// Window index
    #[arg(short, long, default_value_t = 0)]
    pub window: u32,

    /// Pane index
    #[arg(short, long, default_value_t = 0)]
    pub pane: u32,

    /// Command to execute; its output is printed
    #[arg(short, long)]
    pub command: Option<String>,

    /// How long to let the command run, in milliseconds
    #[arg(long, value_name = "MS")]
    pub wait: Option<u64>,

    /// Print the visible pane contents
    #[arg(long)]
    pub capture: bool,

    /// Print the last N lines of scrollback
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub history: Option<u32>,

    /// Print pane pid, foreground command and size
    #[arg(long)]
    pub info: bool,

    /// Send Ctrl-C
    #[arg(long)]
    pub interrupt: bool,

    /// Send Ctrl-D
    #[arg(long)]
    pub eof: bool,

    /// Clear the pane
    #[arg(long)]
    pub clear: bool,

    /// Run a script in the pane with bash
    #[arg(long, value_name = "PATH")]
    pub script: Option<String>,

    /// Ask the editor to open a terminal attached to the session
    #[arg(long)]
    pub open_in_editor: bool,

    /// Named tmux server socket (tmux -L)
    #[arg(short = 'L', long)]
    pub socket_name: Option<String>,

    /// tmux binary to run
    #[arg(long)]
    pub tmux_bin: Option<String>,

    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
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

    /// `base` with the tmux flags given on the command line applied.
    pub fn controller_config(&self, mut base: ControllerConfig) -> ControllerConfig {
        if let Some(bin) = &self.tmux_bin {
            base = base.with_tmux_bin(bin.clone());
        }
        if let Some(name) = &self.socket_name {
            base = base.with_socket_name(name.clone());
        }
        base
    }

    /// Execution budget for `--command`, if one was given.
    pub fn wait_time(&self) -> Option<Duration> {
        self.wait.map(Duration::from_millis)
    }
}
