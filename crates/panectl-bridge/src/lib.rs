//! File-based command bridge to an editor extension.
//!
//! Each request is appended as one line to a command file that the
//! extension watches, reads and clears. Nothing is ever read back.
//!
//! # Example
//!
//! ```no_run
//! use panectl_bridge::{EditorBridge, OpenFile, Panel};
//!
//! let bridge = EditorBridge::from_env();
//! bridge.open_tmux_terminal("dev", true).unwrap();
//! bridge.toggle_panel(Panel::Terminal).unwrap();
//! bridge.open_file(OpenFile::new("src/lib.rs").at_line(42)).unwrap();
//! ```

pub mod bridge;
pub mod cli;
pub mod command;
pub mod error;

pub use bridge::{EditorBridge, COMMAND_FILE_ENV, DEFAULT_COMMAND_FILE};
pub use command::{
    actions, format_record, BridgeCommand, FocusTarget, OpenFile, Panel, TerminalSpec,
    DEFAULT_TMUX_SESSION,
};
pub use error::{BridgeError, Result};
