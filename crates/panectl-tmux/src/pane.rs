//! Pane metadata and named keys.

use std::fmt;

use crate::{Result, TmuxError};

/// `display-message` format queried for [`PaneInfo`].
pub const PANE_INFO_FORMAT: &str =
    "#{pane_pid}|#{pane_current_command}|#{pane_width}|#{pane_height}";

/// Metadata about a single pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneInfo {
    /// PID of the process started in the pane (usually the shell).
    pub pid: u32,
    /// Foreground command running in the pane.
    pub current_command: String,
    /// Pane width in characters.
    pub width: u32,
    /// Pane height in characters.
    pub height: u32,
}

impl PaneInfo {
    /// Parse a `display-message` reply rendered with [`PANE_INFO_FORMAT`].
    ///
    /// Expected format: `pid|current_command|width|height`
    pub fn parse(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.trim().split('|').collect();
        if parts.len() != 4 {
            return Err(TmuxError::ParseError(format!(
                "invalid pane info format: {}",
                line
            )));
        }

        let pid: u32 = parts[0]
            .parse()
            .map_err(|_| TmuxError::ParseError(format!("invalid pane pid: {}", parts[0])))?;
        let width: u32 = parts[2]
            .parse()
            .map_err(|_| TmuxError::ParseError(format!("invalid pane width: {}", parts[2])))?;
        let height: u32 = parts[3]
            .parse()
            .map_err(|_| TmuxError::ParseError(format!("invalid pane height: {}", parts[3])))?;

        Ok(Self {
            pid,
            current_command: parts[1].to_string(),
            width,
            height,
        })
    }

    /// Field names and rendered values, in display order.
    pub fn fields(&self) -> [(&'static str, String); 4] {
        [
            ("pid", self.pid.to_string()),
            ("current_command", self.current_command.clone()),
            ("width", self.width.to_string()),
            ("height", self.height.to_string()),
        ]
    }
}

/// Keys sent by name rather than as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKey {
    /// Ctrl+C.
    Interrupt,
    /// Ctrl+D.
    Eof,
    /// Ctrl+Z.
    Suspend,
    Escape,
    Enter,
}

impl ControlKey {
    /// The key name tmux `send-keys` understands.
    pub fn key_name(self) -> &'static str {
        match self {
            ControlKey::Interrupt => "C-c",
            ControlKey::Eof => "C-d",
            ControlKey::Suspend => "C-z",
            ControlKey::Escape => "Escape",
            ControlKey::Enter => "Enter",
        }
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_name())
    }
}
