//! Remote control of tmux panes.
//!
//! This crate drives an existing tmux session from the outside:
//! - List sessions and check that one exists
//! - Select a window/pane to work with
//! - Send literal keystrokes and named control keys
//! - Capture visible text and scrollback
//! - Run a command and recover just its output via start/end markers
//! - Handle missing tmux gracefully (empty results, never errors)
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use panectl_tmux::TmuxController;
//!
//! let mut tmux = TmuxController::new("dev");
//! if !tmux.session_exists() {
//!     eprintln!("no session named dev");
//!     return;
//! }
//!
//! tmux.select_pane(1, 0);
//! let result = tmux.execute_and_capture("git status --short", Some(Duration::from_secs(1)), None);
//! println!("{}", result.output);
//!
//! // Last 200 lines of scrollback
//! println!("{}", tmux.capture_history(200));
//! ```
//!
//! # Checking tmux Availability
//!
//! ```
//! use panectl_tmux::TmuxController;
//!
//! if TmuxController::list_sessions().is_empty() {
//!     println!("tmux missing or no sessions running");
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod lock;
pub mod marker;
pub mod pane;
pub mod target;
pub mod wait;

pub use config::ControllerConfig;
pub use controller::TmuxController;
pub use error::{Result, TmuxError};
pub use executor::{TmuxCommandRunner, TmuxExecutor};
pub use gateway::TmuxGateway;
pub use lock::{PaneLease, PaneLocks};
pub use marker::{extract_output, CaptureOutcome, CommandResult, Marker, MarkerProtocol};
pub use pane::{ControlKey, PaneInfo, PANE_INFO_FORMAT};
pub use target::PaneTarget;
pub use wait::{FixedDelay, WaitPhase, WaitStrategy};
