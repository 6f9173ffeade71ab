//! How the marker protocol waits between sends.
//!
//! tmux gives no signal when a command finishes, so the protocol waits for
//! fixed intervals. The interval policy sits behind [`WaitStrategy`] so a
//! prompt-polling strategy can replace it without touching extraction.

use std::time::Duration;

use tracing::trace;

/// Which pause of the protocol is being waited out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPhase {
    /// Short pause after a marker echo.
    Settle,
    /// Execution budget for the caller's command.
    Command,
}

/// Blocks the calling thread for one protocol pause.
pub trait WaitStrategy: Send + Sync {
    fn wait(&self, phase: WaitPhase, duration: Duration);
}

impl<T: WaitStrategy + ?Sized> WaitStrategy for &T {
    fn wait(&self, phase: WaitPhase, duration: Duration) {
        (**self).wait(phase, duration)
    }
}

/// Sleeps for exactly the requested duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDelay;

impl WaitStrategy for FixedDelay {
    fn wait(&self, phase: WaitPhase, duration: Duration) {
        trace!(phase = ?phase, wait_ms = duration.as_millis() as u64, "waiting");
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
