//! Per-pane advisory locks.
//!
//! Two marker-protocol runs against the same pane would interleave their
//! echoes and corrupt each other's boundaries. Locks are keyed by the
//! resolved address string and only guard callers within one process.

use std::collections::HashSet;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::trace;

static GLOBAL_LOCKS: OnceLock<Arc<PaneLocks>> = OnceLock::new();

/// Registry of pane addresses currently held by a command execution.
#[derive(Debug, Default)]
pub struct PaneLocks {
    busy: Mutex<HashSet<String>>,
    released: Condvar,
}

/// Held for the duration of a command execution on one pane.
///
/// Dropping the lease frees the pane and wakes any waiters.
#[derive(Debug)]
pub struct PaneLease<'a> {
    locks: &'a PaneLocks,
    address: String,
}

impl PaneLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry shared by controllers that don't bring their own.
    pub fn global() -> Arc<PaneLocks> {
        Arc::clone(GLOBAL_LOCKS.get_or_init(|| Arc::new(PaneLocks::new())))
    }

    fn busy(&self) -> MutexGuard<'_, HashSet<String>> {
        self.busy.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until the pane at `address` is free, then hold it.
    pub fn acquire(&self, address: &str) -> PaneLease<'_> {
        let mut busy = self.busy();
        while busy.contains(address) {
            trace!(pane = %address, "waiting for pane lock");
            busy = self
                .released
                .wait(busy)
                .unwrap_or_else(PoisonError::into_inner);
        }
        busy.insert(address.to_string());
        PaneLease {
            locks: self,
            address: address.to_string(),
        }
    }

    /// Hold the pane at `address` only if nobody else does.
    pub fn try_acquire(&self, address: &str) -> Option<PaneLease<'_>> {
        let mut busy = self.busy();
        if !busy.insert(address.to_string()) {
            return None;
        }
        Some(PaneLease {
            locks: self,
            address: address.to_string(),
        })
    }

    /// Whether a lease is currently held for `address`.
    pub fn is_held(&self, address: &str) -> bool {
        self.busy().contains(address)
    }
}

impl PaneLease<'_> {
    /// Address this lease holds.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl Drop for PaneLease<'_> {
    fn drop(&mut self) {
        self.locks.busy().remove(&self.address);
        self.locks.released.notify_all();
    }
}
