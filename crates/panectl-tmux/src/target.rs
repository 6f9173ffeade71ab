//! Pane addressing.

use std::fmt;

/// A pane inside a tmux session, addressed as `session:window.pane`.
///
/// Indices are not validated; an address that names a missing window or pane
/// simply makes later gateway calls come back empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaneTarget {
    /// Session name.
    pub session: String,
    /// Window index within the session.
    pub window: u32,
    /// Pane index within the window.
    pub pane: u32,
}

impl PaneTarget {
    /// Target the first pane of the first window.
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            window: 0,
            pane: 0,
        }
    }

    /// Point at a different window/pane of the same session.
    pub fn select_pane(&mut self, window: u32, pane: u32) {
        self.window = window;
        self.pane = pane;
    }

    /// Render the tmux `-t` argument.
    pub fn address(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PaneTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.session, self.window, self.pane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target() {
        let target = PaneTarget::new("dev");
        assert_eq!(target.window, 0);
        assert_eq!(target.pane, 0);
        assert_eq!(target.address(), "dev:0.0");
    }

    #[test]
    fn test_select_pane_overwrites() {
        let mut target = PaneTarget::new("dev");
        target.select_pane(2, 1);
        assert_eq!(target.address(), "dev:2.1");

        target.select_pane(0, 3);
        assert_eq!(target.address(), "dev:0.3");
    }

    #[test]
    fn test_address_for_many_indices() {
        let mut target = PaneTarget::new("build-box");
        for window in [0u32, 1, 9, 10, 255, u32::MAX] {
            for pane in [0u32, 1, 7, 42] {
                target.select_pane(window, pane);
                assert_eq!(target.address(), format!("build-box:{}.{}", window, pane));
            }
        }
    }
}
