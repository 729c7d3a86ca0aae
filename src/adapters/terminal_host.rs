//! Terminal-backed host environment.

use crate::traits::HostEnvironment;

/// Host environment for the CLI: notifications go to stderr, and a view
/// refresh is a log hook (the CLI re-renders from local state on its next
/// command rather than refetching).
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalHost;

impl TerminalHost {
    pub fn new() -> Self {
        Self
    }
}

impl HostEnvironment for TerminalHost {
    fn notify_user(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn refresh_view(&self) {
        tracing::debug!("view refresh requested");
    }
}
