//! Host environment trait abstraction.
//!
//! The original client surface (a browser page) exposed two ambient
//! capabilities: a blocking alert and a full page reload. This trait makes
//! both explicit so operations can be exercised headlessly in tests and so
//! a refresh is a re-render hook rather than a refetch of everything.

/// Capabilities of the surface hosting the client.
pub trait HostEnvironment: Send + Sync {
    /// Show a message to the user (the original's blocking alert).
    fn notify_user(&self, message: &str);

    /// Ask the host to re-render its current view from local state.
    ///
    /// Called after a mutation has been confirmed by the server and the
    /// local collections have been reconciled.
    fn refresh_view(&self);
}
