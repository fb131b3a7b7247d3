//! Actions returned by key handlers.

use crate::host::HostEvent;

/// An action that a key handler returns to the [`App`](super::App).
#[derive(Debug, Clone)]
pub enum Action {
    /// No state change needed.
    None,
    /// Send an event to the chart host.
    Host(HostEvent),
    /// Quit the application.
    Quit,
}
