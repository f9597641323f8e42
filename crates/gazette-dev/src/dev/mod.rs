//! The dev server runtime.
//!
//! Provides the refresh-or-bootstrap entry point around a singleton dev
//! server:
//! - Route/site data served over HTTP, always from the latest state
//! - Reload signals pushed to clients over a side-channel port
//! - Build progress reported from compiler lifecycle events

pub mod notifier;
pub mod options;
pub mod reporter;
pub mod routes;
pub mod runtime;
pub mod server;

// Re-exports
pub use options::ServerSettings;
pub use reporter::BuildReporter;
pub use runtime::DevRuntime;
pub use server::DevServer;

use serde::{Deserialize, Serialize};

/// Messages pushed to connected development clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DevMessage {
    /// Route or site data changed; clients should re-fetch and re-render
    ReloadClientData,
}
