//! Gazette dev runtime - live development server for the Gazette static-site
//! generator.
//!
//! This crate hosts everything the generator's build pipeline needs while it
//! runs in development mode: a singleton dev server that serves the generated
//! site and route data over HTTP, and a side-channel notification port that
//! pushes reload signals to connected browser clients whenever routes or data
//! change.
//!
//! # Architecture
//!
//! - [`error`] - Structured error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Terminal status messages and formatting
//! - [`session`] - The session state snapshot (config, routes, site data)
//! - [`bundler`] - Seams for the external bundler/compiler collaborators
//! - [`port`] - Port allocation by bind probing
//! - [`dev`] - The dev server runtime itself
//!
//! # Example
//!
//! ```rust,no_run
//! use gazette_dev::{DevRuntime, SessionState};
//! use std::sync::Arc;
//!
//! # async fn run(bundler: Arc<dyn gazette_dev::Bundler>, state: SessionState)
//! #     -> gazette_dev::Result<()> {
//! let mut runtime = DevRuntime::new(bundler);
//!
//! // First call boots the server; every later call refreshes routes and
//! // signals connected clients to reload their data.
//! let state = runtime.refresh_or_start(state).await?;
//! # let _ = state;
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod bundler;
pub mod dev;
pub mod error;
pub mod logger;
pub mod port;
pub mod session;
pub mod ui;

// Re-export commonly used types
pub use bundler::{BuildStats, Bundler, Compiler, CompilerObserver};
pub use dev::{BuildReporter, DevMessage, DevRuntime, DevServer, ServerSettings};
pub use error::{DevError, Result};
pub use session::{
    Config, DevServerOptions, Paths, Route, RouteData, RouterHook, SessionState, WatchOptions,
};
