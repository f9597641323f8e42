//! The dev server lifecycle manager.
//!
//! Owns the single running server. The entry point decides on every call
//! whether to boot a new server or refresh the existing one; "already
//! running" is the expected steady-state path, never an error.

use crate::bundler::{Bundler, Compiler};
use crate::dev::options::ServerSettings;
use crate::dev::reporter::BuildReporter;
use crate::dev::server::DevServer;
use crate::dev::{notifier, routes};
use crate::error::{DevError, Result};
use crate::port;
use crate::session::SessionState;
use crate::ui;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// The live-development runtime.
///
/// Constructed once by the generator's build pipeline and handed every new
/// session state through [`refresh_or_start`](Self::refresh_or_start). At
/// most one server exists per runtime; it lives until process exit.
pub struct DevRuntime {
    bundler: Arc<dyn Bundler>,
    running: Option<RunningServer>,
}

struct RunningServer {
    server: Arc<DevServer>,
    // Held for the lifetime of the process; the compiler drives rebuilds
    // and reports them through the subscribed observers.
    _compiler: Arc<dyn Compiler>,
    _primary: JoinHandle<()>,
    _notifier: JoinHandle<()>,
}

impl DevRuntime {
    /// Create a runtime around the external bundler.
    pub fn new(bundler: Arc<dyn Bundler>) -> Self {
        Self {
            bundler,
            running: None,
        }
    }

    /// Whether a server has been bootstrapped.
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Shared server state, once the server is running.
    pub fn server(&self) -> Option<Arc<DevServer>> {
        self.running.as_ref().map(|running| running.server.clone())
    }

    /// Start the dev server, or refresh it if it is already running.
    ///
    /// Refreshing rebuilds the route registry against the given state and
    /// signals connected clients to reload their data. Bootstrapping
    /// resolves ports, so the returned state may differ from the input in
    /// `devServer.port`; callers must continue with the returned state.
    ///
    /// # Errors
    ///
    /// Only bootstrap fails: port exhaustion, compiler construction, or a
    /// listener that cannot bind. A failed bootstrap leaves the runtime
    /// with no server; dev-mode startup must be treated as failed.
    pub async fn refresh_or_start(&mut self, state: SessionState) -> Result<SessionState> {
        if let Some(running) = &self.running {
            running.server.rebuild_routes(state.clone()).await;
            running.server.notify_reload().await;
            return Ok(state);
        }

        self.bootstrap(state).await
    }

    async fn bootstrap(&mut self, state: SessionState) -> Result<SessionState> {
        let host = state.config.dev_server.host.clone();
        let intended = state.config.dev_server.port;

        let port = port::find_available(&host, intended, &[]).await?;
        let message_port =
            port::find_available(&host, port::MESSAGE_PORT_START, &[port]).await?;

        if port != intended {
            ui::warning(&format!(
                "Port {} is not available, using port {} instead",
                intended, port
            ));
        }

        let state = state.with_port(port);
        let settings = ServerSettings::resolve(&state.config);

        let compiler = self.bundler.create_compiler(&state, &settings)?;

        // Observers go in before the server exists so they see the initial
        // build.
        let reporter = Arc::new(BuildReporter::new(
            state.config.paths.root.clone(),
            format!("{}:{}", host, port),
        ));
        compiler.subscribe(reporter);

        let server = Arc::new(DevServer::new(state.clone(), message_port));

        // Pre-start: built-in routes, the initial registry build, then the
        // user hook gets the app handle to add its own routes.
        let app = routes::router(server.clone(), &settings, &state);
        server.rebuild_routes(state.clone()).await;

        let listener = TcpListener::bind((host.as_str(), port)).await.map_err(|e| {
            DevError::Server(format!("failed to bind {}:{}: {}", host, port, e))
        })?;
        let primary = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                ui::error(&format!("Dev server error: {}", e));
            }
        });

        // The message port must not open before the dev server port; some
        // tooling auto-attaches to the first port that starts accepting.
        let notify_app = notifier::router(server.clone());
        let notify_listener =
            TcpListener::bind((host.as_str(), message_port))
                .await
                .map_err(|e| {
                    DevError::Server(format!("failed to bind {}:{}: {}", host, message_port, e))
                })?;
        let notifier_task = tokio::spawn(async move {
            if let Err(e) = axum::serve(notify_listener, notify_app).await {
                ui::error(&format!("Notification channel error: {}", e));
            }
        });

        self.running = Some(RunningServer {
            server,
            _compiler: compiler,
            _primary: primary,
            _notifier: notifier_task,
        });

        Ok(state)
    }
}
