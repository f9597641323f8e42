//! Shared state behind the running dev server.
//!
//! Holds the latest session state reference and the connected notification
//! clients. HTTP handlers read the latest state on every request; only a
//! registry rebuild replaces it, and rebuilds arrive serially through the
//! entry point, so a plain RwLock around an `Arc` snapshot is all the
//! coordination this needs.

use crate::dev::DevMessage;
use crate::session::SessionState;
use crate::ui;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Shared dev server state: the latest-state cell plus the notification
/// client registry.
pub struct DevServer {
    /// Most recent session state; handlers resolve against this, never
    /// against a captured copy
    latest: RwLock<Arc<SessionState>>,
    /// Connected notification clients
    clients: RwLock<HashMap<usize, mpsc::Sender<String>>>,
    /// Next client ID
    next_client_id: RwLock<usize>,
    /// Port the notification channel listens on
    message_port: u16,
}

impl DevServer {
    /// Create the shared state from the bootstrap snapshot.
    pub fn new(state: SessionState, message_port: u16) -> Self {
        Self {
            latest: RwLock::new(Arc::new(state)),
            clients: RwLock::new(HashMap::new()),
            next_client_id: RwLock::new(0),
            message_port,
        }
    }

    /// The port the notification channel listens on.
    pub fn message_port(&self) -> u16 {
        self.message_port
    }

    /// Get the latest session state.
    pub fn latest(&self) -> Arc<SessionState> {
        self.latest.read().clone()
    }

    /// Rebuild the route registry against a new session state.
    ///
    /// Handlers are parameterized on the request path and look routes up at
    /// request time, so a rebuild is a swap of the latest-state reference
    /// followed by a minimal scheduling yield.
    pub async fn rebuild_routes(&self, state: SessionState) {
        for path in state.duplicate_route_paths() {
            ui::warning(&format!("Duplicate route path: /{}", path));
        }

        *self.latest.write() = Arc::new(state);
        tokio::task::yield_now().await;
    }

    /// Register a new notification client.
    ///
    /// # Returns
    ///
    /// Client ID and the receiver its messages arrive on
    pub fn register_client(&self) -> (usize, mpsc::Receiver<String>) {
        let id = {
            let mut next_id = self.next_client_id.write();
            let id = *next_id;
            *next_id += 1;
            id
        };

        let (tx, rx) = mpsc::channel(100);
        self.clients.write().insert(id, tx);

        (id, rx)
    }

    /// Unregister a notification client.
    pub fn unregister_client(&self, id: usize) {
        self.clients.write().remove(&id);
    }

    /// Number of connected notification clients.
    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }

    /// Broadcast a message to every connected client, dropping clients
    /// whose receivers are gone.
    pub async fn broadcast(&self, message: &DevMessage) {
        let json = serde_json::to_string(message).unwrap_or_else(|_| "{}".to_string());

        let clients = self.clients.read().clone();

        let mut failed_ids = Vec::new();
        for (id, tx) in clients {
            if tx.send(json.clone()).await.is_err() {
                failed_ids.push(id);
            }
        }

        for id in failed_ids {
            self.unregister_client(id);
        }
    }

    /// Signal every connected client that route or site data changed.
    pub async fn notify_reload(&self) {
        self.broadcast(&DevMessage::ReloadClientData).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Config, DevServerOptions, Paths};
    use serde_json::json;
    use std::path::PathBuf;

    fn state() -> SessionState {
        SessionState {
            config: Config {
                paths: Paths {
                    public: PathBuf::from("public"),
                    dist: PathBuf::from("dist"),
                    root: PathBuf::from("."),
                },
                dev_server: DevServerOptions::default(),
            },
            routes: vec![],
            site_data: json!({"title": "gazette"}),
        }
    }

    #[tokio::test]
    async fn test_rebuild_swaps_latest_state() {
        let server = DevServer::new(state(), 4000);
        assert_eq!(server.latest().site_data, json!({"title": "gazette"}));

        let mut next = state();
        next.site_data = json!({"title": "updated"});
        server.rebuild_routes(next).await;

        assert_eq!(server.latest().site_data, json!({"title": "updated"}));
    }

    #[tokio::test]
    async fn test_client_registration() {
        let server = DevServer::new(state(), 4000);

        let (id1, _rx1) = server.register_client();
        let (id2, _rx2) = server.register_client();

        assert_eq!(server.client_count(), 2);
        assert_ne!(id1, id2);

        server.unregister_client(id1);
        assert_eq!(server.client_count(), 1);
    }

    #[tokio::test]
    async fn test_notify_reload_reaches_every_client() {
        let server = DevServer::new(state(), 4000);

        let (_id1, mut rx1) = server.register_client();
        let (_id2, mut rx2) = server.register_client();

        server.notify_reload().await;

        assert_eq!(rx1.recv().await.unwrap(), r#"{"type":"reloadClientData"}"#);
        assert_eq!(rx2.recv().await.unwrap(), r#"{"type":"reloadClientData"}"#);
    }

    #[tokio::test]
    async fn test_broadcast_drops_disconnected_clients() {
        let server = DevServer::new(state(), 4000);

        let (_id1, rx1) = server.register_client();
        let (_id2, mut rx2) = server.register_client();
        drop(rx1);

        server.notify_reload().await;

        assert_eq!(server.client_count(), 1);
        assert!(rx2.recv().await.is_some());
    }
}
