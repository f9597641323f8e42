//! The session state snapshot served by the dev runtime.
//!
//! A [`SessionState`] is the single source of truth handed to
//! [`refresh_or_start`](crate::dev::DevRuntime::refresh_or_start) on the
//! initial dev invocation and on every route/config recomputation. It is
//! never mutated in place: changes produce a new snapshot via structural
//! copy, and HTTP handlers always resolve against the most recent snapshot
//! rather than whatever was current when they were installed.

use crate::error::Result;
use async_trait::async_trait;
use axum::Router;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Filesystem paths of the site being developed.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Static assets copied verbatim into the site
    pub public: PathBuf,
    /// Build output directory
    pub dist: PathBuf,
    /// Project root, used to display changed files relative to it
    pub root: PathBuf,
}

/// Watch configuration forwarded to the bundler.
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    /// User ignore patterns; merged after the built-in ones, never replacing
    /// them
    pub ignored: Vec<String>,
}

/// A user hook that receives the dev server's app handle before it starts
/// listening, giving user code a chance to add its own routes.
#[derive(Clone)]
pub struct RouterHook(Arc<dyn Fn(Router) -> Router + Send + Sync>);

impl RouterHook {
    /// Wrap a router-augmenting function.
    pub fn new(hook: impl Fn(Router) -> Router + Send + Sync + 'static) -> Self {
        Self(Arc::new(hook))
    }

    /// Run the hook against the assembled app.
    pub fn apply(&self, app: Router) -> Router {
        (self.0)(app)
    }
}

impl fmt::Debug for RouterHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RouterHook")
    }
}

/// User-facing dev-server options.
///
/// Every `Option` field overrides a built-in default when set; see
/// [`ServerSettings::resolve`](crate::dev::ServerSettings::resolve) for the
/// defaults and the one merge exception (`watch.ignored`).
#[derive(Debug, Clone)]
pub struct DevServerOptions {
    /// Desired server port; the allocator may substitute a nearby one
    pub port: u16,
    /// Host to bind and display
    pub host: String,
    /// Hot reload toggle
    pub hot: Option<bool>,
    /// Response compression toggle
    pub compress: Option<bool>,
    /// Fall back unmatched GET requests to the index document
    pub history_api_fallback: Option<bool>,
    /// URL prefix the bundler emits assets under
    pub public_path: Option<String>,
    /// Verbose client-side logging
    pub verbose: Option<bool>,
    /// Surface only error-level build stats
    pub errors_only_stats: Option<bool>,
    /// Watch configuration forwarded to the bundler
    pub watch: WatchOptions,
    /// Pre-start hook receiving the app handle
    pub before: Option<RouterHook>,
}

impl Default for DevServerOptions {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "localhost".to_string(),
            hot: None,
            compress: None,
            history_api_fallback: None,
            public_path: None,
            verbose: None,
            errors_only_stats: None,
            watch: WatchOptions::default(),
            before: None,
        }
    }
}

/// Site configuration consumed by the dev runtime.
#[derive(Debug, Clone)]
pub struct Config {
    /// Filesystem layout of the site
    pub paths: Paths,
    /// Dev-server options
    pub dev_server: DevServerOptions,
}

/// Capability to compute a route's full data payload.
///
/// Implemented by the generator's build pipeline; the dev runtime invokes it
/// on every request, with no hashing or shortcutting, since this is
/// development mode.
#[async_trait]
pub trait RouteData: Send + Sync {
    /// Compute the route's payload against the given site state.
    async fn resolve(&self, state: &SessionState) -> Result<serde_json::Value>;
}

/// A route descriptor: a URL path paired with its data capability.
#[derive(Clone)]
pub struct Route {
    /// Unique URL path within one state snapshot
    pub path: String,
    /// Data-resolution capability for this route
    pub data: Arc<dyn RouteData>,
}

impl Route {
    /// Build a route from a path and its data capability.
    pub fn new(path: impl Into<String>, data: Arc<dyn RouteData>) -> Self {
        Self {
            path: path.into(),
            data,
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// The full session state snapshot.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Site configuration
    pub config: Config,
    /// Ordered route descriptors; paths are unique within one snapshot
    pub routes: Vec<Route>,
    /// Site-wide payload, served verbatim
    pub site_data: serde_json::Value,
}

impl SessionState {
    /// Produce an updated snapshot with the resolved server port
    /// substituted in.
    pub fn with_port(mut self, port: u16) -> Self {
        self.config.dev_server.port = port;
        self
    }

    /// Look up a route by request path.
    ///
    /// Comparison is slash-insensitive: the root route `/` matches the empty
    /// suffix, and leading/trailing slashes never matter. Request paths
    /// arrive already percent-decoded.
    pub fn route(&self, request_path: &str) -> Option<&Route> {
        let wanted = normalize(request_path);
        self.routes.iter().find(|route| normalize(&route.path) == wanted)
    }

    /// Route paths that appear more than once in this snapshot, violating
    /// the uniqueness invariant.
    pub fn duplicate_route_paths(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for route in &self.routes {
            let key = normalize(&route.path);
            if !seen.insert(key) && !duplicates.contains(&key) {
                duplicates.push(key);
            }
        }
        duplicates
    }
}

fn normalize(path: &str) -> &str {
    path.trim_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedData(serde_json::Value);

    #[async_trait]
    impl RouteData for FixedData {
        async fn resolve(&self, _state: &SessionState) -> Result<serde_json::Value> {
            Ok(self.0.clone())
        }
    }

    fn state_with_routes(paths: &[&str]) -> SessionState {
        SessionState {
            config: Config {
                paths: Paths {
                    public: PathBuf::from("public"),
                    dist: PathBuf::from("dist"),
                    root: PathBuf::from("."),
                },
                dev_server: DevServerOptions::default(),
            },
            routes: paths
                .iter()
                .map(|p| Route::new(*p, Arc::new(FixedData(json!({}))) as Arc<dyn RouteData>))
                .collect(),
            site_data: json!({}),
        }
    }

    #[test]
    fn test_route_lookup_root_matches_empty_suffix() {
        let state = state_with_routes(&["/", "/about"]);
        assert_eq!(state.route("/").unwrap().path, "/");
        assert_eq!(state.route("").unwrap().path, "/");
        assert_eq!(state.route("about").unwrap().path, "/about");
        assert_eq!(state.route("/about/").unwrap().path, "/about");
    }

    #[test]
    fn test_route_lookup_decoded_spaces() {
        let state = state_with_routes(&["/a b"]);
        // The HTTP layer hands the handler an already-decoded segment.
        assert_eq!(state.route("a b").unwrap().path, "/a b");
        assert!(state.route("a%20b").is_none());
    }

    #[test]
    fn test_route_lookup_miss() {
        let state = state_with_routes(&["/about"]);
        assert!(state.route("missing").is_none());
    }

    #[test]
    fn test_with_port_is_structural_copy() {
        let state = state_with_routes(&["/about"]);
        let site_data = state.site_data.clone();
        let updated = state.clone().with_port(3999);
        assert_eq!(updated.config.dev_server.port, 3999);
        assert_eq!(updated.routes.len(), state.routes.len());
        assert_eq!(updated.site_data, site_data);
        // Original snapshot is untouched.
        assert_eq!(state.config.dev_server.port, 3000);
    }

    #[test]
    fn test_duplicate_route_paths() {
        let state = state_with_routes(&["/a", "/b", "a/"]);
        assert_eq!(state.duplicate_route_paths(), vec!["a"]);

        let clean = state_with_routes(&["/a", "/b"]);
        assert!(clean.duplicate_route_paths().is_empty());
    }
}
