//! Dev-server option merging.
//!
//! Built-in defaults merged with the user's `devServer` options: the user
//! wins on every key except `watch.ignored`, which is concatenated so the
//! built-in dependency-directory pattern always applies.

use crate::session::Config;
use std::path::PathBuf;

/// Ignore patterns that always apply, whatever the user configures.
const BUILTIN_WATCH_IGNORED: &[&str] = &["node_modules"];

/// Fully resolved dev-server settings.
///
/// Consumed by the HTTP layer (static roots, index fallback) and forwarded
/// to the bundler collaborator (hot reload, watch ignores, public path).
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Hot reload enabled
    pub hot: bool,
    /// Static content roots, tried in order
    pub content_base: Vec<PathBuf>,
    /// URL prefix the bundler emits assets under
    pub public_path: String,
    /// Fall back unmatched GET requests to the index document for
    /// client-side routing
    pub history_api_fallback: bool,
    /// Response compression
    pub compress: bool,
    /// Verbose client-side logging
    pub verbose: bool,
    /// Surface only error-level build stats
    pub errors_only_stats: bool,
    /// Effective watch ignore patterns: built-ins plus user patterns
    pub watch_ignored: Vec<String>,
}

impl ServerSettings {
    /// Merge built-in defaults with the user's dev-server options.
    pub fn resolve(config: &Config) -> Self {
        let opts = &config.dev_server;

        let mut watch_ignored: Vec<String> = BUILTIN_WATCH_IGNORED
            .iter()
            .map(|s| s.to_string())
            .collect();
        watch_ignored.extend(opts.watch.ignored.iter().cloned());

        Self {
            hot: opts.hot.unwrap_or(true),
            content_base: vec![config.paths.public.clone(), config.paths.dist.clone()],
            public_path: opts.public_path.clone().unwrap_or_else(|| "/".to_string()),
            history_api_fallback: opts.history_api_fallback.unwrap_or(true),
            compress: opts.compress.unwrap_or(false),
            verbose: opts.verbose.unwrap_or(false),
            errors_only_stats: opts.errors_only_stats.unwrap_or(true),
            watch_ignored,
        }
    }
}
