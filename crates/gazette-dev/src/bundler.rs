//! Seams for the external bundler and compiler collaborators.
//!
//! The dev runtime never compiles anything itself. The embedding pipeline
//! supplies a [`Bundler`] that turns a session state plus resolved server
//! settings into a [`Compiler`]; the runtime's only interaction with the
//! compiler afterwards is subscribing lifecycle observers before the server
//! starts. Invalidation detection and rebuild scheduling stay on the
//! bundler's side of this seam.

use crate::dev::ServerSettings;
use crate::error::Result;
use crate::session::SessionState;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Statistics reported by the compiler when a build finishes.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Error messages from the build
    pub errors: Vec<String>,
    /// Warning messages from the build
    pub warnings: Vec<String>,
}

impl BuildStats {
    /// A build counts as successful only when it produced zero errors and
    /// zero warnings.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Observer of compiler lifecycle events.
pub trait CompilerObserver: Send + Sync {
    /// A source change invalidated the current build.
    fn invalidated(&self, file: &Path, at: Instant);

    /// The compiler finished a build, initial or incremental.
    fn build_done(&self, stats: &BuildStats);
}

/// A running compiler instance owned by the dev server for the lifetime of
/// the process.
pub trait Compiler: Send + Sync {
    /// Register a lifecycle observer. Observers installed before the server
    /// starts see every cycle, including the initial build.
    fn subscribe(&self, observer: Arc<dyn CompilerObserver>);
}

/// Factory turning session state into a compiler instance.
pub trait Bundler: Send + Sync {
    /// Build bundler configuration from the given state and construct a
    /// compiler from it.
    fn create_compiler(
        &self,
        state: &SessionState,
        settings: &ServerSettings,
    ) -> Result<Arc<dyn Compiler>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_stats_success_requires_no_warnings() {
        assert!(BuildStats::default().is_success());

        let errored = BuildStats {
            errors: vec!["boom".to_string()],
            warnings: vec![],
        };
        assert!(!errored.is_success());

        let warned = BuildStats {
            errors: vec![],
            warnings: vec!["unused import".to_string()],
        };
        assert!(!warned.is_success());
    }
}
