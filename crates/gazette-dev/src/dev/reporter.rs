//! Build event reporter.
//!
//! Observes compiler lifecycle events and turns them into operator-facing
//! progress output: changed-file notices, bundle timings, and the serving
//! address after the first successful build. Changes within a short window
//! after startup are boot noise and suppress the whole cycle's output.

use crate::bundler::{BuildStats, CompilerObserver};
use crate::ui;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Grace window after startup during which invalidations stay quiet.
const STARTUP_GRACE: Duration = Duration::from_secs(2);

/// Reports compiler progress to the operator.
pub struct BuildReporter {
    /// Project root; changed files are shown relative to it
    root: PathBuf,
    /// host:port the server listens on, logged after the first build
    address: String,
    started_at: Instant,
    inner: Mutex<Inner>,
}

struct Inner {
    /// True until the first build finishes, successful or not
    first: bool,
    /// Current cycle falls inside the startup grace window
    skip_log: bool,
    /// When the in-flight bundle update began
    update_started: Option<Instant>,
}

impl BuildReporter {
    /// Create a reporter and announce that bundling has begun.
    pub fn new(root: PathBuf, address: String) -> Self {
        ui::info("Bundling application...");
        Self {
            root,
            address,
            started_at: Instant::now(),
            inner: Mutex::new(Inner {
                first: true,
                skip_log: false,
                update_started: None,
            }),
        }
    }
}

impl CompilerObserver for BuildReporter {
    fn invalidated(&self, file: &Path, at: Instant) {
        let mut inner = self.inner.lock();
        inner.skip_log = at.saturating_duration_since(self.started_at) < STARTUP_GRACE;
        if inner.skip_log {
            return;
        }

        let shown = file.strip_prefix(&self.root).unwrap_or(file);
        ui::info(&format!("File changed: {}", shown.display()));
        ui::info("Updating bundle...");
        inner.update_started = Some(Instant::now());
    }

    fn build_done(&self, stats: &BuildStats) {
        let mut inner = self.inner.lock();
        if stats.is_success() && !inner.skip_log {
            if inner.first {
                ui::success(&format!(
                    "Application bundled in {}",
                    ui::format_duration(self.started_at.elapsed())
                ));
                ui::success(&format!("App serving at {}", self.address));
            } else if let Some(started) = inner.update_started.take() {
                ui::success(&format!(
                    "Bundle updated in {}",
                    ui::format_duration(started.elapsed())
                ));
            }
        }
        inner.first = false;
    }
}
