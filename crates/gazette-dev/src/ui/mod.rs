//! Terminal UI utilities for status messages and formatted output.
//!
//! Dev mode talks to the operator on stderr: file-change notices, bundle
//! timings, the serving address, port warnings. This module keeps that
//! output consistent and handles color/environment detection.

mod format;
mod messages;

pub use format::format_duration;
pub use messages::{error, info, success, warning};

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}
