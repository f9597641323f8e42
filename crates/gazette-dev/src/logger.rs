//! Logging infrastructure built on the `tracing` ecosystem.
//!
//! Operator-facing progress output (bundle timings, serving address) goes
//! through [`crate::ui`]; this module wires up the structured diagnostics
//! underneath it, with verbosity flags and `RUST_LOG` passthrough.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with the specified options.
///
/// Should be called once by the embedding pipeline before dev mode starts.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging (overrides `quiet`)
/// * `quiet` - Only show error-level logs
/// * `no_color` - Disable colored output
///
/// # Verbosity Levels
///
/// 1. `verbose`: DEBUG for gazette crates
/// 2. `quiet`: ERROR only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for gazette crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("gazette=debug,gazette_dev=debug")
    } else if quiet {
        EnvFilter::new("gazette=error,gazette_dev=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gazette=info,gazette_dev=info"))
    };

    init_logger_with_filter(filter, no_color);
}

/// Initialize logger with a custom environment filter.
///
/// Useful for testing or embedding scenarios that need precise control over
/// log filtering.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
