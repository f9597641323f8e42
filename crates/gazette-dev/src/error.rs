//! Error handling for the dev runtime.
//!
//! A single `thiserror` enum covers the whole taxonomy: fatal bootstrap
//! failures (binding the server, constructing the compiler), recoverable
//! per-request failures (route data), and the warn-only port substitution
//! path which never surfaces here at all. Messages carry a `Hint:` line when
//! there is an obvious next step for the operator.

use thiserror::Error;

/// Top-level error type for the dev runtime.
#[derive(Debug, Error)]
pub enum DevError {
    /// The dev server or notification channel failed to bind or serve.
    /// Fatal during bootstrap; the caller must treat dev mode as failed.
    #[error("Server error: {0}")]
    Server(String),

    /// The port allocator walked its whole probe window without finding a
    /// free port.
    #[error("Ports {start}-{end} are all in use\n\nHint: free a port in that range or change devServer.port")]
    PortExhausted {
        /// First port probed
        start: u16,
        /// Last port probed
        end: u16,
    },

    /// The external bundler failed to produce a compiler instance.
    #[error("Bundler error: {0}")]
    Bundler(String),

    /// A route's data capability failed. Mapped to a 404 response at the
    /// HTTP boundary, never fatal to the server.
    #[error("Route data error: {0}")]
    RouteData(String),

    /// I/O errors from socket operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `DevError` as the default error type.
pub type Result<T, E = DevError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_exhausted_message_names_range() {
        let err = DevError::PortExhausted {
            start: 3000,
            end: 3010,
        };
        let msg = err.to_string();
        assert!(msg.contains("3000-3010"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_server_error_display() {
        let err = DevError::Server("failed to bind localhost:3000".to_string());
        assert!(err.to_string().contains("failed to bind localhost:3000"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use");
        let err: DevError = io.into();
        assert!(matches!(err, DevError::Io(_)));
    }
}
