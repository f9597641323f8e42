//! Port allocation by bind probing.
//!
//! Tries the preferred port first, then walks upward through a small window,
//! skipping any explicitly excluded ports. Used twice during bootstrap: once
//! for the dev server itself and once for the notification channel, which
//! must not collide with the server port.

use crate::error::{DevError, Result};
use crate::ui;
use tokio::net::TcpListener;

/// Where the notification-channel port search starts.
pub const MESSAGE_PORT_START: u16 = 4000;

/// How many ports above the preferred one get probed.
const PROBE_WINDOW: u16 = 10;

/// Find an available port starting from `preferred`, never returning one
/// listed in `exclude`.
///
/// # Errors
///
/// Returns [`DevError::PortExhausted`] when the whole probe window is busy.
pub async fn find_available(host: &str, preferred: u16, exclude: &[u16]) -> Result<u16> {
    if preferred < 1024 {
        ui::warning(&format!(
            "Port {} is in privileged range, may require root access",
            preferred
        ));
    }

    for offset in 0..=PROBE_WINDOW {
        let port = preferred.saturating_add(offset);
        if exclude.contains(&port) {
            continue;
        }
        if TcpListener::bind((host, port)).await.is_ok() {
            return Ok(port);
        }
    }

    Err(DevError::PortExhausted {
        start: preferred,
        end: preferred.saturating_add(PROBE_WINDOW),
    })
}
