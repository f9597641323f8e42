//! The notification channel served on the message port.
//!
//! A separate app from the dev server: clients discover the port through
//! `getMessagePort`, then hold an SSE subscription at the root endpoint and
//! reload their data whenever a message arrives.

use crate::dev::server::DevServer;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive},
    response::Sse,
    routing::get,
    Router,
};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tower_http::cors::{Any, CorsLayer};

/// Assemble the notification channel app.
pub fn router(server: Arc<DevServer>) -> Router {
    Router::new()
        .route("/", get(subscribe))
        .layer(
            // Clients connect from the dev server's origin
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(server)
}

/// Register the client and stream messages to it for as long as it stays
/// connected. Dead clients are swept out on the next broadcast.
async fn subscribe(
    State(server): State<Arc<DevServer>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let (id, rx) = server.register_client();
    tracing::debug!(client = id, "notification client connected");

    let stream = ReceiverStream::new(rx).map(|data| Ok(Event::default().data(data)));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}
