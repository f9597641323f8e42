//! HTTP router assembly and the data-serving handlers.
//!
//! Route and site data are served by fixed handlers parameterized on the
//! request path; every request looks its route up in the latest session
//! state, so handlers installed before a refresh still serve post-refresh
//! data (and 404 for routes that no longer exist).

use crate::dev::options::ServerSettings;
use crate::dev::server::DevServer;
use crate::session::SessionState;
use axum::{
    extract::{Path as RequestPath, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Assemble the dev server app: data endpoints, static roots with index
/// fallback, permissive dev CORS, and finally the user's pre-start hook.
pub fn router(server: Arc<DevServer>, settings: &ServerSettings, state: &SessionState) -> Router {
    let api = Router::new()
        .route("/__react-static__/getMessagePort", get(message_port))
        .route("/__react-static__/siteData", get(site_data))
        .route("/__react-static__/routeInfo", get(root_route_info))
        .route("/__react-static__/routeInfo/", get(root_route_info))
        .route("/__react-static__/routeInfo/{*route_path}", get(route_info))
        .with_state(server);

    let public = settings.content_base.first().cloned().unwrap_or_default();
    let dist = settings.content_base.last().cloned().unwrap_or_default();

    let app = if settings.history_api_fallback {
        // Unmatched GETs land on the index document for client-side routing.
        let index = ServeFile::new(dist.join("index.html"));
        api.fallback_service(
            ServeDir::new(public).fallback(ServeDir::new(dist).fallback(index)),
        )
    } else {
        api.fallback_service(ServeDir::new(public).fallback(ServeDir::new(dist)))
    };

    let app = app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let app = if settings.compress {
        app.layer(CompressionLayer::new())
    } else {
        app
    };

    match &state.config.dev_server.before {
        Some(hook) => hook.apply(app),
        None => app,
    }
}

#[derive(Serialize)]
struct MessagePortBody {
    port: u16,
}

/// Tell clients which port the notification channel listens on.
async fn message_port(State(server): State<Arc<DevServer>>) -> Json<MessagePortBody> {
    Json(MessagePortBody {
        port: server.message_port(),
    })
}

/// Serve the site-wide data payload verbatim.
async fn site_data(State(server): State<Arc<DevServer>>) -> Response {
    let latest = server.latest();
    match serde_json::to_vec(&latest.site_data) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize site data");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to serialize site data",
            )
                .into_response()
        }
    }
}

/// The root route's data lives at the prefix itself, bare or with a
/// trailing slash, with no path segment after it.
async fn root_route_info(State(server): State<Arc<DevServer>>) -> Response {
    serve_route_info(&server, "/").await
}

async fn route_info(
    State(server): State<Arc<DevServer>>,
    RequestPath(route_path): RequestPath<String>,
) -> Response {
    serve_route_info(&server, &route_path).await
}

/// Look the route up in the latest state, not a captured copy; routes may
/// have been replaced since this handler was installed.
async fn serve_route_info(server: &DevServer, request_path: &str) -> Response {
    let latest = server.latest();
    let Some(route) = latest.route(request_path) else {
        return (StatusCode::NOT_FOUND, "Route could not be found").into_response();
    };

    // Full payload every time, no hashing or shortcutting in dev mode.
    match route.data.resolve(&latest).await {
        Ok(payload) => Json(payload).into_response(),
        Err(err) => {
            tracing::error!(path = %route.path, error = %err, "failed to resolve route data");
            (StatusCode::NOT_FOUND, "Route could not be found").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_port_body_shape() {
        let body = serde_json::to_string(&MessagePortBody { port: 4000 }).unwrap();
        assert_eq!(body, r#"{"port":4000}"#);
    }
}
