use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::{ChatReply, RelayError, RelayRequest};

use super::Container;

pub const CHAT_PATH: &str = "/api/chat";
pub const HEALTH_PATH: &str = "/health";

/// Largest chat body buffered for a POST; anything longer is an invalid request.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the relay application.
///
/// Every response of the chat endpoint carries the permissive CORS headers,
/// including errors and pre-flight answers.
pub fn build_app(container: Arc<Container>) -> Router {
    let chat_routes: Router<Arc<Container>> = Router::new()
        .route(CHAT_PATH, any(chat_handler))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ));

    Router::new()
        .merge(chat_routes)
        .route(HEALTH_PATH, get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(container)
}

// The body is only read for POST, so pre-flight and rejected verbs never
// depend on its size.
async fn chat_handler(State(container): State<Arc<Container>>, request: Request) -> Response {
    let method = request.method().clone();
    match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::POST => match relay(&container, request.into_body()).await {
            Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
            Err(e) => e.into_response(),
        },
        _ => RelayError::MethodNotAllowed.into_response(),
    }
}

async fn relay(container: &Container, body: Body) -> Result<ChatReply, RelayError> {
    let use_case = container.relay_use_case();
    use_case.ensure_configured()?;

    let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        warn!("Failed to read chat body: {}", e);
        RelayError::invalid_request(e.to_string())
    })?;
    let request = RelayRequest::from_slice(&bytes).inspect_err(|e| {
        warn!("Rejecting unparseable chat body: {}", e);
    })?;
    use_case.execute(request).await
}

async fn health_handler() -> &'static str {
    "ok"
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let description = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    error!("Server error: {}", description);
    RelayError::unexpected(description).into_response()
}

/// Serve the relay on `addr` until Ctrl+C or SIGTERM.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Chat relay listening on http://{}{}", listener.local_addr()?, CHAT_PATH);

    axum::serve(listener, build_app(container))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Chat relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
