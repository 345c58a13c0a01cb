//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router (`/ping`, fallback)
//! - Wire up middleware (trace, request ID, access log)
//! - Serve until the shutdown signal fires

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::http::identity::{source_from_request, user_from_request};
use crate::http::ping::add_ping_headers;
use crate::lifecycle::ShutdownListener;
use crate::logging::Logger;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Main service log.
    pub main: Logger,
    /// One line per request.
    pub access: Logger,
    /// Version reported by the backend, or the configured fallback.
    pub backend_version: Arc<str>,
    /// This service's version.
    pub relay_version: Arc<str>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            router: build_router(state),
        }
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.recv().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), access_log))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ping_handler(State(state): State<AppState>) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    if let Err(e) = add_ping_headers(
        response.headers_mut(),
        &state.backend_version,
        &state.relay_version,
    ) {
        state.main.error(format_args!("Invalid ping header value: {e}"));
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    response
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Access-log line: `ip forwarded user METHOD path status elapsed request_id`.
async fn access_log(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let (ip, forwarded) = source_from_request(&remote, request.headers());
    let user = user_from_request(request.headers(), request.uri().query());
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request_id(request.headers());

    let response = next.run(request).await;

    state.access.info(format_args!(
        "{ip} {forwarded} {user} {method} {path} {} {}ms request_id={request_id}",
        response.status().as_u16(),
        started.elapsed().as_millis(),
    ));
    response
}

fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::SinkRegistry;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use std::fs;
    use tower::ServiceExt;

    fn state(registry: &mut SinkRegistry) -> AppState {
        AppState {
            main: registry.create_logger("", "info"),
            access: registry.create_logger("access.log", "info"),
            backend_version: Arc::from("1.8.10"),
            relay_version: Arc::from("0.1.0"),
        }
    }

    #[tokio::test]
    async fn test_ping_returns_versions() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = SinkRegistry::new();
        registry.set_base_directory(dir.path());
        let app = build_router(state(&mut registry));

        let response = app
            .oneshot(HttpRequest::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()["x-influxdb-version"], "1.8.10");
        assert_eq!(response.headers()["x-influx-srelay-version"], "0.1.0");
        assert!(response.headers().contains_key(X_REQUEST_ID));
    }

    #[tokio::test]
    async fn test_access_log_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = SinkRegistry::new();
        registry.set_base_directory(dir.path());
        let app = build_router(state(&mut registry));

        let response = app
            .oneshot(
                HttpRequest::post("/write?db=metrics&u=telegraf")
                    .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
                    .header(X_REQUEST_ID, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let contents = fs::read_to_string(dir.path().join("access.log")).unwrap();
        let line = contents.lines().next().unwrap();
        assert!(line.contains(
            " INF 203.0.113.9 203.0.113.9, 10.0.0.1 telegraf POST /write 404 "
        ));
        assert!(line.ends_with("request_id=req-42"));
    }
}
