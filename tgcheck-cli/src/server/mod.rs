//! HTTP API.
//!
//! | Route | Behavior |
//! |-------|----------|
//! | `GET /`, `GET /api` | API information document |
//! | `GET /api/check?username=` | Resolve (information document without `username`) |
//! | `POST /api/check` | Resolve `{"username": "..."}` |
//! | `GET /health` | `{"status": "ok"}` |
//!
//! Every response allows any origin; `OPTIONS` requests are answered by the
//! CORS layer with 200 and an empty body.

mod error;
mod handlers;

use std::any::Any;
use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tgcheck_fetch::{ProbeInfo, StatusResolver};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

pub use error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// The resolver shared by all requests.
    pub resolver: Arc<StatusResolver>,
    /// Probes in execution order, for the information document.
    pub probes: Arc<Vec<ProbeInfo>>,
}

impl AppState {
    /// Creates handler state.
    pub fn new(resolver: Arc<StatusResolver>, probes: Vec<ProbeInfo>) -> Self {
        Self {
            resolver,
            probes: Arc::new(probes),
        }
    }

    /// The document served by `GET /api`.
    pub fn info_document(&self) -> Value {
        json!({
            "api": "Telegram Username Checker",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Check Telegram username availability on Fragment and t.me",
            "endpoints": {
                "GET /api": "This information",
                "GET /api/check?username=<name>": "Check username availability",
                "POST /api/check": "Check username availability",
                "GET /health": "Health check",
                "parameters": {
                    "username": "Telegram username (with or without @)"
                }
            },
            "min_length": self.resolver.context().settings.min_length,
            "probes": self.probes.as_slice(),
            "example_request": {
                "method": "POST",
                "url": "/api/check",
                "body": { "username": "example" }
            },
            "example_response": {
                "username": "@example",
                "status": "taken",
                "price": "N/A",
                "can_claim": false,
                "message": "Username is taken",
                "source": "telegram"
            }
        })
    }
}

/// Builds the router with CORS, tracing and panic handling.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::info))
        .route("/api", get(handlers::info))
        .route(
            "/api/check",
            get(handlers::check_query).post(handlers::check_body),
        )
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Turns a handler panic into a 500 JSON body.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unexpected fault".to_string()
    };

    error!(detail = %detail, "Handler panicked");
    ApiError::Internal(detail).into_response()
}
