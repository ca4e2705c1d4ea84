//! API module
//!
//! HTTP request handlers and the router that wires them to their paths.

pub mod chat;
pub mod health;
pub mod middleware;
pub mod pages;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself
const UPLOAD_BODY_OVERHEAD: usize = 1024 * 1024;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes.saturating_add(UPLOAD_BODY_OVERHEAD);

    Router::new()
        .route("/", get(pages::index))
        .route("/chat/", post(chat::chat_endpoint))
        .route("/upload-pdf/", post(upload::upload_pdf))
        .route("/clear/", post(chat::clear_chat))
        .route("/detach-pdf/", post(chat::detach_pdf))
        .route("/health/", get(health::health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
