//! HTTP API module - JSON endpoints over the shared session

mod roll;

use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Json, Router};
use parking_lot::Mutex;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::session::Session;
pub use roll::{DieResponse, ErrorResponse, HistoryResponse, RollRequest, RollResponse};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
}

/// Build the API router
pub fn router(session: Arc<Mutex<Session>>) -> Router {
    let state = AppState { session };

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        .merge(roll::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> impl IntoResponse {
    Json(RootResponse {
        name: "dicepool",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct RootResponse {
    name: &'static str,
    version: &'static str,
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}
