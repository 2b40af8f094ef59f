//! Roll API endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::AppState;
use crate::dice::{Face, Triggers};
use crate::session::RollReport;

/// Build roll router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roll", post(roll))
        .route("/result", get(result))
        .route("/clear", post(clear))
        .route("/history", get(history))
}

/// Roll request
#[derive(Debug, Deserialize)]
pub struct RollRequest {
    pub base: u32,
    #[serde(default)]
    pub modifier: u32,
    /// Faces that explode, any of 8, 9, 10
    #[serde(default)]
    pub explode: Vec<Face>,
}

/// One die slot of a roll
#[derive(Debug, Serialize)]
pub struct DieResponse {
    pub slot: usize,
    pub values: Vec<Face>,
    pub sum: u32,
    pub successes: u32,
    pub fails: u32,
}

/// A roll result
#[derive(Debug, Serialize)]
pub struct RollResponse {
    pub base: u32,
    pub modifier: u32,
    pub pool_size: usize,
    pub explode: Triggers,
    pub dice: Vec<DieResponse>,
    pub total: u32,
    pub successes: u32,
    pub fails: u32,
    pub lines: Vec<String>,
}

impl From<&RollReport> for RollResponse {
    fn from(report: &RollReport) -> Self {
        let outcome = &report.outcome;
        Self {
            base: report.base,
            modifier: report.modifier,
            pool_size: outcome.pool_size(),
            explode: report.triggers.clone(),
            dice: outcome
                .chains()
                .iter()
                .enumerate()
                .map(|(i, chain)| DieResponse {
                    slot: i + 1,
                    values: chain.values().to_vec(),
                    sum: chain.sum(),
                    successes: chain.successes(),
                    fails: chain.fails(),
                })
                .collect(),
            total: outcome.total(),
            successes: outcome.successes(),
            fails: outcome.fails(),
            lines: outcome.lines(),
        }
    }
}

/// Roll history
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<String>,
    pub text: String,
    pub max_entries: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(error: String) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

/// Roll a pool and record it
async fn roll(State(state): State<AppState>, Json(req): Json<RollRequest>) -> impl IntoResponse {
    let triggers = match Triggers::new(req.explode) {
        Ok(triggers) => triggers,
        Err(e) => {
            warn!("rejected roll: {}", e);
            return bad_request(e.to_string());
        }
    };

    let mut session = state.session.lock();
    match session.roll(req.base, req.modifier, triggers) {
        Ok(report) => (StatusCode::CREATED, Json(RollResponse::from(report))).into_response(),
        Err(e) => {
            warn!("rejected roll: {}", e);
            bad_request(e.to_string())
        }
    }
}

/// Current result, 404 once cleared
async fn result(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.lock();
    match session.current() {
        Some(report) => (StatusCode::OK, Json(RollResponse::from(report))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "no current result".to_string(),
            }),
        )
            .into_response(),
    }
}

/// Clear the current result; the history stays
async fn clear(State(state): State<AppState>) -> impl IntoResponse {
    state.session.lock().clear();
    StatusCode::NO_CONTENT
}

/// Rendered history, newest first
async fn history(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.lock();
    let history = session.history();
    Json(HistoryResponse {
        entries: history.lines(),
        text: history.render_all(),
        max_entries: history.max_entries(),
    })
}
