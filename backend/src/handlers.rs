use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::state::{AppState, SeedSummary};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub seeds: SeedSummary,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        seeds: state.summary(),
    })
}
