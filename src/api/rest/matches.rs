use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::matching::{match_driver, DEFAULT_TOP_K};
use crate::error::AppError;
use crate::models::matching::MatchResult;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/matches", post(compute_matches))
}

#[derive(Deserialize)]
pub struct MatchRequest {
    pub driver_id: String,
    #[serde(default = "default_top_k")]
    pub top_k: i64,
}

fn default_top_k() -> i64 {
    DEFAULT_TOP_K
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
}

async fn compute_matches(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let start = Instant::now();

    match match_driver(&state, &payload.driver_id, payload.top_k).await {
        Ok(matches) => {
            let elapsed = start.elapsed().as_secs_f64();
            state
                .metrics
                .match_latency_seconds
                .with_label_values(&["success"])
                .observe(elapsed);
            state
                .metrics
                .match_requests_total
                .with_label_values(&["success"])
                .inc();

            info!(
                driver_id = %payload.driver_id,
                top_k = payload.top_k,
                matches = matches.len(),
                "match computed"
            );

            Ok(Json(MatchResponse { matches }))
        }
        Err(err) => {
            let elapsed = start.elapsed().as_secs_f64();
            state
                .metrics
                .match_latency_seconds
                .with_label_values(&["error"])
                .observe(elapsed);
            state
                .metrics
                .match_requests_total
                .with_label_values(&["error"])
                .inc();

            Err(err)
        }
    }
}
