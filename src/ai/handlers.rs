use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::{error, instrument};

use crate::{
    ai::prompt::{build_prompt, parse_analysis, service_failure_fallback},
    ai::types::AnalysisRequest,
    auth::session::CurrentUser,
    error::AppError,
    state::AppState,
};

pub fn analysis_routes() -> Router<AppState> {
    Router::new().route("/ai-analysis", post(ai_analysis))
}

/// Forward one entry's fields to the generative endpoint and shape the reply.
///
/// A reply that is not the expected JSON shape still answers 200, with the
/// deterministic fallback embedding the raw text. A failed remote call
/// answers 500 with the static fallback bundle; nothing is retried and
/// nothing is persisted.
#[instrument(skip(state, payload))]
pub async fn ai_analysis(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<AnalysisRequest>,
) -> Result<Response, AppError> {
    let input = payload.validate()?;
    let prompt = build_prompt(&input);

    match state.ai.generate(&prompt).await {
        Ok(text) => Ok(Json(parse_analysis(&text)).into_response()),
        Err(e) => {
            error!(error = %e, kind = e.kind(), user_id = user.id, "AI analysis failed");
            let body = json!({
                "error": "Failed to generate AI analysis",
                "fallback": service_failure_fallback(),
            });
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
    }
}
