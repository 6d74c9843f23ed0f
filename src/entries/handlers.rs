use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::session::CurrentUser,
    clock,
    entries::{
        dto::{CreateEntryRequest, CreateEntryResponse, ListEntriesResponse},
        repo,
    },
    error::AppError,
    insights::{self, InsightSummary},
    state::AppState,
};

pub fn entry_routes() -> Router<AppState> {
    Router::new().route("/entries", post(create_entry).get(list_entries))
}

pub fn insight_routes() -> Router<AppState> {
    Router::new().route("/insights", get(get_insights))
}

#[instrument(skip(state, payload))]
pub async fn create_entry(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateEntryRequest>,
) -> Result<Json<CreateEntryResponse>, AppError> {
    let entry = payload.validate()?;

    let id = repo::insert(&state.db, user.id, &entry, clock::local_now()).await?;

    info!(entry_id = id, user_id = user.id, "entry saved");
    Ok(Json(CreateEntryResponse {
        success: true,
        id,
        message: "Entry saved successfully",
    }))
}

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ListEntriesResponse>, AppError> {
    let entries = repo::list_by_user(&state.db, user.id).await?;
    let count = entries.len();
    Ok(Json(ListEntriesResponse {
        success: true,
        entries,
        count,
    }))
}

/// Dashboard aggregates over the caller's own entries. Recomputed on every
/// load; nothing is cached or mutated.
#[instrument(skip(state))]
pub async fn get_insights(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<InsightSummary>, AppError> {
    let entries = repo::list_by_user(&state.db, user.id).await?;
    Ok(Json(insights::summarize(&entries, clock::local_today())))
}
