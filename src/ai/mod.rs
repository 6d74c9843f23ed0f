use crate::state::AppState;
use axum::Router;

pub mod client;
pub mod handlers;
pub mod prompt;
pub mod types;

pub use client::{AiError, GeminiClient, ReflectionClient};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::analysis_routes())
}
