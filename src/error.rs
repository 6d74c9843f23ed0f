use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request-path error taxonomy. Everything a handler can fail with maps to
/// exactly one HTTP status and one client-facing message; storage and session
/// details are logged for operators but never leaked in the body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("User already exists with this email address")]
    DuplicateUser,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    AuthRequired,

    #[error("session store failure")]
    Session(#[from] tower_sessions::session::Error),

    #[error("storage failure")]
    Storage(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::DuplicateUser => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::AuthRequired => StatusCode::UNAUTHORIZED,
            Self::Session(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Storage(_) => "Database error. Please try again.".into(),
            Self::Session(_) => "Could not update session. Please try again.".into(),
            Self::Internal(_) => "Server error. Please try again later.".into(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Storage(e) => error!(error = %e, "storage failure"),
            AppError::Session(e) => error!(error = %e, "session store failure"),
            AppError::Internal(e) => error!(error = %e, "internal error"),
            _ => {}
        }
        let body = json!({ "success": false, "error": self.client_message() });
        (self.status(), Json(body)).into_response()
    }
}
