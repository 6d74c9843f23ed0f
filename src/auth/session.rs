use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::AppError;

/// Session key holding the authenticated identity.
pub const SESSION_USER_KEY: &str = "auth.user";

/// Identity bound to the browser session cookie for the lifetime of a login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// Extractor for handlers that require an authenticated session.
///
/// Every entry-scoped operation goes through this; there is no fallback to a
/// client-supplied user id.
pub struct CurrentUser(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(anyhow::anyhow!(msg)))?;
        session
            .get::<SessionUser>(SESSION_USER_KEY)
            .await?
            .map(CurrentUser)
            .ok_or(AppError::AuthRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_user_roundtrips_through_the_store_encoding() {
        let user = SessionUser {
            id: 7,
            email: "ada@ex.com".into(),
            name: "Ada".into(),
        };
        let encoded = serde_json::to_string(&user).expect("encode");
        let decoded: SessionUser = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded.id, 7);
        assert_eq!(decoded.email, "ada@ex.com");
        assert_eq!(decoded.name, "Ada");
    }
}
