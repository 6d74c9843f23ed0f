use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, LogoutResponse, PublicUser, RegisterRequest,
            RegisterResponse, SessionRefreshResponse,
        },
        password::{hash_password, verify_password},
        repo::User,
        session::{SessionUser, SESSION_USER_KEY},
    },
    clock,
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/session/refresh", get(refresh_session))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let reg = payload.validate()?;

    if User::find_by_email(&state.db, &reg.email).await?.is_some() {
        warn!(email = %reg.email, "email already registered");
        return Err(AppError::DuplicateUser);
    }

    let hash = hash_password(&reg.password)?;

    let user = User::create(&state.db, &reg.name, &reg.email, &hash, clock::local_now())
        .await
        .map_err(|e| {
            // Concurrent registration of the same email lands here.
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation())
            {
                AppError::DuplicateUser
            } else {
                AppError::Storage(e)
            }
        })?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(Json(RegisterResponse {
        success: true,
        message: "Account created successfully! You can now log in.",
        user_id: user.id,
    }))
}

#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (email, password) = payload.validate()?;

    // Unknown email and wrong password resolve to the same outward error so
    // the endpoint does not reveal which addresses are registered.
    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            warn!(email = %email, "login unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    session.cycle_id().await?;
    session
        .insert(
            SESSION_USER_KEY,
            SessionUser {
                id: user.id,
                email: user.email.clone(),
                name: user.name.clone(),
            },
        )
        .await?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful",
        user: PublicUser {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    }))
}

#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<LogoutResponse>, AppError> {
    // Idempotent: flushing an absent session is a no-op.
    session.flush().await?;
    Ok(Json(LogoutResponse {
        success: true,
        message: "Logged out successfully",
    }))
}

#[instrument(skip(session))]
pub async fn refresh_session(session: Session) -> Result<Json<SessionRefreshResponse>, AppError> {
    match session.get::<SessionUser>(SESSION_USER_KEY).await? {
        Some(user) => Ok(Json(SessionRefreshResponse {
            success: true,
            user_id: Some(user.id),
            user_email: Some(user.email),
            user_name: Some(user.name),
            message: None,
        })),
        None => Ok(Json(SessionRefreshResponse {
            success: false,
            user_id: None,
            user_email: None,
            user_name: None,
            message: Some("No active session"),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_omits_password_material() {
        let response = LoginResponse {
            success: true,
            message: "Login successful",
            user: PublicUser {
                id: 1,
                name: "Ada".into(),
                email: "ada@ex.com".into(),
            },
        };
        let json = serde_json::to_string(&response).expect("serialize");
        assert!(json.contains("ada@ex.com"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn refresh_response_shapes() {
        let active = SessionRefreshResponse {
            success: true,
            user_id: Some(3),
            user_email: Some("ada@ex.com".into()),
            user_name: Some("Ada".into()),
            message: None,
        };
        let json = serde_json::to_string(&active).expect("serialize");
        assert!(json.contains("\"userId\":3"));
        assert!(json.contains("\"userEmail\""));
        assert!(!json.contains("message"));

        let inactive = SessionRefreshResponse {
            success: false,
            user_id: None,
            user_email: None,
            user_name: None,
            message: Some("No active session"),
        };
        let json = serde_json::to_string(&inactive).expect("serialize");
        assert!(json.contains("\"success\":false"));
        assert!(!json.contains("userId"));
    }
}
