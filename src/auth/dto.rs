use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for user registration. Fields are optional so that a missing
/// field yields the journal's own 400 body instead of a deserializer reject.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Registration input after validation: trimmed name, normalized email.
#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Checks rules in order and reports the first violated one.
    pub fn validate(self) -> Result<Registration, AppError> {
        let (name, email, password) = match (self.name, self.email, self.password) {
            (Some(n), Some(e), Some(p)) => (n, e, p),
            _ => return Err(AppError::validation("All fields are required")),
        };

        let name = name.trim().to_string();
        if name.len() < 2 {
            return Err(AppError::validation(
                "Name must be at least 2 characters long",
            ));
        }

        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::validation("Please enter a valid email address"));
        }

        if password.len() < 6 {
            return Err(AppError::validation(
                "Password must be at least 6 characters long",
            ));
        }

        Ok(Registration {
            name,
            email,
            password,
        })
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(self) -> Result<(String, String), AppError> {
        let (email, password) = match (self.email, self.password) {
            (Some(e), Some(p)) => (e, p),
            _ => return Err(AppError::validation("Email and password are required")),
        };

        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::validation("Please enter a valid email address"));
        }

        Ok((email, password))
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Body of `GET /api/session/refresh`: identity fields are present only when
/// an active session exists; the endpoint answers 200 either way.
#[derive(Debug, Serialize)]
pub struct SessionRefreshResponse {
    pub success: bool,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(rename = "userEmail", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(rename = "userName", skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}
