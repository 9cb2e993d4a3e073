//! Mock authentication. Nothing is stored or verified; these endpoints fabricate a token and
//! user so the dashboard login flow has something to call.

use crate::error::AppError;
use crate::handlers::entity::body_object;
use axum::{extract::rejection::JsonRejection, Json};
use chrono::Utc;
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

const ADMIN_EMAIL: &str = "admin@dms.gov";
const ADMIN_PASSWORD: &str = "admin123";
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockUser {
    pub id: u32,
    pub email: String,
    pub name: String,
    pub role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthData {
    pub token: String,
    pub user: MockUser,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: AuthData,
}

fn mock_token() -> String {
    format!("mock-jwt-token-{}", Utc::now().timestamp_millis())
}

fn random_user_id() -> u32 {
    rand::thread_rng().gen_range(0..1000)
}

fn field<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Admin credentials map to a fixed admin user; anything else logs in as a `user`.
pub fn login_user(email: &str, password: &str) -> MockUser {
    if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
        return MockUser {
            id: 1,
            email: email.to_string(),
            name: "Admin User".into(),
            role: "admin",
            created_at: None,
        };
    }
    MockUser {
        id: random_user_id(),
        email: email.to_string(),
        name: email.split('@').next().unwrap_or(email).to_string(),
        role: "user",
        created_at: None,
    }
}

/// POST /api/auth/login
pub async fn login(body: Result<Json<Value>, JsonRejection>) -> Result<Json<AuthResponse>, AppError> {
    let body = body_object(body)?;
    let (Some(email), Some(password)) = (field(&body, "email"), field(&body, "password")) else {
        return Err(AppError::validation("MISSING_REQUIRED_FIELDS", "Email and password are required"));
    };
    let user = login_user(email, password);
    tracing::info!(email, role = user.role, "mock login");
    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful",
        data: AuthData { token: mock_token(), user },
    }))
}

/// POST /api/auth/register
pub async fn register(body: Result<Json<Value>, JsonRejection>) -> Result<Json<AuthResponse>, AppError> {
    let body = body_object(body)?;
    let (Some(name), Some(email), Some(password)) =
        (field(&body, "name"), field(&body, "email"), field(&body, "password"))
    else {
        return Err(AppError::validation(
            "MISSING_REQUIRED_FIELDS",
            "Name, email, and password are required",
        ));
    };
    let email_re = Regex::new(EMAIL_PATTERN).map_err(|e| AppError::Internal(e.to_string()))?;
    if !email_re.is_match(email) {
        return Err(AppError::validation("INVALID_EMAIL", "Invalid email format"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(
            "PASSWORD_TOO_SHORT",
            "Password must be at least 6 characters",
        ));
    }
    tracing::info!(email, "mock registration");
    Ok(Json(AuthResponse {
        success: true,
        message: "Registration successful",
        data: AuthData {
            token: mock_token(),
            user: MockUser {
                id: random_user_id(),
                email: email.to_string(),
                name: name.to_string(),
                role: "user",
                created_at: Some(crate::response::now_iso()),
            },
        },
    }))
}
