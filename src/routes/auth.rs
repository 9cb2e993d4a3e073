//! Mock auth routes.

use crate::handlers::auth::{login, register};
use axum::{routing::post, Router};

pub fn auth_routes() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}
