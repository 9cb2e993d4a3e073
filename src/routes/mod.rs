//! Route assembly: everything under `/api` plus the unprefixed probes.

pub mod auth;
pub mod common;
pub mod entity;

pub use auth::auth_routes;
pub use common::common_routes;
pub use entity::entity_routes;

use crate::config::Settings;
use crate::state::AppState;
use axum::Router;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application router with body limit, request tracing and permissive CORS.
pub fn app_router(state: AppState, settings: &Settings) -> Router {
    let api = entity_routes(state.clone()).merge(auth_routes());
    Router::new()
        .nest("/api", api)
        .merge(common_routes(state))
        .layer(RequestBodyLimitLayer::new(settings.body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
