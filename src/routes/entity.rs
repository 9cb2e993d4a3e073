//! Resource routes built from the resolved model.
//! Each resource gets GET/POST/PUT on its own path with the row id in `?id=`, and DELETE when
//! its definition has a delete mode. Handlers capture the static definition instead of
//! resolving it per request.

use crate::config::{DeleteMode, ResourceDef, WEATHER};
use crate::extractors::{OptionalId, RequiredId};
use crate::handlers::{entity, weather};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post, MethodRouter},
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;

fn create_route(def: &'static ResourceDef) -> MethodRouter<AppState> {
    post(
        move |State(state): State<AppState>, body: Result<Json<Value>, JsonRejection>| async move {
            entity::create(&state, def, body).await
        },
    )
}

fn resource_methods(def: &'static ResourceDef) -> MethodRouter<AppState> {
    let methods = create_route(def)
        .get(
            move |State(state): State<AppState>,
                  OptionalId(id): OptionalId,
                  Query(params): Query<HashMap<String, String>>| async move {
                entity::get(&state, def, id, &params).await
            },
        )
        .put(
            move |State(state): State<AppState>,
                  RequiredId(id): RequiredId,
                  body: Result<Json<Value>, JsonRejection>| async move {
                entity::update(&state, def, id, body).await
            },
        );
    if def.delete == DeleteMode::None {
        return methods;
    }
    methods.delete(
        move |State(state): State<AppState>, RequiredId(id): RequiredId| async move {
            entity::delete(&state, def, id).await
        },
    )
}

/// Every resource in the model, plus `/weather/current` (POST is an alias for creating a
/// reading) and `/weather/forecast`.
pub fn entity_routes(state: AppState) -> Router {
    let mut router = Router::new();
    for &def in state.model.resources() {
        router = router.route(def.path, resource_methods(def));
    }
    router
        .route("/weather/current", create_route(&WEATHER).get(weather::current))
        .route("/weather/forecast", get(weather::forecast))
        .with_state(state)
}
