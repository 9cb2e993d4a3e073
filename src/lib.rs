//! Disaster-management dashboard API: CRUD over alerts, shelters, evacuation routes,
//! emergency contacts, weather readings and dashboard stats, backed by SQLite.

pub mod case;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{all_resources, resolve, ResolvedModel, ResourceDef, Settings};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{app_router, auth_routes, common_routes, entity_routes};
pub use seed::seed_if_empty;
pub use service::CrudService;
pub use state::AppState;
pub use store::{connect_in_memory, connect_pool};
pub use telemetry::init_tracing;
