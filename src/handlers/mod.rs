//! HTTP handlers: generic resource CRUD, weather extras, mock auth.

pub mod auth;
pub mod entity;
pub mod weather;
