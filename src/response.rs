//! Response envelope helpers. One shape per verb:
//! list reads `{success, data: {<key>: [...], total, lastUpdated}}`, creates and deletes
//! `{success, message, data}`, single reads and updates return the bare row.

use axum::{http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub success: bool,
    pub data: ListData<T>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListData<T> {
    #[serde(flatten)]
    pub items: BTreeMap<&'static str, Vec<T>>,
    pub total: u64,
    pub last_updated: String,
}

/// Current UTC time as ISO-8601 with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn success_many<T: Serialize>(key: &'static str, data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let total = data.len() as u64;
    let mut items = BTreeMap::new();
    items.insert(key, data);
    (
        StatusCode::OK,
        Json(SuccessMany {
            success: true,
            data: ListData {
                items,
                total,
                last_updated: now_iso(),
            },
        }),
    )
}

pub fn success_created<T: Serialize>(message: String, data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::CREATED,
        Json(SuccessOne {
            success: true,
            message,
            data,
        }),
    )
}

pub fn success_ok<T: Serialize>(message: String, data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::OK,
        Json(SuccessOne {
            success: true,
            message,
            data,
        }),
    )
}
