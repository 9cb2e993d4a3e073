//! Resource handlers shared by every entity: read-or-list, create, update, delete.

use crate::case::{keys_to_camel_case, keys_to_snake_case};
use crate::config::{ColumnRole, DeleteMode, FilterOp, ListSpec, ResourceDef, SortSpec};
use crate::error::AppError;
use crate::response::{now_iso, success_created, success_many, success_ok};
use crate::service::{CrudService, Record, RequestValidator};
use crate::sql::{Condition, ListQuery, SqlValue};
use crate::state::AppState;
use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Unwrap a JSON body, mapping extractor rejections to `INVALID_JSON`.
pub fn body_object(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, AppError> {
    match body {
        Ok(Json(Value::Object(m))) => Ok(m),
        Ok(_) => Err(AppError::validation("INVALID_JSON", "Request body must be a JSON object")),
        Err(rejection) => Err(AppError::validation(
            "INVALID_JSON",
            format!("Invalid JSON body: {}", rejection.body_text()),
        )),
    }
}

/// Build the list query from `?param=` filters, sort and pagination. Empty values are ignored;
/// unparseable `limit`/`offset` fall back to the defaults.
pub fn list_query(spec: &ListSpec, params: &HashMap<String, String>) -> ListQuery {
    let mut list = match spec.sort {
        SortSpec::Fixed { column, descending } => ListQuery::new(column, descending),
        SortSpec::Selectable { allowed, default } => {
            let column = params
                .get("sort")
                .and_then(|s| allowed.iter().find(|a| **a == s.as_str()))
                .copied()
                .unwrap_or(default);
            let descending = params.get("order").is_some_and(|o| o.eq_ignore_ascii_case("desc"));
            ListQuery::new(column, descending)
        }
    };
    if let Some((column, value)) = spec.scope {
        list.conditions.push(Condition {
            columns: vec![column],
            op: FilterOp::Eq,
            value: SqlValue::Bool(value),
        });
    }
    for filter in spec.filters {
        let Some(v) = params.get(filter.param).map(|v| v.trim()).filter(|v| !v.is_empty()) else {
            continue;
        };
        list.conditions.push(Condition {
            columns: filter.columns.to_vec(),
            op: filter.op,
            value: SqlValue::Text(v.to_string()),
        });
    }
    let limit = params.get("limit").and_then(|v| v.trim().parse().ok());
    let offset = params.get("offset").and_then(|v| v.trim().parse().ok());
    list.paginate(limit, offset)
}

fn stamp(def: &ResourceDef, record: &mut Record, creating: bool) {
    for col in def.columns {
        if let ColumnRole::Timestamp { touch } = col.role {
            if creating || touch {
                record.insert(col.name.to_string(), Value::String(now_iso()));
            }
        }
    }
}

/// GET: `?id=` returns the bare row; otherwise the filtered list, or the first row for
/// resources without a list.
pub async fn get(
    state: &AppState,
    def: &'static ResourceDef,
    id: Option<i64>,
    params: &HashMap<String, String>,
) -> Result<Response, AppError> {
    if let Some(id) = id {
        let row = CrudService::read(&state.pool, def, id)
            .await?
            .ok_or_else(|| AppError::NotFound(def.not_found_message()))?;
        return Ok(Json(keys_to_camel_case(row)).into_response());
    }
    match &def.list {
        Some(spec) => {
            let list = list_query(spec, params);
            let rows = CrudService::list(&state.pool, def, &list).await?;
            let rows: Vec<Value> = rows.into_iter().map(keys_to_camel_case).collect();
            Ok(success_many(def.name, rows).into_response())
        }
        None => {
            let row = CrudService::first(&state.pool, def)
                .await?
                .ok_or_else(|| AppError::NotFound(def.not_found_message()))?;
            Ok(Json(keys_to_camel_case(row)).into_response())
        }
    }
}

pub async fn create(
    state: &AppState,
    def: &'static ResourceDef,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let body = keys_to_snake_case(body_object(body)?);
    let mut record = RequestValidator::validate_create(def, &body)?;
    stamp(def, &mut record, true);
    let row = CrudService::create(&state.pool, def, &record).await?;
    tracing::info!(resource = def.name, id = ?row.get(def.pk_name()), "created");
    Ok(success_created(format!("{} created successfully", def.label), keys_to_camel_case(row)).into_response())
}

pub async fn update(
    state: &AppState,
    def: &'static ResourceDef,
    id: i64,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let body = keys_to_snake_case(body_object(body)?);
    let mut record = RequestValidator::validate_update(def, &body)?;
    if !record.is_empty() {
        stamp(def, &mut record, false);
    }
    let row = CrudService::update(&state.pool, def, id, &record)
        .await?
        .ok_or_else(|| AppError::NotFound(def.not_found_message()))?;
    Ok(Json(keys_to_camel_case(row)).into_response())
}

/// DELETE: soft resources flip their flag column to false, hard resources remove the row.
pub async fn delete(state: &AppState, def: &'static ResourceDef, id: i64) -> Result<Response, AppError> {
    let (row, verb) = match def.delete {
        DeleteMode::Soft(column) => {
            let record: Record = [(column.to_string(), Value::Bool(false))].into_iter().collect();
            (CrudService::update(&state.pool, def, id, &record).await?, "deactivated")
        }
        DeleteMode::Hard => (CrudService::delete(&state.pool, def, id).await?, "deleted"),
        DeleteMode::None => {
            return Err(AppError::Internal(format!("{} does not support delete", def.name)));
        }
    };
    let row = row.ok_or_else(|| AppError::NotFound(def.not_found_message()))?;
    tracing::info!(resource = def.name, id, verb, "removed");
    Ok(success_ok(format!("{} {} successfully", def.label, verb), keys_to_camel_case(row)).into_response())
}
