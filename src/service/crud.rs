//! Generic CRUD execution against SQLite.

use crate::config::{ColumnKind, ResourceDef};
use crate::error::AppError;
use crate::service::Record;
use crate::sql::{bind_all, count, delete, insert, select_by_id, select_first, select_list, update, ListQuery, QueryBuf};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct CrudService;

impl CrudService {
    /// List rows matching the query. Rows are JSON objects keyed by column name.
    pub async fn list(pool: &SqlitePool, def: &ResourceDef, list: &ListQuery) -> Result<Vec<Value>, AppError> {
        let q = select_list(def, list);
        Self::query_many(pool, def, &q).await
    }

    /// Fetch one row by primary key.
    pub async fn read(pool: &SqlitePool, def: &ResourceDef, id: i64) -> Result<Option<Value>, AppError> {
        let q = select_by_id(def, id);
        Self::query_optional(pool, def, &q).await
    }

    /// Fetch the lowest-id row, for singleton resources.
    pub async fn first(pool: &SqlitePool, def: &ResourceDef) -> Result<Option<Value>, AppError> {
        let q = select_first(def);
        Self::query_optional(pool, def, &q).await
    }

    /// Insert one validated record. Returns the created row.
    pub async fn create(pool: &SqlitePool, def: &ResourceDef, record: &Record) -> Result<Value, AppError> {
        let q = insert(def, record);
        Self::query_optional(pool, def, &q)
            .await?
            .ok_or_else(|| AppError::Internal(format!("insert into {} returned no row", def.table)))
    }

    /// Update one row by id. Returns the updated row, or None when the id does not exist.
    pub async fn update(
        pool: &SqlitePool,
        def: &ResourceDef,
        id: i64,
        record: &Record,
    ) -> Result<Option<Value>, AppError> {
        let q = update(def, id, record);
        Self::query_optional(pool, def, &q).await
    }

    /// Delete one row by id. Returns the deleted row or None.
    pub async fn delete(pool: &SqlitePool, def: &ResourceDef, id: i64) -> Result<Option<Value>, AppError> {
        let q = delete(def, id);
        Self::query_optional(pool, def, &q).await
    }

    pub async fn count(pool: &SqlitePool, def: &ResourceDef) -> Result<i64, AppError> {
        let q = count(def);
        tracing::debug!(sql = %q.sql, "query");
        let n: i64 = sqlx::query_scalar(&q.sql).fetch_one(pool).await?;
        Ok(n)
    }

    async fn query_optional(pool: &SqlitePool, def: &ResourceDef, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query(&q.sql), &q.params).fetch_optional(pool).await?;
        row.map(|r| row_to_json(def, &r)).transpose()
    }

    async fn query_many(pool: &SqlitePool, def: &ResourceDef, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query(&q.sql), &q.params).fetch_all(pool).await?;
        rows.iter().map(|r| row_to_json(def, r)).collect()
    }
}

/// Decode a row using the resource's column kinds.
fn row_to_json(def: &ResourceDef, row: &SqliteRow) -> Result<Value, AppError> {
    let mut map = serde_json::Map::new();
    for col in def.columns {
        let name = col.name;
        let v = match col.kind {
            ColumnKind::Integer => row.try_get::<Option<i64>, _>(name)?.map(Value::from),
            ColumnKind::Real => row
                .try_get::<Option<f64>, _>(name)?
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            ColumnKind::Bool => row.try_get::<Option<bool>, _>(name)?.map(Value::Bool),
            ColumnKind::Text => row.try_get::<Option<String>, _>(name)?.map(Value::String),
            ColumnKind::TextList => row
                .try_get::<Option<String>, _>(name)?
                .map(|s| serde_json::from_str(&s).unwrap_or(Value::String(s))),
        };
        map.insert(name.to_string(), v.unwrap_or(Value::Null));
    }
    Ok(Value::Object(map))
}
