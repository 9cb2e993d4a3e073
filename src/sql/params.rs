//! Convert serde_json::Value to values sqlx can bind for SQLite.

use crate::config::ColumnKind;
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// A value bound to a SQLite statement.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    /// Convert a validated JSON value for a column of `kind`. Lists are stored as JSON text.
    pub fn from_json(v: &Value, kind: ColumnKind) -> Self {
        match (v, kind) {
            (Value::Null, _) => SqlValue::Null,
            (Value::Bool(b), _) => SqlValue::Bool(*b),
            (Value::Number(n), ColumnKind::Real) => n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null),
            (Value::Number(n), _) => match n.as_i64() {
                Some(i) => SqlValue::Int(i),
                None => n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null),
            },
            (Value::String(s), _) => SqlValue::Text(s.clone()),
            (Value::Array(_) | Value::Object(_), _) => SqlValue::Text(v.to_string()),
        }
    }
}

/// Bind values in placeholder order.
pub fn bind_all<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for p in params {
        query = match p {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Bool(b) => query.bind(*b),
            SqlValue::Int(n) => query.bind(*n),
            SqlValue::Real(f) => query.bind(*f),
            SqlValue::Text(s) => query.bind(s.clone()),
        };
    }
    query
}
