//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a resource definition.

use crate::config::{ColumnDef, FilterOp, ResourceDef};
use crate::sql::SqlValue;
use serde_json::Value;
use std::collections::HashMap;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Quote identifier for SQLite (safe: only from static definitions).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlValue) -> String {
        self.params.push(v);
        format!("?{}", self.params.len())
    }
}

/// One WHERE term. `Contains` over several columns is OR-ed.
#[derive(Clone, Debug)]
pub struct Condition {
    pub columns: Vec<&'static str>,
    pub op: FilterOp,
    pub value: SqlValue,
}

#[derive(Clone, Debug)]
pub struct ListQuery {
    pub conditions: Vec<Condition>,
    pub order_by: &'static str,
    pub descending: bool,
    pub limit: u32,
    pub offset: u32,
}

impl ListQuery {
    pub fn new(order_by: &'static str, descending: bool) -> Self {
        ListQuery {
            conditions: Vec::new(),
            order_by,
            descending,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }

    /// `limit` is always clamped to `MAX_LIMIT`.
    pub fn paginate(mut self, limit: Option<u32>, offset: Option<u32>) -> Self {
        self.limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        self.offset = offset.unwrap_or(0);
        self
    }
}

fn select_column_list(def: &ResourceDef) -> String {
    def.columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn writable_value(col: &ColumnDef, record: &HashMap<String, Value>) -> Option<SqlValue> {
    record.get(col.name).map(|v| SqlValue::from_json(v, col.kind))
}

/// SELECT by primary key.
pub fn select_by_id(def: &ResourceDef, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(SqlValue::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(def),
        quoted(def.table),
        quoted(def.pk_name()),
        ph
    );
    q
}

/// SELECT the lowest-id row (singleton resources).
pub fn select_first(def: &ResourceDef) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} LIMIT 1",
        select_column_list(def),
        quoted(def.table),
        quoted(def.pk_name())
    );
    q
}

/// SELECT list with conditions, ORDER BY (pk as tiebreaker), LIMIT/OFFSET.
/// Conditions naming unknown columns are skipped.
pub fn select_list(def: &ResourceDef, list: &ListQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for cond in &list.conditions {
        let cols: Vec<&str> = cond.columns.iter().copied().filter(|c| def.column(c).is_some()).collect();
        if cols.is_empty() {
            continue;
        }
        let terms: Vec<String> = cols
            .iter()
            .map(|col| match cond.op {
                FilterOp::Eq => {
                    let ph = q.push_param(cond.value.clone());
                    format!("{} = {}", quoted(col), ph)
                }
                FilterOp::Contains => {
                    let pattern = match &cond.value {
                        SqlValue::Text(s) => SqlValue::Text(format!("%{}%", s)),
                        other => other.clone(),
                    };
                    let ph = q.push_param(pattern);
                    format!("{} LIKE {}", quoted(col), ph)
                }
            })
            .collect();
        if terms.len() == 1 {
            where_parts.extend(terms);
        } else {
            where_parts.push(format!("({})", terms.join(" OR ")));
        }
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let direction = if list.descending { "DESC" } else { "ASC" };
    let pk = def.pk_name();
    let order_clause = if list.order_by == pk {
        format!(" ORDER BY {} {}", quoted(pk), direction)
    } else {
        format!(" ORDER BY {} {}, {} ASC", quoted(list.order_by), direction, quoted(pk))
    };
    q.sql = format!(
        "SELECT {} FROM {}{}{} LIMIT {} OFFSET {}",
        select_column_list(def),
        quoted(def.table),
        where_clause,
        order_clause,
        list.limit.min(MAX_LIMIT),
        list.offset
    );
    q
}

/// INSERT ... RETURNING. The primary key is always server-assigned; columns with a
/// database default are omitted when the record has no value for them.
pub fn insert(def: &ResourceDef, record: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in def.columns.iter().filter(|c| !c.is_primary_key()) {
        let val = match writable_value(c, record) {
            Some(v) => v,
            None if c.default.is_some() => continue,
            None => SqlValue::Null,
        };
        cols.push(quoted(c.name));
        placeholders.push(q.push_param(val));
    }
    let table = quoted(def.table);
    let returning = select_column_list(def);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            table,
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE by id: SET only columns present in the record, in definition order.
/// With nothing to set this degrades to a SELECT by id.
pub fn update(def: &ResourceDef, id: i64, record: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in def.columns.iter().filter(|c| !c.is_primary_key()) {
        if let Some(val) = writable_value(c, record) {
            let ph = q.push_param(val);
            sets.push(format!("{} = {}", quoted(c.name), ph));
        }
    }
    if sets.is_empty() {
        return select_by_id(def, id);
    }
    let id_ph = q.push_param(SqlValue::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quoted(def.table),
        sets.join(", "),
        quoted(def.pk_name()),
        id_ph,
        select_column_list(def)
    );
    q
}

/// DELETE by id, returning the removed row.
pub fn delete(def: &ResourceDef, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(SqlValue::Int(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} RETURNING {}",
        quoted(def.table),
        quoted(def.pk_name()),
        ph,
        select_column_list(def)
    );
    q
}

pub fn count(def: &ResourceDef) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", quoted(def.table));
    q
}
