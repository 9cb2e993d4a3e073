//! Request validation from column rules. Produces a sanitized record keyed by column name.

use crate::config::{Check, ColumnDef, ColumnKind, ColumnRole, RequiredStyle, ResourceDef};
use crate::error::AppError;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Column name -> sanitized JSON value, ready for the SQL builder.
pub type Record = HashMap<String, Value>;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body (snake_case keys). All required fields must be present.
    pub fn validate_create(def: &ResourceDef, body: &Map<String, Value>) -> Result<Record, AppError> {
        let columns: Vec<&ColumnDef> = def
            .columns
            .iter()
            .filter(|c| matches!(c.role, ColumnRole::Field { on_create: true }))
            .collect();

        for col in &columns {
            if col.rule.required && is_missing(body.get(col.name), col.kind) {
                return Err(missing(def, col));
            }
        }

        let mut record = Record::new();
        for col in columns {
            match body.get(col.name) {
                None => {}
                Some(Value::Null) if col.nullable => {
                    record.insert(col.name.to_string(), Value::Null);
                }
                Some(Value::Null) => {}
                Some(v) => {
                    record.insert(col.name.to_string(), sanitize(def, col, v)?);
                }
            }
        }
        Ok(record)
    }

    /// Validate only the fields present in the body (for PUT). Unknown keys are ignored.
    pub fn validate_update(def: &ResourceDef, body: &Map<String, Value>) -> Result<Record, AppError> {
        let mut record = Record::new();
        for col in def.columns.iter().filter(|c| matches!(c.role, ColumnRole::Field { .. })) {
            let Some(v) = body.get(col.name) else { continue };
            let value = match v {
                Value::Null if col.nullable => Value::Null,
                Value::Null => return Err(invalid(col)),
                v => sanitize(def, col, v)?,
            };
            record.insert(col.name.to_string(), value);
        }
        if def.require_update_fields && record.is_empty() {
            return Err(AppError::validation(
                "NO_UPDATE_FIELDS",
                "At least one field must be provided for update",
            ));
        }
        Ok(record)
    }
}

fn is_missing(v: Option<&Value>, kind: ColumnKind) -> bool {
    match (v, kind) {
        (None | Some(Value::Null), _) => true,
        (Some(Value::String(s)), ColumnKind::Text | ColumnKind::TextList) => s.trim().is_empty(),
        _ => false,
    }
}

fn missing(def: &ResourceDef, col: &ColumnDef) -> AppError {
    match def.required_style {
        RequiredStyle::AllAtOnce(message) => AppError::validation("MISSING_REQUIRED_FIELDS", message),
        RequiredStyle::EachField => {
            AppError::validation("MISSING_REQUIRED_FIELD", format!("{} is required", col.label))
        }
    }
}

fn invalid(col: &ColumnDef) -> AppError {
    if !col.rule.message.is_empty() {
        return AppError::validation(col.rule.code, col.rule.message);
    }
    let expected = match col.kind {
        ColumnKind::Integer => "an integer",
        ColumnKind::Real => "a number",
        ColumnKind::Text => "a string",
        ColumnKind::Bool => "a boolean",
        ColumnKind::TextList => "a list of strings",
    };
    AppError::validation(col.rule.code, format!("{} must be {}", col.label, expected))
}

fn sanitize(def: &ResourceDef, col: &ColumnDef, v: &Value) -> Result<Value, AppError> {
    match col.kind {
        ColumnKind::Text => {
            let s = v.as_str().ok_or_else(|| invalid(col))?;
            sanitize_text(def, col, s)
        }
        ColumnKind::Real => {
            let n = v.as_f64().ok_or_else(|| invalid(col))?;
            check_range(col, n)?;
            Ok(v.clone())
        }
        ColumnKind::Integer => {
            let n = as_integer(v).ok_or_else(|| invalid(col))?;
            check_range(col, n as f64)?;
            Ok(Value::from(n))
        }
        ColumnKind::Bool => v.as_bool().map(Value::Bool).ok_or_else(|| invalid(col)),
        ColumnKind::TextList => match v {
            Value::String(s) => Ok(Value::Array(vec![Value::String(s.trim().to_string())])),
            Value::Array(items) => items
                .iter()
                .map(|i| i.as_str().map(|s| Value::String(s.trim().to_string())).ok_or_else(|| invalid(col)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            _ => Err(invalid(col)),
        },
    }
}

fn sanitize_text(def: &ResourceDef, col: &ColumnDef, s: &str) -> Result<Value, AppError> {
    let trimmed = s.trim();
    match col.rule.check {
        Check::OneOf(allowed) => {
            if !allowed.contains(&s) {
                return Err(invalid(col));
            }
        }
        Check::Pattern(pattern) => {
            let re = Regex::new(pattern).map_err(|_| AppError::Internal(format!("invalid pattern for {}", col.name)))?;
            if !re.is_match(trimmed) {
                return Err(invalid(col));
            }
        }
        Check::None | Check::Range { .. } => {}
    }
    if trimmed.is_empty() {
        if col.nullable {
            return Ok(Value::Null);
        }
        if col.rule.required {
            return Err(missing(def, col));
        }
    }
    Ok(Value::String(trimmed.to_string()))
}

/// JSON integers, plus floats with no fractional part (`500.0`).
fn as_integer(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| {
        v.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn check_range(col: &ColumnDef, n: f64) -> Result<(), AppError> {
    if let Check::Range { min, max } = col.rule.check {
        if min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m) {
            return Err(invalid(col));
        }
    }
    Ok(())
}
