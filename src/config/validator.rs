//! Definition validation: every referenced column exists and paths are unique.

use crate::config::{Check, ColumnKind, ResourceDef, SortSpec};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

pub fn validate(resources: &[&ResourceDef]) -> Result<(), ConfigError> {
    let mut paths = HashSet::new();
    let mut names = HashSet::new();
    for r in resources {
        if !paths.insert(r.path) {
            return Err(ConfigError::DuplicatePath(r.path.to_string()));
        }
        if !names.insert(r.name) {
            return Err(ConfigError::Validation(format!("duplicate resource name: {}", r.name)));
        }
        validate_resource(r)?;
    }
    Ok(())
}

fn validate_resource(r: &ResourceDef) -> Result<(), ConfigError> {
    let pk_count = r.columns.iter().filter(|c| c.is_primary_key()).count();
    if pk_count != 1 {
        return Err(ConfigError::InvalidPrimaryKey {
            resource: r.name,
            count: pk_count,
        });
    }

    let mut seen = HashSet::new();
    for c in r.columns {
        if !seen.insert(c.name) {
            return Err(ConfigError::Validation(format!("{}: duplicate column {}", r.name, c.name)));
        }
        match c.rule.check {
            Check::OneOf(values) if values.is_empty() => {
                return Err(ConfigError::Validation(format!("{}.{}: empty value list", r.name, c.name)));
            }
            Check::Pattern(p) => {
                Regex::new(p).map_err(|e| ConfigError::Validation(format!("{}.{}: {}", r.name, c.name, e)))?;
            }
            Check::Range { .. } if !matches!(c.kind, ColumnKind::Integer | ColumnKind::Real) => {
                return Err(ConfigError::Validation(format!("{}.{}: range on non-numeric column", r.name, c.name)));
            }
            _ => {}
        }
    }

    let Some(list) = &r.list else { return Ok(()) };
    let mut referenced: Vec<&str> = list.filters.iter().flat_map(|f| f.columns.iter().copied()).collect();
    if let Some((col, _)) = list.scope {
        referenced.push(col);
    }
    match list.sort {
        SortSpec::Fixed { column, .. } => referenced.push(column),
        SortSpec::Selectable { allowed, default } => {
            if !allowed.contains(&default) {
                return Err(ConfigError::Validation(format!("{}: default sort {} not allowed", r.name, default)));
            }
            referenced.extend(allowed.iter().copied());
        }
    }
    if let crate::config::DeleteMode::Soft(col) = r.delete {
        referenced.push(col);
    }
    for col in referenced {
        if r.column(col).is_none() {
            return Err(ConfigError::MissingColumn {
                resource: r.name,
                column: col.to_string(),
            });
        }
    }
    Ok(())
}
