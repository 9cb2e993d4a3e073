//! Apply the resource definitions to the database: one CREATE TABLE IF NOT EXISTS per resource.

use crate::config::{ColumnRole, ResolvedModel, ResourceDef};
use crate::error::AppError;
use sqlx::SqlitePool;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// DDL for one resource. Idempotent.
pub fn create_table_sql(def: &ResourceDef) -> String {
    let col_defs: Vec<String> = def
        .columns
        .iter()
        .map(|c| {
            if let ColumnRole::PrimaryKey = c.role {
                return format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", quote(c.name));
            }
            let mut d = format!("{} {}", quote(c.name), c.kind.sql_type());
            if !c.nullable {
                d.push_str(" NOT NULL");
            }
            if let Some(default) = c.default {
                d.push_str(" DEFAULT ");
                d.push_str(default);
            }
            d
        })
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quote(def.table),
        col_defs.join(",\n  ")
    )
}

pub async fn apply_migrations(pool: &SqlitePool, model: &ResolvedModel) -> Result<(), AppError> {
    for def in model.resources() {
        let sql = create_table_sql(def);
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(tables = model.resources().len(), "schema ready");
    Ok(())
}
