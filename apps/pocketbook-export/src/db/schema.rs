//! Structural check of the source database

use sqlx::SqlitePool;

use crate::error::{ExportError, Result};

/// Tables and columns the exporter reads
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("Books", &["OID", "Title", "Authors"]),
    ("Files", &["BookID", "Name"]),
    ("Items", &["OID", "ParentID", "State"]),
    ("Tags", &["ItemID", "TagID", "Val"]),
    ("TagNames", &["OID", "TagName"]),
];

/// Fail with [`ExportError::Schema`] listing every missing table or column.
pub async fn verify_schema(pool: &SqlitePool) -> Result<()> {
    let mut missing = Vec::new();

    for (table, columns) in REQUIRED_COLUMNS {
        let present: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
            .bind(*table)
            .fetch_all(pool)
            .await?;

        if present.is_empty() {
            missing.push(format!("table {}", table));
            continue;
        }

        for column in *columns {
            if !present.iter().any(|name| name.eq_ignore_ascii_case(column)) {
                missing.push(format!("column {}.{}", table, column));
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ExportError::Schema(format!("missing {}", missing.join(", "))))
    }
}
