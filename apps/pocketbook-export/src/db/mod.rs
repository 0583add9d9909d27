//! Read-only access to the reader's annotation database
//!
//! The device keeps annotations in a generic entity-attribute-value layout:
//! `Items` rows belong to a book, and every property of an item is a row in
//! `Tags` whose name lives in `TagNames`.

mod books;
mod schema;
mod tags;

pub use books::{BookRepository, BookRow};
pub use schema::{verify_schema, REQUIRED_COLUMNS};
pub use tags::{TagStore, ACTIVE_STATE};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

use crate::error::{ExportError, Result};

/// Open the database read-only and verify it has the expected layout.
///
/// The pool holds a single connection and is owned by one export run.
pub async fn open(path: &Path) -> Result<SqlitePool> {
    if !path.is_file() {
        return Err(ExportError::DatabaseNotFound(path.to_path_buf()));
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    if let Err(e) = verify_schema(&pool).await {
        pool.close().await;
        return Err(e);
    }

    Ok(pool)
}
