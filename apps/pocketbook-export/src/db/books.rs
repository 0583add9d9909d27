//! Book and file lookups

use sqlx::SqlitePool;

use crate::error::Result;

/// One row of the `Books` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookRow {
    pub oid: i64,
    pub title: Option<String>,
    pub authors: Option<String>,
}

/// Book repository
pub struct BookRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BookRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every book in storage order
    pub async fn list(&self) -> Result<Vec<BookRow>> {
        let books = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT OID AS oid, Title AS title, Authors AS authors
            FROM Books
            ORDER BY OID ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(books)
    }

    /// Name of the file backing a book, if the device has one
    pub async fn file_name(&self, book_id: i64) -> Result<Option<String>> {
        let name: Option<Option<String>> = sqlx::query_scalar(
            r#"
            SELECT Name
            FROM Files
            WHERE BookID = ?
            LIMIT 1
            "#,
        )
        .bind(book_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(name.flatten())
    }
}
