//! On-disk fixture databases shaped like the device's `books.db`

#![allow(dead_code)]

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

pub const SCHEMA: &str = r#"
CREATE TABLE Books (OID INTEGER PRIMARY KEY, Title TEXT, Authors TEXT);
CREATE TABLE Files (OID INTEGER PRIMARY KEY, BookID INTEGER, Name TEXT);
CREATE TABLE Items (OID INTEGER PRIMARY KEY, ParentID INTEGER, State INTEGER NOT NULL DEFAULT 0);
CREATE TABLE Tags (OID INTEGER PRIMARY KEY, ItemID INTEGER, TagID INTEGER, Val);
CREATE TABLE TagNames (OID INTEGER PRIMARY KEY, TagName TEXT);
"#;

/// A tag value as the device stores it
pub enum Val<'a> {
    Text(&'a str),
    Blob(&'a [u8]),
}

pub struct FixtureDb {
    pool: SqlitePool,
}

impl FixtureDb {
    pub async fn create(path: &Path) -> Self {
        Self::create_with_schema(path, SCHEMA).await
    }

    pub async fn create_with_schema(path: &Path, schema: &str) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::query(schema).execute(&pool).await.unwrap();
        Self { pool }
    }

    pub async fn book(&self, title: &str, authors: Option<&str>) -> i64 {
        sqlx::query("INSERT INTO Books (Title, Authors) VALUES (?, ?)")
            .bind(title)
            .bind(authors)
            .execute(&self.pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    pub async fn file(&self, book_id: i64, name: &str) {
        sqlx::query("INSERT INTO Files (BookID, Name) VALUES (?, ?)")
            .bind(book_id)
            .bind(name)
            .execute(&self.pool)
            .await
            .unwrap();
    }

    pub async fn item(&self, book_id: i64, kind: &str, tags: &[(&str, Val<'_>)]) -> i64 {
        self.item_with_state(book_id, kind, 0, tags).await
    }

    pub async fn item_with_state(
        &self,
        book_id: i64,
        kind: &str,
        state: i64,
        tags: &[(&str, Val<'_>)],
    ) -> i64 {
        let item_id = sqlx::query("INSERT INTO Items (ParentID, State) VALUES (?, ?)")
            .bind(book_id)
            .bind(state)
            .execute(&self.pool)
            .await
            .unwrap()
            .last_insert_rowid();

        self.tag(item_id, "bm.type", &Val::Text(kind)).await;
        for (name, value) in tags {
            self.tag(item_id, name, value).await;
        }
        item_id
    }

    async fn tag(&self, item_id: i64, name: &str, value: &Val<'_>) {
        let existing: Option<i64> = sqlx::query_scalar("SELECT OID FROM TagNames WHERE TagName = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .unwrap();
        let tag_id = match existing {
            Some(id) => id,
            None => sqlx::query("INSERT INTO TagNames (TagName) VALUES (?)")
                .bind(name)
                .execute(&self.pool)
                .await
                .unwrap()
                .last_insert_rowid(),
        };

        let query = sqlx::query("INSERT INTO Tags (ItemID, TagID, Val) VALUES (?, ?, ?)")
            .bind(item_id)
            .bind(tag_id);
        let query = match value {
            Val::Text(text) => query.bind(*text),
            Val::Blob(bytes) => query.bind(*bytes),
        };
        query.execute(&self.pool).await.unwrap();
    }

    /// Flush and release the file so the exporter can open it read-only
    pub async fn close(self) {
        self.pool.close().await;
    }
}
