//! In-memory fixture database for unit tests

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::annotations::tag;

/// Minimal rendition of the device schema
pub const FIXTURE_SCHEMA: &str = r#"
CREATE TABLE Books (OID INTEGER PRIMARY KEY, Title TEXT, Authors TEXT);
CREATE TABLE Files (OID INTEGER PRIMARY KEY, BookID INTEGER, Name TEXT);
CREATE TABLE Items (OID INTEGER PRIMARY KEY, ParentID INTEGER, State INTEGER NOT NULL DEFAULT 0);
CREATE TABLE Tags (OID INTEGER PRIMARY KEY, ItemID INTEGER, TagID INTEGER, Val);
CREATE TABLE TagNames (OID INTEGER PRIMARY KEY, TagName TEXT);
"#;

pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::query(FIXTURE_SCHEMA).execute(&pool).await.unwrap();
    pool
}

pub struct Fixture<'a> {
    pool: &'a SqlitePool,
}

impl<'a> Fixture<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn book(&self, title: &str, authors: Option<&str>) -> i64 {
        sqlx::query("INSERT INTO Books (Title, Authors) VALUES (?, ?)")
            .bind(title)
            .bind(authors)
            .execute(self.pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    pub async fn file(&self, book_id: i64, name: &str) {
        sqlx::query("INSERT INTO Files (BookID, Name) VALUES (?, ?)")
            .bind(book_id)
            .bind(name)
            .execute(self.pool)
            .await
            .unwrap();
    }

    /// Active item of the given `bm.type` with extra text tags
    pub async fn item(&self, book_id: i64, kind: &str, tags: &[(&str, &str)]) -> i64 {
        let item_id = sqlx::query("INSERT INTO Items (ParentID, State) VALUES (?, 0)")
            .bind(book_id)
            .execute(self.pool)
            .await
            .unwrap()
            .last_insert_rowid();

        self.text_tag(item_id, tag::TYPE, kind).await;
        for (name, value) in tags {
            self.text_tag(item_id, name, value).await;
        }
        item_id
    }

    pub async fn set_state(&self, item_id: i64, state: i64) {
        sqlx::query("UPDATE Items SET State = ? WHERE OID = ?")
            .bind(state)
            .bind(item_id)
            .execute(self.pool)
            .await
            .unwrap();
    }

    pub async fn text_tag(&self, item_id: i64, name: &str, value: &str) {
        let tag_id = self.tag_id(name).await;
        sqlx::query("INSERT INTO Tags (ItemID, TagID, Val) VALUES (?, ?, ?)")
            .bind(item_id)
            .bind(tag_id)
            .bind(value)
            .execute(self.pool)
            .await
            .unwrap();
    }

    pub async fn blob_tag(&self, item_id: i64, name: &str, value: &[u8]) {
        let tag_id = self.tag_id(name).await;
        sqlx::query("INSERT INTO Tags (ItemID, TagID, Val) VALUES (?, ?, ?)")
            .bind(item_id)
            .bind(tag_id)
            .bind(value)
            .execute(self.pool)
            .await
            .unwrap();
    }

    pub async fn null_tag(&self, item_id: i64, name: &str) {
        let tag_id = self.tag_id(name).await;
        sqlx::query("INSERT INTO Tags (ItemID, TagID, Val) VALUES (?, ?, NULL)")
            .bind(item_id)
            .bind(tag_id)
            .execute(self.pool)
            .await
            .unwrap();
    }

    async fn tag_id(&self, name: &str) -> i64 {
        let existing: Option<i64> = sqlx::query_scalar("SELECT OID FROM TagNames WHERE TagName = ?")
            .bind(name)
            .fetch_optional(self.pool)
            .await
            .unwrap();
        if let Some(id) = existing {
            return id;
        }

        sqlx::query("INSERT INTO TagNames (TagName) VALUES (?)")
            .bind(name)
            .execute(self.pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }
}
