//! Lookups against the `Items` / `Tags` / `TagNames` tables

use sqlx::SqlitePool;

use crate::annotations::{tag, TagBag, TagValue};
use crate::error::Result;

/// `Items.State` of an item that has not been deleted on the device
pub const ACTIVE_STATE: i64 = 0;

/// Tag store accessor
///
/// Values are always read as raw bytes; interpreting them is up to the
/// decoders.
pub struct TagStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TagStore<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Ids of the active items under `parent_id` whose `bm.type` is `type_value`,
    /// in creation order.
    pub async fn find_item_ids(&self, parent_id: i64, type_value: &str) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT DISTINCT i.OID
            FROM Items i
            JOIN Tags t ON t.ItemID = i.OID
            JOIN TagNames tn ON tn.OID = t.TagID
            WHERE i.ParentID = ?
              AND i.State = ?
              AND tn.TagName = ?
              AND CAST(t.Val AS TEXT) = ?
            ORDER BY i.OID ASC
            "#,
        )
        .bind(parent_id)
        .bind(ACTIVE_STATE)
        .bind(tag::TYPE)
        .bind(type_value)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }

    /// Value of a single tag on an item; extra values for the same tag are ignored.
    pub async fn get_tag_value(&self, item_id: i64, tag_name: &str) -> Result<Option<TagValue>> {
        let value = sqlx::query_scalar::<_, Vec<u8>>(
            r#"
            SELECT CAST(t.Val AS BLOB)
            FROM Tags t
            JOIN TagNames tn ON tn.OID = t.TagID
            WHERE t.ItemID = ?
              AND tn.TagName = ?
              AND t.Val IS NOT NULL
            ORDER BY t.rowid ASC
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .bind(tag_name)
        .fetch_optional(self.pool)
        .await?;

        Ok(value.map(TagValue::from))
    }

    /// Every tag on an item as a name → value map
    pub async fn item_tags(&self, item_id: i64) -> Result<TagBag> {
        let rows = sqlx::query_as::<_, (String, Vec<u8>)>(
            r#"
            SELECT tn.TagName, CAST(t.Val AS BLOB)
            FROM Tags t
            JOIN TagNames tn ON tn.OID = t.TagID
            WHERE t.ItemID = ?
              AND t.Val IS NOT NULL
            ORDER BY t.rowid ASC
            "#,
        )
        .bind(item_id)
        .fetch_all(self.pool)
        .await?;

        let mut bag = TagBag::new();
        for (name, value) in rows {
            bag.insert(name, TagValue::from(value));
        }

        Ok(bag)
    }
}
