use crate::db::StoreError;
use crate::entities::{entry_meta, prelude::*};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::BTreeMap;

/// Key/value metadata attached to content entries
pub struct MetaRepository {
    conn: DatabaseConnection,
}

impl MetaRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Writes a value, replacing any previous value under the same key.
    pub async fn set(&self, entry_id: i64, key: &str, value: &str) -> Result<(), StoreError> {
        let active_model = entry_meta::ActiveModel {
            entry_id: Set(entry_id),
            meta_key: Set(key.to_string()),
            meta_value: Set(value.to_string()),
            ..Default::default()
        };

        EntryMeta::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    entry_meta::Column::EntryId,
                    entry_meta::Column::MetaKey,
                ])
                .update_column(entry_meta::Column::MetaValue)
                .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn all_for_entry(&self, entry_id: i64) -> Result<BTreeMap<String, String>, StoreError> {
        let rows = EntryMeta::find()
            .filter(entry_meta::Column::EntryId.eq(entry_id))
            .order_by_asc(entry_meta::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| (r.meta_key, r.meta_value))
            .collect())
    }

    /// Entries carrying `key == value`, oldest first.
    pub async fn entries_with(&self, key: &str, value: &str) -> Result<Vec<i64>, StoreError> {
        let rows = EntryMeta::find()
            .filter(entry_meta::Column::MetaKey.eq(key))
            .filter(entry_meta::Column::MetaValue.eq(value))
            .order_by_asc(entry_meta::Column::EntryId)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(|r| r.entry_id).collect())
    }
}
