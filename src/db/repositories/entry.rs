use crate::db::StoreError;
use crate::entities::{content_entries, prelude::*, tour_links};
use crate::models::{EntryDraft, EntryStatus};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set, TransactionTrait,
};
use tracing::debug;

/// Repository for content entries and their external id links
pub struct EntryRepository {
    conn: DatabaseConnection,
}

impl EntryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_tour_id(&self, tour_id: &str) -> Result<Option<i64>, StoreError> {
        let link = TourLinks::find_by_id(tour_id.to_string())
            .one(&self.conn)
            .await?;
        Ok(link.map(|l| l.entry_id))
    }

    /// Inserts the entry and its link in one transaction.
    ///
    /// A concurrent writer that linked the same tour first makes this fail
    /// with [`StoreError::DuplicateLink`] and nothing is kept.
    pub async fn create_linked(&self, tour_id: &str, draft: &EntryDraft) -> Result<i64, StoreError> {
        let txn = self.conn.begin().await?;

        let entry = ContentEntries::insert(content_entries::ActiveModel {
            post_type: Set(draft.post_type.clone()),
            title: Set(draft.title.clone()),
            status: Set(draft.status.as_str().to_string()),
            body: Set(draft.body.clone()),
            thumbnail_id: Set(None),
            created_at: Set(draft.created_at.clone()),
            updated_at: Set(draft.created_at.clone()),
            ..Default::default()
        })
        .exec(&txn)
        .await?;

        let entry_id = entry.last_insert_id;

        TourLinks::insert(tour_links::ActiveModel {
            tour_id: Set(tour_id.to_string()),
            entry_id: Set(entry_id),
            created_at: Set(draft.created_at.clone()),
        })
        .exec(&txn)
        .await
        .map_err(|e| StoreError::from_link_error(tour_id, e))?;

        txn.commit().await?;
        debug!(tour_id, entry_id, "Created content entry");
        Ok(entry_id)
    }

    pub async fn link(&self, tour_id: &str, entry_id: i64) -> Result<(), StoreError> {
        TourLinks::insert(tour_links::ActiveModel {
            tour_id: Set(tour_id.to_string()),
            entry_id: Set(entry_id),
            created_at: Set(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        })
        .exec(&self.conn)
        .await
        .map_err(|e| StoreError::from_link_error(tour_id, e))?;
        Ok(())
    }

    pub async fn update(&self, entry_id: i64, draft: &EntryDraft) -> Result<(), StoreError> {
        let mut entry = ContentEntries::find_by_id(entry_id)
            .one(&self.conn)
            .await?
            .ok_or(StoreError::NotFound(entry_id))?
            .into_active_model();

        entry.post_type = Set(draft.post_type.clone());
        entry.title = Set(draft.title.clone());
        entry.status = Set(draft.status.as_str().to_string());
        entry.body = Set(draft.body.clone());
        entry.created_at = Set(draft.created_at.clone());
        entry.updated_at = Set(draft.created_at.clone());

        entry.update(&self.conn).await?;
        Ok(())
    }

    pub async fn set_thumbnail(&self, entry_id: i64, thumbnail_id: i64) -> Result<(), StoreError> {
        let mut entry = ContentEntries::find_by_id(entry_id)
            .one(&self.conn)
            .await?
            .ok_or(StoreError::NotFound(entry_id))?
            .into_active_model();

        entry.thumbnail_id = Set(Some(thumbnail_id));
        entry.update(&self.conn).await?;
        Ok(())
    }

    pub async fn get(&self, entry_id: i64) -> Result<Option<content_entries::Model>, StoreError> {
        Ok(ContentEntries::find_by_id(entry_id).one(&self.conn).await?)
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        use sea_orm::PaginatorTrait;
        Ok(ContentEntries::find().count(&self.conn).await?)
    }
}

#[must_use]
pub fn status_of(model: &content_entries::Model) -> EntryStatus {
    EntryStatus::parse(&model.status)
}
