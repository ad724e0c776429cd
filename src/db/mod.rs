use crate::constants::meta_keys;
use crate::models::{ContentEntry, EntryDraft};
use async_trait::async_trait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub mod migrator;
pub mod repositories;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Content entry {0} not found")]
    NotFound(i64),

    #[error("Tour {0} is already linked to another entry")]
    DuplicateLink(String),
}

impl StoreError {
    fn from_link_error(tour_id: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::DuplicateLink(tour_id.to_string()),
            _ => Self::Database(err),
        }
    }
}

/// Storage operations the sync engine needs from the content platform.
///
/// Lookup and create are separate calls; callers that race on the same tour
/// id rely on the store to reject the second link.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Point lookup of the entry linked to an external tour id.
    async fn find_entry_by_tour_id(&self, tour_id: &str) -> Result<Option<i64>, StoreError>;

    async fn create_entry(&self, tour_id: &str, draft: &EntryDraft) -> Result<i64, StoreError>;

    async fn update_entry(&self, entry_id: i64, draft: &EntryDraft) -> Result<(), StoreError>;

    async fn set_meta(&self, entry_id: i64, key: &str, value: &str) -> Result<(), StoreError>;

    async fn set_thumbnail(&self, entry_id: i64, thumbnail_id: i64) -> Result<(), StoreError>;

    async fn get_entry(&self, entry_id: i64) -> Result<Option<ContentEntry>, StoreError>;
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> anyhow::Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> anyhow::Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        // A recycled connection would take the in-memory database with it.
        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Single-connection in-memory store for tests.
    pub async fn in_memory() -> anyhow::Result<Self> {
        Self::with_pool_options("sqlite::memory:", 1, 1).await
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn entry_repo(&self) -> repositories::entry::EntryRepository {
        repositories::entry::EntryRepository::new(self.conn.clone())
    }

    fn meta_repo(&self) -> repositories::meta::MetaRepository {
        repositories::meta::MetaRepository::new(self.conn.clone())
    }

    pub async fn count_entries(&self) -> Result<u64, StoreError> {
        self.entry_repo().count().await
    }

    /// Entry for a tour id, with its metadata.
    pub async fn get_entry_by_tour_id(
        &self,
        tour_id: &str,
    ) -> Result<Option<ContentEntry>, StoreError> {
        match self.find_entry_by_tour_id(tour_id).await? {
            Some(entry_id) => self.get_entry(entry_id).await,
            None => Ok(None),
        }
    }

    /// Entries written before the link table existed only carry the
    /// `tour_id` metadata key. Adopt the oldest one and record its link.
    async fn adopt_unlinked_entry(&self, tour_id: &str) -> Result<Option<i64>, StoreError> {
        let candidates = self
            .meta_repo()
            .entries_with(meta_keys::TOUR_ID, tour_id)
            .await?;

        let Some(&entry_id) = candidates.first() else {
            return Ok(None);
        };

        if candidates.len() > 1 {
            warn!(
                tour_id,
                count = candidates.len(),
                "Several entries carry the same tour id, adopting the oldest"
            );
        }

        self.entry_repo().link(tour_id, entry_id).await?;
        Ok(Some(entry_id))
    }
}

#[async_trait]
impl ContentStore for Store {
    async fn find_entry_by_tour_id(&self, tour_id: &str) -> Result<Option<i64>, StoreError> {
        if let Some(entry_id) = self.entry_repo().find_by_tour_id(tour_id).await? {
            return Ok(Some(entry_id));
        }
        self.adopt_unlinked_entry(tour_id).await
    }

    async fn create_entry(&self, tour_id: &str, draft: &EntryDraft) -> Result<i64, StoreError> {
        self.entry_repo().create_linked(tour_id, draft).await
    }

    async fn update_entry(&self, entry_id: i64, draft: &EntryDraft) -> Result<(), StoreError> {
        self.entry_repo().update(entry_id, draft).await
    }

    async fn set_meta(&self, entry_id: i64, key: &str, value: &str) -> Result<(), StoreError> {
        self.meta_repo().set(entry_id, key, value).await
    }

    async fn set_thumbnail(&self, entry_id: i64, thumbnail_id: i64) -> Result<(), StoreError> {
        self.entry_repo().set_thumbnail(entry_id, thumbnail_id).await
    }

    async fn get_entry(&self, entry_id: i64) -> Result<Option<ContentEntry>, StoreError> {
        let Some(model) = self.entry_repo().get(entry_id).await? else {
            return Ok(None);
        };

        let meta = self.meta_repo().all_for_entry(entry_id).await?;

        Ok(Some(ContentEntry {
            id: model.id,
            status: repositories::entry::status_of(&model),
            post_type: model.post_type,
            title: model.title,
            created_at: model.created_at,
            body: model.body,
            thumbnail_id: model.thumbnail_id,
            meta,
        }))
    }
}
