use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One value per key per entry, so re-writing a key replaces it
        manager
            .create_index(
                Index::create()
                    .name("idx_entry_meta_entry_key")
                    .table(EntryMeta::Table)
                    .col(EntryMeta::EntryId)
                    .col(EntryMeta::MetaKey)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_entry_meta_key_value")
                    .table(EntryMeta::Table)
                    .col(EntryMeta::MetaKey)
                    .col(EntryMeta::MetaValue)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tour_links_entry_id")
                    .table(TourLinks::Table)
                    .col(TourLinks::EntryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tour_links_entry_id")
                    .table(TourLinks::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_entry_meta_key_value")
                    .table(EntryMeta::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_entry_meta_entry_key")
                    .table(EntryMeta::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum EntryMeta {
    Table,
    EntryId,
    MetaKey,
    MetaValue,
}

#[derive(DeriveIden)]
enum TourLinks {
    Table,
    EntryId,
}
