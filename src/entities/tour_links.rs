use sea_orm::entity::prelude::*;

/// External tour id to content entry id.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tour_links")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub tour_id: String,
    pub entry_id: i64,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::content_entries::Entity",
        from = "Column::EntryId",
        to = "super::content_entries::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ContentEntries,
}

impl Related<super::content_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
