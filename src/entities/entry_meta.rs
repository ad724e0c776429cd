use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "entry_meta")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub entry_id: i64,
    pub meta_key: String,
    pub meta_value: String,
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
