use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "content_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub post_type: String,
    pub title: String,
    pub status: String,
    pub body: String,
    pub thumbnail_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::entry_meta::Entity")]
    EntryMeta,
    #[sea_orm(has_many = "super::tour_links::Entity")]
    TourLinks,
}

impl Related<super::entry_meta::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EntryMeta.def()
    }
}

impl Related<super::tour_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TourLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
