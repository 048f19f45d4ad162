//! Post/tag bridge entity for SeaORM. Composite primary key.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post_tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::tag::Entity",
        from = "Column::TagId",
        to = "super::tag::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Tag,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain PostTag.
impl From<Model> for quill_core::domain::PostTag {
    fn from(model: Model) -> Self {
        Self {
            post_id: model.post_id,
            tag_id: model.tag_id,
        }
    }
}

/// Conversion from Domain PostTag to SeaORM ActiveModel.
impl From<quill_core::domain::PostTag> for ActiveModel {
    fn from(link: quill_core::domain::PostTag) -> Self {
        Self {
            post_id: Set(link.post_id),
            tag_id: Set(link.tag_id),
        }
    }
}
