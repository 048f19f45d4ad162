//! Post/category bridge entity for SeaORM. Composite primary key.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post_categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub category_id: Uuid,
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
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain PostCategory.
impl From<Model> for quill_core::domain::PostCategory {
    fn from(model: Model) -> Self {
        Self {
            post_id: model.post_id,
            category_id: model.category_id,
        }
    }
}

/// Conversion from Domain PostCategory to SeaORM ActiveModel.
impl From<quill_core::domain::PostCategory> for ActiveModel {
    fn from(link: quill_core::domain::PostCategory) -> Self {
        Self {
            post_id: Set(link.post_id),
            category_id: Set(link.category_id),
        }
    }
}
