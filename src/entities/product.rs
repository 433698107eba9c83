//! Product entity - Represents items managed from the product CRUD page.
//!
//! Products are never physically removed: deleting one sets `is_removed`, and the
//! listing endpoints filter flagged rows out. A product may belong to one category.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the product
    pub name: String,
    /// Unit price, always a positive whole number
    pub price: i64,
    /// Units in stock, always a positive whole number
    pub quantity: i64,
    /// Soft delete flag - if true, product is hidden but data is preserved
    #[serde(rename = "isRemove")]
    pub is_removed: bool,
    /// Category this product belongs to, if one was assigned
    pub category_id: Option<i64>,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to at most one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
