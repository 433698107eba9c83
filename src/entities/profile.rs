//! Profile entity - The signed-in user's editable profile.
//!
//! The id comes from the session that owns the profile, so it is not
//! auto-incremented.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// National ID, 11 digits starting with the birth date as `YYMMDD`
    pub ci: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// `Profile` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
