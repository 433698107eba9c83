//! Category business logic.
//!
//! Categories are created from config at start-up or through the API, and listed
//! for the product/category relation page.

use crate::{
    config::settings::CategoryConfig,
    entities::{Category, category},
    errors::{Error, Result},
    validation::FieldErrors,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Retrieves all active categories, ordered alphabetically by name.
pub async fn get_all_active_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .filter(category::Column::IsRemoved.eq(false))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by exact name, returning None if not found.
pub async fn get_category_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new category. The name is trimmed and must not be empty.
///
/// # Errors
/// Returns an error if the name is blank or the insert fails (names are unique).
pub async fn create_category(db: &DatabaseConnection, name: &str) -> Result<category::Model> {
    let name = name.trim();
    if name.is_empty() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Name is required");
        return Err(Error::Validation(errors));
    }

    let now = chrono::Utc::now().naive_utc();
    let category = category::ActiveModel {
        name: Set(name.to_string()),
        is_removed: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    category.insert(db).await.map_err(Into::into)
}

/// Creates every configured category that does not exist yet.
///
/// Returns how many categories were created.
#[instrument(skip(db, categories))]
pub async fn seed_categories(db: &DatabaseConnection, categories: &[CategoryConfig]) -> Result<usize> {
    let mut created = 0;
    for config in categories {
        if get_category_by_name(db, config.name.trim()).await?.is_none() {
            create_category(db, &config.name).await?;
            created += 1;
        }
    }
    info!("Seeded {} of {} configured categories", created, categories.len());
    Ok(created)
}
