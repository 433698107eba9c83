//! Product business logic - Handles all product-related operations.
//!
//! This module provides the find-all/create/update operations behind the product
//! endpoints. Products are soft deleted: `delete_product` only sets the
//! `is_removed` flag, and every listing filters flagged rows out. All functions are
//! async and return Result types for proper error handling throughout the system.

use crate::{
    entities::{Category, Product, product},
    errors::{Error, Result},
    validation::ProductDraft,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Retrieves all active (non-removed) products, oldest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_active_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::IsRemoved.eq(false))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID, removed or not.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Loads an active product as an `ActiveModel` ready to be changed.
async fn find_active(db: &DatabaseConnection, product_id: i64) -> Result<product::ActiveModel> {
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    if product.is_removed {
        return Err(Error::ProductNotFound { id: product_id });
    }
    Ok(product.into())
}

async fn ensure_category_exists(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    match Category::find_by_id(category_id).one(db).await? {
        Some(category) if !category.is_removed => Ok(()),
        _ => Err(Error::CategoryNotFound { id: category_id }),
    }
}

/// Creates a new product from a validated draft.
///
/// Any id carried by the draft is ignored; the database assigns one.
///
/// # Errors
/// Returns an error if:
/// - The draft fails validation (empty name, non-positive price or quantity)
/// - The draft names a category that does not exist
/// - The database insert operation fails
#[instrument(skip(db, draft), fields(name = %draft.name))]
pub async fn create_product(db: &DatabaseConnection, draft: &ProductDraft) -> Result<product::Model> {
    let new_product = ProductDraft {
        id: None,
        ..draft.clone()
    };
    new_product.validate().map_err(Error::Validation)?;
    if let Some(category_id) = draft.category_id {
        ensure_category_exists(db, category_id).await?;
    }

    let now = chrono::Utc::now().naive_utc();

    let product = product::ActiveModel {
        name: Set(draft.name.trim().to_string()),
        price: Set(draft.price),
        quantity: Set(draft.quantity),
        is_removed: Set(false),
        category_id: Set(draft.category_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = product.insert(db).await?;
    debug!(id = created.id, "Product created");
    Ok(created)
}

/// Updates an existing product's name, price and quantity from a validated draft.
///
/// The category is only changed when the draft carries one; use
/// [`assign_category`] to move a product between categories.
///
/// # Errors
/// Returns an error if:
/// - The draft has no id
/// - The draft fails validation
/// - The product does not exist or is removed
/// - The database update operation fails
#[instrument(skip(db, draft), fields(id = ?draft.id))]
pub async fn update_product(db: &DatabaseConnection, draft: &ProductDraft) -> Result<product::Model> {
    let product_id = draft.id.ok_or(Error::MissingId)?;
    draft.validate().map_err(Error::Validation)?;

    let mut product = find_active(db, product_id).await?;
    if let Some(category_id) = draft.category_id {
        ensure_category_exists(db, category_id).await?;
        product.category_id = Set(Some(category_id));
    }

    product.name = Set(draft.name.trim().to_string());
    product.price = Set(draft.price);
    product.quantity = Set(draft.quantity);
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(db).await.map_err(Into::into)
}

/// Soft deletes a product by flagging it as removed. The row stays in the table.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist or is already removed
/// - The database update operation fails
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let mut product = find_active(db, product_id).await?;

    product.is_removed = Set(true);
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(db).await.map_err(Into::into)
}

/// Puts a product in a category, replacing any previous one.
///
/// # Errors
/// Returns an error if the product or the category does not exist or is
/// removed, or if the database update fails.
#[instrument(skip(db))]
pub async fn assign_category(
    db: &DatabaseConnection,
    product_id: i64,
    category_id: i64,
) -> Result<product::Model> {
    let mut product = find_active(db, product_id).await?;
    ensure_category_exists(db, category_id).await?;

    product.category_id = Set(Some(category_id));
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(db).await.map_err(Into::into)
}
