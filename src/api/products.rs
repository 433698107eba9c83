//! Product endpoints.

use super::{AppState, error::ApiResult};
use crate::{
    core::product,
    entities::ProductModel,
    errors::Error,
    validation::ProductDraft,
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use tracing::info;

/// `GET /api/products/product` - every product not flagged as removed.
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductModel>>> {
    let products = product::get_all_active_products(&state.db).await?;
    Ok(Json(products))
}

/// `POST /api/products/product` - creates a product; any id in the body is ignored.
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProductModel>)> {
    let Json(draft) = payload?;
    let created = product::create_product(&state.db, &draft).await?;
    info!(id = created.id, "Product created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/products/product` - updates the product named by the body's id.
pub async fn update_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> ApiResult<Json<ProductModel>> {
    let Json(draft) = payload?;
    if draft.id.is_none() {
        return Err(Error::MissingId.into());
    }
    let updated = product::update_product(&state.db, &draft).await?;
    info!(id = updated.id, "Product updated");
    Ok(Json(updated))
}

/// `DELETE /api/products/{id}` - flags the product as removed.
pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ProductModel>> {
    let Path(product_id) = path?;
    let removed = product::delete_product(&state.db, product_id).await?;
    info!(id = removed.id, "Product removed");
    Ok(Json(removed))
}

/// `PUT /api/products/relation/{productId}/{categoryId}/` - assigns a category.
pub async fn assign_category(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<Json<ProductModel>> {
    let Path((product_id, category_id)) = path?;
    let updated = product::assign_category(&state.db, product_id, category_id).await?;
    info!(product_id, category_id, "Category assigned");
    Ok(Json(updated))
}
