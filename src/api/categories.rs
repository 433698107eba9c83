//! Category endpoints.

use super::{AppState, error::ApiResult};
use crate::{core::category, entities::CategoryModel};
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde::Deserialize;

/// Body of `POST /api/categories`.
#[derive(Debug, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

/// `GET /api/categories`
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CategoryModel>>> {
    Ok(Json(category::get_all_active_categories(&state.db).await?))
}

/// `POST /api/categories`
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CategoryModel>)> {
    let Json(body) = payload?;
    let created = category::create_category(&state.db, &body.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
