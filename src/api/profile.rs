//! Profile endpoints.

use super::{AppState, error::ApiResult};
use crate::{
    core::profile,
    entities::ProfileModel,
    errors::Error,
    validation::ProfileForm,
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

/// `GET /api/profile/{id}` - the stored profile used to pre-fill the form.
pub async fn get_profile(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ProfileModel>> {
    let Path(profile_id) = path?;
    profile::get_profile_by_id(&state.db, profile_id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::ProfileNotFound { id: profile_id }.into())
}

/// `POST /api/profile` - validates and saves the submitted form.
///
/// Answers 201 when the profile did not exist yet, 200 otherwise.
pub async fn save_profile(
    State(state): State<AppState>,
    payload: Result<Json<ProfileForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProfileModel>)> {
    let Json(form) = payload?;
    let validated = form.validate().map_err(Error::Validation)?;
    let saved = profile::save_profile(&state.db, &validated).await?;
    info!(id = saved.profile.id, created = saved.created, "Profile saved");

    let status = if saved.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(saved.profile)))
}
