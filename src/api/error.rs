//! HTTP error responses.
//!
//! Every failure is answered with a JSON body carrying a `details` string, which
//! is what the client reads to build its error notice. Validation failures also
//! carry the per-field `errors` map.

use crate::{errors::Error, validation::FieldErrors};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::SqlErr;
use serde::Serialize;
use thiserror::Error;

/// Error type returned by every handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] Error),

    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("Invalid path: {0}")]
    Path(#[from] PathRejection),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::App(err) => match err {
                Error::Validation(_) | Error::MissingId => StatusCode::BAD_REQUEST,
                Error::ProductNotFound { .. }
                | Error::CategoryNotFound { .. }
                | Error::ProfileNotFound { .. } => StatusCode::NOT_FOUND,
                Error::Database(db_err)
                    if matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
                {
                    StatusCode::CONFLICT
                }
                Error::Database(_) | Error::Config { .. } | Error::Io(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Body(_) | Self::Path(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Don't expose internal error details to clients
        let body = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            ErrorBody {
                details: "Internal server error".to_string(),
                errors: None,
            }
        } else if status == StatusCode::CONFLICT {
            ErrorBody {
                details: "A record with this name already exists".to_string(),
                errors: None,
            }
        } else {
            tracing::debug!(error = %self, "Request rejected");
            match self {
                Self::App(Error::Validation(errors)) => ErrorBody {
                    details: errors.to_string(),
                    errors: Some(errors),
                },
                other => ErrorBody {
                    details: other.to_string(),
                    errors: None,
                },
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
