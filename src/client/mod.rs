//! HTTP client for the product, category and profile endpoints.
//!
//! Success is decided by the status code alone. Bodies are read leniently: a
//! failed request's message is taken from the JSON `details` (or `message`) field
//! when there is one, and a successful request may answer with an empty or
//! non-JSON body (e.g. `204 No Content`) without that being an error.

use crate::{
    config::settings::ClientConfig,
    entities::{CategoryModel, ProductModel, ProfileModel},
    validation::{ProductDraft, ValidatedProfile},
};
use reqwest::{Client, Method, Response, StatusCode, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Message used when a failed response does not say what went wrong.
pub const GENERIC_SERVER_ERROR: &str = "Unknown server error";

/// Errors that can occur when talking to the API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got an answer (connection refused, DNS, ...).
    #[error("Connection error: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// A success response that should have been JSON could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status, when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Whether a submission created a new record or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    Created,
    Updated,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted<T> {
    pub kind: SubmitKind,
    /// The record echoed back by the server, if the body held one
    pub record: Option<T>,
}

/// API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the API rooted at `base_url` (e.g. `http://127.0.0.1:3000`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client for the API named in the `[client]` settings.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.as_str())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ClientError> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;
        ensure_success(response).await
    }

    /// `GET /api/products/product`
    ///
    /// # Errors
    /// Returns an error if the request fails, the status is not a success or the
    /// body is not a product list.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductModel>, ClientError> {
        let response = self
            .send::<()>(Method::GET, "/api/products/product", None)
            .await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `GET /api/categories`
    ///
    /// # Errors
    /// Same as [`ApiClient::list_products`].
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<CategoryModel>, ClientError> {
        let response = self.send::<()>(Method::GET, "/api/categories", None).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Sends a product draft: `PUT` when it has an id, `POST` otherwise.
    ///
    /// # Errors
    /// Returns an error if the request fails or the status is not a success.
    #[instrument(skip(self, draft), fields(id = ?draft.id))]
    pub async fn submit_product(
        &self,
        draft: &ProductDraft,
    ) -> Result<Submitted<ProductModel>, ClientError> {
        let (method, kind) = if draft.is_update() {
            (Method::PUT, SubmitKind::Updated)
        } else {
            (Method::POST, SubmitKind::Created)
        };
        let response = self
            .send(method, "/api/products/product", Some(draft))
            .await?;
        Ok(Submitted {
            kind,
            record: read_json_lenient(response).await,
        })
    }

    /// `DELETE /api/products/{id}`; both `200` and `204` count as done.
    ///
    /// # Errors
    /// Returns an error if the request fails or the status is not a success.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: i64) -> Result<(), ClientError> {
        let response = self
            .send::<()>(Method::DELETE, &format!("/api/products/{product_id}"), None)
            .await?;
        if response.status() != StatusCode::NO_CONTENT {
            // Any body is informational only
            let _: Option<ProductModel> = read_json_lenient(response).await;
        }
        Ok(())
    }

    /// `PUT /api/products/relation/{productId}/{categoryId}/`
    ///
    /// # Errors
    /// Returns an error if the request fails or the status is not a success.
    #[instrument(skip(self))]
    pub async fn assign_category(
        &self,
        product_id: i64,
        category_id: i64,
    ) -> Result<Option<ProductModel>, ClientError> {
        let response = self
            .send::<()>(
                Method::PUT,
                &format!("/api/products/relation/{product_id}/{category_id}/"),
                None,
            )
            .await?;
        Ok(read_json_lenient(response).await)
    }

    /// `POST /api/profile`
    ///
    /// # Errors
    /// Returns an error if the request fails or the status is not a success.
    #[instrument(skip(self, profile), fields(id = profile.id))]
    pub async fn submit_profile(
        &self,
        profile: &ValidatedProfile,
    ) -> Result<Submitted<ProfileModel>, ClientError> {
        let response = self
            .send(Method::POST, "/api/profile", Some(&profile.to_form()))
            .await?;
        let kind = if response.status() == StatusCode::CREATED {
            SubmitKind::Created
        } else {
            SubmitKind::Updated
        };
        Ok(Submitted {
            kind,
            record: read_json_lenient(response).await,
        })
    }

    /// `GET /api/profile/{id}`; `None` when the server has no such profile.
    ///
    /// # Errors
    /// Returns an error if the request fails, the status is neither a success
    /// nor 404, or the body is not a profile.
    #[instrument(skip(self))]
    pub async fn get_profile(&self, profile_id: i64) -> Result<Option<ProfileModel>, ClientError> {
        match self
            .send::<()>(Method::GET, &format!("/api/profile/{profile_id}"), None)
            .await
        {
            Ok(response) => response
                .json()
                .await
                .map(Some)
                .map_err(|e| ClientError::Decode(e.to_string())),
            Err(ClientError::Status { status, .. }) if status == StatusCode::NOT_FOUND => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}

/// Passes success responses through and turns the rest into [`ClientError::Status`].
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let json = is_json(&response);
    let body = response.text().await.unwrap_or_default();
    let message = json
        .then(|| error_message(&body))
        .flatten()
        .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());

    warn!(%status, %message, "Request failed");
    Err(ClientError::Status { status, message })
}

/// Pulls `details`, then `message`, out of a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["details", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(String::from)
}

/// Decodes a success body when it is JSON of the expected shape, `None` otherwise.
async fn read_json_lenient<T: DeserializeOwned>(response: Response) -> Option<T> {
    if !is_json(&response) {
        debug!(status = %response.status(), "Response body is not JSON, ignoring it");
        return None;
    }
    let bytes = response.bytes().await.ok()?;
    serde_json::from_slice(&bytes)
        .inspect_err(|e| debug!("Ignoring undecodable response body: {e}"))
        .ok()
}
