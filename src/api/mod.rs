//! HTTP API consumed by the product, relation and profile pages.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                        - Health check
//!
//! GET    /api/products/product                          - Active products
//! POST   /api/products/product                          - Create product (201)
//! PUT    /api/products/product                          - Update product (id in body)
//! DELETE /api/products/{id}                             - Soft delete product
//! PUT    /api/products/relation/{productId}/{categoryId}/ - Assign category
//!
//! GET    /api/categories                                - Active categories
//! POST   /api/categories                                - Create category (201)
//!
//! GET    /api/profile/{id}                              - Stored profile
//! POST   /api/profile                                   - Save profile (200/201)
//! ```

pub mod categories;
pub mod error;
pub mod products;
pub mod profile;

pub use error::{ApiError, ApiResult, ErrorBody};

use crate::errors::Result;
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Builds the full router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/products/product",
            get(products::list_products)
                .post(products::create_product)
                .put(products::update_product),
        )
        .route("/api/products/{id}", delete(products::delete_product))
        .route(
            "/api/products/relation/{product_id}/{category_id}/",
            put(products::assign_category),
        )
        .route(
            "/api/products/relation/{product_id}/{category_id}",
            put(products::assign_category),
        )
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/api/profile", post(profile::save_profile))
        .route("/api/profile/{id}", get(profile::get_profile))
        .layer(TraceLayer::new_for_http())
        // The pages are served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Serves the API on `bind` until Ctrl-C.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(bind: &str, db: DatabaseConnection) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(db)))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                tracing::warn!("Could not install Ctrl-C handler");
                std::future::pending::<()>().await;
            }
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{CategoryModel, ProductModel, ProfileModel};
    use crate::test_utils::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn app() -> Router {
        let db = setup_test_db().await.unwrap();
        router(AppState::new(db))
    }

    #[tokio::test]
    async fn test_product_crud_flow() {
        let app = app().await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/products/product",
            Some(json!({ "name": "Coffee", "price": 12, "quantity": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: ProductModel = serde_json::from_value(created).unwrap();
        assert_eq!(created.name, "Coffee");
        assert!(!created.is_removed);

        let (status, updated) = send(
            &app,
            Method::PUT,
            "/api/products/product",
            Some(json!({ "id": created.id, "name": "Espresso", "price": 15, "quantity": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Espresso");
        assert_eq!(updated["isRemove"], false);

        let (status, listed) = send(&app, Method::GET, "/api/products/product", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, removed) =
            send(&app, Method::DELETE, &format!("/api/products/{}", created.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(removed["isRemove"], true);

        let (_, listed) = send(&app, Method::GET, "/api/products/product", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_create_ignores_posted_id() {
        let app = app().await;
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/products/product",
            Some(json!({ "id": 0, "name": "Tea", "price": 1, "quantity": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_update_without_id_is_bad_request() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/products/product",
            Some(json!({ "name": "Coffee", "price": 12, "quantity": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"], "An id is required to update");
    }

    #[tokio::test]
    async fn test_invalid_product_reports_fields() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/products/product",
            Some(json!({ "name": "", "price": 0, "quantity": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["price"], "Price must be greater than 0");
        assert_eq!(body["errors"]["name"], "Name is required");
        assert!(body["details"].as_str().unwrap().contains("price"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/products/product",
            Some(json!({ "name": "Coffee", "price": "twelve" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let app = app().await;
        let (status, body) = send(&app, Method::DELETE, "/api/products/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["details"], "Product not found: 999");

        let (status, _) = send(&app, Method::DELETE, "/api/products/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_assign_category_route() {
        let app = app().await;
        let (_, category) = send(
            &app,
            Method::POST,
            "/api/categories",
            Some(json!({ "name": "Beverages" })),
        )
        .await;
        let category: CategoryModel = serde_json::from_value(category).unwrap();
        let (_, product) = send(
            &app,
            Method::POST,
            "/api/products/product",
            Some(json!({ "name": "Coffee", "price": 12, "quantity": 3 })),
        )
        .await;
        let product: ProductModel = serde_json::from_value(product).unwrap();

        for uri in [
            format!("/api/products/relation/{}/{}/", product.id, category.id),
            format!("/api/products/relation/{}/{}", product.id, category.id),
        ] {
            let (status, body) = send(&app, Method::PUT, &uri, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["categoryId"], category.id);
        }

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/products/relation/{}/999/", product.id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_category_is_conflict() {
        let app = app().await;
        let body = json!({ "name": "Snacks" });
        let (status, _) = send(&app, Method::POST, "/api/categories", Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, error) = send(&app, Method::POST, "/api/categories", Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(error["details"].is_string());

        let (_, listed) = send(&app, Method::GET, "/api/categories", None).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_profile_save_and_load() {
        let app = app().await;
        let form = serde_json::to_value(test_profile_form()).unwrap();

        let (status, _) = send(&app, Method::POST, "/api/profile", Some(form.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, saved) = send(&app, Method::POST, "/api/profile", Some(form)).await;
        assert_eq!(status, StatusCode::OK);
        let saved: ProfileModel = serde_json::from_value(saved).unwrap();

        let (status, loaded) =
            send(&app, Method::GET, &format!("/api/profile/{}", saved.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(loaded["ci"], saved.ci.as_str());

        let (status, _) = send(&app, Method::GET, "/api/profile/4040", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_profile_rejected() {
        let app = app().await;
        let mut form = test_profile_form();
        form.ci = "01022912345".to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/profile",
            Some(serde_json::to_value(form).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["ci"], "Invalid day (29) for 02/2001");
    }

    #[tokio::test]
    async fn test_health() {
        let app = app().await;
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
