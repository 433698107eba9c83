//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases,
//! creating test entities with sensible defaults, and running the API on a
//! local port for client tests.

use crate::{
    api::{self, AppState},
    core::{category, product},
    entities,
    errors::Result,
    validation::{ProductDraft, ProfileForm},
};
use axum::Router;
use sea_orm::DatabaseConnection;
use tokio::sync::oneshot;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a product draft.
pub fn draft(id: Option<i64>, name: &str, price: i64, quantity: i64) -> ProductDraft {
    ProductDraft {
        id,
        name: name.to_string(),
        price,
        quantity,
        category_id: None,
    }
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * price: 10
/// * quantity: 1
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, &draft(None, name, 10, 1)).await
}

/// Sets up a database holding one category and one uncategorized product.
pub async fn setup_with_product_and_category() -> Result<(
    DatabaseConnection,
    entities::category::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let category = category::create_category(&db, "Test Category").await?;
    let product = create_test_product(&db, "Test Product").await?;
    Ok((db, category, product))
}

/// A profile form that passes validation.
pub fn test_profile_form() -> ProfileForm {
    ProfileForm {
        id: "1".to_string(),
        first_name: "Ana".to_string(),
        last_name: "Pérez".to_string(),
        ci: "90051512345".to_string(),
        email: "ana@example.com".to_string(),
        phone: "53123456".to_string(),
    }
}

/// Serves `app` on a random local port.
///
/// Returns the base URL and a sender that stops the server when fired or dropped.
pub async fn spawn_router(app: Router) -> (String, oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await;
    });
    (format!("http://{addr}"), shutdown_tx)
}

/// Serves the real API over a fresh in-memory database.
///
/// Returns the base URL, a handle on the database and the shutdown sender.
pub async fn spawn_api() -> Result<(String, DatabaseConnection, oneshot::Sender<()>)> {
    let db = setup_test_db().await?;
    let (base_url, shutdown) = spawn_router(api::router(AppState::new(db.clone()))).await;
    Ok((base_url, db, shutdown))
}
