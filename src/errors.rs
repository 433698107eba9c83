use crate::validation::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Product not found: {id}")]
    ProductNotFound { id: i64 },

    #[error("Category not found: {id}")]
    CategoryNotFound { id: i64 },

    #[error("Profile not found: {id}")]
    ProfileNotFound { id: i64 },

    #[error("An id is required to update")]
    MissingId,

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
