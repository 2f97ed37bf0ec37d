use thiserror::Error;

/// Errors returned by the storage backends.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("The requested record does not exist: {0}")]
    NotFound(String),
    #[error("The record already exists: {0}")]
    AlreadyExists(String),
    #[error("Prices must be finite and greater than zero, but {0} was given")]
    InvalidPrice(f64),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}
