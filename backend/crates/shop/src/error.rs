//! Shop Error Types
//!
//! Shop-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Shop-specific result type alias
pub type ShopResult<T> = Result<T, ShopError>;

/// Shop-specific error variants
#[derive(Debug, Error)]
pub enum ShopError {
    /// Malformed or out-of-range input
    #[error("{0}")]
    Validation(String),

    /// Book not found
    #[error("Book not found")]
    BookNotFound,

    /// No cart entry for the (account, book) pair
    #[error("Cart item not found")]
    CartEntryNotFound,

    /// The acting account no longer exists
    #[error("Account not found")]
    AccountNotFound,

    /// The account already reviewed this book
    #[error("You have already reviewed this book")]
    ReviewExists,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShopError::Validation(_) => ErrorKind::BadRequest,
            ShopError::BookNotFound | ShopError::CartEntryNotFound | ShopError::AccountNotFound => {
                ErrorKind::NotFound
            }
            ShopError::ReviewExists => ErrorKind::Conflict,
            ShopError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
                ErrorKind::ServiceUnavailable
            }
            ShopError::Database(_) | ShopError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            ShopError::Database(e) => {
                tracing::error!(error = %e, "Shop database error");
            }
            ShopError::Internal(msg) => {
                tracing::error!(message = %msg, "Shop internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Shop error");
            }
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<ShopError> for AppError {
    fn from(err: ShopError) -> Self {
        err.log();
        err.to_app_error()
    }
}
