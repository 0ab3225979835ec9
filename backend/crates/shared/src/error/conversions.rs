//! Error conversions
//!
//! Rendering of [`AppError`] as a response and conversions from axum
//! extractor rejections. Database errors are classified by each domain
//! crate through [`sqlstate`].

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// SQLx helpers (feature-gated)
// ============================================================================

/// SQLSTATE of a database error, if the error came from the server
#[cfg(feature = "sqlx")]
pub fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_server_error() {
            match std::error::Error::source(&self) {
                Some(source) => tracing::error!(error = %self, source = %source, "Server error"),
                None => tracing::error!(error = %self, "Server error"),
            }
        }

        let body = serde_json::json!({ "error": self.public_message() });

        (status, Json(body)).into_response()
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::bad_request("Invalid input data").with_source(rejection)
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::PathRejection> for AppError {
    fn from(rejection: axum::extract::rejection::PathRejection) -> Self {
        AppError::bad_request("Invalid ID format").with_source(rejection)
    }
}
