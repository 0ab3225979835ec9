//! Request Extractors
//!
//! Wrappers around axum's `Json` and `Path` that reject malformed input with
//! a 400 and the usual `{"error": ...}` body, instead of axum's plain-text
//! 415/422 rejections.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::app_error::AppError;

/// JSON body that must deserialize into `T`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);

/// Path parameters that must parse into `T`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ValidPath<T>(pub T);
