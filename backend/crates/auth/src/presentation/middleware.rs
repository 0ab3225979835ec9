//! Auth Middleware
//!
//! `require_identity` rejects requests without a valid token (401).
//! `require_admin` additionally loads the caller's account on every request:
//! missing account is 404, non-admin is 403.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{Identity, TokenValidator};
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::handlers::AuthAppState;

/// Validate the bearer header, falling back to the token cookie
fn authenticate(config: &Arc<AuthConfig>, headers: &HeaderMap) -> AuthResult<Identity> {
    let token = platform::cookie::extract_credential(headers, &config.cookie_name)
        .ok_or(AuthError::Unauthenticated)?;

    TokenValidator::new(config.clone()).validate(&token)
}

/// Middleware that requires a valid identity token
///
/// On success [`Identity`] is available to handlers as an extractor.
pub async fn require_identity(
    State(config): State<Arc<AuthConfig>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = authenticate(&config, req.headers())?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Middleware that requires an admin account
///
/// Reuses the identity of an outer `require_identity` layer when present.
/// The role is read from the store, never from the token.
pub async fn require_admin<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let identity = match req.extensions().get::<Identity>().copied() {
        Some(identity) => identity,
        None => authenticate(&state.config, req.headers())?,
    };

    let account = state
        .repo
        .find_by_id(identity.account_id)
        .await?
        .ok_or(AuthError::AccountNotFound)?;

    if !account.is_admin() {
        tracing::warn!(account_id = %identity.account_id, "Non-admin on admin route");
        return Err(AuthError::Forbidden);
    }

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .ok_or(AuthError::Unauthenticated)
    }
}
