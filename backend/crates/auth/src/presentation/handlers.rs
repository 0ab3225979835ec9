//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use kernel::extract::{ValidJson, ValidPath};
use kernel::id::AccountId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::Identity;
use crate::application::{
    AccountStatusUseCase, AdminUseCase, LoginInput, LoginUseCase, ProfileUseCase, RegisterInput,
    RegisterUseCase, UpdateProfileInput,
};
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AccountMessageResponse, AccountResponse, LoginRequest, MessageResponse, RegisterRequest,
    TokenResponse, UpdateProfileRequest,
};

/// Shared state for auth handlers and middleware
pub struct AuthAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

// Manual impl: `R` itself need not be `Clone`
impl<R> Clone for AuthAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register / Login / Logout
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            first_name: req.firstname,
            last_name: req.lastname,
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = platform::cookie::set_cookie_header(&state.config.cookie_config(), &output.token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(TokenResponse {
            success: true,
            message: "Registered successfully".to_string(),
            token: output.token,
            account: AccountResponse::from(&output.account),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = platform::cookie::set_cookie_header(&state.config.cookie_config(), &output.token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(TokenResponse {
            success: true,
            message: "Logged in successfully".to_string(),
            token: output.token,
            account: AccountResponse::from(&output.account),
        }),
    ))
}

/// POST /api/auth/logout
///
/// Clears the cookie only; an already issued token stays valid until expiry.
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: AccountRepository + Send + Sync + 'static,
{
    let cookie = platform::cookie::delete_cookie_header(&state.config.cookie_config());

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::ok("Logged out successfully")),
    )
}

// ============================================================================
// Account (self or admin)
// ============================================================================

/// GET /api/accounts/{id}
pub async fn get_profile<R>(
    State(state): State<AuthAppState<R>>,
    identity: Identity,
    ValidPath(id): ValidPath<i64>,
) -> AuthResult<Json<AccountResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone(), state.config.clone());

    let account = use_case.get(identity, parse_account_id(id)?).await?;

    Ok(Json(AccountResponse::from(&account)))
}

/// PUT /api/accounts/{id}
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    identity: Identity,
    ValidPath(id): ValidPath<i64>,
    ValidJson(req): ValidJson<UpdateProfileRequest>,
) -> AuthResult<Json<AccountMessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone(), state.config.clone());

    let input = UpdateProfileInput {
        first_name: req.firstname,
        last_name: req.lastname,
        email: req.email,
        password: req.password,
    };

    let account = use_case
        .update(identity, parse_account_id(id)?, input)
        .await?;

    Ok(Json(AccountMessageResponse::new(
        "Profile updated successfully",
        &account,
    )))
}

/// PUT /api/accounts/{id}/deactivate
pub async fn deactivate_account<R>(
    State(state): State<AuthAppState<R>>,
    identity: Identity,
    ValidPath(id): ValidPath<i64>,
) -> AuthResult<Json<AccountMessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let account = AccountStatusUseCase::new(state.repo.clone())
        .deactivate(identity, parse_account_id(id)?)
        .await?;

    Ok(Json(AccountMessageResponse::new(
        "Account deactivated",
        &account,
    )))
}

/// PUT /api/accounts/{id}/activate
pub async fn activate_account<R>(
    State(state): State<AuthAppState<R>>,
    identity: Identity,
    ValidPath(id): ValidPath<i64>,
) -> AuthResult<Json<AccountMessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let account = AccountStatusUseCase::new(state.repo.clone())
        .activate(identity, parse_account_id(id)?)
        .await?;

    Ok(Json(AccountMessageResponse::new("Account activated", &account)))
}

/// DELETE /api/accounts/{id}
pub async fn delete_account<R>(
    State(state): State<AuthAppState<R>>,
    identity: Identity,
    ValidPath(id): ValidPath<i64>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    AccountStatusUseCase::new(state.repo.clone())
        .delete(identity, parse_account_id(id)?)
        .await?;

    Ok(Json(MessageResponse::ok("Account deleted successfully")))
}

// ============================================================================
// Admin (behind require_admin)
// ============================================================================

/// POST /api/admin/accounts
pub async fn create_admin<R>(
    State(state): State<AuthAppState<R>>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> AuthResult<Json<AccountMessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let account = AdminUseCase::new(state.repo.clone(), state.config.clone())
        .create_admin(RegisterInput {
            first_name: req.firstname,
            last_name: req.lastname,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AccountMessageResponse::new(
        "Admin account created successfully",
        &account,
    )))
}

/// PUT /api/admin/accounts/{id}/promote
pub async fn promote_account<R>(
    State(state): State<AuthAppState<R>>,
    ValidPath(id): ValidPath<i64>,
) -> AuthResult<Json<AccountMessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let account = AdminUseCase::new(state.repo.clone(), state.config.clone())
        .promote(parse_account_id(id)?)
        .await?;

    Ok(Json(AccountMessageResponse::new(
        "Account is now an admin",
        &account,
    )))
}

/// GET /api/admin/accounts
pub async fn list_accounts<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Vec<AccountResponse>>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let accounts = AdminUseCase::new(state.repo.clone(), state.config.clone())
        .list()
        .await?;

    Ok(Json(accounts.iter().map(AccountResponse::from).collect()))
}

/// GET /api/admin/accounts/{id}
pub async fn inspect_account<R>(
    State(state): State<AuthAppState<R>>,
    ValidPath(id): ValidPath<i64>,
) -> AuthResult<Json<AccountResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let account = AdminUseCase::new(state.repo.clone(), state.config.clone())
        .inspect(parse_account_id(id)?)
        .await?;

    Ok(Json(AccountResponse::from(&account)))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_account_id(raw: i64) -> AuthResult<AccountId> {
    AccountId::parse(raw).ok_or_else(|| AuthError::Validation("Invalid ID format".into()))
}
