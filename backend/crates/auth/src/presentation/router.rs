//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::domain::repository::AccountRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_admin, require_identity};

/// Create the auth router for any repository implementation
///
/// - `/auth/*` is public
/// - `/accounts/{id}*` requires a valid token (self or admin is checked per use case)
/// - `/admin/*` requires an admin account
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
{
    let public = Router::new()
        .route("/auth/register", post(handlers::register::<R>))
        .route("/auth/login", post(handlers::login::<R>))
        .route("/auth/logout", post(handlers::logout::<R>));

    let accounts = Router::new()
        .route(
            "/accounts/{id}",
            get(handlers::get_profile::<R>)
                .put(handlers::update_profile::<R>)
                .delete(handlers::delete_account::<R>),
        )
        .route(
            "/accounts/{id}/deactivate",
            put(handlers::deactivate_account::<R>),
        )
        .route(
            "/accounts/{id}/activate",
            put(handlers::activate_account::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.config.clone(),
            require_identity,
        ));

    let admin = Router::new()
        .route(
            "/admin/accounts",
            post(handlers::create_admin::<R>).get(handlers::list_accounts::<R>),
        )
        .route("/admin/accounts/{id}", get(handlers::inspect_account::<R>))
        .route(
            "/admin/accounts/{id}/promote",
            put(handlers::promote_account::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin::<R>,
        ));

    public.merge(accounts).merge(admin).with_state(state)
}
