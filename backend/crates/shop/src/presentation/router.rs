//! Shop Router

use auth::AuthAppState;
use auth::domain::repository::AccountRepository;
use auth::middleware::{require_admin, require_identity};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::domain::repository::{BookRepository, CartRepository, ReviewRepository};
use crate::presentation::handlers::{self, ShopAppState};

/// Create the shop router
///
/// Reads, cart and reviews require a valid token; catalog writes require an
/// admin account. `auth` supplies the token settings and the account store
/// consulted by the admin gate.
pub fn shop_router<R, A>(state: ShopAppState<R>, auth: AuthAppState<A>) -> Router
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
    A: AccountRepository + Send + Sync + 'static,
{
    let authenticated = Router::new()
        .route("/books", get(handlers::list_books::<R>))
        .route("/books/{id}", get(handlers::get_book::<R>))
        .route(
            "/books/{id}/reviews",
            get(handlers::list_reviews::<R>).post(handlers::add_review::<R>),
        )
        .route("/cart", get(handlers::get_cart::<R>))
        .route("/cart/items", post(handlers::add_cart_item::<R>))
        .route(
            "/cart/items/{book_id}",
            put(handlers::update_cart_item::<R>).delete(handlers::remove_cart_item::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            auth.config.clone(),
            require_identity,
        ));

    let admin = Router::new()
        .route("/books", post(handlers::create_book::<R>))
        .route(
            "/books/{id}",
            put(handlers::update_book::<R>).delete(handlers::delete_book::<R>),
        )
        .route_layer(middleware::from_fn_with_state(auth, require_admin::<A>));

    authenticated.merge(admin).with_state(state)
}
