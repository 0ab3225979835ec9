//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use anyhow::Context;
use auth::application::{BootstrapOutcome, bootstrap_admin};
use auth::{AuthAppState, AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use shop::{PgShopRepository, ShopAppState, shop_router};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,shop=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(max_connections = config.max_connections, "Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = match &config.jwt_secret {
        Some(secret) => AuthConfig::new(secret)?,
        None => {
            tracing::warn!("JWT_SECRET not set, using a random development secret");
            AuthConfig::development()?
        }
    };
    let auth_config = AuthConfig {
        cookie_secure: config.cookie_secure,
        ..auth_config
    };

    let auth_state = AuthAppState::new(PgAuthRepository::new(pool.clone()), auth_config);

    // First admin
    if let Some(admin) = &config.bootstrap_admin {
        let outcome = bootstrap_admin(
            auth_state.repo.clone(),
            auth_state.config.clone(),
            admin.email.clone(),
            admin.password.clone(),
        )
        .await
        .context("Failed to create bootstrap admin")?;

        match outcome {
            BootstrapOutcome::Created(account_id) => {
                tracing::info!(account_id = %account_id, "Bootstrap admin created");
            }
            BootstrapOutcome::AlreadyExists => {
                tracing::info!("Bootstrap admin email already registered, skipping");
            }
        }
    }

    let shop_state = ShopAppState::new(PgShopRepository::new(pool.clone()));

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let api = auth_router(auth_state.clone()).merge(shop_router(shop_state, auth_state));

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        );

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
