//! HTTP API layer with Axum routes and extractors.
//!
//! This crate provides:
//! - REST API routes under `/api`
//! - Request extractors with uniform validation errors
//! - HTTP error mapping

pub mod error;
pub mod extractors;
pub mod routes;

use axum::Router;
use axum::http::HeaderValue;
use druk_core::chain::NftMinter;
use druk_shared::AppConfig;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use error::{ApiError, ApiResult};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// NFT minting backend (optional).
    pub minter: Option<Arc<dyn NftMinter>>,
}

impl AppState {
    /// Creates state without a minting backend.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
            minter: None,
        }
    }

    /// Attaches a minting backend.
    #[must_use]
    pub fn with_minter(mut self, minter: Arc<dyn NftMinter>) -> Self {
        self.minter = Some(minter);
        self
    }

    /// The acting user: the id the caller supplied, or the configured demo user.
    #[must_use]
    pub fn actor(&self, supplied: Option<i32>) -> i32 {
        supplied.unwrap_or(self.config.demo.default_user_id)
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(routes::health::routes())
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = match config.cors.origins() {
        None => AllowOrigin::any(),
        Some(origins) => {
            let values: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
