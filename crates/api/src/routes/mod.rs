//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod auth;
pub mod businesses;
pub mod catalog;
pub mod cultural;
pub mod dashboard;
pub mod health;
pub mod jobs;
pub mod products;
pub mod residency;
pub mod users;

/// Creates the API router with all routes. Mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(dashboard::routes())
        .merge(residency::routes())
        .merge(businesses::routes())
        .merge(jobs::routes())
        .merge(products::routes())
        .merge(cultural::routes())
        .merge(catalog::routes())
        .merge(users::routes())
}
