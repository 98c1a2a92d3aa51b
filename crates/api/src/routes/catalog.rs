//! Mini-app store and government service catalog.

use axum::{Json, Router, extract::State, routing::get};
use druk_db::CatalogRepository;
use druk_db::entities::{government_services, mini_apps};

use crate::AppState;
use crate::error::ApiResult;

/// Creates the catalog router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/mini-apps", get(list_mini_apps))
        .route("/government-services", get(list_government_services))
}

/// GET /mini-apps
async fn list_mini_apps(State(state): State<AppState>) -> ApiResult<Json<Vec<mini_apps::Model>>> {
    let repo = CatalogRepository::new(&state.db);
    Ok(Json(repo.mini_apps().await?))
}

/// GET /government-services
async fn list_government_services(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<government_services::Model>>> {
    let repo = CatalogRepository::new(&state.db);
    Ok(Json(repo.government_services().await?))
}
