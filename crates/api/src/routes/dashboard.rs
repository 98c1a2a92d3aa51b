//! Dashboard statistics endpoint.

use axum::{Json, Router, extract::State, routing::get};
use druk_core::dashboard::DashboardStats;
use druk_db::DashboardRepository;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(stats))
}

/// GET /dashboard/stats
async fn stats(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    let repo = DashboardRepository::new(&state.db);
    let stats = repo.stats(state.config.dashboard.satisfaction_rate).await?;
    Ok(Json(stats))
}
