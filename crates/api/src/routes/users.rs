//! User profile routes.

use axum::{Json, Router, extract::State, routing::get};
use druk_core::tier::TierSummary;
use druk_db::entities::{job_applications, residency_applications, user_activities, users};
use druk_db::{ActivityRepository, JobRepository, ResidencyRepository, UserRepository};

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::ApiPath;

/// Creates the user router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/tier", get(get_tier))
        .route("/users/{id}/activities", get(list_activities))
        .route(
            "/users/{id}/residency-applications",
            get(list_residency_applications),
        )
        .route("/users/{id}/job-applications", get(list_job_applications))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<users::Model>> {
    let repo = UserRepository::new(&state.db);
    Ok(Json(repo.get(id).await?))
}

/// GET /users/{id}/tier
async fn get_tier(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<TierSummary>> {
    let repo = UserRepository::new(&state.db);
    let user = repo.get(id).await?;
    Ok(Json(TierSummary::for_points(user.brownie_points)))
}

/// GET /users/{id}/activities
async fn list_activities(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Vec<user_activities::Model>>> {
    let repo = ActivityRepository::new(&state.db);
    Ok(Json(repo.list_by_user(id).await?))
}

/// GET /users/{id}/residency-applications
async fn list_residency_applications(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Vec<residency_applications::Model>>> {
    let repo = ResidencyRepository::new(&state.db);
    Ok(Json(repo.list_by_user(id).await?))
}

/// GET /users/{id}/job-applications
async fn list_job_applications(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Vec<job_applications::Model>>> {
    let repo = JobRepository::new(&state.db);
    Ok(Json(repo.applications_by_user(id).await?))
}
