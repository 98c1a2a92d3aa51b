//! Cultural learning routes.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use druk_core::tier::TierSummary;
use druk_db::ActivityRepository;
use druk_db::entities::{cultural_activities, user_activities};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ApiPath, ValidatedJson};

/// Creates the cultural activity router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cultural/activities", get(list_activities))
        .route("/cultural/activities/{id}", get(get_activity))
        .route("/cultural/activities/{id}/complete", post(complete_activity))
}

/// Completion report.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteActivityRequest {
    /// Completing user; defaults to the demo user.
    pub user_id: Option<i32>,
    /// Quiz score, if the activity is scored.
    #[validate(range(min = 0))]
    pub score: Option<i32>,
}

/// Result of completing an activity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    /// The recorded completion.
    pub completion: user_activities::Model,
    /// The user's balance and tier after the credit.
    pub tier: TierSummary,
}

/// GET /cultural/activities
async fn list_activities(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<cultural_activities::Model>>> {
    let repo = ActivityRepository::new(&state.db);
    Ok(Json(repo.list_active().await?))
}

/// GET /cultural/activities/{id}
async fn get_activity(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<cultural_activities::Model>> {
    let repo = ActivityRepository::new(&state.db);
    Ok(Json(repo.get(id).await?))
}

/// POST /cultural/activities/{id}/complete
async fn complete_activity(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<CompleteActivityRequest>,
) -> ApiResult<Json<CompletionResponse>> {
    let repo = ActivityRepository::new(&state.db);
    let done = repo
        .complete(state.actor(payload.user_id), id, payload.score)
        .await?;

    Ok(Json(CompletionResponse {
        completion: done.completion,
        tier: TierSummary::for_points(done.user.brownie_points),
    }))
}
