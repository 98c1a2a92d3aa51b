//! Business registration routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch},
};
use druk_core::status::ReviewStatus;
use druk_db::BusinessRepository;
use druk_db::entities::businesses;
use druk_db::repositories::CreateBusinessInput;
use druk_shared::form::blank_as_none;
use serde::Deserialize;
use validator::Validate;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ApiPath, ApiQuery, ValidatedJson};

/// Creates the business router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/businesses", get(list_businesses).post(create_business))
        .route("/businesses/{id}/status", patch(update_status))
}

/// Business registration form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessRequest {
    /// Owner; defaults to the demo user.
    pub owner_id: Option<i32>,
    /// Trading name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// What the business does.
    #[validate(length(min = 1))]
    pub description: String,
    /// Sector.
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Trade license number.
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 100))]
    pub license_number: Option<String>,
}

/// Business list filter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessQuery {
    /// Only this owner's businesses.
    pub owner_id: Option<i32>,
}

/// Status change.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBusinessStatusRequest {
    /// pending, approved or rejected.
    pub status: String,
}

/// POST /businesses
async fn create_business(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBusinessRequest>,
) -> ApiResult<(StatusCode, Json<businesses::Model>)> {
    let repo = BusinessRepository::new(&state.db);

    let business = repo
        .create(CreateBusinessInput {
            owner_id: state.actor(payload.owner_id),
            name: payload.name,
            description: payload.description,
            category: payload.category,
            license_number: payload.license_number,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(business)))
}

/// GET /businesses?ownerId=
async fn list_businesses(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BusinessQuery>,
) -> ApiResult<Json<Vec<businesses::Model>>> {
    let repo = BusinessRepository::new(&state.db);

    let businesses = match query.owner_id {
        Some(owner_id) => repo.list_by_owner(owner_id).await?,
        None => repo.list_all().await?,
    };

    Ok(Json(businesses))
}

/// PATCH /businesses/{id}/status
async fn update_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateBusinessStatusRequest>,
) -> ApiResult<Json<businesses::Model>> {
    let status: ReviewStatus = payload.status.parse()?;
    let repo = BusinessRepository::new(&state.db);
    Ok(Json(repo.update_status(id, status).await?))
}
