//! Job board routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use druk_core::jobs::JobSearchFilter;
use druk_db::JobRepository;
use druk_db::entities::{job_applications, jobs};
use druk_db::repositories::{ApplyJobInput, CreateJobInput};
use druk_shared::form::blank_as_none;
use serde::Deserialize;
use validator::Validate;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ApiPath, ApiQuery, ValidatedJson};

/// Creates the job board router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(search_jobs).post(create_job))
        .route("/jobs/{id}", get(get_job))
        .route("/jobs/{id}/apply", post(apply))
        .route("/jobs/{id}/applications", get(list_applications))
}

/// Job posting form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    /// Poster; defaults to the demo user.
    pub posted_by: Option<i32>,
    /// Hiring business.
    pub business_id: Option<i32>,
    /// Title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Description.
    #[validate(length(min = 1))]
    pub description: String,
    /// Category.
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Experience level.
    #[validate(length(min = 1, max = 50))]
    pub experience_level: String,
    /// Location.
    #[validate(length(min = 1, max = 100))]
    pub location: String,
    /// Employment type.
    #[validate(length(min = 1, max = 50))]
    pub employment_type: String,
    /// Required skills.
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Raw search parameters as sent by the search form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobQuery {
    /// Category or "All Categories".
    pub category: Option<String>,
    /// Experience level or "Any Experience".
    pub experience_level: Option<String>,
    /// Title keywords.
    pub keywords: Option<String>,
}

/// Job application form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyJobRequest {
    /// Applicant; defaults to the demo user.
    pub applicant_id: Option<i32>,
    /// Cover letter.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cover_letter: Option<String>,
    /// Resume link.
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url)]
    pub resume_url: Option<String>,
}

/// POST /jobs
async fn create_job(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateJobRequest>,
) -> ApiResult<(StatusCode, Json<jobs::Model>)> {
    let repo = JobRepository::new(&state.db);

    let skills = payload
        .skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let job = repo
        .create(CreateJobInput {
            posted_by: state.actor(payload.posted_by),
            business_id: payload.business_id,
            title: payload.title,
            description: payload.description,
            category: payload.category,
            experience_level: payload.experience_level,
            location: payload.location,
            employment_type: payload.employment_type,
            skills,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /jobs?category=&experienceLevel=&keywords=
async fn search_jobs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<JobQuery>,
) -> ApiResult<Json<Vec<jobs::Model>>> {
    let filter = JobSearchFilter::from_raw(
        query.category.as_deref(),
        query.experience_level.as_deref(),
        query.keywords.as_deref(),
    );

    let repo = JobRepository::new(&state.db);
    Ok(Json(repo.search(&filter).await?))
}

/// GET /jobs/{id}
async fn get_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<jobs::Model>> {
    let repo = JobRepository::new(&state.db);
    Ok(Json(repo.get(id).await?))
}

/// POST /jobs/{id}/apply
async fn apply(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<ApplyJobRequest>,
) -> ApiResult<(StatusCode, Json<job_applications::Model>)> {
    let repo = JobRepository::new(&state.db);

    let application = repo
        .apply(
            id,
            ApplyJobInput {
                applicant_id: state.actor(payload.applicant_id),
                cover_letter: payload.cover_letter,
                resume_url: payload.resume_url,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /jobs/{id}/applications
async fn list_applications(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Vec<job_applications::Model>>> {
    let repo = JobRepository::new(&state.db);
    repo.get(id).await?;
    Ok(Json(repo.applications_for_job(id).await?))
}
