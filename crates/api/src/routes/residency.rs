//! Digital residency application routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};
use druk_core::chain::{TokenKind, generate_token_id, validate_wallet_address};
use druk_core::status::ReviewStatus;
use druk_db::ResidencyRepository;
use druk_db::entities::residency_applications;
use druk_db::repositories::CreateResidencyInput;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use validator::Validate;

use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ApiPath, ValidatedJson};

/// Creates the residency router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/residency/apply", post(apply))
        .route("/residency/applications", get(list_applications))
        .route("/residency/applications/{id}/status", patch(update_status))
}

/// Residency application form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResidencyRequest {
    /// Applicant; defaults to the demo user.
    pub user_id: Option<i32>,
    /// Given name.
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    /// Contact email.
    #[validate(email)]
    pub email: String,
    /// Country of origin.
    #[validate(length(min = 1, max = 100))]
    pub country_of_origin: String,
    /// Motivation.
    #[validate(length(min = 1))]
    pub reason_for_residency: String,
}

/// Review decision.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResidencyStatusRequest {
    /// pending, approved or rejected.
    pub status: String,
    /// Reviewing admin; defaults to the demo user.
    pub reviewer_id: Option<i32>,
    /// Wallet to receive the residency token on approval.
    pub wallet_address: Option<String>,
}

/// An application after review.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidencyStatusResponse {
    /// The updated application.
    #[serde(flatten)]
    pub application: residency_applications::Model,
    /// Mint transaction, when a residency token was minted.
    pub mint_tx_hash: Option<String>,
}

/// POST /residency/apply
async fn apply(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ApplyResidencyRequest>,
) -> ApiResult<(StatusCode, Json<residency_applications::Model>)> {
    let repo = ResidencyRepository::new(&state.db);

    let application = repo
        .create(CreateResidencyInput {
            user_id: state.actor(payload.user_id),
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            country_of_origin: payload.country_of_origin,
            reason_for_residency: payload.reason_for_residency,
        })
        .await?;

    info!(
        application_id = application.id,
        user_id = application.user_id,
        "Residency application submitted"
    );
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /residency/applications
async fn list_applications(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<residency_applications::Model>>> {
    let repo = ResidencyRepository::new(&state.db);
    Ok(Json(repo.list_all().await?))
}

/// PATCH /residency/applications/{id}/status
async fn update_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateResidencyStatusRequest>,
) -> ApiResult<Json<ResidencyStatusResponse>> {
    let status: ReviewStatus = payload.status.parse()?;
    if let Some(wallet) = &payload.wallet_address {
        validate_wallet_address(wallet)?;
    }

    let repo = ResidencyRepository::new(&state.db);
    let change = repo
        .update_status(id, status, Some(state.actor(payload.reviewer_id)))
        .await?;

    let mut mint_tx_hash = None;
    if status == ReviewStatus::Approved
        && let (Some(minter), Some(wallet)) = (&state.minter, &payload.wallet_address)
    {
        let token_id = change
            .applicant
            .nft_id
            .clone()
            .unwrap_or_else(|| generate_token_id(TokenKind::Resident));

        // Approval stands even if the mint fails.
        match minter.mint(wallet, &token_id).await {
            Ok(receipt) => {
                info!(
                    user_id = change.applicant.id,
                    token_id = %token_id,
                    tx_hash = %receipt.tx_hash,
                    "Residency token minted"
                );
                mint_tx_hash = Some(receipt.tx_hash);
            }
            Err(e) => {
                error!(
                    error = %e,
                    user_id = change.applicant.id,
                    "Failed to mint residency token"
                );
            }
        }
    }

    Ok(Json(ResidencyStatusResponse {
        application: change.application,
        mint_tx_hash,
    }))
}
