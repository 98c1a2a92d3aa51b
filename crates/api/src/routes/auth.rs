//! Authentication routes for registration and login.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::extractors::ValidatedJson;
use druk_core::auth::{hash_password, verify_password};
use druk_db::UserRepository;
use druk_db::entities::users;
use druk_db::repositories::{CreateUserInput, UserError};
use druk_shared::AppError;
use druk_shared::auth::{LoginRequest, RegisterRequest};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

fn invalid_credentials() -> ApiError {
    ApiError(AppError::Unauthorized("Invalid credentials".to_string()))
}

/// POST /auth/register - Create an account.
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<users::Model>)> {
    let user_repo = UserRepository::new(&state.db);
    let password_hash = hash_password(&payload.password)?;

    let user = user_repo
        .create(CreateUserInput {
            email: payload.normalized_email(),
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            password_hash,
            profile_image_url: payload.profile_image_url,
        })
        .await
        .inspect_err(|e| {
            if let UserError::EmailTaken(email) = e {
                info!(email = %email, "Registration attempt with existing email");
            }
        })?;

    info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login - Check credentials and return the user.
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<users::Model>> {
    let user_repo = UserRepository::new(&state.db);
    let email = payload.email.trim().to_lowercase();

    let Some(user) = user_repo.find_by_email(&email).await? else {
        info!(email = %email, "Login attempt for non-existent user");
        return Err(invalid_credentials());
    };

    if !verify_password(&payload.password, &user.password)? {
        info!(user_id = user.id, "Failed login attempt - invalid password");
        return Err(invalid_credentials());
    }

    info!(user_id = user.id, "User logged in");
    Ok(Json(user))
}
