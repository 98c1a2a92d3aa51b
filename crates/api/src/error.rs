//! HTTP error mapping.
//!
//! Every handler failure becomes an [`AppError`] and is rendered as
//! `{"error": CODE, "message": text}`. Server-side failures are logged and
//! answered with a generic message.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use druk_core::auth::PasswordError;
use druk_core::chain::MintError;
use druk_core::points::PointsError;
use druk_core::status::StatusError;
use druk_db::repositories::{
    ActivityError, BusinessError, JobError, ProductError, ResidencyError, UserError,
};
use druk_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::{debug, error};

/// Message returned for any body, query or path that cannot be parsed or validated.
pub const INVALID_REQUEST: &str = "Invalid request data";

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

/// An [`AppError`] on its way to becoming a response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 400 with the generic invalid-request message.
    #[must_use]
    pub fn invalid_request() -> Self {
        Self(AppError::Validation(INVALID_REQUEST.to_string()))
    }

    /// 404 for `what`.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self(AppError::NotFound(what.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
            "An internal error occurred".to_string()
        } else {
            self.0.message().to_string()
        };

        let body = json!({
            "error": self.0.error_code(),
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection, "Rejected JSON body");
        Self::invalid_request()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(error = %rejection, "Rejected query string");
        Self::invalid_request()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!(error = %rejection, "Rejected path parameters");
        Self::invalid_request()
    }
}

impl From<StatusError> for ApiError {
    fn from(err: StatusError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<PointsError> for ApiError {
    fn from(err: PointsError) -> Self {
        match err {
            PointsError::NegativeAmount(_) => Self(AppError::Validation(err.to_string())),
            PointsError::Overflow { .. } => Self(AppError::Internal(err.to_string())),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Empty => Self::invalid_request(),
            _ => Self(AppError::Internal(err.to_string())),
        }
    }
}

impl From<MintError> for ApiError {
    fn from(err: MintError) -> Self {
        match err {
            MintError::InvalidAddress(_) => Self(AppError::Validation(err.to_string())),
            _ => Self(AppError::Internal(err.to_string())),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => Self(AppError::NotFound(err.to_string())),
            UserError::EmailTaken(_) => Self(AppError::Conflict(err.to_string())),
            UserError::Points(e) => e.into(),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<ResidencyError> for ApiError {
    fn from(err: ResidencyError) -> Self {
        match err {
            ResidencyError::NotFound(_) => Self(AppError::NotFound(err.to_string())),
            ResidencyError::UnknownUser(_) => Self(AppError::Validation(err.to_string())),
            ResidencyError::Database(e) => e.into(),
        }
    }
}

impl From<BusinessError> for ApiError {
    fn from(err: BusinessError) -> Self {
        match err {
            BusinessError::NotFound(_) => Self(AppError::NotFound(err.to_string())),
            BusinessError::UnknownOwner(_) => Self(AppError::Validation(err.to_string())),
            BusinessError::Database(e) => e.into(),
        }
    }
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::NotFound(_) => Self(AppError::NotFound(err.to_string())),
            JobError::UnknownReference { .. } => Self(AppError::Validation(err.to_string())),
            JobError::Database(e) => e.into(),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Negative(_) | ProductError::UnknownSeller(_) => {
                Self(AppError::Validation(err.to_string()))
            }
            ProductError::Database(e) => e.into(),
        }
    }
}

impl From<ActivityError> for ApiError {
    fn from(err: ActivityError) -> Self {
        match err {
            ActivityError::NotFound(_) => Self(AppError::NotFound(err.to_string())),
            ActivityError::User(e) => e.into(),
            ActivityError::Database(e) => e.into(),
        }
    }
}
