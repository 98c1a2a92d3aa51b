//! Residency application repository.
//!
//! Approving an application is what makes a user a digital resident; the
//! status change and the user flag are written in one transaction.

use chrono::Utc;
use druk_core::status::ReviewStatus;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use super::constraint::is_foreign_key_violation;
use crate::entities::{residency_applications, users};

/// Error types for residency operations.
#[derive(Debug, thiserror::Error)]
pub enum ResidencyError {
    /// Application not found.
    #[error("Residency application not found: {0}")]
    NotFound(i32),

    /// The applicant or reviewer does not exist.
    #[error("Unknown user: {0}")]
    UnknownUser(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for a residency application.
#[derive(Debug, Clone)]
pub struct CreateResidencyInput {
    /// Applicant.
    pub user_id: i32,
    /// Given name as on the passport.
    pub first_name: String,
    /// Family name as on the passport.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Country the applicant comes from.
    pub country_of_origin: String,
    /// Free text motivation.
    pub reason_for_residency: String,
}

/// Result of a status change.
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// The updated application.
    pub application: residency_applications::Model,
    /// The applicant, after the change.
    pub applicant: users::Model,
}

/// Residency application repository.
#[derive(Debug, Clone, Copy)]
pub struct ResidencyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ResidencyRepository<'a> {
    /// Creates a new residency repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a pending application.
    ///
    /// # Errors
    ///
    /// Returns `UnknownUser` if the applicant does not exist.
    pub async fn create(
        &self,
        input: CreateResidencyInput,
    ) -> Result<residency_applications::Model, ResidencyError> {
        let user_id = input.user_id;
        let application = residency_applications::ActiveModel {
            user_id: Set(input.user_id),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            country_of_origin: Set(input.country_of_origin),
            reason_for_residency: Set(input.reason_for_residency),
            status: Set(ReviewStatus::Pending.as_str().to_string()),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        application.insert(self.db).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                ResidencyError::UnknownUser(user_id)
            } else {
                ResidencyError::Database(e)
            }
        })
    }

    /// Lists every application, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<residency_applications::Model>, DbErr> {
        residency_applications::Entity::find()
            .order_by_desc(residency_applications::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Lists a user's applications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<residency_applications::Model>, DbErr> {
        residency_applications::Entity::find()
            .filter(residency_applications::Column::UserId.eq(user_id))
            .order_by_desc(residency_applications::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Sets the review status of an application.
    ///
    /// Approval also marks the applicant as a digital resident. Rejection and
    /// reverting to pending leave the user row alone.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown application, `UnknownUser` for an
    /// unknown reviewer.
    pub async fn update_status(
        &self,
        id: i32,
        status: ReviewStatus,
        reviewer_id: Option<i32>,
    ) -> Result<StatusChange, ResidencyError> {
        let txn = self.db.begin().await?;

        let application = residency_applications::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ResidencyError::NotFound(id))?;

        let applicant_id = application.user_id;
        let mut active: residency_applications::ActiveModel = application.into();
        active.status = Set(status.as_str().to_string());
        active.reviewed_by = Set(reviewer_id);
        active.reviewed_at = Set(Some(Utc::now().into()));
        let application = active.update(&txn).await.map_err(|e| match reviewer_id {
            Some(reviewer) if is_foreign_key_violation(&e) => ResidencyError::UnknownUser(reviewer),
            _ => ResidencyError::Database(e),
        })?;

        let applicant = users::Entity::find_by_id(applicant_id)
            .one(&txn)
            .await?
            .ok_or(ResidencyError::UnknownUser(applicant_id))?;

        let applicant = if status == ReviewStatus::Approved && !applicant.is_digital_resident {
            let mut user: users::ActiveModel = applicant.into();
            user.is_digital_resident = Set(true);
            user.updated_at = Set(Utc::now().into());
            user.update(&txn).await?
        } else {
            applicant
        };

        txn.commit().await?;

        info!(
            application_id = id,
            user_id = applicant_id,
            status = %status,
            "Residency application reviewed"
        );

        Ok(StatusChange {
            application,
            applicant,
        })
    }
}
