//! Business registration repository.

use chrono::Utc;
use druk_core::chain::{TokenKind, generate_token_id};
use druk_core::status::ReviewStatus;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use tracing::info;

use super::constraint::is_foreign_key_violation;
use crate::entities::businesses;

/// Error types for business operations.
#[derive(Debug, thiserror::Error)]
pub enum BusinessError {
    /// Business not found.
    #[error("Business not found: {0}")]
    NotFound(i32),

    /// The owner does not exist.
    #[error("Unknown owner: {0}")]
    UnknownOwner(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering a business.
#[derive(Debug, Clone)]
pub struct CreateBusinessInput {
    /// Registering user.
    pub owner_id: i32,
    /// Trading name.
    pub name: String,
    /// What the business does.
    pub description: String,
    /// Sector.
    pub category: String,
    /// Trade license, if already issued.
    pub license_number: Option<String>,
}

/// Business repository.
#[derive(Debug, Clone, Copy)]
pub struct BusinessRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BusinessRepository<'a> {
    /// Creates a new business repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a business as pending and assigns it a token id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownOwner` if the owner does not exist.
    pub async fn create(
        &self,
        input: CreateBusinessInput,
    ) -> Result<businesses::Model, BusinessError> {
        let owner_id = input.owner_id;
        let business = businesses::ActiveModel {
            owner_id: Set(input.owner_id),
            name: Set(input.name),
            description: Set(input.description),
            category: Set(input.category),
            license_number: Set(input.license_number),
            business_nft_id: Set(Some(generate_token_id(TokenKind::Business))),
            status: Set(ReviewStatus::Pending.as_str().to_string()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let business = business.insert(self.db).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                BusinessError::UnknownOwner(owner_id)
            } else {
                BusinessError::Database(e)
            }
        })?;

        info!(business_id = business.id, owner_id, "Business registered");
        Ok(business)
    }

    /// Lists every business, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<businesses::Model>, DbErr> {
        businesses::Entity::find()
            .order_by_desc(businesses::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Lists the businesses of one owner, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<businesses::Model>, DbErr> {
        businesses::Entity::find()
            .filter(businesses::Column::OwnerId.eq(owner_id))
            .order_by_desc(businesses::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Sets the registration status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the business does not exist.
    pub async fn update_status(
        &self,
        id: i32,
        status: ReviewStatus,
    ) -> Result<businesses::Model, BusinessError> {
        let business = businesses::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(BusinessError::NotFound(id))?;

        let mut active: businesses::ActiveModel = business.into();
        active.status = Set(status.as_str().to_string());
        let business = active.update(self.db).await?;

        info!(business_id = id, status = %status, "Business status changed");
        Ok(business)
    }
}
