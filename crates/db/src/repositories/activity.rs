//! Cultural activity repository.
//!
//! Completing an activity records the completion and credits its reward in a
//! single transaction: either both happen or neither does.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use tracing::info;

use super::user::{UserError, award_points_in};
use crate::entities::{cultural_activities, user_activities, users};

/// Error types for activity operations.
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    /// Activity not found or no longer offered.
    #[error("Cultural activity not found: {0}")]
    NotFound(i32),

    /// Crediting the completing user failed.
    #[error(transparent)]
    User(#[from] UserError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A recorded completion together with the user's new balance.
#[derive(Debug, Clone)]
pub struct Completion {
    /// The completion row.
    pub completion: user_activities::Model,
    /// The user after the credit.
    pub user: users::Model,
}

/// Cultural activity repository.
#[derive(Debug, Clone, Copy)]
pub struct ActivityRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActivityRepository<'a> {
    /// Creates a new activity repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active activities, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<cultural_activities::Model>, DbErr> {
        cultural_activities::Entity::find()
            .filter(cultural_activities::Column::IsActive.eq(true))
            .order_by_asc(cultural_activities::Column::Id)
            .all(self.db)
            .await
    }

    /// Gets an activity by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the activity does not exist.
    pub async fn get(&self, id: i32) -> Result<cultural_activities::Model, ActivityError> {
        cultural_activities::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(ActivityError::NotFound(id))
    }

    /// Records a completion and credits the activity's reward to the user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown or inactive activity and
    /// `User(NotFound)` for an unknown user. Nothing is written on error.
    pub async fn complete(
        &self,
        user_id: i32,
        activity_id: i32,
        score: Option<i32>,
    ) -> Result<Completion, ActivityError> {
        let txn = self.db.begin().await?;

        let activity = cultural_activities::Entity::find_by_id(activity_id)
            .filter(cultural_activities::Column::IsActive.eq(true))
            .one(&txn)
            .await?
            .ok_or(ActivityError::NotFound(activity_id))?;

        let user = award_points_in(&txn, user_id, activity.points_reward).await?;

        let completion = user_activities::ActiveModel {
            user_id: Set(user_id),
            activity_id: Set(activity_id),
            score: Set(score),
            points_earned: Set(activity.points_reward),
            completed_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            user_id,
            activity_id,
            points = activity.points_reward,
            balance = user.brownie_points,
            tier = user.tier_level,
            "Cultural activity completed"
        );

        Ok(Completion { completion, user })
    }

    /// Lists a user's completions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<user_activities::Model>, DbErr> {
        user_activities::Entity::find()
            .filter(user_activities::Column::UserId.eq(user_id))
            .order_by_desc(user_activities::Column::CompletedAt)
            .all(self.db)
            .await
    }
}
