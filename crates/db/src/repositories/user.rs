//! User repository for database operations.

use chrono::Utc;
use druk_core::chain::{TokenKind, generate_token_id};
use druk_core::points::{PointsBalance, PointsError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use super::constraint::is_unique_violation;
use crate::entities::users;

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found: {0}")]
    NotFound(i32),

    /// Another account already uses this email.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// The credit was rejected by the points ledger.
    #[error(transparent)]
    Points(#[from] PointsError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Login email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Argon2 PHC string, already hashed.
    pub password_hash: String,
    /// Optional avatar.
    pub profile_image_url: Option<String>,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone, Copy)]
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(self.db).await
    }

    /// Gets a user by ID, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is no such user.
    pub async fn get(&self, id: i32) -> Result<users::Model, UserError> {
        self.find_by_id(id).await?.ok_or(UserError::NotFound(id))
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    /// Creates a new user with zero points, tier 1 and a fresh resident token id.
    ///
    /// # Errors
    ///
    /// Returns `EmailTaken` if the email is already registered, including when
    /// a concurrent registration wins the unique index.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        if self.email_exists(&input.email).await? {
            return Err(UserError::EmailTaken(input.email));
        }

        let now = Utc::now().into();
        let user = users::ActiveModel {
            email: Set(input.email.clone()),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            password: Set(input.password_hash),
            profile_image_url: Set(input.profile_image_url),
            brownie_points: Set(0),
            tier_level: Set(PointsBalance::default().tier_level),
            is_digital_resident: Set(false),
            nft_id: Set(Some(generate_token_id(TokenKind::Resident))),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        user.insert(self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                UserError::EmailTaken(input.email)
            } else {
                UserError::Database(e)
            }
        })
    }

    /// Credits `amount` Brownie Points to a user and recomputes the tier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown user and `Points` for a negative or
    /// overflowing amount. Nothing is written on error.
    pub async fn award_points(&self, user_id: i32, amount: i32) -> Result<users::Model, UserError> {
        let txn = self.db.begin().await?;
        let user = award_points_in(&txn, user_id, amount).await?;
        txn.commit().await?;
        Ok(user)
    }
}

/// Credits points on an existing connection or transaction.
///
/// The user row is read with `FOR UPDATE`, so concurrent credits against the
/// same user serialise when `conn` is a transaction.
///
/// # Errors
///
/// See [`UserRepository::award_points`].
pub async fn award_points_in<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    amount: i32,
) -> Result<users::Model, UserError> {
    let user = users::Entity::find_by_id(user_id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or(UserError::NotFound(user_id))?;

    let balance = PointsBalance::new(user.brownie_points).credit(amount)?;
    debug!(
        user_id,
        amount,
        balance = balance.brownie_points,
        tier = balance.tier_level,
        "Crediting Brownie Points"
    );

    let mut active: users::ActiveModel = user.into();
    active.brownie_points = Set(balance.brownie_points);
    active.tier_level = Set(balance.tier_level);
    active.updated_at = Set(Utc::now().into());

    Ok(active.update(conn).await?)
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
