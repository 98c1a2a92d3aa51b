//! Dashboard repository for platform-wide counts.

use druk_core::dashboard::DashboardStats;
use druk_core::status::ReviewStatus;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};

use crate::entities::{businesses, users};

/// Dashboard repository.
#[derive(Debug, Clone, Copy)]
pub struct DashboardRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardRepository<'a> {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes the headline statistics.
    ///
    /// `satisfaction_rate` is not measured; the caller passes the configured value.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the aggregate queries fail.
    pub async fn stats(&self, satisfaction_rate: i32) -> Result<DashboardStats, DbErr> {
        let total_residents = users::Entity::find()
            .filter(users::Column::IsDigitalResident.eq(true))
            .count(self.db)
            .await?;

        let total_businesses = businesses::Entity::find()
            .filter(businesses::Column::Status.eq(ReviewStatus::Approved.as_str()))
            .count(self.db)
            .await?;

        // SUM over an empty table is NULL.
        let total_points: Option<Option<i64>> = users::Entity::find()
            .select_only()
            .column_as(users::Column::BrowniePoints.sum(), "total")
            .into_tuple()
            .one(self.db)
            .await?;

        Ok(DashboardStats::new(
            total_residents,
            total_businesses,
            total_points.flatten(),
            satisfaction_rate,
        ))
    }
}
