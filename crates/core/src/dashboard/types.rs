//! Dashboard data types.

use serde::{Deserialize, Serialize};

/// Satisfaction rate reported when none is configured.
pub const DEFAULT_SATISFACTION_RATE: i32 = 94;

/// Headline platform statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Users whose residency has been approved.
    pub total_residents: u64,
    /// Businesses with an approved registration.
    pub total_businesses: u64,
    /// Sum of Brownie Points across all users.
    pub total_brownie_points: i64,
    /// Survey satisfaction percentage. Not measured; taken from configuration.
    pub satisfaction_rate: i32,
}

impl DashboardStats {
    /// Assembles stats from raw aggregates. A missing point sum (no users) is zero.
    #[must_use]
    pub fn new(
        total_residents: u64,
        total_businesses: u64,
        total_brownie_points: Option<i64>,
        satisfaction_rate: i32,
    ) -> Self {
        Self {
            total_residents,
            total_businesses,
            total_brownie_points: total_brownie_points.unwrap_or(0),
            satisfaction_rate: satisfaction_rate.clamp(0, 100),
        }
    }
}
