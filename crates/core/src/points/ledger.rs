//! Balance arithmetic and tier derivation.

use serde::{Deserialize, Serialize};

use super::PointsError;

/// Points needed to climb one tier.
pub const POINTS_PER_TIER: i32 = 1000;

/// Tier of a user with no points.
pub const MIN_TIER: i32 = 1;

/// Highest reachable tier.
pub const MAX_TIER: i32 = 5;

/// Derives the tier for a cumulative balance: `min(floor(points / 1000) + 1, 5)`.
///
/// Balances are never negative in practice; a negative input is treated as zero.
#[must_use]
pub const fn tier_for_points(points: i32) -> i32 {
    if points <= 0 {
        return MIN_TIER;
    }

    let tier = points / POINTS_PER_TIER + 1;
    if tier > MAX_TIER { MAX_TIER } else { tier }
}

/// A user's cumulative points together with the tier derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBalance {
    /// Cumulative Brownie Points.
    pub brownie_points: i32,
    /// Tier derived from `brownie_points`.
    pub tier_level: i32,
}

impl PointsBalance {
    /// Creates a balance, deriving the tier from the points.
    #[must_use]
    pub const fn new(brownie_points: i32) -> Self {
        Self {
            brownie_points,
            tier_level: tier_for_points(brownie_points),
        }
    }

    /// Credits `amount` points and returns the new balance with its tier.
    ///
    /// # Errors
    ///
    /// - `NegativeAmount` if `amount < 0`
    /// - `Overflow` if the new balance exceeds `i32::MAX`
    pub fn credit(self, amount: i32) -> Result<Self, PointsError> {
        if amount < 0 {
            return Err(PointsError::NegativeAmount(amount));
        }

        let brownie_points =
            self.brownie_points
                .checked_add(amount)
                .ok_or(PointsError::Overflow {
                    balance: self.brownie_points,
                    amount,
                })?;

        Ok(Self::new(brownie_points))
    }

    /// Returns true if the balance sits in the highest tier.
    #[must_use]
    pub const fn is_max_tier(&self) -> bool {
        self.tier_level >= MAX_TIER
    }
}

impl Default for PointsBalance {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1)]
    #[case(999, 1)]
    #[case(1000, 2)]
    #[case(1999, 2)]
    #[case(2000, 3)]
    #[case(3999, 4)]
    #[case(4000, 5)]
    #[case(4999, 5)]
    #[case(5000, 5)]
    #[case(1_000_000, 5)]
    fn test_tier_thresholds(#[case] points: i32, #[case] expected: i32) {
        assert_eq!(tier_for_points(points), expected);
    }

    #[test]
    fn test_negative_balance_is_tier_one() {
        assert_eq!(tier_for_points(-50), MIN_TIER);
    }

    #[test]
    fn test_fresh_user_two_awards_then_promotion() {
        let balance = PointsBalance::default();

        let balance = balance.credit(250).unwrap();
        let balance = balance.credit(250).unwrap();
        assert_eq!(balance.brownie_points, 500);
        assert_eq!(balance.tier_level, 1);

        let balance = balance.credit(600).unwrap();
        assert_eq!(balance.brownie_points, 1100);
        assert_eq!(balance.tier_level, 2);
    }

    #[test]
    fn test_zero_credit_is_noop() {
        let balance = PointsBalance::new(1234);
        assert_eq!(balance.credit(0).unwrap(), balance);
    }

    #[test]
    fn test_negative_credit_rejected() {
        let result = PointsBalance::new(10).credit(-1);
        assert_eq!(result, Err(PointsError::NegativeAmount(-1)));
    }

    #[test]
    fn test_overflow_rejected() {
        let result = PointsBalance::new(i32::MAX - 1).credit(2);
        assert!(matches!(result, Err(PointsError::Overflow { .. })));
    }

    #[test]
    fn test_max_tier_flag() {
        assert!(!PointsBalance::new(3999).is_max_tier());
        assert!(PointsBalance::new(4000).is_max_tier());
    }
}
