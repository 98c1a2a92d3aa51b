//! Property-based tests for the points ledger.

use proptest::prelude::*;

use super::{MAX_TIER, MIN_TIER, PointsBalance, tier_for_points};

/// Balances a real account can reach without nearing overflow.
fn balance_strategy() -> impl Strategy<Value = i32> {
    0i32..10_000_000
}

/// Reward amounts, including zero.
fn amount_strategy() -> impl Strategy<Value = i32> {
    0i32..100_000
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Crediting N adds exactly N and the tier follows the threshold table.
    #[test]
    fn prop_credit_adds_exactly_and_rederives_tier(
        start in balance_strategy(),
        amount in amount_strategy(),
    ) {
        let after = PointsBalance::new(start).credit(amount).unwrap();

        prop_assert_eq!(after.brownie_points, start + amount);
        prop_assert_eq!(after.tier_level, ((start + amount) / 1000 + 1).min(5));
    }

    /// Tier never decreases as credits accumulate.
    #[test]
    fn prop_tier_is_monotonic(
        amounts in prop::collection::vec(amount_strategy(), 1..20),
    ) {
        let mut balance = PointsBalance::default();
        for amount in amounts {
            let next = balance.credit(amount).unwrap();
            prop_assert!(next.tier_level >= balance.tier_level);
            balance = next;
        }
    }

    /// Tier stays within 1..=5 for every balance.
    #[test]
    fn prop_tier_bounded(points in any::<i32>()) {
        let tier = tier_for_points(points);
        prop_assert!((MIN_TIER..=MAX_TIER).contains(&tier));
    }

    /// Splitting a credit does not change the final state.
    #[test]
    fn prop_credit_split_equivalent(
        start in balance_strategy(),
        a in amount_strategy(),
        b in amount_strategy(),
    ) {
        let once = PointsBalance::new(start).credit(a + b).unwrap();
        let twice = PointsBalance::new(start).credit(a).unwrap().credit(b).unwrap();
        prop_assert_eq!(once, twice);
    }
}
