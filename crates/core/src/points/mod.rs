//! Brownie Points ledger.
//!
//! Points are only ever credited. Every credit recomputes the tier from the
//! new balance, so `tier_level` is always a pure function of `brownie_points`.

pub mod error;
pub mod ledger;

#[cfg(test)]
mod ledger_props;

pub use error::PointsError;
pub use ledger::{MAX_TIER, MIN_TIER, POINTS_PER_TIER, PointsBalance, tier_for_points};
