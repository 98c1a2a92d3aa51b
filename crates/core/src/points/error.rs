//! Points ledger error types.

use thiserror::Error;

/// Errors raised when crediting points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PointsError {
    /// Credits must be non-negative; there is no debit path.
    #[error("Cannot award a negative amount of points: {0}")]
    NegativeAmount(i32),

    /// The new balance does not fit the stored column.
    #[error("Point balance overflow: {balance} + {amount}")]
    Overflow {
        /// Balance before the credit.
        balance: i32,
        /// Amount that was being credited.
        amount: i32,
    },
}
