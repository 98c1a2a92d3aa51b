//! Platform dashboard statistics.
//!
//! Counts shown on the landing page and the admin console.

pub mod types;

pub use types::*;
