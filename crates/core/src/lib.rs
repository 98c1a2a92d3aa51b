//! Core business rules for Druk Digital.
//!
//! This crate contains pure domain logic with ZERO web or database dependencies.
//! Everything the HTTP and persistence layers agree on lives here.
//!
//! # Modules
//!
//! - `auth` - Password hashing
//! - `points` - Brownie Points ledger and tier derivation
//! - `tier` - Tier names, benefits and progress summaries
//! - `status` - Review and application status enumerations
//! - `jobs` - Job board search filter normalisation
//! - `marketplace` - Product reward rules
//! - `chain` - Token ids and the optional NFT minting capability
//! - `dashboard` - Platform statistics

pub mod auth;
pub mod chain;
pub mod dashboard;
pub mod jobs;
pub mod marketplace;
pub mod points;
pub mod status;
pub mod tier;
