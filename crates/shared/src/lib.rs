//! Shared errors and configuration for Druk Digital.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error type with HTTP status mapping
//! - Layered configuration loading
//! - Authentication request payloads
//! - Form field helpers

pub mod auth;
pub mod config;
pub mod error;
pub mod form;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
