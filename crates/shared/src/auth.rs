//! Authentication request payloads.
//!
//! There are no sessions or tokens: a successful login simply returns the
//! user, and later requests name their acting user explicitly.

use serde::Deserialize;
use validator::Validate;

use crate::form::blank_as_none;

/// Login request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// User email.
    #[validate(email)]
    pub email: String,
    /// User password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// User email.
    #[validate(email, length(max = 255))]
    pub email: String,
    /// User password.
    #[validate(length(min = 1))]
    pub password: String,
    /// Given name.
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    /// Avatar URL.
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url)]
    pub profile_image_url: Option<String>,
}

impl RegisterRequest {
    /// Email as stored: trimmed and lowercased.
    #[must_use]
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
