//! Password hashing with Argon2id.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The plaintext password was empty.
    #[error("password must not be empty")]
    Empty,

    /// Failed to hash password.
    #[error("failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password.
    #[error("failed to verify password: {0}")]
    VerifyError(String),

    /// Stored hash is not a PHC string.
    #[error("invalid password hash format")]
    InvalidHash,
}

/// Hashes a password with Argon2id and a fresh random salt.
///
/// Returns the PHC string that is stored in `users.password`.
///
/// # Example
///
/// ```
/// use druk_core::auth::hash_password;
///
/// let hash = hash_password("tashi-delek").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Checks a login attempt against a stored hash.
///
/// A mismatch is `Ok(false)`; only a malformed hash or an internal
/// Argon2 failure is an error.
///
/// ```
/// use druk_core::auth::{hash_password, verify_password};
///
/// let hash = hash_password("thimphu").unwrap();
/// assert!(verify_password("thimphu", &hash).unwrap());
/// assert!(!verify_password("paro", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_argon2id() {
        let hash = hash_password("punakha_dzong").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "punakha_dzong");
    }

    #[test]
    fn test_roundtrip_accepts_only_original_password() {
        let hash = hash_password("correct horse").unwrap();

        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("correct horse ", &hash).unwrap());
    }

    #[test]
    fn test_salt_makes_hashes_unique() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(hash_password(""), Err(PasswordError::Empty)));
    }

    #[test]
    fn test_plaintext_stored_value_is_invalid_hash() {
        // Legacy rows written without hashing must not verify.
        let result = verify_password("password", "password");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }
}
