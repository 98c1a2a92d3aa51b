//! Authentication and password hashing.
//!
//! Passwords are stored as Argon2id PHC strings and never leave the server.

mod password;

pub use password::{PasswordError, hash_password, verify_password};
