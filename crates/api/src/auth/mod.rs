//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- Opaque bearer session token generation and hashing.

pub mod password;
pub mod token;
