//! Argon2id password hashing for the operator account.
//!
//! Hashes use the Argon2id variant with a random per-hash salt from [`OsRng`]
//! and are stored in PHC string format, which embeds the algorithm parameters
//! alongside the salt and digest.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password with Argon2id and a freshly generated salt.
///
/// Returns the PHC-formatted hash string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// `Ok(false)` means the password did not match; any other failure (for
/// example a malformed stored hash) surfaces as an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_verification() {
        let hash = hash_password("clinic-operator-pw").expect("hashing should succeed");
        assert!(
            hash.starts_with("$argon2id$"),
            "expected an argon2id PHC prefix"
        );
        assert!(verify_password("clinic-operator-pw", &hash).expect("verify should succeed"));
    }

    #[test]
    fn test_mismatch_is_ok_false() {
        let hash = hash_password("clinic-operator-pw").expect("hashing should succeed");
        let verified = verify_password("not-the-password", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password must not verify");
    }

    #[test]
    fn test_salts_are_unique_per_hash() {
        let a = hash_password("same-input").expect("hashing should succeed");
        let b = hash_password("same-input").expect("hashing should succeed");
        assert_ne!(a, b, "each hash must carry a fresh salt");
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }
}
