//! Opaque bearer session tokens.
//!
//! Login hands the client a random token; only its SHA-256 hex digest is
//! persisted, so a leaked database dump cannot be replayed as a session.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a new session token, returning `(plaintext, sha256_hash)`.
///
/// The plaintext goes to the client exactly once; only the hash is stored.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a session token.
///
/// Use this to compare an incoming bearer token against the stored hash.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_returns_matching_hash() {
        let (plaintext, hash) = generate_session_token();
        assert_eq!(hash, hash_session_token(&plaintext));
        // SHA-256 hex digest is always 64 characters.
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_tokens_are_unique() {
        let (a, _) = generate_session_token();
        let (b, _) = generate_session_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_is_deterministic() {
        let h1 = hash_session_token("fixed-token");
        let h2 = hash_session_token("fixed-token");
        assert_eq!(h1, h2);
        assert_ne!(h1, hash_session_token("other-token"));
    }
}
