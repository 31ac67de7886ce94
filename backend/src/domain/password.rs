//! Password checks for stored user records.
//!
//! Seeded records may hold the password verbatim. Records written by
//! `seed-user --hash` hold an Argon2 PHC string instead, recognised by its
//! `$argon2` prefix.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

const ARGON2_PREFIX: &str = "$argon2";

pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with(ARGON2_PREFIX)
}

/// Hash a password with the default Argon2id parameters, returning a PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Check a submitted password against the stored value.
///
/// Plaintext values compare exactly (case-sensitive, no trimming). A
/// malformed PHC string is an error rather than a mismatch.
pub fn verify_password(submitted: &str, stored: &str) -> Result<bool> {
    if !is_hashed(stored) {
        return Ok(submitted == stored);
    }

    let parsed = PasswordHash::new(stored).map_err(|e| anyhow!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(submitted.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_is_exact() {
        assert!(verify_password("Secret1", "Secret1").unwrap());
        assert!(!verify_password("secret1", "Secret1").unwrap());
        assert!(!verify_password("Secret1 ", "Secret1").unwrap());
    }

    #[test]
    fn test_hashed_password() {
        let hash = hash_password("birthday").unwrap();
        assert!(is_hashed(&hash));
        assert!(verify_password("birthday", &hash).unwrap());
        assert!(!verify_password("Birthday", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password("anything", "$argon2id$garbage").is_err());
    }
}
