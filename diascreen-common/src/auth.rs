//! Password hashing and verification
//!
//! # Architecture
//!
//! Credentials are stored as Argon2id PHC strings with a random per-user
//! salt. Verification re-derives the hash from the submitted password and
//! compares inside the argon2 library, which is constant-time.
//!
//! This module contains ONLY pure functions. No HTTP or database
//! dependencies - those live in module-specific code.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::{Error, Result};

/// Hash a plaintext password into a PHC string.
///
/// A fresh random salt is generated per call, so hashing the same password
/// twice yields different strings. The plaintext is never stored or logged.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC string.
///
/// Returns `Ok(false)` for a well-formed hash that does not match; a hash
/// that fails to parse is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| Error::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();

        assert!(verify_password("correct horse battery", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        // Same password, different salt, different PHC string
        let first = hash_password("hunter2hunter2").unwrap();
        let second = hash_password("hunter2hunter2").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hash = hash_password("plaintextsecret").unwrap();

        assert!(!hash.contains("plaintextsecret"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = verify_password("anything", "not-a-phc-string");

        assert!(matches!(result, Err(Error::PasswordHash(_))));
    }
}
