//! Password hashing and the account password policy.
//!
//! Hashes are Argon2id in PHC string form, so parameters and salt travel
//! with the hash and can be tightened later without a migration. The policy
//! checks live here too so the admin create/reset handlers share one rule
//! set.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use masark_core::error::CoreError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Hash a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; `Err` is reserved for malformed hashes and
/// other operational failures.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Enforce the account password policy: at least [`MIN_PASSWORD_LENGTH`]
/// characters, and the password may not contain the account's username
/// (case-insensitive).
pub fn validate_password_strength(password: &str, username: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    let username = username.trim();
    if !username.is_empty()
        && password
            .to_lowercase()
            .contains(&username.to_lowercase())
    {
        return Err(CoreError::Validation(
            "Password must not contain the username".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("correct-horse-battery-staple").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");

        assert!(verify_password("correct-horse-battery-staple", &hash).unwrap());
        assert!(!verify_password("wrong-horse-battery-staple", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error_not_a_mismatch() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_policy_rejects_short_passwords() {
        let err = validate_password_strength("short", "someone").unwrap_err();
        assert!(
            err.to_string()
                .contains(&format!("at least {MIN_PASSWORD_LENGTH} characters")),
            "error should state the minimum length"
        );

        // Exactly at the boundary passes.
        let at_minimum = "x".repeat(MIN_PASSWORD_LENGTH);
        assert!(validate_password_strength(&at_minimum, "someone").is_ok());
    }

    #[test]
    fn test_policy_rejects_password_containing_username() {
        assert!(validate_password_strength("karim-secret-2026", "karim").is_err());
        // Case differences do not dodge the check.
        assert!(validate_password_strength("KARIM-secret-2026", "karim").is_err());
        assert!(validate_password_strength("unrelated-secret-2026", "karim").is_ok());
    }
}
