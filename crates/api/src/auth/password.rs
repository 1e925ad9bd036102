//! Password hashing for email + password accounts.
//!
//! Hashes are Argon2id PHC strings, so the salt and cost parameters travel
//! with the stored value. Accounts created through Google sign-in store an
//! empty hash and can only log in through OAuth.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check `password` against a stored hash.
///
/// A mismatch is `Ok(false)`, as is any check against an empty stored hash.
/// Only a stored value that is not a valid PHC string is an error.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, HashError> {
    if stored.is_empty() {
        return Ok(false);
    }
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips_for_the_right_password_only() {
        let stored = hash_password("foo1234!").unwrap();

        assert!(stored.starts_with("$argon2id$"));
        assert!(verify_password("foo1234!", &stored).unwrap());
        assert!(!verify_password("foo1234?", &stored).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash_password("pw").unwrap(), hash_password("pw").unwrap());
    }

    #[test]
    fn oauth_only_accounts_never_match() {
        assert!(!verify_password("", "").unwrap());
        assert!(!verify_password("anything", "").unwrap());
    }

    #[test]
    fn corrupt_stored_hash_is_an_error() {
        assert!(verify_password("pw", "not-a-phc-string").is_err());
    }
}
