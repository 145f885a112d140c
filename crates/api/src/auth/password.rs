//! Argon2id password hashing and the registration length rule.
//!
//! Hashes are stored in PHC string form so salt and parameters travel with
//! the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash `password` with Argon2id and a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check `password` against a stored PHC hash. A mismatch is `Ok(false)`;
/// a malformed hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Registration rule: at least `min_length` characters.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_uses_argon2id() {
        let hash = hash_password("budget-transparency").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("budget-transparency", &hash).unwrap());
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hash = hash_password("right-one").unwrap();
        assert!(!verify_password("wrong-one", &hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn length_rule_counts_characters() {
        let err = validate_password_strength("short", 8).unwrap_err();
        assert!(err.contains("at least 8 characters"));
        assert!(validate_password_strength("eightchr", 8).is_ok());
        // Four two-byte characters are still four characters.
        assert!(validate_password_strength("ññññ", 5).is_err());
    }
}
