//! Password hashing with Argon2id
//!
//! Hashes are stored as PHC strings, so the parameters travel with each hash
//! and older hashes keep verifying if the defaults ever change.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};

use crate::error::AppError;

/// Hashes new passwords and checks logins against stored hashes
#[derive(Debug, Clone, Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(anyhow::anyhow!("Password hashing failed: {e}")))
    }

    /// `Ok(false)` on mismatch; a stored hash that does not parse is an internal error
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(stored).map_err(|e| {
            AppError::internal(anyhow::anyhow!("Stored password hash is malformed: {e}"))
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(AppError::internal(anyhow::anyhow!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_argon2id() {
        let passwords = PasswordService::new();
        let first = passwords.hash("qwerty1").unwrap();
        let second = passwords.hash("qwerty1").unwrap();

        assert!(first.starts_with("$argon2id"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_matches_only_the_original() {
        let passwords = PasswordService::new();
        let hash = passwords.hash("qwerty1").unwrap();

        assert!(passwords.verify("qwerty1", &hash).unwrap());
        assert!(!passwords.verify("qwerty2", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        assert!(matches!(
            PasswordService::new().verify("qwerty1", "not-a-phc-string"),
            Err(AppError::Internal(_))
        ));
    }
}
