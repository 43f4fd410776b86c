//! Password value object.
//!
//! Plain-text passwords never reach storage: they are hashed with Argon2
//! and a random salt before a `User` is built.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
#[cfg(any(test, feature = "test-utils"))]
use argon2::password_hash::{PasswordHash, PasswordVerifier};

use crate::constants::{MIN_PASSWORD_LENGTH, MSG_PASSWORD_TOO_SHORT};
use crate::error::{DomainError, DomainResult};

/// Hashed password.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Keep the hash out of logs
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain-text password.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the password is shorter than
    /// `MIN_PASSWORD_LENGTH` characters.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::invalid_input(MSG_PASSWORD_TOO_SHORT));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// Wrap an existing hash loaded from storage.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Check a plain-text password against this hash.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}
