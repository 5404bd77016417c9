//! Argon2id password hashing.
//!
//! Digests are stored as PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`),
//! so the parameters travel with each row and can be raised without a
//! migration.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use tracing::debug;

use crate::domain::Password;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// `CredentialHasher` backed by Argon2id with the crate's default cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self
    }

    fn argon2(self) -> Argon2<'static> {
        Argon2::default()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &Password) -> Result<String, CredentialHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.expose().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialHashError::hashing(err.to_string()))
    }

    fn verify(&self, password: &Password, stored: &str) -> bool {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(error = %err, "stored password digest is not a PHC string");
                return false;
            }
        };
        self.argon2()
            .verify_password(password.expose().as_bytes(), &parsed)
            .is_ok()
    }
}
