//! Driven port for password digests.

use crate::domain::Password;

use super::define_port_error;

define_port_error! {
    pub enum CredentialHashError {
        /// The hasher could not produce a digest.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Turns passwords into stored digests and checks them later.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &Password) -> Result<String, CredentialHashError>;

    /// `false` for a wrong password and for digests this hasher cannot read.
    fn verify(&self, password: &Password, stored: &str) -> bool;
}
