//! Driving port for creating accounts.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create an account; an already registered mail is a `conflict`.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
