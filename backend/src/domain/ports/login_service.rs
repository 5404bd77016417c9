//! Driving port for login/authentication use-cases.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown mail and wrong password both yield the same `unauthorized`
    /// error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
