//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Mail, NewUser, StoredCredentials, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The mail address is already registered.
        DuplicateMail { mail: String } => "mail already registered: {mail}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account with a zero balance.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the password digest registered for `mail`.
    async fn find_credentials(
        &self,
        mail: &Mail,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;
}
