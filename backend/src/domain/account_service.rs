//! Account use-cases: registration, login and profile lookups.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CredentialHasher, LoginService, UserPersistenceError, UserProfileQuery, UserRegistration,
    UserRepository,
};
use crate::domain::{Error, LoginCredentials, NewUser, Registration, User, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateMail { .. } => Error::conflict("mail already registered"),
    }
}

#[async_trait]
impl<U, H> UserRegistration for AccountService<U, H>
where
    U: UserRepository,
    H: CredentialHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(|err| Error::internal(err.to_string()))?;
        let new_user = NewUser::from_registration(registration, password_hash);
        let user = self.users.insert(&new_user).await.map_err(map_user_error)?;
        info!(user_id = user.id.get(), expert = user.expert, "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: CredentialHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let stored = self
            .users
            .find_credentials(credentials.mail())
            .await
            .map_err(map_user_error)?;
        let Some(stored) = stored else {
            debug!("login for unknown mail");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        if !self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
        {
            debug!(user_id = stored.user_id.get(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(stored.user_id)
    }
}

#[async_trait]
impl<U, H> UserProfileQuery for AccountService<U, H>
where
    U: UserRepository,
    H: CredentialHasher,
{
    async fn fetch_profile(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}
