//! Registered users and the registration request.

use serde::{Deserialize, Serialize};

use super::{CredentialValidationError, Mail, Password, Score, UserId};

/// Validation errors for registration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },
    #[error(transparent)]
    Credentials(#[from] CredentialValidationError),
}

impl RegistrationValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName { field } => field,
            Self::Credentials(
                CredentialValidationError::EmptyMail | CredentialValidationError::MalformedMail,
            ) => "mail",
            Self::Credentials(_) => "password",
        }
    }
}

/// Application user as seen by the domain.
///
/// The password digest never leaves the persistence layer except through
/// [`StoredCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub mail: String,
    pub expert: bool,
    pub score: Score,
}

impl User {
    /// Name shown on scoreboards.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Digest and identity looked up at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user_id: UserId,
    pub password_hash: String,
}

/// Validated registration request.
#[derive(Debug, Clone)]
pub struct Registration {
    last_name: String,
    first_name: String,
    middle_name: Option<String>,
    mail: Mail,
    password: Password,
    expert: bool,
}

/// Raw registration fields as received from an inbound adapter.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    pub last_name: &'a str,
    pub first_name: &'a str,
    pub middle_name: Option<&'a str>,
    pub mail: &'a str,
    pub password: &'a str,
    pub expert: bool,
}

fn required_name(value: &str, field: &'static str) -> Result<String, RegistrationValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationValidationError::EmptyName { field });
    }
    Ok(trimmed.to_owned())
}

impl Registration {
    pub fn try_from_input(input: RegistrationInput<'_>) -> Result<Self, RegistrationValidationError> {
        let middle_name = input
            .middle_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned);
        Ok(Self {
            last_name: required_name(input.last_name, "lastName")?,
            first_name: required_name(input.first_name, "firstName")?,
            middle_name,
            mail: Mail::parse(input.mail)?,
            password: Password::chosen(input.password)?,
            expert: input.expert,
        })
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    pub fn mail(&self) -> &Mail {
        &self.mail
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn expert(&self) -> bool {
        self.expert
    }
}

/// Registration ready for persistence: the password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub mail: String,
    pub password_hash: String,
    pub expert: bool,
}

impl NewUser {
    pub fn from_registration(registration: &Registration, password_hash: String) -> Self {
        Self {
            last_name: registration.last_name.clone(),
            first_name: registration.first_name.clone(),
            middle_name: registration.middle_name.clone(),
            mail: registration.mail.as_str().to_owned(),
            password_hash,
            expert: registration.expert,
        }
    }
}
