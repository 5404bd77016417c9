//! Credentials supplied at login and registration.
//!
//! Inbound adapters hand raw strings to these constructors before talking to
//! a port, so services only ever see well-formed input.

use std::fmt;

use zeroize::Zeroizing;

/// Minimum number of characters accepted for a new password.
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Validation errors for mail addresses and passwords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    #[error("mail must not be empty")]
    EmptyMail,
    #[error("mail must look like local@domain")]
    MalformedMail,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Normalised mail address used as the login name.
///
/// Stored lowercase so `Ada@Example.org` and `ada@example.org` collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mail(String);

impl Mail {
    pub fn parse(raw: &str) -> Result<Self, CredentialValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CredentialValidationError::EmptyMail);
        }
        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(CredentialValidationError::MalformedMail);
        };
        let domain_ok = !domain.is_empty()
            && !domain.contains('@')
            && !domain.starts_with('.')
            && !domain.ends_with('.');
        if local.is_empty() || !domain_ok || trimmed.chars().any(char::is_whitespace) {
            return Err(CredentialValidationError::MalformedMail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plain-text password held only for the duration of a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept any non-empty password; used for login attempts.
    pub fn presented(raw: &str) -> Result<Self, CredentialValidationError> {
        if raw.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Enforce the length rule for passwords chosen at registration.
    pub fn chosen(raw: &str) -> Result<Self, CredentialValidationError> {
        let password = Self::presented(raw)?;
        if raw.chars().count() < PASSWORD_MIN_CHARS {
            return Err(CredentialValidationError::PasswordTooShort {
                min: PASSWORD_MIN_CHARS,
            });
        }
        Ok(password)
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use idea_platform::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.org ", "hunter22").expect("valid");
/// assert_eq!(creds.mail().as_str(), "ada@example.org");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    mail: Mail,
    password: Password,
}

impl LoginCredentials {
    pub fn try_from_parts(mail: &str, password: &str) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            mail: Mail::parse(mail)?,
            password: Password::presented(password)?,
        })
    }

    pub fn mail(&self) -> &Mail {
        &self.mail
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}
