//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors report what is wrong; these helpers turn that into
//! `invalid_request` errors whose details name the offending request field
//! (in its camelCase wire spelling) and a stable machine-readable code.

use serde_json::json;

use crate::domain::{
    CredentialValidationError, Error, IdeaValidationError, ProductValidationError,
    RegistrationValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyValue,
    MalformedMail,
    PasswordTooShort,
    NegativeValue,
    OutOfRange,
    InvalidFileName,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::EmptyValue => "empty_value",
            ErrorCode::MalformedMail => "malformed_mail",
            ErrorCode::PasswordTooShort => "password_too_short",
            ErrorCode::NegativeValue => "negative_value",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidFileName => "invalid_file_name",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

pub(crate) fn map_credential_error(err: CredentialValidationError) -> Error {
    let (field, code) = match err {
        CredentialValidationError::EmptyMail => ("mail", ErrorCode::EmptyValue),
        CredentialValidationError::MalformedMail => ("mail", ErrorCode::MalformedMail),
        CredentialValidationError::EmptyPassword => ("password", ErrorCode::EmptyValue),
        CredentialValidationError::PasswordTooShort { .. } => {
            ("password", ErrorCode::PasswordTooShort)
        }
    };
    field_error(FieldName::new(field), code, err.to_string())
}

pub(crate) fn map_registration_error(err: RegistrationValidationError) -> Error {
    match err {
        RegistrationValidationError::Credentials(inner) => map_credential_error(inner),
        RegistrationValidationError::EmptyName { field } => {
            field_error(FieldName::new(field), ErrorCode::EmptyValue, err.to_string())
        }
    }
}

pub(crate) fn map_product_error(err: ProductValidationError) -> Error {
    let code = match err {
        ProductValidationError::EmptyTitle => ErrorCode::EmptyValue,
        ProductValidationError::NegativePrice(_) | ProductValidationError::NegativeQuantity(_) => {
            ErrorCode::NegativeValue
        }
        ProductValidationError::InvalidImage => ErrorCode::InvalidFileName,
    };
    field_error(FieldName::new(err.field()), code, err.to_string())
}

pub(crate) fn map_idea_error(err: IdeaValidationError) -> Error {
    let code = match err {
        IdeaValidationError::Empty { .. } => ErrorCode::EmptyValue,
        IdeaValidationError::NegativeSkip(_) => ErrorCode::NegativeValue,
        IdeaValidationError::LimitOutOfRange { .. } => ErrorCode::OutOfRange,
    };
    field_error(FieldName::new(err.field()), code, err.to_string())
}
