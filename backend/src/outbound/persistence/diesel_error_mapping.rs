//! Shared Diesel error mapping.
//!
//! Driven-port adapters map into their port's `Connection`/`Query` variants
//! through [`map_basic_diesel_error`]. Adapters that implement driving ports
//! directly map into the domain [`Error`] with [`map_domain_diesel_error`],
//! where constraint violations become `conflict` or `not_found`.
//! Driver messages are logged at `debug` and never returned to callers.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::Error;

use super::pool::PoolError;

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }
}

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map Diesel errors into query/connection constructors.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    log_diesel_error(&error);

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

pub(crate) fn map_domain_pool_error(error: PoolError) -> Error {
    debug!(error = %error, "connection checkout failed");
    Error::service_unavailable("database unavailable")
}

/// Map Diesel errors for adapters that speak the domain error directly.
///
/// `subject` names the record being written, e.g. `"idea"`.
pub(crate) fn map_domain_diesel_error(error: DieselError, subject: &str) -> Error {
    log_diesel_error(&error);

    match error {
        DieselError::NotFound => Error::not_found(format!("{subject} not found")),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            Error::conflict(format!("{subject} already exists"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            Error::not_found(format!("{subject} references a missing record"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            Error::service_unavailable("database connection error")
        }
        _ => Error::internal("database error"),
    }
}
