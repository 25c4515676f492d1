//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define one data-access contract per entity (room, chore, roommate).
//! - Keep SQL text and row mapping behind those contracts.
//! - Classify storage failures into the semantic `RepoError` kinds.
//!
//! # Invariants
//! - Every operation acquires exactly one connection through
//!   `ConnectionProvider::connect` and drops it before returning.
//! - Lookups by id report `RepoError::NotFound` instead of an empty value.
//! - No repository calls another repository.
//! - Every failed operation is logged under the operation's event name.

pub mod chore_repo;
pub mod room_repo;
pub mod roommate_repo;

use crate::db::{ConnectionProvider, DbError};
use log::{debug, warn};
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by every repository operation.
#[derive(Debug)]
pub enum RepoError {
    /// Lookup by id matched zero rows.
    NotFound { entity: &'static str, id: i64 },
    /// Insert was called with a record that already carries a storage key.
    AlreadyPersisted { entity: &'static str, id: i64 },
    /// Storage rejected a write (`SQLITE_CONSTRAINT`).
    ConstraintViolation(rusqlite::Error),
    /// Database could not be opened or bootstrapped.
    ConnectionFailure(DbError),
    /// A row does not match the column types or nullability the mapping expects.
    DataShapeMismatch(String),
    /// Any other storage failure.
    Storage(rusqlite::Error),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Stable label used in `error_kind=` log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::AlreadyPersisted { .. } => "already_persisted",
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::ConnectionFailure(_) => "connection_failure",
            Self::DataShapeMismatch(_) => "data_shape_mismatch",
            Self::Storage(_) => "storage",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::AlreadyPersisted { entity, id } => {
                write!(f, "{entity} already has id {id}; refusing to insert it again")
            }
            Self::ConstraintViolation(err) => write!(f, "constraint violation: {err}"),
            Self::ConnectionFailure(err) => write!(f, "cannot connect to database: {err}"),
            Self::DataShapeMismatch(message) => write!(f, "unexpected row shape: {message}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::AlreadyPersisted { .. } => None,
            Self::ConstraintViolation(err) => Some(err),
            Self::ConnectionFailure(err) => Some(err),
            Self::DataShapeMismatch(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::ConnectionFailure(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match &value {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Self::ConstraintViolation(value)
            }
            rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::IntegralValueOutOfRange(..)
            | rusqlite::Error::InvalidColumnName(_)
            | rusqlite::Error::InvalidColumnIndex(_) => Self::DataShapeMismatch(value.to_string()),
            _ => Self::Storage(value),
        }
    }
}

/// Opens the per-operation connection, tagging bootstrap errors as
/// connection failures.
fn connect(provider: &ConnectionProvider) -> RepoResult<Connection> {
    Ok(provider.connect()?)
}

/// Runs one repository operation and logs its failure under `event`.
///
/// `NotFound` goes to `debug`; lookups of absent ids are routine.
fn logged<T>(event: &str, operation: impl FnOnce() -> RepoResult<T>) -> RepoResult<T> {
    let result = operation();
    if let Err(err) = &result {
        if err.is_not_found() {
            debug!("event={event} module=repo status=not_found error={err}");
        } else {
            warn!(
                "event={event} module=repo status=error error_kind={} error={err}",
                err.kind()
            );
        }
    }
    result
}
