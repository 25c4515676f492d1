//! SQLite storage bootstrap for the household database.
//!
//! # Responsibility
//! - Hand out short-lived, configured SQLite connections per operation.
//! - Report which database file and which bootstrap phase failed.
//!
//! # Invariants
//! - No connection is returned to callers before migrations succeed.
//! - Nothing in this module keeps a connection alive between calls.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod migrations;
mod open;

pub use migrations::{MigrationError, MigrationReport};
pub use open::{ConnectionProvider, DEFAULT_BUSY_TIMEOUT};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to produce a usable connection, tagged with the database address.
#[derive(Debug)]
pub enum DbError {
    /// The file could not be opened or created.
    Open {
        address: PathBuf,
        source: rusqlite::Error,
    },
    /// Connection settings (busy timeout) could not be applied.
    Configure {
        address: PathBuf,
        source: rusqlite::Error,
    },
    /// The schema could not be read or brought up to date.
    Migrate {
        address: PathBuf,
        source: MigrationError,
    },
}

impl DbError {
    pub fn address(&self) -> &Path {
        match self {
            Self::Open { address, .. }
            | Self::Configure { address, .. }
            | Self::Migrate { address, .. } => address,
        }
    }

    /// Short name of the bootstrap step that failed, used in log lines.
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Open { .. } => "open",
            Self::Configure { .. } => "configure",
            Self::Migrate { .. } => "migrate",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { address, source } => {
                write!(f, "cannot open `{}`: {source}", address.display())
            }
            Self::Configure { address, source } => write!(
                f,
                "cannot configure connection to `{}`: {source}",
                address.display()
            ),
            Self::Migrate { address, source } => {
                write!(f, "cannot migrate `{}`: {source}", address.display())
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Configure { source, .. } => Some(source),
            Self::Migrate { source, .. } => Some(source),
        }
    }
}
