//! Per-operation connection provider for SQLite.
//!
//! # Responsibility
//! - Hold the storage address and connection settings.
//! - Open a fresh, migrated connection on demand.
//!
//! # Invariants
//! - Every returned connection has the configured busy timeout applied.
//! - Every returned connection has migrations fully applied.
//! - The provider itself owns no connection; callers drop what they get.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{debug, error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Busy timeout applied when the caller does not configure one.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Produces one new SQLite connection per repository operation.
///
/// Cloning is cheap and clones share nothing but the address, so every
/// repository can own its own provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionProvider {
    address: PathBuf,
    busy_timeout: Duration,
}

impl ConnectionProvider {
    /// Creates a provider for the database file at `address`.
    ///
    /// Performs no I/O; failures surface on the first [`Self::connect`].
    pub fn new(address: impl Into<PathBuf>) -> Self {
        Self {
            address: address.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Overrides how long an operation waits on a locked database.
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn address(&self) -> &Path {
        &self.address
    }

    pub fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }

    /// Opens the database and applies all pending migrations.
    ///
    /// # Side effects
    /// - Creates the database file when it does not exist yet.
    /// - Emits `db_open` logging events with duration and status.
    /// - Emits `db_migrate` when this call applied schema steps.
    pub fn connect(&self) -> DbResult<Connection> {
        let started_at = Instant::now();

        match self.open_and_bootstrap() {
            Ok(conn) => {
                debug!(
                    "event=db_open module=db status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(conn)
            }
            Err(err) => {
                error!(
                    "event=db_open module=db status=error duration_ms={} error_code=db_{}_failed address={} error={}",
                    started_at.elapsed().as_millis(),
                    err.phase(),
                    self.address.display(),
                    err
                );
                Err(err)
            }
        }
    }

    fn open_and_bootstrap(&self) -> DbResult<Connection> {
        let mut conn = Connection::open(&self.address).map_err(|source| DbError::Open {
            address: self.address.clone(),
            source,
        })?;
        conn.busy_timeout(self.busy_timeout)
            .map_err(|source| DbError::Configure {
                address: self.address.clone(),
                source,
            })?;
        let report = apply_migrations(&mut conn).map_err(|source| DbError::Migrate {
            address: self.address.clone(),
            source,
        })?;
        if !report.is_noop() {
            info!(
                "event=db_migrate module=db status=ok address={} from_version={} to_version={} applied={}",
                self.address.display(),
                report.from_version,
                report.to_version,
                report.applied.join(",")
            );
        }
        Ok(conn)
    }
}
