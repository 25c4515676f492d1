//! Household schema migrations.
//!
//! # Responsibility
//! - Keep the ordered registry of schema steps for rooms, roommates, chores
//!   and assignments.
//! - Bring a connection up to the latest step and report what was applied.
//!
//! # Invariants
//! - Registry versions start at 1 and increase by exactly 1.
//! - Each step commits together with its `PRAGMA user_version` bump, so a
//!   failing step leaves every earlier step applied and itself absent.
//! - Relations carry no `REFERENCES` clauses; referential integrity is not
//!   enforced by storage.

use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One schema step.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    sql: &'static str,
}

const HOUSEHOLD_MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "household_tables",
    sql: include_str!("0001_init.sql"),
}];

#[derive(Debug)]
pub enum MigrationError {
    /// `PRAGMA user_version` could not be read; usually not a SQLite file.
    ReadVersion(rusqlite::Error),
    /// The file was written by a newer build.
    UnsupportedVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// One registry step failed and was rolled back.
    Step {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for MigrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadVersion(err) => write!(f, "cannot read schema version: {err}"),
            Self::UnsupportedVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Step {
                version,
                name,
                source,
            } => write!(f, "migration {version} ({name}) failed: {source}"),
        }
    }
}

impl Error for MigrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadVersion(err) => Some(err),
            Self::UnsupportedVersion { .. } => None,
            Self::Step { source, .. } => Some(source),
        }
    }
}

/// Outcome of one `apply_migrations` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
    /// Names of the steps applied by this call, in order.
    pub applied: Vec<&'static str>,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    HOUSEHOLD_MIGRATIONS
        .last()
        .map_or(0, |migration| migration.version)
}

/// Returns the registered schema steps.
pub fn registry() -> &'static [Migration] {
    HOUSEHOLD_MIGRATIONS
}

/// Reads the schema version stamped on the database.
pub fn schema_version(conn: &Connection) -> Result<u32, MigrationError> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .map_err(MigrationError::ReadVersion)
}

/// Applies every household step newer than the database's version.
pub fn apply_migrations(conn: &mut Connection) -> Result<MigrationReport, MigrationError> {
    apply_registry(conn, HOUSEHOLD_MIGRATIONS)
}

fn apply_registry(
    conn: &mut Connection,
    registry: &[Migration],
) -> Result<MigrationReport, MigrationError> {
    let from_version = schema_version(conn)?;
    let latest_supported = registry.last().map_or(0, |migration| migration.version);
    if from_version > latest_supported {
        return Err(MigrationError::UnsupportedVersion {
            db_version: from_version,
            latest_supported,
        });
    }

    let mut report = MigrationReport {
        from_version,
        to_version: from_version,
        applied: Vec::new(),
    };
    for migration in registry
        .iter()
        .filter(|migration| migration.version > from_version)
    {
        apply_step(conn, migration).map_err(|source| MigrationError::Step {
            version: migration.version,
            name: migration.name,
            source,
        })?;
        info!(
            "event=db_migration_step module=db status=ok version={} name={}",
            migration.version, migration.name
        );
        report.to_version = migration.version;
        report.applied.push(migration.name);
    }

    Ok(report)
}

fn apply_step(conn: &mut Connection, migration: &Migration) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(migration.sql)?;
    tx.pragma_update(None, "user_version", migration.version)?;
    tx.commit()
}
