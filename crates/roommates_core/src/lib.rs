//! Data-access core for the roommates household tracker.
//! Owns the schema, the domain records, and one repository per entity.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{ConnectionProvider, DbError, DbResult, MigrationError, MigrationReport};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::chore::{Assignment, Chore};
pub use model::room::Room;
pub use model::roommate::{Roommate, RoommateDetail};
pub use model::{AssignmentId, ChoreId, RoomId, RoommateId};
pub use repo::chore_repo::{ChoreRepository, SqliteChoreRepository};
pub use repo::room_repo::{RoomRepository, SqliteRoomRepository};
pub use repo::roommate_repo::{RoommateRepository, SqliteRoommateRepository};
pub use repo::{RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
