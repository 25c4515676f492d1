//! Roommate repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Read-only access to the `Roommate` relation.
//! - Resolve a roommate's room name through an inner join on `Room`.
//!
//! # Invariants
//! - `get_all` maps `RoomId` as a raw key and never joins.
//! - `get_by_id` reports `NotFound` both for a missing roommate and for a
//!   roommate whose room row no longer exists.

use super::{connect, logged, RepoError, RepoResult};
use crate::db::ConnectionProvider;
use crate::model::roommate::{Roommate, RoommateDetail};
use crate::model::{RoomId, RoommateId};
use log::debug;
use rusqlite::Row;

const ENTITY: &str = "roommate";

/// Read access to the `Roommate` relation.
pub trait RoommateRepository {
    fn get_all(&self) -> RepoResult<Vec<Roommate>>;
    /// Loads one roommate together with the name of its room.
    fn get_by_id(&self, id: RoommateId) -> RepoResult<RoommateDetail>;
}

/// SQLite-backed roommate repository.
#[derive(Debug, Clone)]
pub struct SqliteRoommateRepository {
    provider: ConnectionProvider,
}

impl SqliteRoommateRepository {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }
}

impl RoommateRepository for SqliteRoommateRepository {
    fn get_all(&self) -> RepoResult<Vec<Roommate>> {
        logged("roommate_list", || {
            let conn = connect(&self.provider)?;
            let mut stmt = conn.prepare(
                "SELECT
                    Id,
                    FirstName,
                    LastName,
                    RentPortion,
                    MoveInDate,
                    RoomId
                 FROM Roommate;",
            )?;
            let mut rows = stmt.query([])?;
            let mut roommates = Vec::new();
            while let Some(row) = rows.next()? {
                roommates.push(parse_roommate_row(row)?);
            }

            debug!(
                "event=roommate_list module=repo status=ok count={}",
                roommates.len()
            );
            Ok(roommates)
        })
    }

    fn get_by_id(&self, id: RoommateId) -> RepoResult<RoommateDetail> {
        logged("roommate_get", || {
            let conn = connect(&self.provider)?;
            let mut stmt = conn.prepare(
                "SELECT
                    rm.Id AS Id,
                    rm.FirstName AS FirstName,
                    rm.LastName AS LastName,
                    rm.RentPortion AS RentPortion,
                    rm.MoveInDate AS MoveInDate,
                    rm.RoomId AS RoomId,
                    r.Name AS RoomName
                 FROM Roommate rm
                 INNER JOIN Room r ON r.Id = rm.RoomId
                 WHERE rm.Id = ?1;",
            )?;
            let mut rows = stmt.query([id.get()])?;
            if let Some(row) = rows.next()? {
                return Ok(RoommateDetail {
                    roommate: parse_roommate_row(row)?,
                    room_name: row.get("RoomName")?,
                });
            }

            Err(RepoError::NotFound {
                entity: ENTITY,
                id: id.get(),
            })
        })
    }
}

fn parse_roommate_row(row: &Row<'_>) -> RepoResult<Roommate> {
    Ok(Roommate {
        id: RoommateId(row.get("Id")?),
        first_name: row.get("FirstName")?,
        last_name: row.get("LastName")?,
        rent_portion: row.get("RentPortion")?,
        move_in_date: row.get("MoveInDate")?,
        room_id: RoomId(row.get("RoomId")?),
    })
}
