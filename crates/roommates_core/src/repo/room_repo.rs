//! Room repository contract and SQLite implementation.
//!
//! # Invariants
//! - `get_all` issues no `ORDER BY`; callers must not rely on row order.
//! - `insert` writes the storage-generated key back onto the record.
//! - `update`/`delete` on a missing id succeed without touching any row.

use super::{connect, logged, RepoError, RepoResult};
use crate::db::ConnectionProvider;
use crate::model::room::Room;
use crate::model::RoomId;
use log::{debug, info};
use rusqlite::{params, Row};

const ENTITY: &str = "room";

/// Data access for the `Room` relation.
pub trait RoomRepository {
    fn get_all(&self) -> RepoResult<Vec<Room>>;
    fn get_by_id(&self, id: RoomId) -> RepoResult<Room>;
    /// Inserts a new room and stores the generated id on `room`.
    fn insert(&self, room: &mut Room) -> RepoResult<RoomId>;
    fn update(&self, room: &Room) -> RepoResult<()>;
    fn delete(&self, id: RoomId) -> RepoResult<()>;
}

/// SQLite-backed room repository.
#[derive(Debug, Clone)]
pub struct SqliteRoomRepository {
    provider: ConnectionProvider,
}

impl SqliteRoomRepository {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }
}

impl RoomRepository for SqliteRoomRepository {
    fn get_all(&self) -> RepoResult<Vec<Room>> {
        logged("room_list", || {
            let conn = connect(&self.provider)?;
            let mut stmt = conn.prepare("SELECT Id, Name, MaxOccupancy FROM Room;")?;
            let mut rows = stmt.query([])?;
            let mut rooms = Vec::new();
            while let Some(row) = rows.next()? {
                rooms.push(parse_room_row(row)?);
            }

            debug!(
                "event=room_list module=repo status=ok count={}",
                rooms.len()
            );
            Ok(rooms)
        })
    }

    fn get_by_id(&self, id: RoomId) -> RepoResult<Room> {
        logged("room_get", || {
            let conn = connect(&self.provider)?;
            let mut stmt = conn.prepare(
                "SELECT Id, Name, MaxOccupancy
                 FROM Room
                 WHERE Id = ?1;",
            )?;
            let mut rows = stmt.query([id.get()])?;
            if let Some(row) = rows.next()? {
                return parse_room_row(row);
            }

            Err(RepoError::NotFound {
                entity: ENTITY,
                id: id.get(),
            })
        })
    }

    fn insert(&self, room: &mut Room) -> RepoResult<RoomId> {
        logged("room_insert", || {
            if !room.id.is_unset() {
                return Err(RepoError::AlreadyPersisted {
                    entity: ENTITY,
                    id: room.id.get(),
                });
            }

            let conn = connect(&self.provider)?;
            let id: i64 = conn.query_row(
                "INSERT INTO Room (Name, MaxOccupancy)
                 VALUES (?1, ?2)
                 RETURNING Id;",
                params![room.name.as_str(), room.max_occupancy],
                |row| row.get(0),
            )?;
            room.id = RoomId(id);

            info!("event=room_insert module=repo status=ok id={id}");
            Ok(room.id)
        })
    }

    fn update(&self, room: &Room) -> RepoResult<()> {
        logged("room_update", || {
            let conn = connect(&self.provider)?;
            let changed = conn.execute(
                "UPDATE Room
                 SET
                    Name = ?1,
                    MaxOccupancy = ?2
                 WHERE Id = ?3;",
                params![room.name.as_str(), room.max_occupancy, room.id.get()],
            )?;

            if changed == 0 {
                debug!(
                    "event=room_update module=repo status=noop id={}",
                    room.id
                );
                return Ok(());
            }
            info!("event=room_update module=repo status=ok id={}", room.id);
            Ok(())
        })
    }

    fn delete(&self, id: RoomId) -> RepoResult<()> {
        logged("room_delete", || {
            let conn = connect(&self.provider)?;
            let changed = conn.execute("DELETE FROM Room WHERE Id = ?1;", [id.get()])?;

            info!("event=room_delete module=repo status=ok id={id} changed={changed}");
            Ok(())
        })
    }
}

fn parse_room_row(row: &Row<'_>) -> RepoResult<Room> {
    Ok(Room {
        id: RoomId(row.get("Id")?),
        name: row.get("Name")?,
        max_occupancy: row.get("MaxOccupancy")?,
    })
}
