//! Chore repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `Chore` relation.
//! - Chore-to-roommate assignment through the `RoommateChore` join relation.
//! - Set-difference lookup of chores nobody is assigned to.
//!
//! # Invariants
//! - `get_unassigned_chores` returns each unassigned chore exactly once, no
//!   matter how many assignment rows other chores have.
//! - `assign_chore` takes `(chore_id, roommate_id)` and validates neither id.
//! - `update`/`delete` on a missing id succeed without touching any row.

use super::{connect, logged, RepoError, RepoResult};
use crate::db::ConnectionProvider;
use crate::model::chore::{Assignment, Chore};
use crate::model::{AssignmentId, ChoreId, RoommateId};
use log::{debug, info};
use rusqlite::{named_params, params, Connection, Row};

const ENTITY: &str = "chore";

/// Data access for the `Chore` relation and its assignments.
pub trait ChoreRepository {
    fn get_all(&self) -> RepoResult<Vec<Chore>>;
    fn get_by_id(&self, id: ChoreId) -> RepoResult<Chore>;
    /// Inserts a new chore and stores the generated id on `chore`.
    fn insert(&self, chore: &mut Chore) -> RepoResult<ChoreId>;
    /// Renames the chore with `chore.id`. Silently succeeds when absent.
    fn update(&self, chore: &Chore) -> RepoResult<()>;
    /// Removes the chore row. Its assignment rows are left in place.
    fn delete(&self, id: ChoreId) -> RepoResult<()>;
    /// Chores that appear in no assignment row.
    fn get_unassigned_chores(&self) -> RepoResult<Vec<Chore>>;
    /// Records that `roommate_id` now holds `chore_id`.
    ///
    /// Duplicate assignments are accepted.
    fn assign_chore(&self, chore_id: ChoreId, roommate_id: RoommateId)
        -> RepoResult<AssignmentId>;
    fn get_assignments(&self) -> RepoResult<Vec<Assignment>>;
}

/// SQLite-backed chore repository.
#[derive(Debug, Clone)]
pub struct SqliteChoreRepository {
    provider: ConnectionProvider,
}

impl SqliteChoreRepository {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }
}

impl ChoreRepository for SqliteChoreRepository {
    fn get_all(&self) -> RepoResult<Vec<Chore>> {
        logged("chore_list", || {
            let conn = connect(&self.provider)?;
            let chores = query_chores(&conn, "SELECT Id, Name FROM Chore;")?;
            debug!(
                "event=chore_list module=repo status=ok count={}",
                chores.len()
            );
            Ok(chores)
        })
    }

    fn get_by_id(&self, id: ChoreId) -> RepoResult<Chore> {
        logged("chore_get", || {
            let conn = connect(&self.provider)?;
            let mut stmt = conn.prepare("SELECT Id, Name FROM Chore WHERE Id = ?1;")?;
            let mut rows = stmt.query([id.get()])?;
            if let Some(row) = rows.next()? {
                return parse_chore_row(row);
            }

            Err(RepoError::NotFound {
                entity: ENTITY,
                id: id.get(),
            })
        })
    }

    fn insert(&self, chore: &mut Chore) -> RepoResult<ChoreId> {
        logged("chore_insert", || {
            if !chore.id.is_unset() {
                return Err(RepoError::AlreadyPersisted {
                    entity: ENTITY,
                    id: chore.id.get(),
                });
            }

            let conn = connect(&self.provider)?;
            let id: i64 = conn.query_row(
                "INSERT INTO Chore (Name)
                 VALUES (?1)
                 RETURNING Id;",
                [chore.name.as_str()],
                |row| row.get(0),
            )?;
            chore.id = ChoreId(id);

            info!("event=chore_insert module=repo status=ok id={id}");
            Ok(chore.id)
        })
    }

    fn update(&self, chore: &Chore) -> RepoResult<()> {
        logged("chore_update", || {
            let conn = connect(&self.provider)?;
            let changed = conn.execute(
                "UPDATE Chore
                 SET Name = ?1
                 WHERE Id = ?2;",
                params![chore.name.as_str(), chore.id.get()],
            )?;

            if changed == 0 {
                debug!(
                    "event=chore_update module=repo status=noop id={}",
                    chore.id
                );
                return Ok(());
            }
            info!("event=chore_update module=repo status=ok id={}", chore.id);
            Ok(())
        })
    }

    fn delete(&self, id: ChoreId) -> RepoResult<()> {
        logged("chore_delete", || {
            let conn = connect(&self.provider)?;
            let changed = conn.execute("DELETE FROM Chore WHERE Id = ?1;", [id.get()])?;

            info!("event=chore_delete module=repo status=ok id={id} changed={changed}");
            Ok(())
        })
    }

    fn get_unassigned_chores(&self) -> RepoResult<Vec<Chore>> {
        logged("chore_unassigned", || {
            let conn = connect(&self.provider)?;
            // Anti-join: a chore with several assignment rows still yields no row,
            // and an unassigned chore yields exactly one.
            let chores = query_chores(
                &conn,
                "SELECT c.Id AS Id, c.Name AS Name
                 FROM Chore c
                 WHERE NOT EXISTS (
                    SELECT 1
                    FROM RoommateChore rc
                    WHERE rc.ChoreId = c.Id
                 );",
            )?;

            debug!(
                "event=chore_unassigned module=repo status=ok count={}",
                chores.len()
            );
            Ok(chores)
        })
    }

    fn assign_chore(
        &self,
        chore_id: ChoreId,
        roommate_id: RoommateId,
    ) -> RepoResult<AssignmentId> {
        logged("chore_assign", || {
            let conn = connect(&self.provider)?;
            let id: i64 = conn.query_row(
                "INSERT INTO RoommateChore (RoommateId, ChoreId)
                 VALUES (:roommate_id, :chore_id)
                 RETURNING Id;",
                named_params! {
                    ":chore_id": chore_id.get(),
                    ":roommate_id": roommate_id.get(),
                },
                |row| row.get(0),
            )?;

            info!(
                "event=chore_assign module=repo status=ok id={id} chore_id={chore_id} roommate_id={roommate_id}"
            );
            Ok(AssignmentId(id))
        })
    }

    fn get_assignments(&self) -> RepoResult<Vec<Assignment>> {
        logged("chore_assignments", || {
            let conn = connect(&self.provider)?;
            let mut stmt = conn.prepare("SELECT Id, RoommateId, ChoreId FROM RoommateChore;")?;
            let mut rows = stmt.query([])?;
            let mut assignments = Vec::new();
            while let Some(row) = rows.next()? {
                assignments.push(Assignment {
                    id: AssignmentId(row.get("Id")?),
                    chore_id: ChoreId(row.get("ChoreId")?),
                    roommate_id: RoommateId(row.get("RoommateId")?),
                });
            }
            Ok(assignments)
        })
    }
}

fn query_chores(conn: &Connection, sql: &str) -> RepoResult<Vec<Chore>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    let mut chores = Vec::new();
    while let Some(row) = rows.next()? {
        chores.push(parse_chore_row(row)?);
    }
    Ok(chores)
}

fn parse_chore_row(row: &Row<'_>) -> RepoResult<Chore> {
    Ok(Chore {
        id: ChoreId(row.get("Id")?),
        name: row.get("Name")?,
    })
}
