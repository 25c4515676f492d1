//! Chore and chore-assignment domain models.
//!
//! # Invariants
//! - A chore may have zero, one or many assignment rows.
//! - Assignments are not unique per `(roommate, chore)` pair.

use super::{AssignmentId, ChoreId, RoommateId};
use serde::{Deserialize, Serialize};

/// One household chore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    /// `ChoreId::UNSET` until the chore is inserted.
    pub id: ChoreId,
    pub name: String,
}

impl Chore {
    /// Creates a chore that has not been persisted yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ChoreId::UNSET,
            name: name.into(),
        }
    }
}

/// Join record stating that a roommate currently holds a chore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub chore_id: ChoreId,
    pub roommate_id: RoommateId,
}
