//! Domain records for rooms, roommates, chores and chore assignments.
//!
//! # Responsibility
//! - Define the in-memory shapes repositories map rows into.
//! - Give every entity a distinct integer id type.
//!
//! # Invariants
//! - Ids are surrogate keys assigned by storage on insert.
//! - An id equal to `UNSET` (zero) marks a record that was never persisted.

pub mod chore;
pub mod room;
pub mod roommate;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Sentinel for records that storage has not assigned a key to yet.
            pub const UNSET: Self = Self(0);

            pub fn is_unset(self) -> bool {
                self == Self::UNSET
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Surrogate key of a `Room` row.
    RoomId
);
entity_id!(
    /// Surrogate key of a `Roommate` row.
    RoommateId
);
entity_id!(
    /// Surrogate key of a `Chore` row.
    ChoreId
);
entity_id!(
    /// Surrogate key of a `RoommateChore` assignment row.
    AssignmentId
);
