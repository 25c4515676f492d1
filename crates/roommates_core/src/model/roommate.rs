//! Roommate domain model and its room-resolved read model.

use super::{RoomId, RoommateId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One person living in the house.
///
/// Read-only from the repository layer's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roommate {
    pub id: RoommateId,
    pub first_name: String,
    pub last_name: String,
    /// Share of the rent, in percent.
    pub rent_portion: i64,
    pub move_in_date: NaiveDate,
    /// Foreign key into `Room`. Not validated; the room may no longer exist.
    pub room_id: RoomId,
}

impl Roommate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Roommate joined with the display name of the room it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoommateDetail {
    #[serde(flatten)]
    pub roommate: Roommate,
    /// Denormalized `Room.Name`, distinct from `roommate.room_id`.
    pub room_name: String,
}
