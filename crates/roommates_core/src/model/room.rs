//! Room domain model.

use super::RoomId;
use serde::{Deserialize, Serialize};

/// One room of the house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// `RoomId::UNSET` until the room is inserted.
    pub id: RoomId,
    pub name: String,
    /// Upper bound on roommates living in this room. Storage rejects negatives.
    pub max_occupancy: i64,
}

impl Room {
    /// Creates a room that has not been persisted yet.
    pub fn new(name: impl Into<String>, max_occupancy: i64) -> Self {
        Self {
            id: RoomId::UNSET,
            name: name.into(),
            max_occupancy,
        }
    }
}
