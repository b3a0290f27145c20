use chrono::NaiveDateTime;
use serde_derive::{Deserialize, Serialize};

use crate::time_slot::{timestamp_from_string, timestamp_to_string, TimeSlot};

pub type RoomId = u64;
pub type BookingId = u64;

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    pub features: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub room_id: RoomId,
    pub title: String,
    #[serde(
        serialize_with = "timestamp_to_string",
        deserialize_with = "timestamp_from_string"
    )]
    pub start: NaiveDateTime,
    #[serde(
        serialize_with = "timestamp_to_string",
        deserialize_with = "timestamp_from_string"
    )]
    pub end: NaiveDateTime,
}

impl Booking {
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.start, self.end)
    }
}
