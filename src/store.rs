//! In-memory room catalog and booking ledger.
//!
//! Every booking write goes through [`Store::create_booking`] or
//! [`Store::update_booking`], which refuse to let two bookings of the same
//! room overlap.

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Booking, BookingId, Room, RoomId};
use crate::time_slot::TimeSlot;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Room not found")]
    RoomNotFound(RoomId),
    /// A booking references a room that is not in the catalog.
    #[error("Room does not exist")]
    UnknownRoom(RoomId),
    #[error("Booking not found")]
    BookingNotFound(BookingId),
    #[error("Room is already booked for this time slot")]
    Conflict { existing: BookingId },
    #[error("Room is already booked for this updated time slot")]
    UpdateConflict { existing: BookingId },
}

pub struct NewRoom {
    pub name: String,
    pub capacity: u32,
    pub features: Vec<String>,
}

/// Fields left as `None` keep their current value.
#[derive(Default)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub capacity: Option<u32>,
    pub features: Option<Vec<String>>,
}

pub struct NewBooking {
    pub room_id: RoomId,
    pub title: String,
    pub slot: TimeSlot,
}

/// Fields left as `None` keep their current value.
#[derive(Default)]
pub struct BookingPatch {
    pub room_id: Option<RoomId>,
    pub title: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

#[derive(Default, Debug)]
pub struct Store {
    rooms: Vec<Room>,
    bookings: Vec<Booking>,
}

impl Store {
    pub fn new(rooms: Vec<Room>, bookings: Vec<Booking>) -> Self {
        Self { rooms, bookings }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Result<&Room, StoreError> {
        self.rooms
            .iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::RoomNotFound(id))
    }

    pub fn create_room(&mut self, new_room: NewRoom) -> Room {
        let id = self.rooms.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let room = Room {
            id,
            name: new_room.name,
            capacity: new_room.capacity,
            features: new_room.features,
        };
        self.rooms.push(room.clone());
        info!(room_id = id, "created room");
        room
    }

    pub fn update_room(&mut self, id: RoomId, patch: RoomPatch) -> Result<Room, StoreError> {
        let room = self
            .rooms
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::RoomNotFound(id))?;

        if let Some(name) = patch.name {
            room.name = name;
        }
        if let Some(capacity) = patch.capacity {
            room.capacity = capacity;
        }
        if let Some(features) = patch.features {
            room.features = features;
        }
        info!(room_id = id, "updated room");
        Ok(room.clone())
    }

    /// Bookings that reference the room are left untouched.
    pub fn delete_room(&mut self, id: RoomId) -> Result<Room, StoreError> {
        let index = self
            .rooms
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::RoomNotFound(id))?;
        info!(room_id = id, "deleted room");
        Ok(self.rooms.remove(index))
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn bookings_for_room(&self, room_id: RoomId) -> impl Iterator<Item = &Booking> {
        self.bookings.iter().filter(move |b| b.room_id == room_id)
    }

    pub fn booking(&self, id: BookingId) -> Result<&Booking, StoreError> {
        self.bookings
            .iter()
            .find(|b| b.id == id)
            .ok_or(StoreError::BookingNotFound(id))
    }

    /// First booking of `room_id` whose slot overlaps `slot`, ignoring `exclude`.
    pub fn find_conflict(
        &self,
        room_id: RoomId,
        slot: &TimeSlot,
        exclude: Option<BookingId>,
    ) -> Option<&Booking> {
        self.bookings_for_room(room_id)
            .filter(|b| Some(b.id) != exclude)
            .find(|b| b.slot().overlaps(slot))
    }

    pub fn create_booking(&mut self, new_booking: NewBooking) -> Result<Booking, StoreError> {
        if self.room(new_booking.room_id).is_err() {
            warn!(room_id = new_booking.room_id, "booking references unknown room");
            return Err(StoreError::UnknownRoom(new_booking.room_id));
        }

        if let Some(existing) = self.find_conflict(new_booking.room_id, &new_booking.slot, None) {
            warn!(
                room_id = new_booking.room_id,
                existing = existing.id,
                "rejected overlapping booking"
            );
            return Err(StoreError::Conflict {
                existing: existing.id,
            });
        }

        let id = self.bookings.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let booking = Booking {
            id,
            room_id: new_booking.room_id,
            title: new_booking.title,
            start: new_booking.slot.start,
            end: new_booking.slot.end,
        };
        self.bookings.push(booking.clone());
        info!(booking_id = id, room_id = booking.room_id, "created booking");
        Ok(booking)
    }

    pub fn update_booking(
        &mut self,
        id: BookingId,
        patch: BookingPatch,
    ) -> Result<Booking, StoreError> {
        let current = self.booking(id)?;
        let room_id = patch.room_id.unwrap_or(current.room_id);
        let slot = TimeSlot::new(
            patch.start.unwrap_or(current.start),
            patch.end.unwrap_or(current.end),
        );

        if patch.room_id.is_some_and(|r| r != current.room_id) && self.room(room_id).is_err() {
            warn!(booking_id = id, room_id, "booking moved to unknown room");
            return Err(StoreError::UnknownRoom(room_id));
        }

        if let Some(existing) = self.find_conflict(room_id, &slot, Some(id)) {
            warn!(
                booking_id = id,
                room_id,
                existing = existing.id,
                "rejected overlapping booking update"
            );
            return Err(StoreError::UpdateConflict {
                existing: existing.id,
            });
        }

        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::BookingNotFound(id))?;
        booking.room_id = room_id;
        if let Some(title) = patch.title {
            booking.title = title;
        }
        booking.start = slot.start;
        booking.end = slot.end;
        info!(booking_id = id, room_id, "updated booking");
        Ok(booking.clone())
    }

    pub fn delete_booking(&mut self, id: BookingId) -> Result<Booking, StoreError> {
        let index = self
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(StoreError::BookingNotFound(id))?;
        info!(booking_id = id, "deleted booking");
        Ok(self.bookings.remove(index))
    }
}
