use tracing::warn;

use crate::models::{Booking, Room};
use crate::store::Store;
use crate::time_slot::parse_timestamp;

const ROOMS: &[(u64, &str, u32, &[&str])] = &[
    (1, "The Forge", 12, &["Projector", "Whiteboard", "Video Conferencing"]),
    (2, "Crystal Room", 4, &["TV Screen", "Whiteboard"]),
    (3, "Focus Pod", 1, &["Soundproofing"]),
    (4, "Innovation Hub", 20, &["Projector", "Whiteboard", "Video Conferencing", "WiFi"]),
    (5, "Executive Suite", 8, &["TV Screen", "Video Conferencing", "Whiteboard", "Air Conditioning"]),
    (6, "Brainstorm Bay", 6, &["Whiteboard", "TV Screen"]),
    (7, "Quiet Corner", 2, &["Soundproofing", "WiFi"]),
    (8, "Tech Lab", 15, &["Projector", "Video Conferencing", "Whiteboard", "WiFi"]),
];

const BOOKINGS: &[(u64, u64, &str, &str, &str)] = &[
    (101, 1, "Team Sync", "2025-11-24T09:00", "2025-11-24T10:00"),
    (102, 4, "Q4 Strategy Planning", "2025-11-23T14:00", "2025-11-23T16:30"),
    (103, 2, "Client Presentation", "2025-11-25T10:00", "2025-11-25T11:30"),
    (104, 5, "Board Meeting", "2025-11-26T09:00", "2025-11-26T12:00"),
    (105, 3, "Focus Time - Code Review", "2025-11-23T13:00", "2025-11-23T14:00"),
    (106, 8, "Product Demo", "2025-11-24T15:00", "2025-11-24T16:00"),
    (107, 6, "Design Sprint Workshop", "2025-11-27T10:00", "2025-11-27T12:00"),
    (108, 1, "All Hands Meeting", "2025-11-28T09:00", "2025-11-28T10:30"),
    (109, 7, "1-on-1 with Manager", "2025-11-23T11:00", "2025-11-23T11:30"),
    (110, 4, "Training Session - New Software", "2025-11-29T13:00", "2025-11-29T15:00"),
    (111, 2, "Budget Review", "2025-11-24T11:00", "2025-11-24T12:00"),
    (112, 5, "Investor Pitch", "2025-11-25T14:00", "2025-11-25T15:30"),
    (113, 8, "Engineering Standup", "2025-11-23T09:30", "2025-11-23T10:00"),
    (114, 6, "Marketing Campaign Review", "2025-11-26T15:00", "2025-11-26T16:30"),
    (115, 3, "Deep Work Session", "2025-11-27T14:00", "2025-11-27T16:00"),
];

/// The demo catalog the server starts with.
pub fn catalog() -> Store {
    let rooms = ROOMS
        .iter()
        .map(|(id, name, capacity, features)| Room {
            id: *id,
            name: name.to_string(),
            capacity: *capacity,
            features: features.iter().map(|f| f.to_string()).collect(),
        })
        .collect();

    let bookings = BOOKINGS
        .iter()
        .filter_map(|(id, room_id, title, start, end)| {
            match (parse_timestamp(start), parse_timestamp(end)) {
                (Some(start), Some(end)) => Some(Booking {
                    id: *id,
                    room_id: *room_id,
                    title: title.to_string(),
                    start,
                    end,
                }),
                _ => {
                    warn!(booking_id = id, "skipping seed booking with bad timestamps");
                    None
                }
            }
        })
        .collect();

    Store::new(rooms, bookings)
}
