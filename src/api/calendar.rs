use actix_web::{get, web, HttpResponse};
use chrono::NaiveDateTime;
use ics::{
    escape_text,
    properties::{DtEnd, DtStart, Location, Summary},
    Event, ICalendar,
};

use super::AppState;
use crate::error::ApiError;
use crate::models::{Booking, Room, RoomId};

/// Floating local time, matching how bookings are stored.
const EVENT_DT_FORMAT: &str = "%Y%m%dT%H%M%S";
const STAMP_DT_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// A room together with its bookings, ready to render as iCalendar.
pub struct RoomCalendar<'r> {
    pub room: &'r Room,
    pub bookings: Vec<&'r Booking>,
}

#[cfg(test)]
fn current_time() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2012, 11, 11)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

#[cfg(not(test))]
fn current_time() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

impl<'a> From<RoomCalendar<'_>> for ICalendar<'a> {
    fn from(calendar: RoomCalendar<'_>) -> Self {
        let mut ical = ICalendar::new("2.0", "roomforge");
        let stamp = current_time().format(STAMP_DT_FORMAT).to_string();

        for booking in calendar.bookings {
            let mut event = Event::new(booking.id.to_string(), stamp.clone());
            event.push(DtStart::new(booking.start.format(EVENT_DT_FORMAT).to_string()));
            event.push(DtEnd::new(booking.end.format(EVENT_DT_FORMAT).to_string()));
            event.push(Summary::new(escape_text(booking.title.clone())));
            event.push(Location::new(escape_text(calendar.room.name.clone())));
            ical.add_event(event);
        }
        ical
    }
}

#[get("/api/rooms/{id}/calendar.ics")]
pub async fn room_calendar(
    state: web::Data<AppState>,
    id: web::Path<RoomId>,
) -> Result<HttpResponse, ApiError> {
    let store = state.store.lock();
    let room = store.room(id.into_inner())?;
    let calendar: ICalendar = RoomCalendar {
        room,
        bookings: store.bookings_for_room(room.id).collect(),
    }
    .into();

    Ok(HttpResponse::Ok()
        .content_type("text/calendar; charset=utf-8")
        .body(calendar.to_string()))
}
