use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_derive::Deserialize;

use super::utils::{int_from_number_or_string, non_empty, parse_id_param};
use super::AppState;
use crate::error::ApiError;
use crate::models::{BookingId, RoomId};
use crate::store::{BookingPatch, NewBooking};
use crate::time_slot::{parse_timestamp, TimeSlot, TimeSlotParseError};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    id: Option<String>,
    room_id: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingBody {
    #[serde(default, deserialize_with = "int_from_number_or_string")]
    room_id: Option<RoomId>,
    title: Option<String>,
    start: Option<String>,
    end: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
}

#[get("/api/bookings")]
pub async fn list_bookings(
    state: web::Data<AppState>,
    query: web::Query<BookingQuery>,
) -> Result<HttpResponse, ApiError> {
    let store = state.store.lock();

    if let Some(id) = parse_id_param("id", query.id.as_deref())? {
        return Ok(HttpResponse::Ok().json(store.booking(id)?));
    }

    if let Some(room_id) = parse_id_param("roomId", query.room_id.as_deref())? {
        let bookings: Vec<_> = store.bookings_for_room(room_id).collect();
        return Ok(HttpResponse::Ok().json(bookings));
    }

    Ok(HttpResponse::Ok().json(store.bookings()))
}

#[post("/api/bookings")]
pub async fn create_booking(
    state: web::Data<AppState>,
    body: web::Json<BookingBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let (Some(room_id), Some(title), Some(start), Some(end)) = (
        body.room_id.filter(|id| *id != 0),
        non_empty(body.title),
        non_empty(body.start),
        non_empty(body.end),
    ) else {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    };

    let slot = TimeSlot::parse(&start, &end)?;
    let booking = state.store.lock().create_booking(NewBooking {
        room_id,
        title,
        slot,
    })?;
    Ok(HttpResponse::Created().json(booking))
}

#[put("/api/bookings/{id}")]
pub async fn update_booking(
    state: web::Data<AppState>,
    id: web::Path<BookingId>,
    body: web::Json<BookingBody>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let body = body.into_inner();
    let mut store = state.store.lock();
    store.booking(id)?;

    let start = non_empty(body.start).or_else(|| non_empty(body.start_time));
    let end = non_empty(body.end).or_else(|| non_empty(body.end_time));
    let patch = BookingPatch {
        room_id: body.room_id.filter(|id| *id != 0),
        title: non_empty(body.title),
        start: start
            .map(|s| parse_timestamp(&s).ok_or(TimeSlotParseError::StartDate(s)))
            .transpose()?,
        end: end
            .map(|s| parse_timestamp(&s).ok_or(TimeSlotParseError::EndDate(s)))
            .transpose()?,
    };

    let booking = store.update_booking(id, patch)?;
    Ok(HttpResponse::Ok().json(booking))
}

#[delete("/api/bookings/{id}")]
pub async fn delete_booking(
    state: web::Data<AppState>,
    id: web::Path<BookingId>,
) -> Result<HttpResponse, ApiError> {
    let booking = state.store.lock().delete_booking(id.into_inner())?;
    Ok(HttpResponse::Ok().json(booking))
}
