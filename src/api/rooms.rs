use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_derive::Deserialize;

use super::utils::{int_from_number_or_string, non_empty, parse_id_param};
use super::AppState;
use crate::error::ApiError;
use crate::models::RoomId;
use crate::store::{NewRoom, RoomPatch};

#[derive(Deserialize, Debug)]
pub struct RoomQuery {
    id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct RoomBody {
    name: Option<String>,
    #[serde(default, deserialize_with = "int_from_number_or_string")]
    capacity: Option<u32>,
    features: Option<Vec<String>>,
}

#[get("/api/rooms")]
pub async fn list_rooms(
    state: web::Data<AppState>,
    query: web::Query<RoomQuery>,
) -> Result<HttpResponse, ApiError> {
    let store = state.store.lock();

    if let Some(id) = parse_id_param("id", query.id.as_deref())? {
        return Ok(HttpResponse::Ok().json(store.room(id)?));
    }

    Ok(HttpResponse::Ok().json(store.rooms()))
}

#[post("/api/rooms")]
pub async fn create_room(
    state: web::Data<AppState>,
    body: web::Json<RoomBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let (Some(name), Some(capacity)) = (non_empty(body.name), body.capacity.filter(|c| *c > 0))
    else {
        return Err(ApiError::BadRequest(
            "Name and capacity are required.".to_string(),
        ));
    };

    let room = state.store.lock().create_room(NewRoom {
        name,
        capacity,
        features: body.features.unwrap_or_default(),
    });
    Ok(HttpResponse::Created().json(room))
}

#[put("/api/rooms/{id}")]
pub async fn update_room(
    state: web::Data<AppState>,
    id: web::Path<RoomId>,
    body: web::Json<RoomBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let patch = RoomPatch {
        name: non_empty(body.name),
        capacity: body.capacity.filter(|c| *c > 0),
        features: body.features,
    };

    let room = state.store.lock().update_room(id.into_inner(), patch)?;
    Ok(HttpResponse::Ok().json(room))
}

#[delete("/api/rooms/{id}")]
pub async fn delete_room(
    state: web::Data<AppState>,
    id: web::Path<RoomId>,
) -> Result<HttpResponse, ApiError> {
    let room = state.store.lock().delete_room(id.into_inner())?;
    Ok(HttpResponse::Ok().json(room))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use crate::api::{configure, test_support::seeded_state};
    use crate::error::ErrorBody;
    use crate::models::Room;

    #[actix_web::test]
    async fn list_rooms_returns_catalog() {
        let app = test::init_service(App::new().app_data(seeded_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/rooms").to_request();
        let rooms: Vec<Room> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rooms.len(), 8);
        assert_eq!(rooms[0].name, "The Forge");
    }

    #[actix_web::test]
    async fn get_room_by_id() {
        let app = test::init_service(App::new().app_data(seeded_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/rooms?id=3").to_request();
        let room: Room = test::call_and_read_body_json(&app, req).await;
        assert_eq!(room.name, "Focus Pod");

        let req = test::TestRequest::get().uri("/api/rooms?id=99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Room not found");

        let req = test::TestRequest::get().uri("/api/rooms?id=abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn create_room_assigns_next_id() {
        let app = test::init_service(App::new().app_data(seeded_state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/rooms")
            .set_json(json!({ "name": "Attic", "capacity": "3" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let room: Room = test::read_body_json(resp).await;
        assert_eq!(
            room,
            Room {
                id: 9,
                name: "Attic".to_string(),
                capacity: 3,
                features: vec![],
            }
        );
    }

    #[actix_web::test]
    async fn create_room_requires_name_and_capacity() {
        let app = test::init_service(App::new().app_data(seeded_state()).configure(configure)).await;
        for body in [
            json!({ "capacity": 3 }),
            json!({ "name": "Attic" }),
            json!({ "name": "", "capacity": 3 }),
            json!({ "name": "Attic", "capacity": 0 }),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/rooms")
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn malformed_json_is_bad_request() {
        let app = test::init_service(App::new().app_data(seeded_state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/rooms")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert!(body.error.starts_with("Invalid JSON body"));
    }

    #[actix_web::test]
    async fn update_room_keeps_omitted_fields() {
        let app = test::init_service(App::new().app_data(seeded_state()).configure(configure)).await;
        let req = test::TestRequest::put()
            .uri("/api/rooms/2")
            .set_json(json!({ "capacity": 6 }))
            .to_request();
        let room: Room = test::call_and_read_body_json(&app, req).await;
        assert_eq!(room.name, "Crystal Room");
        assert_eq!(room.capacity, 6);
        assert_eq!(room.features, vec!["TV Screen", "Whiteboard"]);

        let req = test::TestRequest::put()
            .uri("/api/rooms/2")
            .set_json(json!({ "features": [] }))
            .to_request();
        let room: Room = test::call_and_read_body_json(&app, req).await;
        assert_eq!(room.capacity, 6);
        assert!(room.features.is_empty());

        let req = test::TestRequest::put()
            .uri("/api/rooms/99")
            .set_json(json!({ "capacity": 6 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_room_returns_removed_room() {
        let state = seeded_state();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(configure)).await;
        let req = test::TestRequest::delete().uri("/api/rooms/7").to_request();
        let room: Room = test::call_and_read_body_json(&app, req).await;
        assert_eq!(room.name, "Quiet Corner");
        assert!(state.store.lock().room(7).is_err());

        for uri in ["/api/rooms/7", "/api/rooms/seven"] {
            let req = test::TestRequest::delete().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        }
    }
}
