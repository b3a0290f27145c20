mod bookings;
mod calendar;
mod rooms;
mod utils;

use actix_web::{get, web, HttpResponse, Responder};
use parking_lot::Mutex;

use crate::error::{self, ApiError};
use crate::store::Store;

/// Shared state. Handlers hold the lock for the whole request so every
/// check-then-write sequence is serialized.
pub struct AppState {
    pub store: Mutex<Store>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().body("RoomForge API is running...")
}

async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound("Resource not found".to_string()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error))
        .app_data(web::QueryConfig::default().error_handler(error::query_error))
        .app_data(web::PathConfig::default().error_handler(error::path_error))
        .service(index)
        .service(rooms::list_rooms)
        .service(rooms::create_room)
        .service(rooms::update_room)
        .service(rooms::delete_room)
        .service(calendar::room_calendar)
        .service(bookings::list_bookings)
        .service(bookings::create_booking)
        .service(bookings::update_booking)
        .service(bookings::delete_booking)
        .default_service(web::to(not_found));
}


#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};

    use super::{configure, test_support::seeded_state};
    use crate::error::ErrorBody;

    #[actix_web::test]
    async fn index_reports_running() {
        let app = test::init_service(App::new().app_data(seeded_state()).configure(configure)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "RoomForge API is running...");
    }

    #[actix_web::test]
    async fn unknown_route_is_json_404() {
        let app = test::init_service(App::new().app_data(seeded_state()).configure(configure)).await;
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/api/nope").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Resource not found");
    }
}
