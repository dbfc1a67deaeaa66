use actix_web::{error::InternalError, web, HttpResponse, Resource, Scope};
use serde_json::json;
use tracing::debug;

use super::auth_handlers::{current_user, login_user, register_user};
use super::error::MessageBody;
use super::offer_handlers::{
    create_offer, delete_offer, get_offer, get_offer_by_code, list_active_offers, list_offers,
    update_offer,
};
use super::room_handlers::{
    create_room, delete_room, get_room, list_available_rooms, list_rooms, list_rooms_by_type,
    update_room,
};
use super::state::AppState;

/// Every body that fails to parse as the expected JSON gets the same 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(MessageBody {
                message: "Invalid JSON payload",
            }),
        )
        .into()
    })
}

pub async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MessageBody {
        message: "Route not found",
    })
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(MessageBody {
        message: "Method not allowed",
    })
}

/// A resource whose unmatched methods answer with a JSON 405.
fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(method_not_allowed))
}

async fn health(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok", "store": data.store }))
}

pub fn auth_routes() -> Scope {
    web::scope("/auth")
        .service(resource("/register").route(web::post().to(register_user)))
        .service(resource("/login").route(web::post().to(login_user)))
        .service(resource("/me").route(web::get().to(current_user)))
}

// Fixed segments are registered ahead of `/{id}` so they are matched first.
pub fn room_routes() -> Scope {
    web::scope("/rooms")
        .service(
            resource("")
                .route(web::get().to(list_rooms))
                .route(web::post().to(create_room)),
        )
        .service(resource("/available").route(web::get().to(list_available_rooms)))
        .service(resource("/type/{type}").route(web::get().to(list_rooms_by_type)))
        .service(
            resource("/{id}")
                .route(web::get().to(get_room))
                .route(web::put().to(update_room))
                .route(web::delete().to(delete_room)),
        )
}

pub fn offer_routes() -> Scope {
    web::scope("/offers")
        .service(
            resource("")
                .route(web::get().to(list_offers))
                .route(web::post().to(create_offer)),
        )
        .service(resource("/active").route(web::get().to(list_active_offers)))
        .service(resource("/code/{code}").route(web::get().to(get_offer_by_code)))
        .service(
            resource("/{id}")
                .route(web::get().to(get_offer))
                .route(web::put().to(update_offer))
                .route(web::delete().to(delete_offer)),
        )
}

/// Mounts the whole API under `/api`, together with its JSON settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .service(resource("/health").route(web::get().to(health)))
            .service(auth_routes())
            .service(room_routes())
            .service(offer_routes()),
    );
}
