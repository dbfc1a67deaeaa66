use actix_web::{web, HttpResponse};
use serde::Serialize;

use super::error::MessageBody;
use super::state::AppState;
use crate::application::ports::in_ports::{RoomAdminUseCase, RoomCatalogUseCase};
use crate::domain::entities::room::{NewRoom, Room, RoomChanges};
use crate::domain::DomainError;

#[derive(Serialize)]
struct RoomList {
    rooms: Vec<Room>,
}

#[derive(Serialize)]
struct RoomBody {
    room: Room,
}

#[derive(Serialize)]
struct RoomChanged {
    message: &'static str,
    room: Room,
}

fn list(rooms: Vec<Room>) -> HttpResponse {
    HttpResponse::Ok().json(RoomList { rooms })
}

pub async fn list_rooms(data: web::Data<AppState>) -> Result<HttpResponse, DomainError> {
    Ok(list(data.room_service.list_rooms().await?))
}

pub async fn list_available_rooms(data: web::Data<AppState>) -> Result<HttpResponse, DomainError> {
    Ok(list(data.room_service.list_available_rooms().await?))
}

pub async fn list_rooms_by_type(
    data: web::Data<AppState>,
    room_type: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    Ok(list(data.room_service.list_rooms_by_type(&room_type).await?))
}

pub async fn get_room(
    data: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let room = data.room_service.get_room(&id).await?;
    Ok(HttpResponse::Ok().json(RoomBody { room }))
}

pub async fn create_room(
    data: web::Data<AppState>,
    body: web::Json<NewRoom>,
) -> Result<HttpResponse, DomainError> {
    let room = data.room_service.create_room(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(RoomChanged {
        message: "Room created successfully",
        room,
    }))
}

pub async fn update_room(
    data: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<RoomChanges>,
) -> Result<HttpResponse, DomainError> {
    let room = data.room_service.update_room(&id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(RoomChanged {
        message: "Room updated successfully",
        room,
    }))
}

pub async fn delete_room(
    data: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    data.room_service.delete_room(&id).await?;
    Ok(HttpResponse::Ok().json(MessageBody {
        message: "Room deleted successfully",
    }))
}
