use async_trait::async_trait;

use crate::domain::entities::room::{NewRoom, Room, RoomChanges};
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomCatalogUseCase: Send + Sync {
    async fn list_rooms(&self) -> DomainResult<Vec<Room>>;
    async fn list_available_rooms(&self) -> DomainResult<Vec<Room>>;
    async fn list_rooms_by_type(&self, room_type: &str) -> DomainResult<Vec<Room>>;
    async fn get_room(&self, id: &str) -> DomainResult<Room>;
}

#[async_trait]
pub trait RoomAdminUseCase: Send + Sync {
    async fn create_room(&self, new_room: NewRoom) -> DomainResult<Room>;
    async fn update_room(&self, id: &str, changes: RoomChanges) -> DomainResult<Room>;
    async fn delete_room(&self, id: &str) -> DomainResult<Room>;
}
