use async_trait::async_trait;

use crate::domain::entities::room::{Room, RoomFilter};
use anyhow::Result;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn find(&self, filter: RoomFilter) -> Result<Vec<Room>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Room>>;
    async fn create(&self, room: &Room) -> Result<Room>;
    /// Replaces the stored room if its version still equals `room.version`,
    /// and returns it with the version bumped. `None` if the id is unknown
    /// or the stored room changed since it was read.
    async fn update(&self, room: &Room) -> Result<Option<Room>>;
    /// Removes and returns the room, or `None` if the id is unknown.
    async fn delete(&self, id: &str) -> Result<Option<Room>>;
    async fn delete_all(&self) -> Result<u64>;
    async fn insert_many(&self, rooms: &[Room]) -> Result<()>;
}
