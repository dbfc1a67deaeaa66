use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use validator::Validate;

use super::{EDIT_CONTENDED, UPDATE_ATTEMPTS};
use crate::application::ports::in_ports::{RoomAdminUseCase, RoomCatalogUseCase};
use crate::domain::entities::room::{NewRoom, Room, RoomChanges, RoomFilter, RoomType};
use crate::domain::repositories::RoomRepository;
use crate::domain::{DomainError, DomainResult};

const ROOM_NOT_FOUND: &str = "Room not found";

pub struct RoomService {
    room_repository: Arc<dyn RoomRepository>,
}

impl RoomService {
    pub fn new(room_repository: Arc<dyn RoomRepository>) -> Self {
        Self { room_repository }
    }
}

#[async_trait]
impl RoomCatalogUseCase for RoomService {
    async fn list_rooms(&self) -> DomainResult<Vec<Room>> {
        Ok(self.room_repository.find(RoomFilter::default()).await?)
    }

    async fn list_available_rooms(&self) -> DomainResult<Vec<Room>> {
        Ok(self.room_repository.find(RoomFilter::available()).await?)
    }

    async fn list_rooms_by_type(&self, room_type: &str) -> DomainResult<Vec<Room>> {
        // No room can hold a type outside the enum, so nothing matches.
        let Ok(room_type) = room_type.parse::<RoomType>() else {
            return Ok(Vec::new());
        };
        Ok(self.room_repository.find(RoomFilter::of_type(room_type)).await?)
    }

    async fn get_room(&self, id: &str) -> DomainResult<Room> {
        self.room_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ROOM_NOT_FOUND))
    }
}

#[async_trait]
impl RoomAdminUseCase for RoomService {
    async fn create_room(&self, new_room: NewRoom) -> DomainResult<Room> {
        let room = Room::from_new(new_room)?;
        room.validate()?;

        let created = self.room_repository.create(&room).await?;
        info!(room_id = %created.id, room_type = %created.room_type, "created room");
        Ok(created)
    }

    async fn update_room(&self, id: &str, changes: RoomChanges) -> DomainResult<Room> {
        for attempt in 1..=UPDATE_ATTEMPTS {
            let mut room = self.get_room(id).await?;
            room.apply(changes.clone())?;
            room.validate()?;

            if let Some(updated) = self.room_repository.update(&room).await? {
                info!(room_id = %updated.id, version = updated.version, "updated room");
                return Ok(updated);
            }
            debug!(room_id = %id, attempt, "room changed since read, merging again");
        }
        Err(DomainError::conflict(EDIT_CONTENDED))
    }

    async fn delete_room(&self, id: &str) -> DomainResult<Room> {
        let deleted = self
            .room_repository
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ROOM_NOT_FOUND))?;
        info!(room_id = %deleted.id, "deleted room");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestFixtures, TestStore};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn capacity_eleven_is_rejected_and_not_stored() {
        let store = TestStore::new().await;
        let rooms = RoomService::new(store.rooms());

        let err = rooms
            .create_room(NewRoom { capacity: Some(11), ..TestFixtures::new_room("Big", "Suite") })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("capacity")));
        assert!(rooms.list_rooms().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn by_type_returns_exactly_that_subset() {
        let store = TestStore::new().await;
        let rooms = RoomService::new(store.rooms());
        for (name, room_type) in [("A", "Suite"), ("B", "Twin"), ("C", "Suite"), ("D", "Deluxe")] {
            rooms.create_room(TestFixtures::new_room(name, room_type)).await.unwrap();
        }

        let mut names: Vec<String> = rooms
            .list_rooms_by_type("Suite")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["A".to_string(), "C".to_string()]);
        assert!(rooms.list_rooms_by_type("Penthouse").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn available_excludes_booked_out_rooms() {
        let store = TestStore::new().await;
        let rooms = RoomService::new(store.rooms());
        let open = rooms.create_room(TestFixtures::new_room("Open", "Single")).await.unwrap();
        let closed = rooms.create_room(TestFixtures::new_room("Closed", "Single")).await.unwrap();
        rooms
            .update_room(&closed.id, RoomChanges { available: Some(false), ..Default::default() })
            .await
            .unwrap();

        let available = rooms.list_available_rooms().await.unwrap();

        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, open.id);
    }

    #[tokio::test]
    async fn update_is_revalidated() {
        let store = TestStore::new().await;
        let rooms = RoomService::new(store.rooms());
        let room = rooms.create_room(TestFixtures::new_room("A", "Double")).await.unwrap();

        let err = rooms
            .update_room(&room.id, RoomChanges { rating: Some(7.0), ..Default::default() })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(rooms.get_room(&room.id).await.unwrap().rating, room.rating);
    }

    #[tokio::test]
    async fn blanking_the_name_is_rejected() {
        let store = TestStore::new().await;
        let rooms = RoomService::new(store.rooms());
        let room = rooms.create_room(TestFixtures::new_room("A", "Double")).await.unwrap();

        let err = rooms
            .update_room(&room.id, RoomChanges { name: Some(String::new()), ..Default::default() })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(rooms.get_room(&room.id).await.unwrap().name, "A");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_to_different_fields_both_land() {
        let store = TestStore::new().await;
        let rooms = Arc::new(RoomService::new(store.rooms()));

        for _ in 0..20 {
            let room = rooms.create_room(TestFixtures::new_room("A", "Double")).await.unwrap();
            let price = {
                let (rooms, id) = (rooms.clone(), room.id.clone());
                tokio::spawn(async move {
                    rooms
                        .update_room(&id, RoomChanges { price: Some(999.0), ..Default::default() })
                        .await
                })
            };
            let availability = {
                let (rooms, id) = (rooms.clone(), room.id.clone());
                tokio::spawn(async move {
                    rooms
                        .update_room(&id, RoomChanges { available: Some(false), ..Default::default() })
                        .await
                })
            };
            price.await.unwrap().unwrap();
            availability.await.unwrap().unwrap();

            let stored = rooms.get_room(&room.id).await.unwrap();
            assert_eq!(stored.price, 999.0);
            assert!(!stored.available);
            assert_eq!(stored.version, 2);
        }
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = TestStore::new().await;
        let rooms = RoomService::new(store.rooms());

        assert!(matches!(rooms.get_room("missing").await, Err(DomainError::NotFound(_))));
        assert!(matches!(rooms.delete_room("missing").await, Err(DomainError::NotFound(_))));
        assert!(matches!(
            rooms.update_room("missing", RoomChanges::default()).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_room() {
        let store = TestStore::new().await;
        let rooms = RoomService::new(store.rooms());
        let room = rooms.create_room(TestFixtures::new_room("A", "Twin")).await.unwrap();

        assert_eq!(rooms.delete_room(&room.id).await.unwrap().id, room.id);
        assert!(matches!(rooms.get_room(&room.id).await, Err(DomainError::NotFound(_))));
    }
}
