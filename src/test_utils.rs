use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tempfile::TempDir;

use crate::domain::entities::offer::NewOffer;
use crate::domain::entities::room::NewRoom;
use crate::domain::repositories::{OfferRepository, RoomRepository, UserRepository};
use crate::infrastructure::driven::mock::JsonFileStore;

/// A mock store in a throwaway directory. The directory lives as long as
/// this value.
pub struct TestStore {
    _dir: TempDir,
    store: Arc<JsonFileStore>,
}

impl TestStore {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = JsonFileStore::open(dir.path().join("mockdb.json"))
            .await
            .expect("open mock store");
        Self { _dir: dir, store: Arc::new(store) }
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.store.clone()
    }

    pub fn rooms(&self) -> Arc<dyn RoomRepository> {
        self.store.clone()
    }

    pub fn offers(&self) -> Arc<dyn OfferRepository> {
        self.store.clone()
    }
}

pub struct TestFixtures;

impl TestFixtures {
    pub fn new_room(name: &str, room_type: &str) -> NewRoom {
        NewRoom {
            name: Some(name.to_string()),
            description: Some(format!("{} room", room_type)),
            room_type: Some(room_type.to_string()),
            price: Some(150.0),
            capacity: Some(2),
            amenities: Some(vec!["Free WiFi".into(), "Air Conditioning".into()]),
            images: None,
        }
    }

    /// An offer whose window started yesterday and ends in a week.
    pub fn live_offer(title: &str, code: Option<&str>) -> NewOffer {
        let now = Utc::now();
        NewOffer {
            code: code.map(str::to_string),
            ..Self::offer_between(title, now - Duration::days(1), now + Duration::days(7))
        }
    }

    pub fn offer_between(title: &str, from: DateTime<Utc>, until: DateTime<Utc>) -> NewOffer {
        NewOffer {
            title: Some(title.to_string()),
            description: Some(format!("{} description", title)),
            discount: Some(15.0),
            offer_type: None,
            applicable_room_types: Some(vec!["Suite".into(), "Deluxe".into()]),
            valid_from: Some(from.to_rfc3339()),
            valid_until: Some(until.to_rfc3339()),
            image: None,
            code: None,
        }
    }
}
