//! File-backed stand-in for the document database.
//!
//! The whole store is one JSON document holding every collection. Each
//! operation reads it from disk, and mutations rewrite it in full through a
//! staging file that is renamed over the original. A mutex serializes
//! read-modify-write cycles within this process only, so every uniqueness
//! and version check runs inside the same `mutate` as the write it guards.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::entities::offer::{Offer, OfferFilter};
use crate::domain::entities::room::{Room, RoomFilter};
use crate::domain::entities::user::User;
use crate::domain::repositories::{OfferRepository, OfferWrite, RoomRepository, UserRepository};

#[derive(Debug, Default, Serialize, Deserialize)]
struct MockDatabase {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    rooms: Vec<Room>,
    #[serde(default)]
    offers: Vec<Offer>,
}

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens the store at `path`, writing an empty document if the file
    /// does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let store = Self { path, lock: Mutex::new(()) };
            store.write_db(&MockDatabase::default()).await?;
            info!(path = %store.path.display(), "initialized mock store");
            return Ok(store);
        }

        Ok(Self { path, lock: Mutex::new(()) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// An unreadable or corrupt file reads as an empty store.
    async fn read_db(&self) -> MockDatabase {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "mock store unreadable, treating as empty");
                return MockDatabase::default();
            }
        };
        serde_json::from_slice(&raw).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "mock store corrupt, treating as empty");
            MockDatabase::default()
        })
    }

    /// Sibling file each write lands in before replacing the store.
    fn staging_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn write_db(&self, db: &MockDatabase) -> Result<()> {
        let json = serde_json::to_vec_pretty(db).context("Failed to serialize mock store")?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, json)
            .await
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))
    }

    async fn mutate<T>(&self, f: impl FnOnce(&mut MockDatabase) -> T) -> Result<T> {
        let _guard = self.lock.lock().await;
        let mut db = self.read_db().await;
        let out = f(&mut db);
        self.write_db(&db).await?;
        Ok(out)
    }

    async fn query<T>(&self, f: impl FnOnce(MockDatabase) -> T) -> T {
        let _guard = self.lock.lock().await;
        f(self.read_db().await)
    }
}

#[async_trait]
impl UserRepository for JsonFileStore {
    async fn create(&self, user: &User) -> Result<Option<User>> {
        self.mutate(|db| {
            if db.users.iter().any(|u| u.email == user.email) {
                return None;
            }
            db.users.push(user.clone());
            Some(user.clone())
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.query(|db| db.users.into_iter().find(|u| u.id == id)).await)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.query(|db| db.users.into_iter().find(|u| u.email == email)).await)
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.query(|db| db.users).await)
    }
}

#[async_trait]
impl RoomRepository for JsonFileStore {
    async fn find(&self, filter: RoomFilter) -> Result<Vec<Room>> {
        Ok(self
            .query(|db| db.rooms.into_iter().filter(|r| filter.matches(r)).collect())
            .await)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Room>> {
        Ok(self.query(|db| db.rooms.into_iter().find(|r| r.id == id)).await)
    }

    async fn create(&self, room: &Room) -> Result<Room> {
        let room = room.clone();
        self.mutate(move |db| {
            db.rooms.push(room.clone());
            room
        })
        .await
    }

    async fn update(&self, room: &Room) -> Result<Option<Room>> {
        self.mutate(|db| {
            let slot = db
                .rooms
                .iter_mut()
                .find(|r| r.id == room.id && r.version == room.version)?;
            *slot = Room { version: room.version + 1, ..room.clone() };
            Some(slot.clone())
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<Option<Room>> {
        self.mutate(|db| {
            let pos = db.rooms.iter().position(|r| r.id == id)?;
            Some(db.rooms.remove(pos))
        })
        .await
    }

    async fn delete_all(&self) -> Result<u64> {
        self.mutate(|db| std::mem::take(&mut db.rooms).len() as u64).await
    }

    async fn insert_many(&self, rooms: &[Room]) -> Result<()> {
        self.mutate(|db| db.rooms.extend_from_slice(rooms)).await
    }
}

fn code_held_elsewhere(offers: &[Offer], offer: &Offer) -> bool {
    offer.code.as_deref().is_some_and(|code| {
        offers
            .iter()
            .any(|o| o.id != offer.id && o.code.as_deref() == Some(code))
    })
}

#[async_trait]
impl OfferRepository for JsonFileStore {
    async fn find(&self, filter: OfferFilter) -> Result<Vec<Offer>> {
        Ok(self
            .query(|db| db.offers.into_iter().filter(|o| filter.matches(o)).collect())
            .await)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Offer>> {
        Ok(self.query(|db| db.offers.into_iter().find(|o| o.id == id)).await)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Offer>> {
        Ok(self
            .query(|db| db.offers.into_iter().find(|o| o.code.as_deref() == Some(code)))
            .await)
    }

    async fn create(&self, offer: &Offer) -> Result<OfferWrite> {
        self.mutate(|db| {
            if code_held_elsewhere(&db.offers, offer) {
                return OfferWrite::CodeTaken;
            }
            db.offers.push(offer.clone());
            OfferWrite::Written(offer.clone())
        })
        .await
    }

    async fn update(&self, offer: &Offer) -> Result<OfferWrite> {
        self.mutate(|db| {
            if code_held_elsewhere(&db.offers, offer) {
                return OfferWrite::CodeTaken;
            }
            let Some(slot) = db
                .offers
                .iter_mut()
                .find(|o| o.id == offer.id && o.version == offer.version)
            else {
                return OfferWrite::Stale;
            };
            *slot = Offer { version: offer.version + 1, ..offer.clone() };
            OfferWrite::Written(slot.clone())
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<Option<Offer>> {
        self.mutate(|db| {
            let pos = db.offers.iter().position(|o| o.id == id)?;
            Some(db.offers.remove(pos))
        })
        .await
    }

    async fn delete_all(&self) -> Result<u64> {
        self.mutate(|db| std::mem::take(&mut db.offers).len() as u64).await
    }

    async fn insert_many(&self, offers: &[Offer]) -> Result<()> {
        self.mutate(|db| db.offers.extend_from_slice(offers)).await
    }
}
