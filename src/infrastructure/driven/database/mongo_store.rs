use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};

use crate::domain::entities::offer::{Offer, OfferFilter};
use crate::domain::entities::room::{Room, RoomFilter};
use crate::domain::entities::user::User;
use crate::domain::repositories::{OfferRepository, OfferWrite, RoomRepository, UserRepository};

const DUPLICATE_KEY: i32 = 11000;

pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connects and pings the server. The database comes from the URL path,
    /// or `fallback_db` when the URL names none.
    pub async fn connect(url: &str, fallback_db: &str) -> Result<Self> {
        let client = Client::with_uri_str(url)
            .await
            .context("Failed to parse database URL")?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(fallback_db));

        db.run_command(doc! { "ping": 1 })
            .await
            .context("Database did not answer ping")?;

        Ok(Self { db })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    fn rooms(&self) -> Collection<Room> {
        self.db.collection("rooms")
    }

    fn offers(&self) -> Collection<Offer> {
        self.db.collection("offers")
    }
}

/// Unique index violation, reported as a write error by inserts and as a
/// command error by `findAndModify`.
fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// Matches the stored document only while it still has the version the
/// caller read.
pub(crate) fn versioned(id: &str, version: i64) -> Document {
    doc! { "_id": id, "__v": version }
}

pub(crate) fn room_query(filter: &RoomFilter) -> Document {
    let mut query = Document::new();
    if let Some(available) = filter.available {
        query.insert("available", available);
    }
    if let Some(room_type) = filter.room_type {
        query.insert("type", room_type.as_str());
    }
    query
}

pub(crate) fn offer_query(filter: &OfferFilter) -> Document {
    let mut query = Document::new();
    if let Some(active) = filter.active {
        query.insert("active", active);
    }
    if let Some(code) = &filter.code {
        query.insert("code", code.as_str());
    }
    query
}

#[async_trait]
impl UserRepository for MongoStore {
    async fn create(&self, user: &User) -> Result<Option<User>> {
        match self.users().insert_one(user).await {
            Ok(_) => Ok(Some(user.clone())),
            Err(e) if is_duplicate_key(&e) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("Failed to insert user")),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users().find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let cursor = self.users().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl RoomRepository for MongoStore {
    async fn find(&self, filter: RoomFilter) -> Result<Vec<Room>> {
        let cursor = self.rooms().find(room_query(&filter)).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Room>> {
        Ok(self.rooms().find_one(doc! { "_id": id }).await?)
    }

    async fn create(&self, room: &Room) -> Result<Room> {
        self.rooms().insert_one(room).await.context("Failed to insert room")?;
        Ok(room.clone())
    }

    async fn update(&self, room: &Room) -> Result<Option<Room>> {
        let next = Room { version: room.version + 1, ..room.clone() };
        Ok(self
            .rooms()
            .find_one_and_replace(versioned(&room.id, room.version), &next)
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete(&self, id: &str) -> Result<Option<Room>> {
        Ok(self.rooms().find_one_and_delete(doc! { "_id": id }).await?)
    }

    async fn delete_all(&self) -> Result<u64> {
        Ok(self.rooms().delete_many(doc! {}).await?.deleted_count)
    }

    async fn insert_many(&self, rooms: &[Room]) -> Result<()> {
        if !rooms.is_empty() {
            self.rooms().insert_many(rooms).await.context("Failed to insert rooms")?;
        }
        Ok(())
    }
}

#[async_trait]
impl OfferRepository for MongoStore {
    async fn find(&self, filter: OfferFilter) -> Result<Vec<Offer>> {
        let cursor = self.offers().find(offer_query(&filter)).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Offer>> {
        Ok(self.offers().find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Offer>> {
        Ok(self.offers().find_one(doc! { "code": code }).await?)
    }

    async fn create(&self, offer: &Offer) -> Result<OfferWrite> {
        match self.offers().insert_one(offer).await {
            Ok(_) => Ok(OfferWrite::Written(offer.clone())),
            Err(e) if is_duplicate_key(&e) => Ok(OfferWrite::CodeTaken),
            Err(e) => Err(anyhow::Error::new(e).context("Failed to insert offer")),
        }
    }

    async fn update(&self, offer: &Offer) -> Result<OfferWrite> {
        let next = Offer { version: offer.version + 1, ..offer.clone() };
        let replaced = self
            .offers()
            .find_one_and_replace(versioned(&offer.id, offer.version), &next)
            .return_document(ReturnDocument::After)
            .await;
        match replaced {
            Ok(Some(updated)) => Ok(OfferWrite::Written(updated)),
            Ok(None) => Ok(OfferWrite::Stale),
            Err(e) if is_duplicate_key(&e) => Ok(OfferWrite::CodeTaken),
            Err(e) => Err(anyhow::Error::new(e).context("Failed to update offer")),
        }
    }

    async fn delete(&self, id: &str) -> Result<Option<Offer>> {
        Ok(self.offers().find_one_and_delete(doc! { "_id": id }).await?)
    }

    async fn delete_all(&self) -> Result<u64> {
        Ok(self.offers().delete_many(doc! {}).await?.deleted_count)
    }

    async fn insert_many(&self, offers: &[Offer]) -> Result<()> {
        if !offers.is_empty() {
            self.offers().insert_many(offers).await.context("Failed to insert offers")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::room::RoomType;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_filters_match_everything() {
        assert_eq!(room_query(&RoomFilter::default()), doc! {});
        assert_eq!(offer_query(&OfferFilter::default()), doc! {});
    }

    #[test]
    fn room_filters_use_stored_field_names() {
        let filter = RoomFilter {
            available: Some(true),
            room_type: Some(RoomType::Suite),
        };
        assert_eq!(room_query(&filter), doc! { "available": true, "type": "Suite" });
    }

    #[test]
    fn guarded_replace_pins_id_and_version() {
        assert_eq!(versioned("abc", 3), doc! { "_id": "abc", "__v": 3_i64 });
    }

    #[test]
    fn offer_filters_use_stored_field_names() {
        assert_eq!(offer_query(&OfferFilter::active()), doc! { "active": true });
        assert_eq!(offer_query(&OfferFilter::with_code("SPRING")), doc! { "code": "SPRING" });
    }
}
