use async_trait::async_trait;

use crate::domain::entities::offer::{Offer, OfferFilter};
use anyhow::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum OfferWrite {
    Written(Offer),
    /// The offer is gone or changed since it was read.
    Stale,
    /// Another offer already holds this code.
    CodeTaken,
}

#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn find(&self, filter: OfferFilter) -> Result<Vec<Offer>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Offer>>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Offer>>;
    /// Never yields `Stale`.
    async fn create(&self, offer: &Offer) -> Result<OfferWrite>;
    /// Same version rule as `RoomRepository::update`, plus the code check.
    async fn update(&self, offer: &Offer) -> Result<OfferWrite>;
    async fn delete(&self, id: &str) -> Result<Option<Offer>>;
    async fn delete_all(&self) -> Result<u64>;
    async fn insert_many(&self, offers: &[Offer]) -> Result<()>;
}
