use async_trait::async_trait;

use crate::domain::entities::offer::{NewOffer, Offer, OfferChanges};
use crate::domain::DomainResult;

#[async_trait]
pub trait OfferCatalogUseCase: Send + Sync {
    async fn list_offers(&self) -> DomainResult<Vec<Offer>>;
    /// Offers switched on whose window contains the current instant.
    async fn list_active_offers(&self) -> DomainResult<Vec<Offer>>;
    async fn get_offer(&self, id: &str) -> DomainResult<Offer>;
    async fn redeem_code(&self, code: &str) -> DomainResult<Offer>;
}

#[async_trait]
pub trait OfferAdminUseCase: Send + Sync {
    async fn create_offer(&self, new_offer: NewOffer) -> DomainResult<Offer>;
    async fn update_offer(&self, id: &str, changes: OfferChanges) -> DomainResult<Offer>;
    async fn delete_offer(&self, id: &str) -> DomainResult<Offer>;
}
