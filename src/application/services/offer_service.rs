use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use validator::Validate;

use super::{EDIT_CONTENDED, UPDATE_ATTEMPTS};
use crate::application::ports::in_ports::{OfferAdminUseCase, OfferCatalogUseCase};
use crate::domain::entities::offer::{NewOffer, Offer, OfferChanges, OfferFilter};
use crate::domain::repositories::{OfferRepository, OfferWrite};
use crate::domain::{DomainError, DomainResult};

const OFFER_NOT_FOUND: &str = "Offer not found";
const BAD_CODE: &str = "Invalid or expired offer code";
const CODE_TAKEN: &str = "Offer code already exists";

pub struct OfferService {
    offer_repository: Arc<dyn OfferRepository>,
}

impl OfferService {
    pub fn new(offer_repository: Arc<dyn OfferRepository>) -> Self {
        Self { offer_repository }
    }
}

#[async_trait]
impl OfferCatalogUseCase for OfferService {
    async fn list_offers(&self) -> DomainResult<Vec<Offer>> {
        Ok(self.offer_repository.find(OfferFilter::default()).await?)
    }

    async fn list_active_offers(&self) -> DomainResult<Vec<Offer>> {
        let now = Utc::now();
        let mut offers = self.offer_repository.find(OfferFilter::active()).await?;
        offers.retain(|offer| offer.is_live_at(now));
        Ok(offers)
    }

    async fn get_offer(&self, id: &str) -> DomainResult<Offer> {
        self.offer_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(OFFER_NOT_FOUND))
    }

    async fn redeem_code(&self, code: &str) -> DomainResult<Offer> {
        let now = Utc::now();
        self.offer_repository
            .find_by_code(code)
            .await?
            .filter(|offer| offer.is_live_at(now))
            .ok_or_else(|| DomainError::not_found(BAD_CODE))
    }
}

#[async_trait]
impl OfferAdminUseCase for OfferService {
    async fn create_offer(&self, new_offer: NewOffer) -> DomainResult<Offer> {
        let offer = Offer::from_new(new_offer)?;
        offer.validate()?;

        match self.offer_repository.create(&offer).await? {
            OfferWrite::Written(created) => {
                info!(offer_id = %created.id, code = ?created.code, "created offer");
                Ok(created)
            }
            OfferWrite::CodeTaken | OfferWrite::Stale => Err(DomainError::conflict(CODE_TAKEN)),
        }
    }

    async fn update_offer(&self, id: &str, changes: OfferChanges) -> DomainResult<Offer> {
        for attempt in 1..=UPDATE_ATTEMPTS {
            let mut offer = self.get_offer(id).await?;
            offer.apply(changes.clone())?;
            offer.validate()?;

            match self.offer_repository.update(&offer).await? {
                OfferWrite::Written(updated) => {
                    info!(offer_id = %updated.id, version = updated.version, "updated offer");
                    return Ok(updated);
                }
                OfferWrite::CodeTaken => return Err(DomainError::conflict(CODE_TAKEN)),
                OfferWrite::Stale => {
                    debug!(offer_id = %id, attempt, "offer changed since read, merging again")
                }
            }
        }
        Err(DomainError::conflict(EDIT_CONTENDED))
    }

    async fn delete_offer(&self, id: &str) -> DomainResult<Offer> {
        let deleted = self
            .offer_repository
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found(OFFER_NOT_FOUND))?;
        info!(offer_id = %deleted.id, "deleted offer");
        Ok(deleted)
    }
}
