pub mod offer;
pub mod room;
pub mod user;

pub use offer::{NewOffer, Offer, OfferChanges, OfferFilter, OfferType};
pub use room::{NewRoom, Room, RoomChanges, RoomFilter, RoomType};
pub use user::{AuthToken, NewUser, User, UserLogin, UserSummary};

use crate::domain::error::{DomainError, DomainResult};

pub(crate) const MISSING_REQUIRED: &str = "All required fields must be provided";

/// Treats blank strings the same as absent ones.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A required field supplied on update must not be blank either.
pub(crate) fn required(value: String) -> DomainResult<String> {
    present(Some(value)).ok_or_else(|| DomainError::validation(MISSING_REQUIRED))
}
