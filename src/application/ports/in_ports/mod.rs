mod offer_use_cases;
mod room_use_cases;
mod user_use_cases;

pub use offer_use_cases::{OfferAdminUseCase, OfferCatalogUseCase};
pub use room_use_cases::{RoomAdminUseCase, RoomCatalogUseCase};
pub use user_use_cases::{UserAuthenticationUseCase, UserProfileUseCase, UserRegistrationUseCase};
