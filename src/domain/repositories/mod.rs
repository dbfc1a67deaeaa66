pub mod offer_repository;
pub mod room_repository;
pub mod user_repository;

pub use offer_repository::{OfferRepository, OfferWrite};
pub use room_repository::RoomRepository;
pub use user_repository::UserRepository;
