pub mod offer_service;
pub mod room_service;
pub mod user_service;

pub use offer_service::OfferService;
pub use room_service::RoomService;
pub use user_service::UserService;

pub(crate) const EDIT_CONTENDED: &str = "Record kept changing during update, try again";
/// Reads and merges an update this many times before giving up on a
/// record that keeps changing underneath it.
pub(crate) const UPDATE_ATTEMPTS: u32 = 5;
