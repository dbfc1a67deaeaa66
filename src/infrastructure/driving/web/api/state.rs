use std::sync::Arc;

use crate::application::services::{OfferService, RoomService, UserService};
use crate::infrastructure::config::AuthConfig;
use crate::infrastructure::driven::Repositories;

// AppState containing our application services
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub room_service: Arc<RoomService>,
    pub offer_service: Arc<OfferService>,
    pub store: &'static str,
}

impl AppState {
    pub fn new(repositories: Repositories, auth: &AuthConfig, store: &'static str) -> Self {
        Self {
            user_service: Arc::new(UserService::new(
                repositories.users,
                auth.jwt_secret.clone(),
                auth.token_expiration_hours,
            )),
            room_service: Arc::new(RoomService::new(repositories.rooms)),
            offer_service: Arc::new(OfferService::new(repositories.offers)),
            store,
        }
    }
}
