mod auth_handlers;
mod error;
mod offer_handlers;
mod room_handlers;
mod routes;
mod state;

pub use error::MessageBody;
pub use routes::{configure, json_config, route_not_found};
pub use state::AppState;
