mod app_config;
mod logging;

pub use app_config::{AppConfig, AuthConfig, DatabaseConfig, MockStoreConfig, ServerConfig};
pub use logging::setup_tracing;
