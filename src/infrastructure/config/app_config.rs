use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::application::services::user_service::MAX_TOKEN_TTL_HOURS;
use crate::infrastructure::driven::StoreKind;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Selects the MongoDB store when set and non-empty.
    #[serde(default)]
    pub url: Option<String>,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MockStoreConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiration_hours: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub mock_store: MockStoreConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::defaults()?
            // Add in settings from config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))

            // Add in settings from environment variables with prefix HOTEL_
            // E.g. `HOTEL_SERVER__PORT=8080 ./target/app` would set `server.port`
            .add_source(
                Environment::with_prefix("HOTEL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )

            // The plain variable names used by earlier deployments win over everything
            .set_override_option("database.url", non_empty_var("MONGO_URI"))?
            .set_override_option(
                "server.port",
                non_empty_var("PORT").and_then(|p| p.parse::<i64>().ok()),
            )?

            .build()?;

        let config: Self = s.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    /// Rejects values that deserialize fine but cannot be used.
    pub fn check(&self) -> Result<(), ConfigError> {
        let ttl = self.auth.token_expiration_hours;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&ttl) {
            return Err(ConfigError::Message(format!(
                "auth.token_expiration_hours must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_HOURS, ttl
            )));
        }
        Ok(())
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database.name", "hotel")?
            .set_default("mock_store.path", "data/mockdb.json")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("auth.jwt_secret", "dev_only_secret_change_me")?
            .set_default("auth.token_expiration_hours", 24)
    }

    pub fn store_kind(&self) -> StoreKind {
        match self.database.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => StoreKind::Mongo {
                url: url.to_string(),
                database: self.database.name.clone(),
            },
            _ => StoreKind::MockFile {
                path: self.mock_store.path.clone(),
            },
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
