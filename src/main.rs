use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use tracing::{error, info};

use hotel_site_api::infrastructure::config::{setup_tracing, AppConfig};
use hotel_site_api::infrastructure::driven::open_store;
use hotel_site_api::infrastructure::driving::web::api::{self, AppState};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    setup_tracing();

    info!("Starting application...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration loaded successfully");

    // Pick and open the store
    let store_kind = config.store_kind();
    let repositories = match open_store(&store_kind).await {
        Ok(repositories) => {
            info!("Store ready: {}", store_kind);
            repositories
        }
        Err(e) => {
            error!("Failed to open {}: {:#}", store_kind, e);
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(AppState::new(repositories, &config.auth, store_kind.label()));

    let server_config = config.server.clone();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(api::configure)
            .default_service(web::to(api::route_not_found))
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run();

    info!("API server listening on {}:{}", server_config.host, server_config.port);

    server.await?;

    info!("Application shutting down");
    Ok(())
}
