#![allow(dead_code)]

use actix_web::web;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;

use hotel_site_api::infrastructure::config::AuthConfig;
use hotel_site_api::infrastructure::driven::{open_store, StoreKind};
use hotel_site_api::infrastructure::driving::web::api::AppState;

/// Builds the app the way `main` does, minus CORS and the request logger.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.clone())
                .configure(hotel_site_api::infrastructure::driving::web::api::configure)
                .default_service(actix_web::web::to(
                    hotel_site_api::infrastructure::driving::web::api::route_not_found,
                )),
        )
        .await
    };
}

/// App state over a mock store inside `dir`.
pub async fn state_in(dir: &TempDir) -> web::Data<AppState> {
    let kind = StoreKind::MockFile { path: dir.path().join("mockdb.json") };
    let repositories = open_store(&kind).await.expect("open mock store");
    let auth = AuthConfig {
        jwt_secret: "integration-secret".into(),
        token_expiration_hours: 1,
    };
    web::Data::new(AppState::new(repositories, &auth, kind.label()))
}

pub fn room_json(name: &str, room_type: &str) -> Value {
    json!({
        "name": name,
        "description": "Sea facing with balcony",
        "type": room_type,
        "price": 220,
        "capacity": 2,
        "amenities": ["Free WiFi", "Mini Bar"]
    })
}

pub fn offer_json(title: &str, code: Option<&str>, from_days: i64, until_days: i64) -> Value {
    let now = Utc::now();
    let mut offer = json!({
        "title": title,
        "description": "Limited time",
        "discount": 25,
        "offerType": "percentage",
        "applicableRoomTypes": ["Suite"],
        "validFrom": (now + Duration::days(from_days)).to_rfc3339(),
        "validUntil": (now + Duration::days(until_days)).to_rfc3339(),
    });
    if let Some(code) = code {
        offer["code"] = json!(code);
    }
    offer
}
