use actix_web::{web, HttpResponse};
use serde::Serialize;

use super::error::MessageBody;
use super::state::AppState;
use crate::application::ports::in_ports::{OfferAdminUseCase, OfferCatalogUseCase};
use crate::domain::entities::offer::{NewOffer, Offer, OfferChanges};
use crate::domain::DomainError;

#[derive(Serialize)]
struct OfferList {
    offers: Vec<Offer>,
}

#[derive(Serialize)]
struct OfferBody {
    offer: Offer,
}

#[derive(Serialize)]
struct OfferChanged {
    message: &'static str,
    offer: Offer,
}

pub async fn list_offers(data: web::Data<AppState>) -> Result<HttpResponse, DomainError> {
    let offers = data.offer_service.list_offers().await?;
    Ok(HttpResponse::Ok().json(OfferList { offers }))
}

pub async fn list_active_offers(data: web::Data<AppState>) -> Result<HttpResponse, DomainError> {
    let offers = data.offer_service.list_active_offers().await?;
    Ok(HttpResponse::Ok().json(OfferList { offers }))
}

pub async fn get_offer_by_code(
    data: web::Data<AppState>,
    code: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let offer = data.offer_service.redeem_code(&code).await?;
    Ok(HttpResponse::Ok().json(OfferBody { offer }))
}

pub async fn get_offer(
    data: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let offer = data.offer_service.get_offer(&id).await?;
    Ok(HttpResponse::Ok().json(OfferBody { offer }))
}

pub async fn create_offer(
    data: web::Data<AppState>,
    body: web::Json<NewOffer>,
) -> Result<HttpResponse, DomainError> {
    let offer = data.offer_service.create_offer(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(OfferChanged {
        message: "Offer created successfully",
        offer,
    }))
}

pub async fn update_offer(
    data: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<OfferChanges>,
) -> Result<HttpResponse, DomainError> {
    let offer = data.offer_service.update_offer(&id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(OfferChanged {
        message: "Offer updated successfully",
        offer,
    }))
}

pub async fn delete_offer(
    data: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    data.offer_service.delete_offer(&id).await?;
    Ok(HttpResponse::Ok().json(MessageBody {
        message: "Offer deleted successfully",
    }))
}
