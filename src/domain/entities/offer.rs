use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::room::RoomType;
use super::{present, required, MISSING_REQUIRED};
use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    #[default]
    Percentage,
    Fixed,
}

impl OfferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferType::Percentage => "percentage",
            OfferType::Fixed => "fixed",
        }
    }
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(OfferType::Percentage),
            "fixed" => Ok(OfferType::Fixed),
            other => Err(DomainError::validation(format!("Invalid offer type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_window"))]
pub struct Offer {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[validate(range(min = 0.0, max = 100.0, message = "discount must be between 0 and 100"))]
    pub discount: f64,
    pub offer_type: OfferType,
    #[serde(default)]
    pub applicable_room_types: Vec<RoomType>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "__v", default)]
    pub version: i64,
}

fn validate_window(offer: &Offer) -> Result<(), ValidationError> {
    if offer.valid_until < offer.valid_from {
        return Err(ValidationError::new("offer_window")
            .with_message(Cow::Borrowed("validUntil must not precede validFrom")));
    }
    Ok(())
}

impl Offer {
    pub fn from_new(new_offer: NewOffer) -> DomainResult<Self> {
        let (Some(title), Some(description), Some(discount), Some(valid_from), Some(valid_until)) = (
            present(new_offer.title),
            present(new_offer.description),
            new_offer.discount,
            present(new_offer.valid_from),
            present(new_offer.valid_until),
        ) else {
            return Err(DomainError::validation(MISSING_REQUIRED));
        };

        let offer_type = match present(new_offer.offer_type) {
            Some(raw) => raw.parse()?,
            None => OfferType::default(),
        };

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            discount,
            offer_type,
            applicable_room_types: parse_room_types(new_offer.applicable_room_types.unwrap_or_default())?,
            valid_from: parse_instant(&valid_from)?,
            valid_until: parse_instant(&valid_until)?,
            image: present(new_offer.image),
            code: present(new_offer.code),
            active: true,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    pub fn apply(&mut self, changes: OfferChanges) -> DomainResult<()> {
        if let Some(title) = changes.title {
            self.title = required(title)?;
        }
        if let Some(description) = changes.description {
            self.description = required(description)?;
        }
        if let Some(discount) = changes.discount {
            self.discount = discount;
        }
        if let Some(offer_type) = changes.offer_type {
            self.offer_type = offer_type.parse()?;
        }
        if let Some(types) = changes.applicable_room_types {
            self.applicable_room_types = parse_room_types(types)?;
        }
        if let Some(valid_from) = changes.valid_from {
            self.valid_from = parse_instant(&required(valid_from)?)?;
        }
        if let Some(valid_until) = changes.valid_until {
            self.valid_until = parse_instant(&required(valid_until)?)?;
        }
        if let Some(image) = changes.image {
            self.image = present(Some(image));
        }
        if let Some(code) = changes.code {
            self.code = present(Some(code));
        }
        if let Some(active) = changes.active {
            self.active = active;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// True when the offer is switched on and `at` falls inside its window,
    /// both ends inclusive.
    pub fn is_live_at(&self, at: DateTime<Utc>) -> bool {
        self.active && self.valid_from <= at && at <= self.valid_until
    }
}

fn parse_room_types(raw: Vec<String>) -> DomainResult<Vec<RoomType>> {
    raw.iter().map(|t| t.parse::<RoomType>()).collect()
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_instant(raw: &str) -> DomainResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DomainError::validation(format!("Invalid date: {}", raw)))
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOffer {
    pub title: Option<String>,
    pub description: Option<String>,
    pub discount: Option<f64>,
    pub offer_type: Option<String>,
    pub applicable_room_types: Option<Vec<String>>,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
    pub image: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub discount: Option<f64>,
    pub offer_type: Option<String>,
    pub applicable_room_types: Option<Vec<String>>,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
    pub image: Option<String>,
    pub code: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct OfferFilter {
    pub active: Option<bool>,
    pub code: Option<String>,
}

impl OfferFilter {
    pub fn active() -> Self {
        Self {
            active: Some(true),
            ..Default::default()
        }
    }

    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, offer: &Offer) -> bool {
        self.active.map_or(true, |a| offer.active == a)
            && self
                .code
                .as_deref()
                .map_or(true, |c| offer.code.as_deref() == Some(c))
    }
}
