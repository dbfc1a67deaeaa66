use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{present, required, MISSING_REQUIRED};
use crate::domain::error::{DomainError, DomainResult};

pub const DEFAULT_RATING: f64 = 4.5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RoomType {
    Single,
    Double,
    Twin,
    Suite,
    Deluxe,
}

impl RoomType {
    pub const ALL: [RoomType; 5] = [
        RoomType::Single,
        RoomType::Double,
        RoomType::Twin,
        RoomType::Suite,
        RoomType::Deluxe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "Single",
            RoomType::Double => "Double",
            RoomType::Twin => "Twin",
            RoomType::Suite => "Suite",
            RoomType::Deluxe => "Deluxe",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("Invalid room type: {}", s)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[validate(range(min = 1, max = 10, message = "capacity must be between 1 and 10"))]
    pub capacity: i32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub available: bool,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: f64,
    pub reviews: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped by the store on every update. Writes carrying a stale value
    /// are refused.
    #[serde(rename = "__v", default)]
    pub version: i64,
}

impl Room {
    /// Builds a room from a create request, applying defaults. Schema
    /// constraints are checked by the caller through `Validate`.
    pub fn from_new(new_room: NewRoom) -> DomainResult<Self> {
        let (Some(name), Some(description), Some(room_type), Some(price), Some(capacity)) = (
            present(new_room.name),
            present(new_room.description),
            present(new_room.room_type),
            new_room.price,
            new_room.capacity,
        ) else {
            return Err(DomainError::validation(MISSING_REQUIRED));
        };

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            room_type: room_type.parse()?,
            price,
            capacity,
            amenities: new_room.amenities.unwrap_or_default(),
            images: new_room.images.unwrap_or_default(),
            available: true,
            rating: DEFAULT_RATING,
            reviews: 0,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    /// Merges the supplied fields into this room and bumps `updated_at`.
    pub fn apply(&mut self, changes: RoomChanges) -> DomainResult<()> {
        if let Some(name) = changes.name {
            self.name = required(name)?;
        }
        if let Some(description) = changes.description {
            self.description = required(description)?;
        }
        if let Some(room_type) = changes.room_type {
            self.room_type = required(room_type)?.parse()?;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(capacity) = changes.capacity {
            self.capacity = capacity;
        }
        if let Some(amenities) = changes.amenities {
            self.amenities = amenities;
        }
        if let Some(images) = changes.images {
            self.images = images;
        }
        if let Some(available) = changes.available {
            self.available = available;
        }
        if let Some(rating) = changes.rating {
            self.rating = rating;
        }
        if let Some(reviews) = changes.reviews {
            self.reviews = reviews;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub price: Option<f64>,
    pub capacity: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub price: Option<f64>,
    pub capacity: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub available: Option<bool>,
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RoomFilter {
    pub available: Option<bool>,
    pub room_type: Option<RoomType>,
}

impl RoomFilter {
    pub fn available() -> Self {
        Self {
            available: Some(true),
            ..Default::default()
        }
    }

    pub fn of_type(room_type: RoomType) -> Self {
        Self {
            room_type: Some(room_type),
            ..Default::default()
        }
    }

    pub fn matches(&self, room: &Room) -> bool {
        self.available.map_or(true, |a| room.available == a)
            && self.room_type.map_or(true, |t| room.room_type == t)
    }
}
