use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::{types::BigDecimal, FromRow};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "property_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Condo,
    Cabin,
    Loft,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Listing {
    pub id: Uuid,
    pub host_id: Uuid,

    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub location: String,

    pub price_per_night: BigDecimal,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,

    pub amenities: JsonValue,
    pub available: bool,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Review aggregates for a listing, zeroed when no reviews exist.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default)]
pub struct ListingRating {
    pub average_rating: f64,
    pub total_reviews: i64,
}
