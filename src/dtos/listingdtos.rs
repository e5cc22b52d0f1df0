use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::types::BigDecimal;
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::models::listingmodel::{Listing, ListingRating, PropertyType};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateListingDto {
    pub host_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub property_type: PropertyType,

    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,

    pub price_per_night: BigDecimal,

    #[validate(range(min = 1, message = "Listing must accommodate at least one guest"))]
    pub max_guests: i32,

    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub available: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateListingDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,

    pub property_type: Option<PropertyType>,

    #[validate(length(min = 1, max = 200, message = "Location cannot be empty"))]
    pub location: Option<String>,

    pub price_per_night: Option<BigDecimal>,

    #[validate(range(min = 1, message = "Listing must accommodate at least one guest"))]
    pub max_guests: Option<i32>,

    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub available: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListingResponseDto {
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
    pub average_rating: f64,
    pub total_reviews: i64,
    pub created_at: Option<DateTime<Utc>>,
}

impl ListingResponseDto {
    pub fn from_listing(listing: &Listing, rating: ListingRating) -> Self {
        Self {
            id: listing.id,
            host_id: listing.host_id,
            title: listing.title.clone(),
            description: listing.description.clone(),
            property_type: listing.property_type,
            location: listing.location.clone(),
            price_per_night: listing.price_per_night.clone(),
            max_guests: listing.max_guests,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            amenities: listing.amenities.clone(),
            available: listing.available,
            average_rating: rating.average_rating,
            total_reviews: rating.total_reviews,
            created_at: listing.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_listing_dto_rejects_zero_guests() {
        let dto = CreateListingDto {
            host_id: Uuid::new_v4(),
            title: "Lakeside cabin".to_string(),
            description: "Quiet cabin by the lake".to_string(),
            property_type: PropertyType::Cabin,
            location: "Bahir Dar".to_string(),
            price_per_night: BigDecimal::from(90),
            max_guests: 0,
            bedrooms: None,
            bathrooms: None,
            amenities: None,
            available: None,
        };

        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_unreviewed_listing_reports_zero_rating() {
        let listing = Listing {
            id: Uuid::new_v4(),
            host_id: Uuid::new_v4(),
            title: "Lakeside cabin".to_string(),
            description: "Quiet cabin by the lake".to_string(),
            property_type: PropertyType::Cabin,
            location: "Bahir Dar".to_string(),
            price_per_night: BigDecimal::from(90),
            max_guests: 2,
            bedrooms: 1,
            bathrooms: 1,
            amenities: serde_json::json!([]),
            available: true,
            created_at: None,
            updated_at: None,
        };

        let response = ListingResponseDto::from_listing(&listing, ListingRating::default());
        assert_eq!(response.average_rating, 0.0);
        assert_eq!(response.total_reviews, 0);
    }

    #[test]
    fn test_create_listing_dto_rejects_empty_title() {
        let dto = CreateListingDto {
            host_id: Uuid::new_v4(),
            title: String::new(),
            description: "Quiet cabin by the lake".to_string(),
            property_type: PropertyType::Cabin,
            location: "Bahir Dar".to_string(),
            price_per_night: BigDecimal::from(90),
            max_guests: 2,
            bedrooms: None,
            bathrooms: None,
            amenities: None,
            available: None,
        };

        assert!(dto.validate().is_err());
    }
}
