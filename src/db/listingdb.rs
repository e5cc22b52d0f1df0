use std::collections::HashMap;

use async_trait::async_trait;
use num_traits::ToPrimitive;
use sqlx::types::{BigDecimal, Json};
use sqlx::Row;
use uuid::Uuid;

use super::db::DBClient;
use crate::dtos::listingdtos::{CreateListingDto, UpdateListingDto};
use crate::models::listingmodel::{Listing, ListingRating};

#[async_trait]
pub trait ListingExt {
    async fn create_listing(&self, listing_data: CreateListingDto) -> Result<Listing, sqlx::Error>;

    async fn get_listing_by_id(&self, listing_id: Uuid) -> Result<Option<Listing>, sqlx::Error>;

    async fn get_listings(&self) -> Result<Vec<Listing>, sqlx::Error>;

    async fn update_listing(
        &self,
        listing_id: Uuid,
        listing_data: UpdateListingDto,
    ) -> Result<Listing, sqlx::Error>;

    /// Average rating and review count derived from the reviews table,
    /// zeroed when the listing has no reviews yet.
    async fn get_listing_rating(&self, listing_id: Uuid) -> Result<ListingRating, sqlx::Error>;

    /// Rating aggregates for every reviewed listing in one round trip.
    /// Listings absent from the map have no reviews.
    async fn get_listing_ratings(&self) -> Result<HashMap<Uuid, ListingRating>, sqlx::Error>;
}

#[async_trait]
impl ListingExt for DBClient {
    async fn create_listing(&self, listing_data: CreateListingDto) -> Result<Listing, sqlx::Error> {
        let listing = sqlx::query_as::<_, Listing>(
            r#"
            INSERT INTO listings (
                host_id, title, description, property_type, location,
                price_per_night, max_guests, bedrooms, bathrooms, amenities, available
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(listing_data.host_id)
        .bind(listing_data.title)
        .bind(listing_data.description)
        .bind(listing_data.property_type)
        .bind(listing_data.location)
        .bind(listing_data.price_per_night)
        .bind(listing_data.max_guests)
        .bind(listing_data.bedrooms.unwrap_or(1))
        .bind(listing_data.bathrooms.unwrap_or(1))
        .bind(Json(listing_data.amenities.unwrap_or_default()))
        .bind(listing_data.available.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(listing)
    }

    async fn get_listing_by_id(&self, listing_id: Uuid) -> Result<Option<Listing>, sqlx::Error> {
        let listing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1")
            .bind(listing_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(listing)
    }

    async fn get_listings(&self) -> Result<Vec<Listing>, sqlx::Error> {
        let listings =
            sqlx::query_as::<_, Listing>("SELECT * FROM listings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(listings)
    }

    async fn update_listing(
        &self,
        listing_id: Uuid,
        listing_data: UpdateListingDto,
    ) -> Result<Listing, sqlx::Error> {
        let listing = sqlx::query_as::<_, Listing>(
            r#"
            UPDATE listings SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                property_type = COALESCE($4, property_type),
                location = COALESCE($5, location),
                price_per_night = COALESCE($6, price_per_night),
                max_guests = COALESCE($7, max_guests),
                bedrooms = COALESCE($8, bedrooms),
                bathrooms = COALESCE($9, bathrooms),
                amenities = COALESCE($10, amenities),
                available = COALESCE($11, available),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(listing_id)
        .bind(listing_data.title)
        .bind(listing_data.description)
        .bind(listing_data.property_type)
        .bind(listing_data.location)
        .bind(listing_data.price_per_night)
        .bind(listing_data.max_guests)
        .bind(listing_data.bedrooms)
        .bind(listing_data.bathrooms)
        .bind(listing_data.amenities.map(Json))
        .bind(listing_data.available)
        .fetch_one(&self.pool)
        .await?;

        Ok(listing)
    }

    async fn get_listing_rating(&self, listing_id: Uuid) -> Result<ListingRating, sqlx::Error> {
        let row = sqlx::query(
            "SELECT AVG(rating) AS average_rating, COUNT(*) AS total_reviews
             FROM reviews WHERE listing_id = $1",
        )
        .bind(listing_id)
        .fetch_one(&self.pool)
        .await?;

        let average: Option<BigDecimal> = row.get("average_rating");
        let total: i64 = row.get("total_reviews");

        Ok(ListingRating {
            average_rating: average.and_then(|avg| avg.to_f64()).unwrap_or(0.0),
            total_reviews: total,
        })
    }

    async fn get_listing_ratings(&self) -> Result<HashMap<Uuid, ListingRating>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT listing_id, AVG(rating) AS average_rating, COUNT(*) AS total_reviews
             FROM reviews GROUP BY listing_id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut ratings = HashMap::with_capacity(rows.len());
        for row in rows {
            let listing_id: Uuid = row.get("listing_id");
            let average: Option<BigDecimal> = row.get("average_rating");
            let total: i64 = row.get("total_reviews");

            ratings.insert(
                listing_id,
                ListingRating {
                    average_rating: average.and_then(|avg| avg.to_f64()).unwrap_or(0.0),
                    total_reviews: total,
                },
            );
        }

        Ok(ratings)
    }
}
