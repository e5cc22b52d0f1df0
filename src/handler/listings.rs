use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use bigdecimal::BigDecimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::listingdb::ListingExt,
    dtos::listingdtos::{CreateListingDto, ListingResponseDto, UpdateListingDto},
    error::HttpError,
    AppState,
};

pub fn listing_handler() -> Router {
    Router::new()
        .route("/", post(create_listing).get(get_listings))
        .route("/:listing_id", get(get_listing_by_id).put(update_listing))
        .route(
            "/:listing_id/reviews",
            get(crate::handler::reviews::get_listing_reviews),
        )
}

pub async fn create_listing(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateListingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.price_per_night <= BigDecimal::from(0) {
        return Err(HttpError::bad_request("Nightly price must be positive"));
    }

    let listing = app_state
        .db_client
        .create_listing(body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = ListingResponseDto::from_listing(&listing, Default::default());

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Listing created successfully",
        "data": {
            "listing": response
        }
    })))
}

pub async fn get_listings(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let listings = app_state
        .db_client
        .get_listings()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let ratings = app_state
        .db_client
        .get_listing_ratings()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let listing_data: Vec<ListingResponseDto> = listings
        .iter()
        .map(|listing| {
            let rating = ratings.get(&listing.id).copied().unwrap_or_default();
            ListingResponseDto::from_listing(listing, rating)
        })
        .collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "listings": listing_data,
            "total": listing_data.len()
        }
    })))
}

pub async fn get_listing_by_id(
    Path(listing_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let listing = app_state
        .db_client
        .get_listing_by_id(listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Listing not found"))?;

    let rating = app_state
        .db_client
        .get_listing_rating(listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "listing": ListingResponseDto::from_listing(&listing, rating)
        }
    })))
}

pub async fn update_listing(
    Path(listing_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateListingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if let Some(price) = &body.price_per_night {
        if *price <= BigDecimal::from(0) {
            return Err(HttpError::bad_request("Nightly price must be positive"));
        }
    }

    app_state
        .db_client
        .get_listing_by_id(listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Listing not found"))?;

    let updated = app_state
        .db_client
        .update_listing(listing_id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let rating = app_state
        .db_client
        .get_listing_rating(listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Listing updated successfully",
        "data": {
            "listing": ListingResponseDto::from_listing(&updated, rating)
        }
    })))
}
