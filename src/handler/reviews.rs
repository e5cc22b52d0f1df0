use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{bookingdb::BookingExt, listingdb::ListingExt, reviewdb::ReviewExt},
    dtos::reviewdtos::CreateReviewDto,
    error::HttpError,
    models::bookingmodel::BookingStatus,
    service::error::ServiceError,
    AppState,
};

pub fn review_handler() -> Router {
    Router::new().route("/", post(create_review))
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if !(1..=5).contains(&body.rating) {
        return Err(ServiceError::RatingOutOfRange.into());
    }

    app_state
        .db_client
        .get_listing_by_id(body.listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::ListingNotFound(body.listing_id))?;

    // A review is only allowed after a completed stay.
    let eligible = app_state
        .db_client
        .has_completed_booking(body.user_id, body.listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !eligible {
        return Err(ServiceError::ReviewNotEligible.into());
    }

    let existing = app_state
        .db_client
        .get_review_by_listing_and_user(body.listing_id, body.user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(ServiceError::DuplicateReview.into());
    }

    if let Some(booking_id) = body.booking_id {
        let booking = app_state
            .db_client
            .get_booking_by_id(booking_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        if booking.user_id != body.user_id
            || booking.listing_id != body.listing_id
            || booking.status != BookingStatus::Completed
        {
            return Err(HttpError::bad_request(
                "Booking does not match a completed stay by this user",
            ));
        }
    }

    let review = app_state.db_client.create_review(&body).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Review created successfully",
        "data": {
            "review": review
        }
    })))
}

pub async fn get_listing_reviews(
    Path(listing_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .get_listing_by_id(listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::ListingNotFound(listing_id))?;

    let reviews = app_state
        .db_client
        .get_reviews_by_listing(listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "reviews": reviews,
            "total": reviews.len()
        }
    })))
}
