use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{bookingdb::BookingExt, listingdb::ListingExt},
    dtos::bookingdtos::{CreateBookingDto, UpdateBookingDto, UpdateBookingStatusDto},
    error::HttpError,
    service::{booking_rules, error::ServiceError, pricing},
    AppState,
};

pub fn booking_handler() -> Router {
    Router::new()
        .route("/", post(create_booking).get(get_bookings))
        .route("/:booking_id", get(get_booking_by_id).put(update_booking))
        .route("/:booking_id/status", put(update_booking_status))
}

pub async fn create_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    booking_rules::validate_stay_dates(
        body.check_in_date,
        body.check_out_date,
        Utc::now().date_naive(),
    )?;

    let listing = app_state
        .db_client
        .get_listing_by_id(body.listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::ListingNotFound(body.listing_id))?;

    if body.guests > listing.max_guests {
        return Err(ServiceError::GuestCountExceeded {
            max_guests: listing.max_guests,
        }
        .into());
    }

    let total_price = pricing::total_price(
        &listing.price_per_night,
        body.check_in_date,
        body.check_out_date,
    )?;

    let booking = app_state
        .db_client
        .create_booking(&body, total_price)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Booking created successfully",
        "data": {
            "booking": booking
        }
    })))
}

pub async fn get_bookings(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let bookings = app_state
        .db_client
        .get_bookings()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "bookings": bookings,
            "total": bookings.len()
        }
    })))
}

pub async fn get_booking_by_id(
    Path(booking_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .db_client
        .get_booking_by_id(booking_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::BookingNotFound(booking_id))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "booking": booking
        }
    })))
}

pub async fn update_booking(
    Path(booking_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let booking = app_state
        .db_client
        .get_booking_by_id(booking_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::BookingNotFound(booking_id))?;

    let check_in_date = body.check_in_date.unwrap_or(booking.check_in_date);
    let check_out_date = body.check_out_date.unwrap_or(booking.check_out_date);
    let guests = body.guests.unwrap_or(booking.guests);

    let dates_changed =
        check_in_date != booking.check_in_date || check_out_date != booking.check_out_date;
    if dates_changed {
        booking_rules::validate_stay_dates(check_in_date, check_out_date, Utc::now().date_naive())?;
    } else if check_out_date <= check_in_date {
        return Err(ServiceError::InvalidDateRange.into());
    }

    let listing = app_state
        .db_client
        .get_listing_by_id(booking.listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::ListingNotFound(booking.listing_id))?;

    if guests > listing.max_guests {
        return Err(ServiceError::GuestCountExceeded {
            max_guests: listing.max_guests,
        }
        .into());
    }

    // The invoiced total is first-write-wins: dates may move but the price
    // the guest saw at creation time stays.
    let updated = app_state
        .db_client
        .update_booking_dates(
            booking.id,
            booking.listing_id,
            check_in_date,
            check_out_date,
            guests,
            body.special_requests,
        )
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Booking updated successfully",
        "data": {
            "booking": updated
        }
    })))
}

pub async fn update_booking_status(
    Path(booking_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateBookingStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .db_client
        .get_booking_by_id(booking_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::BookingNotFound(booking_id))?;

    let planned = booking_rules::plan_status_transition(
        booking.status,
        body.status,
        booking.check_in_date,
        Utc::now().date_naive(),
    )?;

    // Cancelling an already-cancelled booking is a no-op, not an error.
    let target = match planned {
        None => {
            return Ok(Json(serde_json::json!({
                "status": "success",
                "message": "Booking is already cancelled",
                "data": {
                    "booking": booking
                }
            })));
        }
        Some(target) => target,
    };

    let updated = app_state
        .db_client
        .update_booking_status(booking_id, booking.status, target)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // A miss means the status moved under us; re-validate against what is
    // actually stored instead of materializing a forbidden transition.
    let updated = match updated {
        Some(updated) => updated,
        None => {
            let current = app_state
                .db_client
                .get_booking_by_id(booking_id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?
                .ok_or(ServiceError::BookingNotFound(booking_id))?;

            return Err(ServiceError::InvalidStatusTransition {
                from: current.status,
                to: target,
            }
            .into());
        }
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Booking status updated successfully",
        "data": {
            "booking": updated
        }
    })))
}
