use thiserror::Error;
use uuid::Uuid;

use crate::{error::HttpError, models::bookingmodel::BookingStatus};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,

    #[error("Check-in date cannot be in the past")]
    PastCheckIn,

    #[error("Listing accommodates at most {max_guests} guests")]
    GuestCountExceeded { max_guests: i32 },

    #[error("Listing is already booked for the selected dates")]
    SlotUnavailable,

    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,

    #[error("You can only review a listing after completing a booking")]
    ReviewNotEligible,

    #[error("You have already reviewed this listing")]
    DuplicateReview,

    #[error("Listing {0} not found")]
    ListingNotFound(Uuid),

    #[error("Booking {0} not found")]
    BookingNotFound(Uuid),

    #[error("Booking cannot move from {from:?} to {to:?}")]
    InvalidStatusTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("A booking can only be cancelled before check-in")]
    CancellationWindowClosed,

    #[error("Failed to initiate payment: {0}")]
    PaymentInitiationFailed(String),

    #[error("Payment verification failed: {0}")]
    PaymentVerificationFailed(String),

    #[error("No payment found for transaction {0}")]
    UnknownTransaction(String),

    #[error("A payment has already been initiated for booking {0}")]
    DuplicatePaymentInitiation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::InvalidDateRange
            | ServiceError::PastCheckIn
            | ServiceError::GuestCountExceeded { .. }
            | ServiceError::RatingOutOfRange
            | ServiceError::CancellationWindowClosed
            | ServiceError::InvalidStatusTransition { .. } => {
                HttpError::bad_request(error.to_string())
            }

            ServiceError::SlotUnavailable
            | ServiceError::DuplicateReview
            | ServiceError::DuplicatePaymentInitiation(_) => HttpError::conflict(error.to_string()),

            ServiceError::ReviewNotEligible => HttpError::forbidden(error.to_string()),

            ServiceError::ListingNotFound(_)
            | ServiceError::BookingNotFound(_)
            | ServiceError::UnknownTransaction(_) => HttpError::not_found(error.to_string()),

            ServiceError::PaymentInitiationFailed(_)
            | ServiceError::PaymentVerificationFailed(_) => HttpError::bad_gateway(error.to_string()),

            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_validation_errors_map_to_bad_request() {
        let err: HttpError = ServiceError::InvalidDateRange.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err: HttpError = ServiceError::PastCheckIn.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err: HttpError = ServiceError::GuestCountExceeded { max_guests: 4 }.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err: HttpError = ServiceError::CancellationWindowClosed.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_errors_map_to_conflict() {
        let err: HttpError = ServiceError::SlotUnavailable.into();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err: HttpError = ServiceError::DuplicateReview.into();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_gateway_errors_map_to_bad_gateway() {
        let err: HttpError =
            ServiceError::PaymentInitiationFailed("timed out".to_string()).into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);

        let err: HttpError =
            ServiceError::PaymentVerificationFailed("gateway returned 500".to_string()).into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_unknown_transaction_maps_to_not_found() {
        let err: HttpError = ServiceError::UnknownTransaction("TX1".to_string()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
