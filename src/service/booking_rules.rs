use chrono::NaiveDate;

use crate::models::bookingmodel::BookingStatus;
use crate::service::error::ServiceError;

/// Stay dates must form a non-empty range and check-in may not be in the
/// past. Shared by the create and reschedule paths.
pub fn validate_stay_dates(
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> Result<(), ServiceError> {
    if check_out <= check_in {
        return Err(ServiceError::InvalidDateRange);
    }
    if check_in < today {
        return Err(ServiceError::PastCheckIn);
    }

    Ok(())
}

/// Decides what a status request should do against the current state:
/// `Ok(None)` is an idempotent no-op (cancelling an already-cancelled
/// booking), `Ok(Some(next))` is a legal transition to apply, and any
/// illegal request is an error. Cancellation is only open before check-in.
pub fn plan_status_transition(
    current: BookingStatus,
    requested: BookingStatus,
    check_in: NaiveDate,
    today: NaiveDate,
) -> Result<Option<BookingStatus>, ServiceError> {
    if requested == BookingStatus::Cancelled && current == BookingStatus::Cancelled {
        return Ok(None);
    }

    if !current.can_transition_to(requested) {
        return Err(ServiceError::InvalidStatusTransition {
            from: current,
            to: requested,
        });
    }

    if requested == BookingStatus::Cancelled && today >= check_in {
        return Err(ServiceError::CancellationWindowClosed);
    }

    Ok(Some(requested))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use BookingStatus::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    #[test]
    fn test_past_check_in_rejected() {
        let err = validate_stay_dates(date("2024-06-01"), date("2024-06-05"), date("2024-06-02"));
        assert!(matches!(err, Err(ServiceError::PastCheckIn)));
    }

    #[test]
    fn test_check_in_today_accepted() {
        let today = date("2024-06-01");
        assert!(validate_stay_dates(today, date("2024-06-05"), today).is_ok());
    }

    #[test]
    fn test_inverted_range_rejected_before_past_check() {
        let err = validate_stay_dates(date("2024-06-05"), date("2024-06-01"), date("2024-06-10"));
        assert!(matches!(err, Err(ServiceError::InvalidDateRange)));
    }

    #[test]
    fn test_future_stay_accepted() {
        assert!(
            validate_stay_dates(date("2024-06-10"), date("2024-06-12"), date("2024-06-01")).is_ok()
        );
    }

    #[test]
    fn test_cancel_twice_is_a_no_op() {
        let planned =
            plan_status_transition(Cancelled, Cancelled, date("2024-06-10"), date("2024-06-01"))
                .unwrap();
        assert_eq!(planned, None);
    }

    #[test]
    fn test_legal_transition_is_applied() {
        let planned =
            plan_status_transition(Pending, Confirmed, date("2024-06-10"), date("2024-06-01"))
                .unwrap();
        assert_eq!(planned, Some(Confirmed));
    }

    #[test]
    fn test_illegal_transition_rejected() {
        let err = plan_status_transition(Cancelled, Confirmed, date("2024-06-10"), date("2024-06-01"));
        assert!(matches!(
            err,
            Err(ServiceError::InvalidStatusTransition {
                from: Cancelled,
                to: Confirmed,
            })
        ));
    }

    #[test]
    fn test_cancel_on_or_after_check_in_rejected() {
        let err = plan_status_transition(Confirmed, Cancelled, date("2024-06-10"), date("2024-06-10"));
        assert!(matches!(err, Err(ServiceError::CancellationWindowClosed)));

        let err = plan_status_transition(Pending, Cancelled, date("2024-06-10"), date("2024-06-12"));
        assert!(matches!(err, Err(ServiceError::CancellationWindowClosed)));
    }
}
