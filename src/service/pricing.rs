use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::service::error::ServiceError;

/// Total price for a stay: nightly rate times the number of whole nights.
///
/// Shared by the booking create and update paths so the two can never
/// price the same inputs differently. Pure and side-effect free.
pub fn total_price(
    nightly_rate: &BigDecimal,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<BigDecimal, ServiceError> {
    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return Err(ServiceError::InvalidDateRange);
    }

    Ok(nightly_rate * BigDecimal::from(nights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_four_nights_at_100() {
        let total = total_price(&dec("100.00"), date("2024-06-01"), date("2024-06-05")).unwrap();
        assert_eq!(total, dec("400.00"));
    }

    #[test]
    fn test_single_night() {
        let total = total_price(&dec("79.50"), date("2024-06-01"), date("2024-06-02")).unwrap();
        assert_eq!(total, dec("79.50"));
    }

    #[test]
    fn test_linear_in_duration() {
        let rate = dec("120.00");
        let one_week = total_price(&rate, date("2024-03-01"), date("2024-03-08")).unwrap();
        let one_night = total_price(&rate, date("2024-03-01"), date("2024-03-02")).unwrap();
        assert_eq!(one_week, one_night * BigDecimal::from(7));
    }

    #[test]
    fn test_zero_nights_rejected() {
        let err = total_price(&dec("100.00"), date("2024-06-01"), date("2024-06-01"));
        assert!(matches!(err, Err(ServiceError::InvalidDateRange)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = total_price(&dec("100.00"), date("2024-06-05"), date("2024-06-01"));
        assert!(matches!(err, Err(ServiceError::InvalidDateRange)));
    }
}
