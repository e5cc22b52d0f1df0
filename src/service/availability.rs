use chrono::NaiveDate;

/// Two half-open date ranges `[a_start, a_end)` and `[b_start, b_end)`
/// overlap iff `a_start < b_end && b_start < a_end`. Checking out on the
/// day another guest checks in is not a clash.
///
/// The SQL overlap scan in `db::bookingdb` encodes the same predicate; it
/// lives here as well so the rule is testable without a database.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    #[test]
    fn test_partial_overlap_clashes() {
        // Booking A 06-01..06-05 vs booking B 06-03..06-06
        assert!(ranges_overlap(
            date("2024-06-01"),
            date("2024-06-05"),
            date("2024-06-03"),
            date("2024-06-06"),
        ));
    }

    #[test]
    fn test_contained_range_clashes() {
        assert!(ranges_overlap(
            date("2024-06-01"),
            date("2024-06-10"),
            date("2024-06-03"),
            date("2024-06-05"),
        ));
    }

    #[test]
    fn test_identical_ranges_clash() {
        assert!(ranges_overlap(
            date("2024-06-01"),
            date("2024-06-05"),
            date("2024-06-01"),
            date("2024-06-05"),
        ));
    }

    #[test]
    fn test_back_to_back_stays_do_not_clash() {
        // Checkout day equals the next check-in day.
        assert!(!ranges_overlap(
            date("2024-06-01"),
            date("2024-06-05"),
            date("2024-06-05"),
            date("2024-06-08"),
        ));
        assert!(!ranges_overlap(
            date("2024-06-05"),
            date("2024-06-08"),
            date("2024-06-01"),
            date("2024-06-05"),
        ));
    }

    #[test]
    fn test_disjoint_ranges_do_not_clash() {
        assert!(!ranges_overlap(
            date("2024-06-01"),
            date("2024-06-03"),
            date("2024-06-10"),
            date("2024-06-12"),
        ));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let (a1, a2) = (date("2024-07-01"), date("2024-07-08"));
        let (b1, b2) = (date("2024-07-05"), date("2024-07-12"));
        assert_eq!(
            ranges_overlap(a1, a2, b1, b2),
            ranges_overlap(b1, b2, a1, a2)
        );
    }
}
