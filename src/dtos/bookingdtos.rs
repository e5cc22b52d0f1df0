use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::bookingmodel::BookingStatus;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBookingDto {
    pub listing_id: Uuid,
    pub user_id: Uuid,

    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,

    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub guests: i32,

    pub special_requests: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateBookingDto {
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,

    #[validate(range(min = 1, message = "At least one guest is required"))]
    pub guests: Option<i32>,

    /// Absent means keep the stored value; an explicit JSON null clears it.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub special_requests: Option<Option<String>>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateBookingStatusDto {
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_dto_distinguishes_missing_from_null_special_requests() {
        let kept: UpdateBookingDto = serde_json::from_str(r#"{"guests": 2}"#).unwrap();
        assert_eq!(kept.special_requests, None);

        let cleared: UpdateBookingDto =
            serde_json::from_str(r#"{"special_requests": null}"#).unwrap();
        assert_eq!(cleared.special_requests, Some(None));

        let replaced: UpdateBookingDto =
            serde_json::from_str(r#"{"special_requests": "late arrival"}"#).unwrap();
        assert_eq!(
            replaced.special_requests,
            Some(Some("late arrival".to_string()))
        );
    }
}
