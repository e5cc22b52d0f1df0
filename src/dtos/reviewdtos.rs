use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateReviewDto {
    pub listing_id: Uuid,
    pub user_id: Uuid,

    /// Optional link to the stay being reviewed; at most one review per booking.
    pub booking_id: Option<Uuid>,

    pub rating: i32,

    #[validate(length(min = 1, message = "Comment is required"))]
    pub comment: String,
}
