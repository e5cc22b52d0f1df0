use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::dtos::reviewdtos::CreateReviewDto;
use crate::models::reviewmodel::Review;
use crate::service::error::ServiceError;

#[async_trait]
pub trait ReviewExt {
    /// Inserts a review. The (listing_id, user_id) unique constraint is the
    /// backstop for duplicates racing past the handler's pre-check.
    async fn create_review(&self, review_data: &CreateReviewDto) -> Result<Review, ServiceError>;

    async fn get_review_by_listing_and_user(
        &self,
        listing_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Review>, sqlx::Error>;

    async fn get_reviews_by_listing(&self, listing_id: Uuid) -> Result<Vec<Review>, sqlx::Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn create_review(&self, review_data: &CreateReviewDto) -> Result<Review, ServiceError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (listing_id, user_id, booking_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(review_data.listing_id)
        .bind(review_data.user_id)
        .bind(review_data.booking_id)
        .bind(review_data.rating)
        .bind(review_data.comment.clone())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ServiceError::DuplicateReview
            }
            _ => ServiceError::Database(e),
        })?;

        Ok(review)
    }

    async fn get_review_by_listing_and_user(
        &self,
        listing_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Review>, sqlx::Error> {
        let review = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE listing_id = $1 AND user_id = $2",
        )
        .bind(listing_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    async fn get_reviews_by_listing(&self, listing_id: Uuid) -> Result<Vec<Review>, sqlx::Error> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE listing_id = $1 ORDER BY created_at DESC",
        )
        .bind(listing_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
