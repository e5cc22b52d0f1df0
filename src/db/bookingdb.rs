use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::BigDecimal;
use uuid::Uuid;

use super::db::DBClient;
use crate::dtos::bookingdtos::CreateBookingDto;
use crate::models::bookingmodel::{Booking, BookingStatus};
use crate::service::error::ServiceError;

#[async_trait]
pub trait BookingExt {
    /// Inserts a pending booking. The overlap check and the insert run in
    /// one transaction under a per-listing advisory lock, so two racing
    /// requests for the same listing are serialized and exactly one wins.
    async fn create_booking(
        &self,
        booking_data: &CreateBookingDto,
        total_price: BigDecimal,
    ) -> Result<Booking, ServiceError>;

    async fn get_booking_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, sqlx::Error>;

    async fn get_bookings(&self) -> Result<Vec<Booking>, sqlx::Error>;

    /// Rewrites dates/guests under the same lock as creation, excluding the
    /// booking's own row from the overlap scan. Never touches total_price.
    /// The outer option on `special_requests` distinguishes "leave as is"
    /// from an explicit clear.
    async fn update_booking_dates(
        &self,
        booking_id: Uuid,
        listing_id: Uuid,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        guests: i32,
        special_requests: Option<Option<String>>,
    ) -> Result<Booking, ServiceError>;

    /// Compare-and-set: the write only lands while the row still holds
    /// `expected`, so a transition validated against a stale read cannot
    /// overwrite a concurrent one. `None` means the row moved on.
    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> Result<Option<Booking>, sqlx::Error>;

    /// Review gate: true iff the user has a completed booking for the listing.
    async fn has_completed_booking(
        &self,
        user_id: Uuid,
        listing_id: Uuid,
    ) -> Result<bool, sqlx::Error>;
}

const ACTIVE_OVERLAP_SQL: &str = r#"
    SELECT EXISTS (
        SELECT 1 FROM bookings
        WHERE listing_id = $1
          AND status IN ('pending', 'confirmed')
          AND check_in_date < $3
          AND check_out_date > $2
          AND ($4::uuid IS NULL OR id <> $4)
    )
"#;

#[async_trait]
impl BookingExt for DBClient {
    async fn create_booking(
        &self,
        booking_data: &CreateBookingDto,
        total_price: BigDecimal,
    ) -> Result<Booking, ServiceError> {
        let mut tx = self.pool.begin().await?;

        // Serialize booking writes per listing; a bare check-then-insert
        // lets two concurrent requests both pass the overlap scan.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(booking_data.listing_id.to_string())
            .execute(&mut *tx)
            .await?;

        let conflict: bool = sqlx::query_scalar(ACTIVE_OVERLAP_SQL)
            .bind(booking_data.listing_id)
            .bind(booking_data.check_in_date)
            .bind(booking_data.check_out_date)
            .bind(None::<Uuid>)
            .fetch_one(&mut *tx)
            .await?;

        if conflict {
            return Err(ServiceError::SlotUnavailable);
        }

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                listing_id, user_id, check_in_date, check_out_date,
                guests, total_price, status, special_requests
            ) VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7)
            RETURNING *
            "#,
        )
        .bind(booking_data.listing_id)
        .bind(booking_data.user_id)
        .bind(booking_data.check_in_date)
        .bind(booking_data.check_out_date)
        .bind(booking_data.guests)
        .bind(total_price)
        .bind(booking_data.special_requests.clone())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(booking)
    }

    async fn get_booking_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, sqlx::Error> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    async fn get_bookings(&self) -> Result<Vec<Booking>, sqlx::Error> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(bookings)
    }

    async fn update_booking_dates(
        &self,
        booking_id: Uuid,
        listing_id: Uuid,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        guests: i32,
        special_requests: Option<Option<String>>,
    ) -> Result<Booking, ServiceError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(listing_id.to_string())
            .execute(&mut *tx)
            .await?;

        let conflict: bool = sqlx::query_scalar(ACTIVE_OVERLAP_SQL)
            .bind(listing_id)
            .bind(check_in_date)
            .bind(check_out_date)
            .bind(Some(booking_id))
            .fetch_one(&mut *tx)
            .await?;

        if conflict {
            return Err(ServiceError::SlotUnavailable);
        }

        // total_price is first-write-wins and deliberately absent here.
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET
                check_in_date = $2,
                check_out_date = $3,
                guests = $4,
                special_requests = CASE WHEN $5 THEN $6 ELSE special_requests END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(check_in_date)
        .bind(check_out_date)
        .bind(guests)
        .bind(special_requests.is_some())
        .bind(special_requests.flatten())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(booking)
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = $3
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(status)
        .bind(expected)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn has_completed_booking(
        &self,
        user_id: Uuid,
        listing_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE user_id = $1 AND listing_id = $2 AND status = 'completed'
            )
            "#,
        )
        .bind(user_id)
        .bind(listing_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
