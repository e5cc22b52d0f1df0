use async_trait::async_trait;
use sqlx::types::BigDecimal;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::paymentmodel::{Payment, PaymentStatus};

#[async_trait]
pub trait PaymentExt {
    /// Persists the local shadow record after a successful gateway
    /// initiation. `transaction_id` is the gateway-returned tx_ref.
    async fn create_payment(
        &self,
        booking_reference: &str,
        email: &str,
        amount: &BigDecimal,
        transaction_id: &str,
    ) -> Result<Payment, sqlx::Error>;

    async fn get_payment_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Payment>, sqlx::Error>;

    async fn get_payment_by_booking_reference(
        &self,
        booking_reference: &str,
    ) -> Result<Option<Payment>, sqlx::Error>;

    /// Guarded transition: completed is terminal, so the write only lands
    /// while the record is still unsettled. `None` means another verification
    /// settled the payment first; the caller must not notify in that case.
    async fn update_payment_status(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, sqlx::Error>;
}

#[async_trait]
impl PaymentExt for DBClient {
    async fn create_payment(
        &self,
        booking_reference: &str,
        email: &str,
        amount: &BigDecimal,
        transaction_id: &str,
    ) -> Result<Payment, sqlx::Error> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (booking_reference, email, amount, transaction_id, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING *
            "#,
        )
        .bind(booking_reference)
        .bind(email)
        .bind(amount)
        .bind(transaction_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    async fn get_payment_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let payment =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE transaction_id = $1")
                .bind(transaction_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(payment)
    }

    async fn get_payment_by_booking_reference(
        &self,
        booking_reference: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let payment = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE booking_reference = $1
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(booking_reference)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    async fn update_payment_status(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status <> 'completed'
            RETURNING *
            "#,
        )
        .bind(payment_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }
}
