use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct InitiatePaymentDto {
    #[validate(length(min = 1, max = 100, message = "Booking reference is required"))]
    pub booking_reference: String,

    pub amount: BigDecimal,

    #[validate(email(message = "Email is invalid"))]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyPaymentQueryDto {
    pub tx_ref: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initiate_payment_dto_rejects_bad_email() {
        let dto = InitiatePaymentDto {
            booking_reference: "BK1".to_string(),
            amount: BigDecimal::from(500),
            email: "not-an-email".to_string(),
        };

        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_initiate_payment_dto_accepts_valid_input() {
        let dto = InitiatePaymentDto {
            booking_reference: "BK1".to_string(),
            amount: BigDecimal::from(500),
            email: "a@b.com".to_string(),
        };

        assert!(dto.validate().is_ok());
    }
}
