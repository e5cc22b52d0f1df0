pub mod availability;
pub mod booking_rules;
pub mod chapa;
pub mod error;
pub mod pricing;
pub mod reconciliation;
