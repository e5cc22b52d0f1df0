pub mod bookingdb;
pub mod db;
pub mod listingdb;
pub mod paymentdb;
pub mod reviewdb;
