pub mod bookingmodel;
pub mod listingmodel;
pub mod paymentmodel;
pub mod reviewmodel;
