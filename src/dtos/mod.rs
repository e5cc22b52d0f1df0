pub mod bookingdtos;
pub mod listingdtos;
pub mod paymentdtos;
pub mod reviewdtos;
