pub mod booking;
pub mod user;

pub use booking::{Booking, BookingDetails, BookingQuery, BookingStatus, NewBooking};
pub use user::{Role, User};
