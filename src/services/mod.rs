pub mod booking_store;
pub mod dashboard;
pub mod id_gen;
pub mod lifecycle;
pub mod seed;
pub mod users;
