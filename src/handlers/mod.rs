pub mod auth;
pub mod bookings;
pub mod extract;
pub mod health;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/login", post(auth::login))
        .route(
            "/api/bookings",
            get(bookings::list_bookings)
                .post(bookings::create_booking)
                .delete(bookings::clear_bookings),
        )
        .route(
            "/api/bookings/:id",
            get(bookings::get_booking).patch(bookings::update_booking),
        )
        .route("/api/bookings/:id/approve", post(bookings::approve_booking))
        .route("/api/bookings/:id/reject", post(bookings::reject_booking))
        .route("/api/bookings/:id/cancel", post(bookings::cancel_booking))
        .route("/api/bookings/:id/start", post(bookings::start_trip))
        .route("/api/bookings/:id/complete", post(bookings::complete_trip))
        .route("/api/dashboard", get(bookings::dashboard))
        .with_state(state)
}
