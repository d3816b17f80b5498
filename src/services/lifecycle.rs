use chrono::NaiveDateTime;

use crate::errors::AppError;
use crate::models::{Booking, BookingStatus};

/// Whether transitions are checked against the booking state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Only the edges of the state machine are allowed.
    Strict,
    /// Any status may overwrite any other.
    Permissive,
}

impl TransitionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPolicy::Strict => "strict",
            TransitionPolicy::Permissive => "permissive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Some(TransitionPolicy::Strict),
            "permissive" => Some(TransitionPolicy::Permissive),
            _ => None,
        }
    }
}

/// Edges of the booking state machine.
///
/// ```text
/// Pending    -> Approved | Rejected | Canceled
/// Approved   -> In Progress | Canceled
/// In Progress -> Completed | Canceled
/// ```
///
/// Rejected, Completed and Canceled have no outgoing edges.
pub fn is_allowed(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;

    if from.is_terminal() {
        return false;
    }
    matches!(
        (from, to),
        (Pending, Approved)
            | (Pending, Rejected)
            | (Pending, Canceled)
            | (Approved, InProgress)
            | (Approved, Canceled)
            | (InProgress, Completed)
            | (InProgress, Canceled)
    )
}

pub fn check(policy: TransitionPolicy, booking: &Booking, to: BookingStatus) -> Result<(), AppError> {
    if policy == TransitionPolicy::Permissive || is_allowed(booking.status, to) {
        return Ok(());
    }
    Err(AppError::InvalidTransition {
        id: booking.id.clone(),
        from: booking.status,
        to,
    })
}

/// Checks a rejection reason and returns it trimmed.
pub fn validate_reason(reason: &str) -> Result<String, AppError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(AppError::Validation(
            "a reason is required to reject a booking".to_string(),
        ));
    }
    Ok(reason.to_string())
}

pub fn validate_window(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::Validation(
            "end time must be after start time".to_string(),
        ));
    }
    Ok(())
}

/// Moves `booking` to `to`, keeping `reject_reason` set only while Rejected.
/// Callers run [`check`] first.
pub fn apply(booking: &mut Booking, to: BookingStatus, reason: Option<String>, now: NaiveDateTime) {
    booking.status = to;
    booking.reject_reason = if to == BookingStatus::Rejected {
        reason
    } else {
        None
    };
    booking.updated_at = now;
}
