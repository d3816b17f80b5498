use serde::Serialize;

use crate::models::{Booking, BookingStatus};

/// Per-status counts over a set of bookings.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub rejected: usize,
    pub canceled: usize,
}

impl BookingSummary {
    pub fn from_bookings<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Self {
        let mut summary = Self::default();
        for booking in bookings {
            summary.total += 1;
            let counter = match booking.status {
                BookingStatus::Pending => &mut summary.pending,
                BookingStatus::Approved => &mut summary.approved,
                BookingStatus::InProgress => &mut summary.in_progress,
                BookingStatus::Completed => &mut summary.completed,
                BookingStatus::Rejected => &mut summary.rejected,
                BookingStatus::Canceled => &mut summary.canceled,
            };
            *counter += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::local_datetime;

    fn booking(id: &str, status: BookingStatus) -> Booking {
        let t = local_datetime::parse("2026-01-20T09:00").unwrap();
        Booking {
            id: id.to_string(),
            requester_id: 3,
            purpose: "Client Meeting".to_string(),
            status,
            start_time: t,
            end_time: t + chrono::Duration::hours(1),
            vehicle_id: None,
            vehicle_type: None,
            pickup_location: None,
            dropoff_location: None,
            passenger_count: None,
            reject_reason: None,
            created_at: t,
            updated_at: t,
        }
    }

    #[test]
    fn test_counts_by_status() {
        let bookings = vec![
            booking("BK-000001", BookingStatus::Pending),
            booking("BK-000002", BookingStatus::Pending),
            booking("BK-000003", BookingStatus::InProgress),
            booking("BK-000004", BookingStatus::Canceled),
        ];

        let summary = BookingSummary::from_bookings(&bookings);
        assert_eq!(
            summary,
            BookingSummary {
                total: 4,
                pending: 2,
                in_progress: 1,
                canceled: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(BookingSummary::from_bookings(&[]), BookingSummary::default());
    }
}
