use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub requester_id: i64,
    pub purpose: String,
    pub status: BookingStatus,
    #[serde(with = "local_datetime")]
    pub start_time: NaiveDateTime,
    #[serde(with = "local_datetime")]
    pub end_time: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Booking {
    /// Case-insensitive substring match over id and purpose.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.id.to_lowercase().contains(&term) || self.purpose.to_lowercase().contains(&term)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    Completed,
    Canceled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::Pending,
        BookingStatus::Approved,
        BookingStatus::Rejected,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Approved => "Approved",
            BookingStatus::Rejected => "Rejected",
            BookingStatus::InProgress => "In Progress",
            BookingStatus::Completed => "Completed",
            BookingStatus::Canceled => "Canceled",
        }
    }

    /// Lenient parse for query strings: case, spaces, dashes and underscores are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        fn normalize(s: &str) -> String {
            s.chars()
                .filter(|c| !matches!(c, ' ' | '-' | '_'))
                .collect::<String>()
                .to_lowercase()
        }

        let wanted = normalize(s);
        if wanted == "cancelled" {
            return Some(BookingStatus::Canceled);
        }
        Self::ALL
            .into_iter()
            .find(|status| normalize(status.as_str()) == wanted)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Rejected | BookingStatus::Completed | BookingStatus::Canceled
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for creating a booking. `status` is accepted so that callers can
/// round-trip a full record, but the store always starts bookings as Pending.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[serde(default)]
    pub id: Option<String>,
    pub requester_id: i64,
    pub purpose: String,
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(with = "local_datetime")]
    pub start_time: NaiveDateTime,
    #[serde(with = "local_datetime")]
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub vehicle_id: Option<i64>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub dropoff_location: Option<String>,
    #[serde(default)]
    pub passenger_count: Option<u32>,
}

/// Editable fields of a booking that is still awaiting a decision.
/// Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default, with = "local_datetime::option")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default, with = "local_datetime::option")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub vehicle_id: Option<i64>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub dropoff_location: Option<String>,
    #[serde(default)]
    pub passenger_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingQuery {
    pub status: Option<BookingStatus>,
    pub search: Option<String>,
    pub requester_id: Option<i64>,
}

impl BookingQuery {
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(status) = self.status {
            if booking.status != status {
                return false;
            }
        }
        if let Some(requester_id) = self.requester_id {
            if booking.requester_id != requester_id {
                return false;
            }
        }
        match &self.search {
            Some(term) => booking.matches_search(term),
            None => true,
        }
    }
}

/// Timestamps as typed into a `datetime-local` input: `2026-01-20T09:00`,
/// seconds optional.
pub mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    const SHORT_FORMAT: &str = "%Y-%m-%dT%H:%M";

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, SHORT_FORMAT))
            .ok()
    }

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            dt: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Booking {
        let now = local_datetime::parse("2026-01-19T08:00").unwrap();
        Booking {
            id: "BK-000001".to_string(),
            requester_id: 3,
            purpose: "Client Meeting".to_string(),
            status: BookingStatus::InProgress,
            start_time: local_datetime::parse("2026-01-20T09:00").unwrap(),
            end_time: local_datetime::parse("2026-01-20T14:00").unwrap(),
            vehicle_id: Some(7),
            vehicle_type: None,
            pickup_location: Some("HQ".to_string()),
            dropoff_location: None,
            passenger_count: Some(2),
            reject_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_serializes_camel_case_and_status_label() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["requesterId"], 3);
        assert_eq!(json["status"], "In Progress");
        assert_eq!(json["startTime"], "2026-01-20T09:00:00");
        assert_eq!(json["pickupLocation"], "HQ");
        assert!(json.get("rejectReason").is_none());
        assert!(json.get("dropoffLocation").is_none());
    }

    #[test]
    fn test_status_accepts_both_in_progress_spellings() {
        let a: BookingStatus = serde_json::from_str("\"In Progress\"").unwrap();
        let b: BookingStatus = serde_json::from_str("\"InProgress\"").unwrap();
        assert_eq!(a, BookingStatus::InProgress);
        assert_eq!(b, BookingStatus::InProgress);
    }

    #[test]
    fn test_status_parse_is_lenient() {
        assert_eq!(BookingStatus::parse("pending"), Some(BookingStatus::Pending));
        assert_eq!(BookingStatus::parse("in_progress"), Some(BookingStatus::InProgress));
        assert_eq!(BookingStatus::parse("In Progress"), Some(BookingStatus::InProgress));
        assert_eq!(BookingStatus::parse("cancelled"), Some(BookingStatus::Canceled));
        assert_eq!(BookingStatus::parse("archived"), None);
        assert_eq!(BookingStatus::parse(""), None);

        for status in BookingStatus::ALL {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
            assert_eq!(BookingStatus::parse(&status.as_str().to_uppercase()), Some(status));
        }
    }

    #[test]
    fn test_terminal_statuses() {
        let terminal: Vec<_> = BookingStatus::ALL
            .iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(
            terminal,
            vec![
                &BookingStatus::Rejected,
                &BookingStatus::Completed,
                &BookingStatus::Canceled
            ]
        );
    }

    #[test]
    fn test_new_booking_accepts_short_timestamps() {
        let input: NewBooking = serde_json::from_str(
            r#"{"requesterId":1,"purpose":"Client Meeting","startTime":"2026-01-20T09:00","endTime":"2026-01-20T14:00"}"#,
        )
        .unwrap();
        assert_eq!(input.start_time, local_datetime::parse("2026-01-20T09:00:00").unwrap());
        assert!(input.id.is_none());
        assert!(input.status.is_none());
    }

    #[test]
    fn test_query_filters() {
        let booking = sample();
        assert!(BookingQuery::default().matches(&booking));

        let by_status = BookingQuery {
            status: Some(BookingStatus::Pending),
            ..Default::default()
        };
        assert!(!by_status.matches(&booking));

        let by_search = BookingQuery {
            search: Some("client".to_string()),
            ..Default::default()
        };
        assert!(by_search.matches(&booking));

        let by_id = BookingQuery {
            search: Some("bk-0000".to_string()),
            requester_id: Some(3),
            ..Default::default()
        };
        assert!(by_id.matches(&booking));

        let other_requester = BookingQuery {
            requester_id: Some(4),
            ..Default::default()
        };
        assert!(!other_requester.matches(&booking));
    }
}
