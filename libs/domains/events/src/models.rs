//! Calendar event entity and its request/query projections.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

use crate::validation::required_date;

/// Layout of the `date` query parameter: UTC, second precision, literal `Z`.
pub const QUERY_DATE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A persisted calendar event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Store-assigned identifier
    pub id: i64,
    /// Owner of the event
    pub user_id: i64,
    /// Display text
    pub event: String,
    /// When the event takes place
    #[schema(value_type = String, example = "2026-01-22T09:00:00Z")]
    pub date: DateTime<Utc>,
}

/// Fields of a new event; the id is assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCreate {
    pub user_id: i64,
    pub event: String,
    pub date: DateTime<Utc>,
}

/// Body of `create_event`.
///
/// Absent JSON fields decode to their zero value (`None` for the date) and are
/// rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct EventCreateRequest {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(length(min = 1))]
    pub event: String,
    #[validate(required)]
    #[schema(value_type = String, example = "2026-01-22T09:00:00Z")]
    pub date: Option<DateTime<Utc>>,
}

impl TryFrom<EventCreateRequest> for EventCreate {
    type Error = ValidationErrors;

    fn try_from(request: EventCreateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            date: required_date(request.date)?,
            user_id: request.user_id,
            event: request.event,
        })
    }
}

/// Body of `update_event`: every field is required, `id` selects the row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct EventUpdateRequest {
    #[validate(range(min = 1))]
    pub id: i64,
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(length(min = 1))]
    pub event: String,
    #[validate(required)]
    #[schema(value_type = String, example = "2026-01-22T09:00:00Z")]
    pub date: Option<DateTime<Utc>>,
}

impl TryFrom<EventUpdateRequest> for Event {
    type Error = ValidationErrors;

    fn try_from(request: EventUpdateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            date: required_date(request.date)?,
            id: request.id,
            user_id: request.user_id,
            event: request.event,
        })
    }
}

/// Payload for deleting an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct EventDelete {
    #[validate(range(min = 1))]
    pub id: i64,
}

/// Body of the window queries: scopes the read to one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct EventGetUserId {
    #[validate(range(min = 1))]
    pub user_id: i64,
}

/// Closed-interval read query, built server-side from an anchor date and a [`Window`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventGet {
    pub user_id: i64,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
}

impl EventGet {
    /// Builds `[date_from, date_from + window]`. `None` when the upper bound overflows.
    pub fn for_window(user_id: i64, date_from: DateTime<Utc>, window: Window) -> Option<Self> {
        let date_to = date_from.checked_add_signed(window.span())?;
        Some(Self {
            user_id,
            date_from,
            date_to,
        })
    }

    /// Whether `date` falls inside the closed interval.
    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        self.date_from <= *date && *date <= self.date_to
    }
}

/// Fixed-width read windows. Calendar-naive: a month is always 30 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Day,
    Week,
    Month,
}

impl Window {
    pub fn span(self) -> TimeDelta {
        match self {
            Window::Day => TimeDelta::hours(24),
            Window::Week => TimeDelta::hours(24 * 7),
            Window::Month => TimeDelta::hours(24 * 30),
        }
    }
}

/// Query string of the window endpoints.
///
/// `date` stays optional here so its absence is reported after the body checks.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct WindowQuery {
    /// Anchor date, `YYYY-MM-DDThh:mm:ssZ`
    pub date: Option<String>,
}

/// Parses a `date` query value against [`QUERY_DATE_LAYOUT`].
///
/// Only the exact 20-byte shape is accepted: zero-padded fields, no sign or
/// surrounding whitespace, no leap second.
pub fn parse_query_date(raw: &str) -> Option<DateTime<Utc>> {
    if !has_query_date_shape(raw.as_bytes()) {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(raw, QUERY_DATE_LAYOUT).ok()?;
    if naive.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Some(naive.and_utc())
}

fn has_query_date_shape(bytes: &[u8]) -> bool {
    const SEPARATORS: [(usize, u8); 6] = [
        (4, b'-'),
        (7, b'-'),
        (10, b'T'),
        (13, b':'),
        (16, b':'),
        (19, b'Z'),
    ];

    bytes.len() == 20
        && bytes.iter().enumerate().all(|(i, b)| {
            match SEPARATORS.iter().find(|(pos, _)| *pos == i) {
                Some((_, sep)) => b == sep,
                None => b.is_ascii_digit(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 22, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_window_spans_are_fixed_hours() {
        assert_eq!(Window::Day.span(), TimeDelta::hours(24));
        assert_eq!(Window::Week.span(), TimeDelta::hours(168));
        assert_eq!(Window::Month.span(), TimeDelta::hours(720));
    }

    #[test]
    fn test_month_window_ignores_calendar_length() {
        // February 2026 has 28 days; the window still spans 30.
        let from = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let query = EventGet::for_window(1, from, Window::Month).unwrap();
        assert_eq!(
            query.date_to,
            Utc.with_ymd_and_hms(2026, 3, 3, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_for_window_keeps_user_and_anchor() {
        let query = EventGet::for_window(42, anchor(), Window::Week).unwrap();
        assert_eq!(query.user_id, 42);
        assert_eq!(query.date_from, anchor());
        assert_eq!(
            query.date_to,
            Utc.with_ymd_and_hms(2026, 1, 29, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_for_window_overflow() {
        assert!(EventGet::for_window(1, DateTime::<Utc>::MAX_UTC, Window::Day).is_none());
    }

    #[test]
    fn test_contains_is_closed_on_both_ends() {
        let query = EventGet::for_window(1, anchor(), Window::Day).unwrap();
        assert!(query.contains(&anchor()));
        assert!(query.contains(&(anchor() + TimeDelta::hours(24))));
        assert!(!query.contains(&(anchor() - TimeDelta::seconds(1))));
        assert!(!query.contains(&(anchor() + TimeDelta::hours(24) + TimeDelta::seconds(1))));
    }

    #[test]
    fn test_parse_query_date_accepts_layout() {
        let parsed = parse_query_date("2026-01-22T09:30:15Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 1, 22, 9, 30, 15).unwrap());
    }

    #[test]
    fn test_parse_query_date_rejects_other_shapes() {
        for raw in [
            "2026-01-22",
            "2026-01-22T09:30:15+02:00",
            "2026-01-22 09:30:15Z",
            "2026-13-22T09:30:15Z",
            "2026-02-30T00:00:00Z",
            "not a date",
            "2026-1-22T09:00:00Z",
            "2026-01-2T9:0:0Z",
            "+2026-01-22T09:00:00Z",
            " 2026-01-22T09:00:00Z",
            "2026-01-22T09:00:00Z ",
            "2026-01-22T09:00:00.5Z",
            "2026-01-22t09:00:00z",
        ] {
            assert!(parse_query_date(raw).is_none(), "{}", raw);
        }
    }

    #[test]
    fn test_parse_query_date_rejects_leap_second() {
        assert!(parse_query_date("2026-01-22T09:00:60Z").is_none());
        assert!(parse_query_date("2026-01-22T23:59:59Z").is_some());
    }

    #[test]
    fn test_event_serializes_date_with_z_suffix() {
        let event = Event {
            id: 3,
            user_id: 1,
            event: "Standup".to_string(),
            date: Utc.with_ymd_and_hms(2026, 1, 22, 9, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "user_id": 1,
                "event": "Standup",
                "date": "2026-01-22T09:00:00Z"
            })
        );
    }

    #[test]
    fn test_missing_fields_decode_to_zero_values() {
        let create: EventCreateRequest = serde_json::from_str(r#"{"event":"Standup"}"#).unwrap();
        assert_eq!(create.user_id, 0);
        assert_eq!(create.date, None);
    }

    #[test]
    fn test_epoch_is_a_real_date() {
        let create: EventCreateRequest = serde_json::from_str(
            r#"{"user_id":1,"event":"Unix","date":"1970-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(create.validate().is_ok());

        let create = EventCreate::try_from(create).unwrap();
        assert_eq!(create.date, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_update_request_converts_to_event() {
        let request = EventUpdateRequest {
            id: 3,
            user_id: 1,
            event: "Retro".to_string(),
            date: Some(anchor()),
        };
        assert_eq!(
            Event::try_from(request).unwrap(),
            Event {
                id: 3,
                user_id: 1,
                event: "Retro".to_string(),
                date: anchor(),
            }
        );
    }

    #[test]
    fn test_conversion_without_date_reports_the_field() {
        let errors = EventCreate::try_from(EventCreateRequest::default()).unwrap_err();
        assert!(errors.field_errors().contains_key("date"));
    }
}
