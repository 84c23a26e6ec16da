use crate::domain::layout::Route;
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDateTime;

pub const SLOT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A time range picked on the booking calendar, handed to the new-booking
/// page as `?start=...&end=...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSelection {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SlotSelection {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn to_query(&self) -> String {
        format!(
            "{}?start={}&end={}",
            Route::NewBooking.path(),
            self.start.format(SLOT_FORMAT),
            self.end.format(SLOT_FORMAT)
        )
    }

    /// Accepts either the full path or just the query string.
    pub fn from_query(query: &str) -> Result<Self> {
        let params = query.split_once('?').map_or(query, |(_, params)| params);

        let mut start = None;
        let mut end = None;
        for pair in params.split('&').filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some(("start", value)) => start = Some(parse_timestamp(query, value)?),
                Some(("end", value)) => end = Some(parse_timestamp(query, value)?),
                _ => {}
            }
        }

        match (start, end) {
            (Some(start), Some(end)) if end >= start => Ok(Self { start, end }),
            (Some(_), Some(_)) => Err(invalid(query, "end is before start")),
            _ => Err(invalid(query, "both start and end are required")),
        }
    }
}

fn parse_timestamp(query: &str, value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, SLOT_FORMAT)
        .map_err(|e| invalid(query, &format!("'{}' is not yyyy-MM-ddTHH:mm ({})", value, e)))
}

fn invalid(query: &str, reason: &str) -> BookingError {
    BookingError::InvalidSlot {
        value: query.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_query_format() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let slot = SlotSelection::new(
            day.and_hms_opt(9, 30, 0).unwrap(),
            day.and_hms_opt(11, 30, 0).unwrap(),
        );
        assert_eq!(
            slot.to_query(),
            "/book-room/new?start=2024-06-10T09:30&end=2024-06-10T11:30"
        );
        assert_eq!(SlotSelection::from_query(&slot.to_query()).unwrap(), slot);
    }

    #[test]
    fn test_rejects_bad_queries() {
        assert!(SlotSelection::from_query("start=2024-06-10T09:30").is_err());
        assert!(SlotSelection::from_query("start=10/06/2024&end=2024-06-10T11:30").is_err());
        assert!(
            SlotSelection::from_query("start=2024-06-10T11:30&end=2024-06-10T09:30").is_err()
        );
    }
}
