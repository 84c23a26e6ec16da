use crate::utils::error::{BookingError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomType {
    #[default]
    Building,
    Laboratory,
    Classroom,
}

impl RoomType {
    pub fn label(self) -> &'static str {
        match self {
            RoomType::Building => "อาคาร",
            RoomType::Laboratory => "ห้องปฏิบัติการ",
            RoomType::Classroom => "ห้องเรียน",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingType {
    #[default]
    Teaching,
    Exam,
    Activity,
    Other,
}

impl BookingType {
    pub fn label(self) -> &'static str {
        match self {
            BookingType::Teaching => "จัดการเรียนการสอน",
            BookingType::Exam => "สอบย่อย/สอบกลางภาค/สอบปลายภาค",
            BookingType::Activity => "กิจกรรม/อบรม/ประชุม",
            BookingType::Other => "อื่นๆ",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingType::Teaching => "teaching",
            BookingType::Exam => "exam",
            BookingType::Activity => "activity",
            BookingType::Other => "other",
        }
    }
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text fields that depend on the booking type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Course,
    Reason,
    Topic,
    OtherReason,
}

impl DetailField {
    /// Name used in violations and on the wire.
    pub fn name(self) -> &'static str {
        match self {
            DetailField::Course => "course",
            DetailField::Reason => "reason",
            DetailField::Topic => "topic",
            DetailField::OtherReason => "otherReason",
        }
    }
}

/// Type-specific payload of a booking. Each variant carries only the fields
/// its booking type shows, so text typed for one type cannot leak into another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "bookingType", rename_all = "camelCase")]
pub enum BookingDetails {
    Teaching {
        course: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    Exam {
        course: String,
    },
    Activity {
        topic: String,
    },
    #[serde(rename_all = "camelCase")]
    Other {
        other_reason: String,
    },
}

impl Default for BookingDetails {
    fn default() -> Self {
        BookingDetails::empty(BookingType::Teaching)
    }
}

impl BookingDetails {
    pub fn empty(booking_type: BookingType) -> Self {
        match booking_type {
            BookingType::Teaching => BookingDetails::Teaching {
                course: String::new(),
                reason: None,
            },
            BookingType::Exam => BookingDetails::Exam {
                course: String::new(),
            },
            BookingType::Activity => BookingDetails::Activity {
                topic: String::new(),
            },
            BookingType::Other => BookingDetails::Other {
                other_reason: String::new(),
            },
        }
    }

    pub fn booking_type(&self) -> BookingType {
        match self {
            BookingDetails::Teaching { .. } => BookingType::Teaching,
            BookingDetails::Exam { .. } => BookingType::Exam,
            BookingDetails::Activity { .. } => BookingType::Activity,
            BookingDetails::Other { .. } => BookingType::Other,
        }
    }

    /// The one field that must be filled in for this booking type.
    pub fn required_field(&self) -> DetailField {
        match self {
            BookingDetails::Teaching { .. } | BookingDetails::Exam { .. } => DetailField::Course,
            BookingDetails::Activity { .. } => DetailField::Topic,
            BookingDetails::Other { .. } => DetailField::OtherReason,
        }
    }

    /// Text of the required field.
    pub fn purpose(&self) -> &str {
        match self {
            BookingDetails::Teaching { course, .. } | BookingDetails::Exam { course } => course,
            BookingDetails::Activity { topic } => topic,
            BookingDetails::Other { other_reason } => other_reason,
        }
    }

    pub fn set_field(&mut self, field: DetailField, value: String) -> Result<()> {
        match (self, field) {
            (BookingDetails::Teaching { course, .. }, DetailField::Course)
            | (BookingDetails::Exam { course }, DetailField::Course) => *course = value,
            (BookingDetails::Teaching { reason, .. }, DetailField::Reason) => *reason = Some(value),
            (BookingDetails::Activity { topic }, DetailField::Topic) => *topic = value,
            (BookingDetails::Other { other_reason }, DetailField::OtherReason) => {
                *other_reason = value
            }
            (details, field) => {
                return Err(BookingError::InactiveField {
                    field: field.name().to_string(),
                    booking_type: details.booking_type().to_string(),
                })
            }
        }
        Ok(())
    }
}

/// A teaching period, numbered 1 to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Period(u8);

impl Period {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;
    pub const FIRST: Period = Period(Self::MIN);
    pub const LAST: Period = Period(Self::MAX);

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Period(value))
        } else {
            Err(BookingError::InvalidPeriod {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every period from `self` through the last one.
    pub fn through_last(self) -> impl Iterator<Item = Period> + Clone {
        (self.0..=Self::MAX).map(Period)
    }

    pub fn all() -> impl Iterator<Item = Period> + Clone {
        Self::FIRST.through_last()
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for Period {
    type Error = BookingError;

    fn try_from(value: u8) -> Result<Self> {
        Period::new(value)
    }
}

impl From<Period> for u8 {
    fn from(period: Period) -> Self {
        period.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRange {
    pub start_period: Period,
    pub end_period: Period,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Both ends chosen and on different calendar days.
    pub fn is_multi_day(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start.date() != end.date(),
            _ => false,
        }
    }

    /// `dd/MM/yyyy`, or `dd/MM/yyyy - dd/MM/yyyy` when the range spans days.
    pub fn display(&self) -> String {
        const FORMAT: &str = "%d/%m/%Y";
        match (self.start, self.end) {
            (None, _) => String::new(),
            (Some(start), None) => start.format(FORMAT).to_string(),
            (Some(start), Some(end)) if start.date() == end.date() => {
                start.format(FORMAT).to_string()
            }
            (Some(start), Some(end)) => {
                format!("{} - {}", start.format(FORMAT), end.format(FORMAT))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a validated draft, ready for the submission sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_type: RoomType,
    pub booking_type: BookingType,
    pub details: BookingDetails,
    pub purpose: String,
    pub attendees: u32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// `None` for multi-day bookings.
    pub periods: Option<PeriodRange>,
    pub phone_number: String,
}
