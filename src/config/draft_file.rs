use crate::config::toml_config::substitute_env_vars;
use crate::core::booking_form::BookingFormModel;
use crate::domain::model::{BookingType, Period, RoomType};
use crate::domain::schedule::Schedule;
use crate::domain::slot::{SlotSelection, SLOT_FORMAT};
use crate::utils::error::{BookingError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Form input read from a TOML file, replayed onto a [`BookingFormModel`]
/// in the order a user would fill the page in.
///
/// ```toml
/// room_type = "classroom"
/// booking_type = "activity"
/// topic = "สัมมนา"
/// attendees = 30
/// start = "2024-06-10"
/// end = "2024-06-10"
/// start_period = 2
/// end_period = 4
/// phone_number = "0898765432"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftFile {
    /// Calendar link, e.g. `/book-room/new?start=2024-06-10T09:30&end=2024-06-10T11:30`.
    pub slot: Option<String>,
    pub room_type: Option<RoomType>,
    pub booking_type: Option<BookingType>,
    pub course: Option<String>,
    pub reason: Option<String>,
    pub topic: Option<String>,
    pub other_reason: Option<String>,
    pub attendees: Option<u32>,
    /// `yyyy-MM-dd` or `yyyy-MM-ddTHH:mm`.
    pub start: Option<String>,
    pub end: Option<String>,
    pub start_period: Option<u8>,
    pub end_period: Option<u8>,
    pub phone_number: Option<String>,
}

impl DraftFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(&substitute_env_vars(content))?)
    }

    pub fn slot(&self) -> Result<Option<SlotSelection>> {
        self.slot.as_deref().map(SlotSelection::from_query).transpose()
    }

    /// Starts from the slot when one is given, otherwise from a blank form.
    pub fn build_form(&self, schedule: &Schedule) -> Result<BookingFormModel> {
        let mut form = match self.slot()? {
            Some(slot) => BookingFormModel::from_slot(&slot, schedule),
            None => BookingFormModel::new(),
        };
        self.apply_to(&mut form)?;
        Ok(form)
    }

    pub fn apply_to(&self, form: &mut BookingFormModel) -> Result<()> {
        if let Some(room_type) = self.room_type {
            form.set_room_type(room_type);
        }
        if let Some(booking_type) = self.booking_type {
            form.set_booking_type(booking_type);
        }
        if let Some(course) = &self.course {
            form.set_course(course.as_str())?;
        }
        if let Some(reason) = &self.reason {
            form.set_reason(reason.as_str())?;
        }
        if let Some(topic) = &self.topic {
            form.set_topic(topic.as_str())?;
        }
        if let Some(other_reason) = &self.other_reason {
            form.set_other_reason(other_reason.as_str())?;
        }
        if let Some(attendees) = self.attendees {
            form.set_attendees(attendees);
        }
        if self.start.is_some() || self.end.is_some() {
            let start = parse_date("start", self.start.as_deref())?;
            let end = parse_date("end", self.end.as_deref())?;
            form.set_date_range(start, end);
        }
        if let Some(start_period) = self.start_period {
            form.set_start_period(Period::new(start_period)?)?;
        }
        if let Some(end_period) = self.end_period {
            form.set_end_period(Period::new(end_period)?)?;
        }
        if let Some(phone_number) = &self.phone_number {
            form.set_phone_number(phone_number.as_str());
        }
        Ok(())
    }
}

fn parse_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDateTime>> {
    let Some(value) = value else {
        return Ok(None);
    };
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, SLOT_FORMAT) {
        return Ok(Some(datetime));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| Some(date.and_time(chrono::NaiveTime::MIN)))
        .map_err(|_| BookingError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: "expected yyyy-MM-dd or yyyy-MM-ddTHH:mm".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_draft_file() {
        let draft = DraftFile::from_toml_str(
            r#"
room_type = "laboratory"
booking_type = "exam"
course = "CS101"
attendees = 40
start = "2024-06-10"
end = "2024-06-10"
start_period = 3
end_period = 5
phone_number = "0812345678"
"#,
        )
        .unwrap();

        let form = draft.build_form(&Schedule::default()).unwrap();
        let request = form.submit().unwrap();
        assert_eq!(request.room_type, RoomType::Laboratory);
        assert_eq!(request.booking_type, BookingType::Exam);
        assert_eq!(request.purpose, "CS101");
        assert_eq!(request.attendees, 40);
        assert_eq!(
            request.periods.map(|p| (p.start_period.get(), p.end_period.get())),
            Some((3, 5))
        );
    }

    #[test]
    fn test_slot_prefills_dates() {
        let draft = DraftFile::from_toml_str(
            r#"
slot = "/book-room/new?start=2024-06-10T10:30&end=2024-06-10T12:30"
booking_type = "other"
other_reason = "open house"
phone_number = "021234567"
"#,
        )
        .unwrap();

        let form = draft.build_form(&Schedule::default()).unwrap();
        assert_eq!(form.draft().start_period.get(), 3);
        assert_eq!(form.draft().end_period.get(), 4);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_field_for_other_type_is_rejected() {
        let draft = DraftFile::from_toml_str(
            r#"
booking_type = "activity"
course = "CS101"
"#,
        )
        .unwrap();
        assert!(matches!(
            draft.build_form(&Schedule::default()),
            Err(BookingError::InactiveField { .. })
        ));
    }

    #[test]
    fn test_bad_date() {
        let draft = DraftFile {
            start: Some("10/06/2024".to_string()),
            ..Default::default()
        };
        assert!(draft.build_form(&Schedule::default()).is_err());
    }
}
