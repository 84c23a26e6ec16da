use crate::domain::model::{
    BookingDetails, BookingRequest, BookingType, DateRange, DetailField, Period, PeriodRange,
    RoomType,
};
use crate::domain::schedule::Schedule;
use crate::domain::slot::SlotSelection;
use crate::utils::error::{BookingError, Result, ValidationError, Violation};
use crate::utils::validation::{check_at_least, check_phone_number, check_required_text};
use chrono::NaiveDateTime;

/// Field values of a booking that is still being filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub room_type: RoomType,
    pub details: BookingDetails,
    pub attendees: u32,
    pub date_range: DateRange,
    pub start_period: Period,
    pub end_period: Period,
    pub phone_number: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            room_type: RoomType::Building,
            details: BookingDetails::default(),
            attendees: 1,
            date_range: DateRange::default(),
            start_period: Period::FIRST,
            end_period: Period::FIRST,
            phone_number: String::new(),
        }
    }
}

/// State of the new-booking form.
///
/// Setters apply one user input each. `is_multi_day` and
/// `available_end_periods` are recomputed from the current draft on every
/// call, and `validate`/`submit` never mutate it.
#[derive(Debug, Clone, Default)]
pub struct BookingFormModel {
    draft: BookingDraft,
}

impl BookingFormModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefills the date range from a calendar selection. A single-day
    /// selection aligned to the period grid also fills in the periods.
    pub fn from_slot(slot: &SlotSelection, schedule: &Schedule) -> Self {
        let mut form = Self::new();
        form.set_date_range(Some(slot.start), Some(slot.end));

        if !form.is_multi_day() {
            let start = schedule.period_starting_at(slot.start.time());
            let end = schedule.period_ending_at(slot.end.time());
            match (start, end) {
                (Some(start), Some(end)) if end >= start => {
                    form.draft.start_period = start;
                    form.draft.end_period = end;
                }
                _ => tracing::debug!(
                    "Slot {} - {} does not line up with the period grid",
                    slot.start,
                    slot.end
                ),
            }
        }
        form
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn booking_type(&self) -> BookingType {
        self.draft.details.booking_type()
    }

    pub fn set_room_type(&mut self, value: RoomType) {
        self.draft.room_type = value;
    }

    /// Switching to a different type starts that type's fields empty.
    pub fn set_booking_type(&mut self, value: BookingType) {
        if self.booking_type() == value {
            return;
        }
        tracing::debug!("Booking type changed {} -> {}", self.booking_type(), value);
        self.draft.details = BookingDetails::empty(value);
    }

    pub fn set_detail(&mut self, field: DetailField, value: impl Into<String>) -> Result<()> {
        self.draft.details.set_field(field, value.into())
    }

    pub fn set_course(&mut self, value: impl Into<String>) -> Result<()> {
        self.set_detail(DetailField::Course, value)
    }

    pub fn set_reason(&mut self, value: impl Into<String>) -> Result<()> {
        self.set_detail(DetailField::Reason, value)
    }

    pub fn set_topic(&mut self, value: impl Into<String>) -> Result<()> {
        self.set_detail(DetailField::Topic, value)
    }

    pub fn set_other_reason(&mut self, value: impl Into<String>) -> Result<()> {
        self.set_detail(DetailField::OtherReason, value)
    }

    pub fn set_attendees(&mut self, value: u32) {
        self.draft.attendees = value;
    }

    /// Ordering of `start` and `end` is left to the date picker.
    pub fn set_date_range(&mut self, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) {
        self.draft.date_range = DateRange::new(start, end);
        if self.draft.date_range.is_multi_day() {
            tracing::debug!("Multi-day range selected, periods reset");
            self.draft.start_period = Period::FIRST;
            self.draft.end_period = Period::FIRST;
        }
    }

    pub fn is_multi_day(&self) -> bool {
        self.draft.date_range.is_multi_day()
    }

    /// Does not touch `end_period`, which may be left behind the new start.
    pub fn set_start_period(&mut self, value: Period) -> Result<()> {
        self.ensure_periods_enabled()?;
        self.draft.start_period = value;
        Ok(())
    }

    pub fn set_end_period(&mut self, value: Period) -> Result<()> {
        self.ensure_periods_enabled()?;
        self.draft.end_period = value;
        Ok(())
    }

    pub fn available_end_periods(&self) -> impl Iterator<Item = Period> + Clone {
        self.draft.start_period.through_last()
    }

    pub fn set_phone_number(&mut self, value: impl Into<String>) {
        self.draft.phone_number = value.into();
    }

    pub fn violations(&self) -> Vec<Violation> {
        let draft = &self.draft;
        let mut violations = Vec::new();

        violations.extend(check_required_text(
            draft.details.required_field().name(),
            draft.details.purpose(),
        ));
        violations.extend(check_at_least("attendees", draft.attendees, 1));

        if !draft.date_range.is_complete() {
            violations.push(incomplete_date_range());
        } else if !draft.date_range.is_multi_day() && draft.end_period < draft.start_period {
            violations.push(Violation::new(
                "endPeriod",
                "must not be before the start period",
            ));
        }

        violations.extend(check_phone_number("phoneNumber", &draft.phone_number));
        violations
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        match ValidationError::from_violations(self.violations()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Snapshot of the draft as a request. Fails with the full violation
    /// list when the draft is not valid.
    pub fn submit(&self) -> Result<BookingRequest> {
        if let Err(err) = self.validate() {
            tracing::warn!("Booking draft rejected: {}", err);
            return Err(err.into());
        }

        let draft = &self.draft;
        let (start, end) = match (draft.date_range.start, draft.date_range.end) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(ValidationError::single(incomplete_date_range()).into()),
        };

        let periods = if draft.date_range.is_multi_day() {
            None
        } else {
            Some(PeriodRange {
                start_period: draft.start_period,
                end_period: draft.end_period,
            })
        };

        let request = BookingRequest {
            room_type: draft.room_type,
            booking_type: draft.details.booking_type(),
            details: draft.details.clone(),
            purpose: draft.details.purpose().to_string(),
            attendees: draft.attendees,
            start,
            end,
            periods,
            phone_number: draft.phone_number.clone(),
        };
        tracing::info!(
            "Booking request ready: {:?} / {} for {} attendee(s), {}",
            request.room_type,
            request.booking_type,
            request.attendees,
            draft.date_range.display()
        );
        Ok(request)
    }

    fn ensure_periods_enabled(&self) -> Result<()> {
        if self.is_multi_day() {
            Err(BookingError::PeriodsDisabled)
        } else {
            Ok(())
        }
    }
}

fn incomplete_date_range() -> Violation {
    Violation::new("dateRange", "start and end dates are required")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn period(n: u8) -> Period {
        Period::new(n).unwrap()
    }

    #[test]
    fn test_defaults() {
        let form = BookingFormModel::new();
        let draft = form.draft();
        assert_eq!(draft.room_type, RoomType::Building);
        assert_eq!(form.booking_type(), BookingType::Teaching);
        assert_eq!(draft.attendees, 1);
        assert_eq!(draft.date_range, DateRange::default());
        assert_eq!((draft.start_period, draft.end_period), (Period::FIRST, Period::FIRST));
        assert!(draft.phone_number.is_empty());
        assert!(!form.is_multi_day());
    }

    #[test]
    fn test_switching_booking_type_starts_empty() {
        let mut form = BookingFormModel::new();
        form.set_course("CS101").unwrap();
        form.set_reason("make-up class").unwrap();

        form.set_booking_type(BookingType::Teaching);
        assert_eq!(form.draft().details.purpose(), "CS101");

        form.set_booking_type(BookingType::Exam);
        form.set_booking_type(BookingType::Teaching);
        assert_eq!(form.draft().details, BookingDetails::empty(BookingType::Teaching));
    }

    #[test]
    fn test_inactive_field_is_rejected() {
        let mut form = BookingFormModel::new();
        form.set_booking_type(BookingType::Activity);
        assert!(matches!(
            form.set_course("CS101"),
            Err(BookingError::InactiveField { .. })
        ));
        assert!(form.set_topic("seminar").is_ok());
    }

    #[test]
    fn test_period_setters_disabled_for_multi_day() {
        let mut form = BookingFormModel::new();
        form.set_date_range(Some(day(10)), Some(day(11)));
        assert!(matches!(
            form.set_start_period(period(3)),
            Err(BookingError::PeriodsDisabled)
        ));
        assert!(form.set_end_period(period(3)).is_err());

        form.set_date_range(Some(day(10)), Some(day(10)));
        assert!(form.set_start_period(period(3)).is_ok());
    }

    #[test]
    fn test_partial_range_is_not_multi_day() {
        let mut form = BookingFormModel::new();
        form.set_start_period(period(4)).unwrap();
        form.set_date_range(Some(day(10)), None);
        assert!(!form.is_multi_day());
        assert_eq!(form.draft().start_period, period(4));
        assert!(form.validate().unwrap_err().has_field("dateRange"));
    }

    #[test]
    fn test_stale_end_period_is_reported() {
        let mut form = BookingFormModel::new();
        form.set_date_range(Some(day(10)), Some(day(10)));
        form.set_end_period(period(2)).unwrap();
        form.set_start_period(period(5)).unwrap();
        assert_eq!(form.draft().end_period, period(2));
        assert!(form.validate().unwrap_err().has_field("endPeriod"));
    }

    #[test]
    fn test_zero_attendees_and_blank_text() {
        let mut form = BookingFormModel::new();
        form.set_course("   ").unwrap();
        form.set_attendees(0);
        let err = form.validate().unwrap_err();
        assert!(err.has_field("course"));
        assert!(err.has_field("attendees"));
        assert!(err.has_field("phoneNumber"));
    }

    #[test]
    fn test_multi_day_submit_has_no_periods() {
        let mut form = BookingFormModel::new();
        form.set_booking_type(BookingType::Other);
        form.set_other_reason("open house").unwrap();
        form.set_date_range(Some(day(10)), Some(day(12)));
        form.set_phone_number("021234567");

        let request = form.submit().unwrap();
        assert_eq!(request.periods, None);
        assert_eq!(request.purpose, "open house");
    }

    #[test]
    fn test_from_slot_fills_periods() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let slot = SlotSelection::new(
            date.and_hms_opt(9, 30, 0).unwrap(),
            date.and_hms_opt(12, 30, 0).unwrap(),
        );
        let form = BookingFormModel::from_slot(&slot, &Schedule::default());
        assert_eq!(form.draft().start_period, period(2));
        assert_eq!(form.draft().end_period, period(4));
        assert!(form.draft().date_range.is_complete());
    }

    #[test]
    fn test_from_slot_off_grid_keeps_defaults() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let slot = SlotSelection::new(
            date.and_hms_opt(9, 0, 0).unwrap(),
            date.and_hms_opt(10, 0, 0).unwrap(),
        );
        let form = BookingFormModel::from_slot(&slot, &Schedule::default());
        assert_eq!(form.draft().start_period, Period::FIRST);
        assert_eq!(form.draft().end_period, Period::FIRST);
    }
}
