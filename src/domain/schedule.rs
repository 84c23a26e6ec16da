use crate::domain::model::Period;
use chrono::{NaiveTime, TimeDelta, Timelike};

/// Clock times of the teaching periods. The booking calendar shows one slot
/// per period, starting at `day_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    day_start: NaiveTime,
    period_minutes: u32,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(8, 30, 0).unwrap_or(NaiveTime::MIN),
            period_minutes: 60,
        }
    }
}

impl Schedule {
    pub fn new(day_start: NaiveTime, period_minutes: u32) -> Self {
        Self {
            day_start,
            period_minutes: period_minutes.max(1),
        }
    }

    pub fn period_start(&self, period: Period) -> NaiveTime {
        self.offset(u32::from(period.get()) - 1)
    }

    pub fn period_end(&self, period: Period) -> NaiveTime {
        self.offset(u32::from(period.get()))
    }

    pub fn day_end(&self) -> NaiveTime {
        self.period_end(Period::LAST)
    }

    /// Period whose slot begins exactly at `time`.
    pub fn period_starting_at(&self, time: NaiveTime) -> Option<Period> {
        self.slot_index(time)
            .and_then(|index| u8::try_from(index + 1).ok())
            .and_then(|n| Period::new(n).ok())
    }

    /// Period whose slot finishes exactly at `time`.
    pub fn period_ending_at(&self, time: NaiveTime) -> Option<Period> {
        self.slot_index(time)
            .and_then(|index| u8::try_from(index).ok())
            .and_then(|n| Period::new(n).ok())
    }

    fn offset(&self, slots: u32) -> NaiveTime {
        let minutes = i64::from(slots * self.period_minutes);
        self.day_start + TimeDelta::minutes(minutes)
    }

    fn slot_index(&self, time: NaiveTime) -> Option<u32> {
        if time.second() != 0 || time < self.day_start {
            return None;
        }
        let minutes = (time - self.day_start).num_minutes();
        let minutes = u32::try_from(minutes).ok()?;
        if minutes % self.period_minutes == 0 {
            Some(minutes / self.period_minutes)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_default_schedule_spans_the_calendar_day() {
        let schedule = Schedule::default();
        assert_eq!(schedule.period_start(Period::FIRST), hm(8, 30));
        assert_eq!(schedule.period_end(Period::FIRST), hm(9, 30));
        assert_eq!(schedule.day_end(), hm(18, 30));
    }

    #[test]
    fn test_period_lookup_by_clock_time() {
        let schedule = Schedule::default();
        assert_eq!(schedule.period_starting_at(hm(9, 30)), Period::new(2).ok());
        assert_eq!(schedule.period_ending_at(hm(11, 30)), Period::new(3).ok());
        assert_eq!(schedule.period_starting_at(hm(9, 45)), None);
        assert_eq!(schedule.period_starting_at(hm(7, 30)), None);
        assert_eq!(schedule.period_starting_at(hm(18, 30)), None);
        assert_eq!(schedule.period_ending_at(hm(8, 30)), None);
    }
}
