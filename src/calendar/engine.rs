use super::{Calendar, DayType, WEEKDAYS};
use crate::arena::{Arena, CalendarKey};
use crate::duration::{Duration, DurationDefaults};
use crate::error::{ProjectError, ProjectResult};
use chrono::{Datelike, NaiveDate, Weekday};

/// Read-only view of one calendar together with the calendars it may
/// delegate to. Delegation is resolved on every query, so changes to a base
/// calendar are seen by derived calendars immediately.
#[derive(Debug, Clone, Copy)]
pub struct CalendarRef<'a> {
    calendars: &'a Arena<CalendarKey, Calendar>,
    calendar: &'a Calendar,
    defaults: DurationDefaults,
}

impl<'a> CalendarRef<'a> {
    pub(crate) fn new(
        calendars: &'a Arena<CalendarKey, Calendar>,
        calendar: &'a Calendar,
        defaults: DurationDefaults,
    ) -> Self {
        Self {
            calendars,
            calendar,
            defaults,
        }
    }

    pub fn calendar(&self) -> &'a Calendar {
        self.calendar
    }

    pub fn base(&self) -> Option<CalendarRef<'a>> {
        let base = self.calendars.get(self.calendar.base_calendar()?)?;
        Some(CalendarRef::new(self.calendars, base, self.defaults))
    }

    pub fn is_working_day(&self, day: Weekday) -> ProjectResult<bool> {
        let mut current = self.calendar;
        // Base links are acyclic when set through the project; the bound
        // keeps a hand-built cycle from spinning forever.
        for _ in 0..=self.calendars.len() {
            match current.working_day_flag(day) {
                DayType::Working => return Ok(true),
                DayType::NonWorking => return Ok(false),
                DayType::Default => match current.base_calendar().and_then(|key| self.calendars.get(key)) {
                    Some(base) => current = base,
                    None => break,
                },
            }
        }
        Err(ProjectError::Resolution {
            calendar: current.display_name(),
            day,
        })
    }

    /// The first exception covering `date` decides; otherwise the weekday does.
    pub fn is_working_date(&self, date: NaiveDate) -> ProjectResult<bool> {
        match self.calendar.exceptions().iter().find(|exception| exception.contains(date)) {
            Some(exception) => Ok(exception.working()),
            None => self.is_working_day(date.weekday()),
        }
    }

    /// Number of working days from `start` to `end`, both inclusive.
    pub fn duration(&self, start: NaiveDate, end: NaiveDate) -> ProjectResult<Duration> {
        let mut working = 0u32;
        for date in start.iter_days().take_while(|date| *date <= end) {
            if self.is_working_date(date)? {
                working += 1;
            }
        }
        Ok(Duration::days(f64::from(working)))
    }

    pub fn working_dates(&self, start: NaiveDate, end: NaiveDate) -> ProjectResult<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        for date in start.iter_days().take_while(|date| *date <= end) {
            if self.is_working_date(date)? {
                dates.push(date);
            }
        }
        Ok(dates)
    }

    /// Walk day by day from `start`, consuming one unit of `duration` on
    /// every working date, and return the day after the last one consumed.
    /// Negative durations walk backwards. Fractional days are dropped.
    pub fn date(&self, start: NaiveDate, duration: Duration) -> ProjectResult<NaiveDate> {
        let days = duration.whole_days(&self.defaults);
        let forward = days >= 0;
        let mut remaining = days.unsigned_abs();

        // Without a working weekday only working exceptions can be counted,
        // so the walk must stop past the last one in its direction.
        let limit = if remaining > 0 && !self.has_working_weekday()? {
            let limit = self.last_working_exception(start, forward).ok_or_else(|| {
                ProjectError::configuration(format!(
                    "calendar '{}' has no working day to count {days} days on",
                    self.calendar.display_name()
                ))
            })?;
            Some(limit)
        } else {
            None
        };

        let mut current = start;
        while remaining > 0 {
            if let Some(limit) = limit {
                if (forward && current > limit) || (!forward && current < limit) {
                    return Err(ProjectError::configuration(format!(
                        "calendar '{}' runs out of working days {days} days from {start}",
                        self.calendar.display_name()
                    )));
                }
            }
            if self.is_working_date(current)? {
                remaining -= 1;
            }
            let next = if forward {
                current.succ_opt()
            } else {
                current.pred_opt()
            };
            current = next.ok_or_else(|| {
                ProjectError::configuration(format!("date walk from {start} ran out of calendar range"))
            })?;
        }
        Ok(current)
    }

    /// Furthest end of a working exception reachable from `start`.
    fn last_working_exception(&self, start: NaiveDate, forward: bool) -> Option<NaiveDate> {
        let exceptions = self.calendar.exceptions().iter().filter(|exception| exception.working());
        if forward {
            exceptions
                .map(|exception| exception.to_date())
                .filter(|to| *to >= start)
                .max()
        } else {
            exceptions
                .map(|exception| exception.from_date())
                .filter(|from| *from <= start)
                .min()
        }
    }

    fn has_working_weekday(&self) -> ProjectResult<bool> {
        for day in WEEKDAYS {
            if self.is_working_day(day)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
