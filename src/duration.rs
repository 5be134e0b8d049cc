use serde::{Deserialize, Serialize};
use std::fmt;

const MINUTES_PER_ELAPSED_DAY: f64 = 24.0 * 60.0;

/// Unit a [`Duration`] is expressed in. Elapsed units count calendar time,
/// the others count working time as defined by [`DurationDefaults`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
    ElapsedMinutes,
    ElapsedHours,
    ElapsedDays,
    ElapsedWeeks,
    ElapsedMonths,
    ElapsedYears,
}

impl TimeUnit {
    fn minutes(self, defaults: &DurationDefaults) -> f64 {
        let per_day = f64::from(defaults.minutes_per_day);
        let per_week = f64::from(defaults.minutes_per_week);
        match self {
            TimeUnit::Minutes | TimeUnit::ElapsedMinutes => 1.0,
            TimeUnit::Hours | TimeUnit::ElapsedHours => 60.0,
            TimeUnit::Days => per_day,
            TimeUnit::Weeks => per_week,
            TimeUnit::Months => per_week * 4.0,
            TimeUnit::Years => per_week * 52.0,
            TimeUnit::ElapsedDays => MINUTES_PER_ELAPSED_DAY,
            TimeUnit::ElapsedWeeks => MINUTES_PER_ELAPSED_DAY * 7.0,
            TimeUnit::ElapsedMonths => MINUTES_PER_ELAPSED_DAY * 7.0 * 4.0,
            TimeUnit::ElapsedYears => MINUTES_PER_ELAPSED_DAY * 7.0 * 52.0,
        }
    }

    pub fn is_elapsed(self) -> bool {
        matches!(
            self,
            TimeUnit::ElapsedMinutes
                | TimeUnit::ElapsedHours
                | TimeUnit::ElapsedDays
                | TimeUnit::ElapsedWeeks
                | TimeUnit::ElapsedMonths
                | TimeUnit::ElapsedYears
        )
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
            TimeUnit::Weeks => "w",
            TimeUnit::Months => "mo",
            TimeUnit::Years => "y",
            TimeUnit::ElapsedMinutes => "em",
            TimeUnit::ElapsedHours => "eh",
            TimeUnit::ElapsedDays => "ed",
            TimeUnit::ElapsedWeeks => "ew",
            TimeUnit::ElapsedMonths => "emo",
            TimeUnit::ElapsedYears => "ey",
        }
    }
}

/// Project-wide working-time lengths used when converting between units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationDefaults {
    pub minutes_per_day: u32,
    pub minutes_per_week: u32,
}

impl Default for DurationDefaults {
    fn default() -> Self {
        Self {
            minutes_per_day: 8 * 60,
            minutes_per_week: 40 * 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Duration {
    value: f64,
    units: TimeUnit,
}

impl Duration {
    pub fn new(value: f64, units: TimeUnit) -> Self {
        Self { value, units }
    }

    pub fn days(value: f64) -> Self {
        Self::new(value, TimeUnit::Days)
    }

    pub fn hours(value: f64) -> Self {
        Self::new(value, TimeUnit::Hours)
    }

    pub fn elapsed_days(value: f64) -> Self {
        Self::new(value, TimeUnit::ElapsedDays)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn units(&self) -> TimeUnit {
        self.units
    }

    /// Re-express this duration in `target`, going through minutes.
    pub fn convert_units(self, target: TimeUnit, defaults: &DurationDefaults) -> Duration {
        if self.units == target {
            return self;
        }
        let divisor = target.minutes(defaults);
        if divisor == 0.0 {
            return Duration::new(0.0, target);
        }
        Duration::new(self.value * self.units.minutes(defaults) / divisor, target)
    }

    /// Whole working days, truncated toward zero.
    pub fn whole_days(self, defaults: &DurationDefaults) -> i64 {
        self.convert_units(TimeUnit::Days, defaults).value.trunc() as i64
    }

    /// `self - other`, expressed in `self`'s units.
    pub fn minus(self, other: Duration, defaults: &DurationDefaults) -> Duration {
        let other = other.convert_units(self.units, defaults);
        Duration::new(self.value - other.value, self.units)
    }

    pub fn scale(self, factor: f64) -> Duration {
        Duration::new(self.value * factor, self.units)
    }

    pub fn in_minutes(self, defaults: &DurationDefaults) -> f64 {
        self.value * self.units.minutes(defaults)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.units.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_convert_to_days_with_default_day_length() {
        let defaults = DurationDefaults::default();
        let converted = Duration::hours(20.0).convert_units(TimeUnit::Days, &defaults);
        assert_eq!(converted.value(), 2.5);
        assert_eq!(converted.units(), TimeUnit::Days);
    }

    #[test]
    fn weeks_and_months_follow_week_length() {
        let defaults = DurationDefaults::default();
        let week = Duration::new(1.0, TimeUnit::Weeks).convert_units(TimeUnit::Days, &defaults);
        assert_eq!(week.value(), 5.0);
        let month = Duration::new(1.0, TimeUnit::Months).convert_units(TimeUnit::Weeks, &defaults);
        assert_eq!(month.value(), 4.0);
    }

    #[test]
    fn elapsed_days_use_full_calendar_days() {
        let defaults = DurationDefaults::default();
        let hours = Duration::elapsed_days(1.0).convert_units(TimeUnit::Hours, &defaults);
        assert_eq!(hours.value(), 24.0);
        assert!(TimeUnit::ElapsedDays.is_elapsed());
        assert!(!TimeUnit::Days.is_elapsed());
    }

    #[test]
    fn whole_days_truncates_toward_zero() {
        let defaults = DurationDefaults::default();
        assert_eq!(Duration::days(2.9).whole_days(&defaults), 2);
        assert_eq!(Duration::days(-2.9).whole_days(&defaults), -2);
        assert_eq!(Duration::hours(12.0).whole_days(&defaults), 1);
    }

    #[test]
    fn minus_converts_the_subtrahend() {
        let defaults = DurationDefaults::default();
        let diff = Duration::days(3.0).minus(Duration::hours(8.0), &defaults);
        assert_eq!(diff, Duration::days(2.0));
    }
}
