use super::TimeRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date-range override of the weekday rules. Both ends are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarException {
    from: NaiveDate,
    to: NaiveDate,
    working: bool,
    ranges: Vec<TimeRange>,
}

impl CalendarException {
    pub fn new(from: NaiveDate, to: NaiveDate, working: bool) -> Self {
        Self {
            from,
            to,
            working,
            ranges: Vec::new(),
        }
    }

    pub fn from_date(&self) -> NaiveDate {
        self.from
    }

    pub fn to_date(&self) -> NaiveDate {
        self.to
    }

    pub fn working(&self) -> bool {
        self.working
    }

    pub fn set_working(&mut self, working: bool) {
        self.working = working;
    }

    pub fn ranges(&self) -> &[TimeRange] {
        &self.ranges
    }

    pub fn add_range(&mut self, range: TimeRange) {
        self.ranges.push(range);
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}
