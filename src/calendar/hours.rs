use crate::arena::CalendarKey;
use crate::error::{ProjectError, ProjectResult};
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parse an `HH:MM`-`HH:MM` pair.
    pub fn parse(start: &str, end: &str) -> ProjectResult<Self> {
        Ok(Self::new(parse_time(start)?, parse_time(end)?))
    }

    /// Parse every pair of a working-time template, failing on the first bad entry.
    pub fn parse_template(template: &[(String, String)]) -> ProjectResult<Vec<TimeRange>> {
        template
            .iter()
            .map(|(start, end)| TimeRange::parse(start, end))
            .collect()
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes().max(0)
    }
}

fn parse_time(text: &str) -> ProjectResult<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), TIME_FORMAT)
        .map_err(|err| ProjectError::configuration(format!("invalid time of day '{text}': {err}")))
}

/// Working periods for one weekday, owned by exactly one calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarHours {
    calendar: CalendarKey,
    day: Weekday,
    ranges: Vec<TimeRange>,
}

impl CalendarHours {
    pub fn new(calendar: CalendarKey, day: Weekday) -> Self {
        Self {
            calendar,
            day,
            ranges: Vec::new(),
        }
    }

    pub fn calendar(&self) -> CalendarKey {
        self.calendar
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn ranges(&self) -> &[TimeRange] {
        &self.ranges
    }

    pub fn add_range(&mut self, range: TimeRange) {
        self.ranges.push(range);
    }

    pub fn working_minutes(&self) -> i64 {
        self.ranges.iter().map(TimeRange::minutes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_template() {
        let template = vec![
            ("08:00".to_string(), "12:00".to_string()),
            ("13:00".to_string(), "17:00".to_string()),
        ];
        let ranges = TimeRange::parse_template(&template).unwrap();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].minutes() + ranges[1].minutes(), 480);
    }

    #[test]
    fn rejects_malformed_time() {
        let err = TimeRange::parse("25:00", "12:00").unwrap_err();
        assert!(matches!(err, ProjectError::Configuration { .. }));
    }
}
