mod engine;
mod exception;
mod hours;

pub use engine::CalendarRef;
pub use exception::CalendarException;
pub use hours::{CalendarHours, TimeRange};

use crate::arena::{CalendarKey, ResourceKey};
use crate::error::{ProjectError, ProjectResult};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Per-weekday working state. `Default` defers to the base calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayType {
    NonWorking,
    Working,
    Default,
}

fn day_index(day: Weekday) -> usize {
    day.num_days_from_sunday() as usize
}

#[derive(Debug, Clone)]
pub struct Calendar {
    key: CalendarKey,
    unique_id: Option<i32>,
    name: String,
    is_base: bool,
    base_calendar: Option<CalendarKey>,
    days: [DayType; 7],
    hours: [Option<CalendarHours>; 7],
    exceptions: Vec<CalendarException>,
    resource: Option<ResourceKey>,
}

impl Calendar {
    pub(crate) fn new_base(key: CalendarKey) -> Self {
        Self::with_days(key, true, [DayType::Working; 7])
    }

    pub(crate) fn new_derived(key: CalendarKey) -> Self {
        Self::with_days(key, false, [DayType::Default; 7])
    }

    fn with_days(key: CalendarKey, is_base: bool, days: [DayType; 7]) -> Self {
        Self {
            key,
            unique_id: None,
            name: String::new(),
            is_base,
            base_calendar: None,
            days,
            hours: Default::default(),
            exceptions: Vec::new(),
            resource: None,
        }
    }

    pub fn key(&self) -> CalendarKey {
        self.key
    }

    pub fn unique_id(&self) -> Option<i32> {
        self.unique_id
    }

    pub fn set_unique_id(&mut self, unique_id: i32) {
        self.unique_id = Some(unique_id);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_base_calendar(&self) -> bool {
        self.is_base
    }

    pub fn base_calendar(&self) -> Option<CalendarKey> {
        self.base_calendar
    }

    pub(crate) fn link_base_calendar(&mut self, base: Option<CalendarKey>) {
        self.base_calendar = base;
    }

    /// Resource this calendar belongs to, if it is a resource calendar.
    pub fn resource(&self) -> Option<ResourceKey> {
        self.resource
    }

    pub(crate) fn link_resource(&mut self, resource: Option<ResourceKey>) {
        self.resource = resource;
    }

    pub fn working_day_flag(&self, day: Weekday) -> DayType {
        self.days[day_index(day)]
    }

    /// A base calendar has nothing to defer to, so `Default` is refused there.
    pub fn set_working_day(&mut self, day: Weekday, flag: DayType) -> ProjectResult<()> {
        if self.is_base && flag == DayType::Default {
            return Err(ProjectError::configuration(format!(
                "base calendar '{}' cannot mark {day} as DEFAULT",
                self.name
            )));
        }
        self.days[day_index(day)] = flag;
        Ok(())
    }

    pub fn set_working(&mut self, day: Weekday, working: bool) {
        self.days[day_index(day)] = if working {
            DayType::Working
        } else {
            DayType::NonWorking
        };
    }

    pub fn add_calendar_exception(&mut self, from: NaiveDate, to: NaiveDate, working: bool) -> &mut CalendarException {
        self.exceptions.push(CalendarException::new(from, to, working));
        let last = self.exceptions.len() - 1;
        &mut self.exceptions[last]
    }

    pub fn exceptions(&self) -> &[CalendarException] {
        &self.exceptions
    }

    pub fn remove_calendar_exception(&mut self, index: usize) -> Option<CalendarException> {
        (index < self.exceptions.len()).then(|| self.exceptions.remove(index))
    }

    /// Start a fresh, empty set of hours for `day`, replacing any existing one.
    pub fn add_calendar_hours(&mut self, day: Weekday) -> &mut CalendarHours {
        self.hours[day_index(day)].insert(CalendarHours::new(self.key, day))
    }

    /// Install hours built elsewhere. They must have been created for this calendar.
    pub fn attach_calendar_hours(&mut self, hours: CalendarHours) -> ProjectResult<()> {
        self.check_owner(&hours)?;
        let index = day_index(hours.day());
        self.hours[index] = Some(hours);
        Ok(())
    }

    pub fn remove_calendar_hours(&mut self, hours: &CalendarHours) -> ProjectResult<CalendarHours> {
        self.check_owner(hours)?;
        self.hours[day_index(hours.day())].take().ok_or_else(|| {
            ProjectError::identity(format!(
                "calendar '{}' has no hours for {}",
                self.name,
                hours.day()
            ))
        })
    }

    fn check_owner(&self, hours: &CalendarHours) -> ProjectResult<()> {
        if hours.calendar() != self.key {
            return Err(ProjectError::identity(format!(
                "hours for {} belong to {:?}, not calendar '{}'",
                hours.day(),
                hours.calendar(),
                self.name
            )));
        }
        Ok(())
    }

    pub fn calendar_hours(&self, day: Weekday) -> Option<&CalendarHours> {
        self.hours[day_index(day)].as_ref()
    }

    /// Empty hours for the weekend and `template` for Monday to Friday.
    /// The template is parsed before anything is changed.
    pub fn add_default_calendar_hours(&mut self, template: &[(String, String)]) -> ProjectResult<()> {
        let ranges = TimeRange::parse_template(template)?;
        for day in WEEKDAYS {
            let hours = self.add_calendar_hours(day);
            if !matches!(day, Weekday::Sat | Weekday::Sun) {
                for range in &ranges {
                    hours.add_range(*range);
                }
            }
        }
        Ok(())
    }

    pub(crate) fn display_name(&self) -> String {
        match (self.name.is_empty(), self.unique_id) {
            (false, _) => self.name.clone(),
            (true, Some(unique_id)) => format!("#{unique_id}"),
            (true, None) => format!("{:?}", self.key),
        }
    }
}
