use chrono::{NaiveDate, Weekday};
use plan_core::{CalendarKey, DayType, Duration, Project, ProjectConfig, ProjectError};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn standard_project() -> (Project, CalendarKey) {
    let mut project = Project::new();
    let standard = project.add_default_base_calendar().unwrap();
    (project, standard)
}

#[test]
fn duration_counts_working_days_inclusively() {
    let (project, _) = standard_project();
    // 2024-01-01 is a Monday.
    assert_eq!(project.get_duration(d(2024, 1, 1), d(2024, 1, 5)).unwrap(), Duration::days(5.0));
    assert_eq!(project.get_duration(d(2024, 1, 6), d(2024, 1, 6)).unwrap(), Duration::days(0.0));
    assert_eq!(project.get_duration(d(2024, 1, 1), d(2024, 1, 1)).unwrap(), Duration::days(1.0));
    assert_eq!(project.get_duration(d(2024, 1, 1), d(2024, 1, 14)).unwrap(), Duration::days(10.0));
}

#[test]
fn non_working_exception_reduces_duration() {
    let (mut project, standard) = standard_project();
    project
        .calendar_mut(standard)
        .unwrap()
        .add_calendar_exception(d(2024, 1, 3), d(2024, 1, 3), false);
    assert_eq!(project.get_duration(d(2024, 1, 1), d(2024, 1, 5)).unwrap(), Duration::days(4.0));
}

#[test]
fn exception_overrides_only_the_dates_it_covers() {
    let (mut project, standard) = standard_project();
    project
        .calendar_mut(standard)
        .unwrap()
        .add_calendar_exception(d(2024, 1, 8), d(2024, 1, 8), false);

    let calendar = project.calendar(standard).unwrap();
    assert!(!calendar.is_working_date(d(2024, 1, 8)).unwrap());
    assert!(calendar.is_working_day(Weekday::Mon).unwrap());
    assert!(calendar.is_working_date(d(2024, 1, 15)).unwrap());
}

#[test]
fn working_exception_opens_a_weekend() {
    let (mut project, standard) = standard_project();
    project
        .calendar_mut(standard)
        .unwrap()
        .add_calendar_exception(d(2024, 1, 6), d(2024, 1, 7), true);
    assert_eq!(project.get_duration(d(2024, 1, 1), d(2024, 1, 7)).unwrap(), Duration::days(7.0));
}

#[test]
fn first_matching_exception_wins() {
    let (mut project, standard) = standard_project();
    let calendar = project.calendar_mut(standard).unwrap();
    calendar.add_calendar_exception(d(2024, 1, 1), d(2024, 1, 31), false);
    calendar.add_calendar_exception(d(2024, 1, 10), d(2024, 1, 10), true);
    assert!(!project.calendar(standard).unwrap().is_working_date(d(2024, 1, 10)).unwrap());
}

#[test]
fn get_date_skips_weekends_and_exceptions() {
    let (mut project, standard) = standard_project();
    assert_eq!(project.get_date(d(2024, 1, 1), Duration::days(5.0)).unwrap(), d(2024, 1, 6));
    assert_eq!(project.get_date(d(2024, 1, 1), Duration::hours(16.0)).unwrap(), d(2024, 1, 3));

    project
        .calendar_mut(standard)
        .unwrap()
        .add_calendar_exception(d(2024, 1, 3), d(2024, 1, 3), false);
    assert_eq!(project.get_date(d(2024, 1, 1), Duration::days(5.0)).unwrap(), d(2024, 1, 9));
}

#[test]
fn derived_calendar_follows_base_changes() {
    let (mut project, standard) = standard_project();
    let resource = project.add_resource();
    let own = project.add_resource_calendar(resource).unwrap();
    assert_eq!(project.calendar(own).unwrap().calendar().base_calendar(), Some(standard));

    assert!(!project.calendar(own).unwrap().is_working_day(Weekday::Sat).unwrap());
    project.calendar_mut(standard).unwrap().set_working(Weekday::Sat, true);
    assert!(project.calendar(own).unwrap().is_working_day(Weekday::Sat).unwrap());

    project
        .calendar_mut(own)
        .unwrap()
        .set_working_day(Weekday::Mon, DayType::NonWorking)
        .unwrap();
    assert!(!project.calendar(own).unwrap().is_working_day(Weekday::Mon).unwrap());
    assert!(project.calendar(standard).unwrap().is_working_day(Weekday::Mon).unwrap());
}

#[test]
fn removed_base_leaves_default_days_unresolvable() {
    let (mut project, standard) = standard_project();
    let resource = project.add_resource();
    let own = project.add_resource_calendar(resource).unwrap();

    assert!(project.remove_calendar(standard));
    let err = project.calendar(own).unwrap().is_working_day(Weekday::Tue).unwrap_err();
    assert!(matches!(err, ProjectError::Resolution { day: Weekday::Tue, .. }));
}

#[test]
fn unknown_calendar_name_is_a_configuration_error() {
    let (project, _) = standard_project();
    let err = project
        .get_duration_in("Night Shift", d(2024, 1, 1), d(2024, 1, 5))
        .unwrap_err();
    assert!(matches!(err, ProjectError::Configuration { .. }));

    let empty = Project::new();
    assert!(empty.get_duration(d(2024, 1, 1), d(2024, 1, 5)).is_err());
}

#[test]
fn base_calendar_lookup_ignores_case() {
    let (project, standard) = standard_project();
    assert_eq!(project.base_calendar("standard"), Some(standard));
    assert_eq!(project.base_calendar("STANDARD"), Some(standard));
    assert_eq!(project.base_calendar(""), None);
    let unique_id = project.calendar(standard).unwrap().calendar().unique_id().unwrap();
    assert_eq!(project.base_calendar_by_unique_id(unique_id), Some(standard));
}

#[test]
fn default_base_calendar_has_weekday_hours() {
    let (project, standard) = standard_project();
    let calendar = project.calendar(standard).unwrap().calendar();
    assert_eq!(calendar.name(), "Standard");
    assert!(calendar.is_base_calendar());
    assert_eq!(calendar.working_day_flag(Weekday::Sun), DayType::NonWorking);
    assert_eq!(calendar.calendar_hours(Weekday::Wed).unwrap().working_minutes(), 480);
    assert!(calendar.calendar_hours(Weekday::Sat).unwrap().ranges().is_empty());
}

#[test]
fn malformed_hours_template_creates_no_calendar() {
    let config = ProjectConfig {
        default_hours: vec![("08:00".to_string(), "half past".to_string())],
        ..ProjectConfig::default()
    };
    let mut project = Project::with_config(config);
    let err = project.add_default_base_calendar().unwrap_err();
    assert!(matches!(err, ProjectError::Configuration { .. }));
    assert!(project.base_calendars().is_empty());
}

#[test]
fn resource_owns_at_most_one_calendar() {
    let (mut project, _) = standard_project();
    let resource = project.add_resource();
    project.resource_mut(resource).unwrap().set_name("Crane");
    let own = project.add_resource_calendar(resource).unwrap();
    assert_eq!(project.calendar(own).unwrap().calendar().name(), "Crane");

    let err = project.add_resource_calendar(resource).unwrap_err();
    assert!(matches!(err, ProjectError::Capacity { .. }));
    let spare = project.new_resource_calendar();
    assert!(matches!(
        project.set_resource_calendar(resource, spare),
        Err(ProjectError::Capacity { .. })
    ));
    assert_eq!(project.resource(resource).unwrap().calendar(), Some(own));
}

#[test]
fn base_calendar_chains_cannot_loop() {
    let (mut project, standard) = standard_project();
    let a = project.new_resource_calendar();
    let b = project.new_resource_calendar();
    project.set_base_calendar(a, Some(b)).unwrap();
    let err = project.set_base_calendar(b, Some(a)).unwrap_err();
    assert!(matches!(err, ProjectError::Configuration { .. }));
    assert_eq!(project.calendar(b).unwrap().calendar().base_calendar(), Some(standard));
    assert!(project.set_base_calendar(standard, Some(a)).is_err());
}
