use chrono::{Days, NaiveDate};
use plan_core::calendar::WEEKDAYS;
use plan_core::{CalendarKey, Duration, Project};
use proptest::prelude::*;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..3650).prop_map(|offset| d(2020, 1, 1) + Days::new(offset))
}

fn standard_project() -> (Project, CalendarKey) {
    let mut project = Project::new();
    let standard = project.add_default_base_calendar().unwrap();
    (project, standard)
}

proptest! {
    #[test]
    fn derived_calendar_matches_its_base(flags in prop::array::uniform7(any::<bool>())) {
        let mut project = Project::new();
        let base = project.add_base_calendar();
        let calendar = project.calendar_mut(base).unwrap();
        calendar.set_name("Standard");
        for (day, working) in WEEKDAYS.into_iter().zip(flags) {
            calendar.set_working(day, working);
        }
        let derived = project.new_resource_calendar();

        let base_view = project.calendar(base).unwrap();
        let derived_view = project.calendar(derived).unwrap();
        for day in WEEKDAYS {
            prop_assert_eq!(derived_view.is_working_day(day).unwrap(), base_view.is_working_day(day).unwrap());
        }
    }

    #[test]
    fn duration_counts_working_dates(start in any_date(), span in 0u64..120, holiday in 0u64..120) {
        let (mut project, standard) = standard_project();
        let closed = start + Days::new(holiday);
        project.calendar_mut(standard).unwrap().add_calendar_exception(closed, closed, false);
        let end = start + Days::new(span);

        let view = project.calendar(standard).unwrap();
        let duration = view.duration(start, end).unwrap();
        let dates = view.working_dates(start, end).unwrap();
        prop_assert_eq!(duration, Duration::days(dates.len() as f64));
        prop_assert!(dates.len() as u64 <= span + 1);
        prop_assert!(!dates.contains(&closed));
    }

    #[test]
    fn forward_walk_ends_after_the_last_counted_day(start in any_date(), days in 1i64..60) {
        let (project, standard) = standard_project();
        let view = project.calendar(standard).unwrap();
        let result = view.date(start, Duration::days(days as f64)).unwrap();
        let last = result.pred_opt().unwrap();
        prop_assert!(view.is_working_date(last).unwrap());
        prop_assert_eq!(view.duration(start, last).unwrap(), Duration::days(days as f64));
    }

    #[test]
    fn backward_walk_ends_before_the_last_counted_day(start in any_date(), days in 1i64..60) {
        let (project, standard) = standard_project();
        let view = project.calendar(standard).unwrap();
        let result = view.date(start, Duration::days(-(days as f64))).unwrap();
        let last = result.succ_opt().unwrap();
        prop_assert!(view.is_working_date(last).unwrap());
        prop_assert_eq!(view.duration(last, start).unwrap(), Duration::days(days as f64));
    }
}
