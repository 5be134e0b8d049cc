use chrono::{NaiveDate, NaiveDateTime};
use plan_core::{Duration, Project, ProjectConfig, ProjectError, ProjectListener, RelationType, Task, TaskField, TaskKey};
use std::cell::RefCell;
use std::rc::Rc;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn at(y: i32, m: u32, day: u32, hour: u32) -> NaiveDateTime {
    d(y, m, day).and_hms_opt(hour, 0, 0).unwrap()
}

fn wbs(project: &Project, key: TaskKey) -> &str {
    project.task(key).unwrap().wbs().unwrap()
}

#[test]
fn new_tasks_are_numbered_automatically() {
    let mut project = Project::new();
    let first = project.add_task();
    let second = project.add_task();
    let child_a = project.add_child_task(first).unwrap();
    let child_b = project.add_child_task(first).unwrap();

    let ids: Vec<_> = project.tasks().map(|task| (task.id(), task.unique_id())).collect();
    assert_eq!(
        ids,
        vec![(Some(1), Some(1)), (Some(2), Some(2)), (Some(3), Some(3)), (Some(4), Some(4))]
    );
    assert_eq!(wbs(&project, first), "1");
    assert_eq!(wbs(&project, second), "2");
    assert_eq!(wbs(&project, child_a), "1.1");
    assert_eq!(wbs(&project, child_b), "1.2");
    assert_eq!(project.task(child_b).unwrap().outline_number(), Some("1.2"));
    assert_eq!(project.task(child_b).unwrap().outline_level(), Some(2));
    assert_eq!(project.root_tasks(), &[first, second]);
    assert_eq!(project.task(first).unwrap().children(), &[child_a, child_b]);
    project.validate_structure().unwrap();
}

#[test]
fn manual_config_leaves_identity_to_the_caller() {
    let mut project = Project::with_config(ProjectConfig::manual());
    let key = project.add_task();
    let task = project.task(key).unwrap();
    assert_eq!(task.id(), None);
    assert_eq!(task.unique_id(), None);
    assert_eq!(task.wbs(), None);
    assert_eq!(task.outline_level(), None);
    assert_eq!(project.counters().task_unique_id, 0);
}

#[test]
fn outline_levels_rebuild_the_tree() {
    let mut project = Project::new();
    let keys: Vec<TaskKey> = (0..5).map(|_| project.add_task()).collect();
    for (key, level) in keys.iter().zip([1, 2, 3, 2, 1]) {
        project.task_mut(*key).unwrap().set_outline_level(level);
    }

    project.update_structure();

    let [t1, t2, t3, t4, t5] = [keys[0], keys[1], keys[2], keys[3], keys[4]];
    assert_eq!(project.root_tasks(), &[t1, t5]);
    assert_eq!(project.task(t1).unwrap().children(), &[t2, t4]);
    assert_eq!(project.task(t2).unwrap().children(), &[t3]);
    assert_eq!(project.task(t4).unwrap().parent(), Some(t1));
    let codes: Vec<_> = keys.iter().map(|key| wbs(&project, *key)).collect();
    assert_eq!(codes, vec!["1", "1.1", "1.1.1", "1.2", "2"]);
    assert_eq!(project.task(t3).unwrap().outline_number(), Some("1.1.1"));
    project.validate_structure().unwrap();
}

#[test]
fn rebuild_orders_tasks_by_id() {
    let mut project = Project::new();
    let a = project.add_task();
    let b = project.add_task();
    let c = project.add_task();
    project.set_task_id(a, 30).unwrap();
    project.set_task_id(b, 20).unwrap();
    project.set_task_id(c, 10).unwrap();

    project.update_structure();
    assert_eq!(project.all_tasks(), &[c, b, a]);
    assert_eq!(project.root_tasks(), &[c, b, a]);
    assert_eq!(wbs(&project, c), "1");
    assert_eq!(wbs(&project, a), "3");
}

#[test]
fn summary_task_numbers_its_children_from_one() {
    let config = ProjectConfig {
        auto_wbs: true,
        auto_outline_number: true,
        ..ProjectConfig::manual()
    };
    let mut project = Project::with_config(config);
    let keys: Vec<TaskKey> = (0..3).map(|_| project.add_task()).collect();
    for (position, key) in keys.iter().enumerate() {
        let number = position as i32;
        project.set_task_id(*key, number).unwrap();
        project.set_task_unique_id(*key, number).unwrap();
        project.task_mut(*key).unwrap().set_outline_level(if number == 0 { 0 } else { 1 });
    }

    project.update_structure();

    assert_eq!(project.root_tasks(), &[keys[0]]);
    assert_eq!(wbs(&project, keys[0]), "0");
    assert_eq!(wbs(&project, keys[1]), "1");
    assert_eq!(wbs(&project, keys[2]), "2");
    project.validate_structure().unwrap();
}

#[test]
fn synchronize_task_ids_renumbers_densely() {
    let mut project = Project::new();
    let keys: Vec<TaskKey> = (0..3).map(|_| project.add_task()).collect();
    for (key, id) in keys.iter().zip([5, 10, 20]) {
        project.set_task_id(*key, id).unwrap();
    }

    project.synchronize_task_ids();

    let ids: Vec<_> = keys.iter().map(|key| project.task(*key).unwrap().id()).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    assert!(project.get_task_by_id(10).is_none());
    assert_eq!(project.get_task_by_id(2).map(Task::key), Some(keys[1]));
    assert_eq!(project.counters().task_id, 20);
    let next = project.add_task();
    assert_eq!(project.task(next).unwrap().id(), Some(21));
}

#[test]
fn synchronize_keeps_a_zero_first_id() {
    let mut project = Project::new();
    let keys: Vec<TaskKey> = (0..3).map(|_| project.add_task()).collect();
    for (key, id) in keys.iter().zip([0, 7, 9]) {
        project.set_task_id(*key, id).unwrap();
    }
    project.synchronize_task_ids();
    let ids: Vec<_> = keys.iter().map(|key| project.task(*key).unwrap().id()).collect();
    assert_eq!(ids, vec![Some(0), Some(1), Some(2)]);
}

#[test]
fn synchronize_resource_ids_starts_at_one() {
    let mut project = Project::new();
    let first = project.add_resource();
    let second = project.add_resource();
    project.set_resource_id(first, 40).unwrap();
    project.set_resource_id(second, 12).unwrap();

    project.synchronize_resource_ids();

    assert_eq!(project.resource(second).unwrap().id(), Some(1));
    assert_eq!(project.resource(first).unwrap().id(), Some(2));
    assert_eq!(project.all_resources(), &[second, first]);
    assert!(project.get_resource_by_id(40).is_none());
    assert_eq!(project.counters().resource_id, 40);
}

#[test]
fn validation_reports_inconsistent_levels() {
    let mut project = Project::new();
    let parent = project.add_task();
    let child = project.add_child_task(parent).unwrap();
    project.validate_structure().unwrap();

    project.task_mut(child).unwrap().set_outline_level(5);
    let err = project.validate_structure().unwrap_err();
    assert!(matches!(err, ProjectError::Structure { .. }));
}

#[test]
fn validation_reports_duplicate_ids() {
    let mut project = Project::new();
    let first = project.add_task();
    let second = project.add_task();
    let taken = project.task(first).unwrap().id().unwrap();
    project.set_task_id(second, taken).unwrap();
    assert!(matches!(project.validate_structure(), Err(ProjectError::Structure { .. })));
}

#[test]
fn project_dates_ignore_the_summary_task() {
    let mut project = Project::new();
    let work = project.add_task();
    let milestone = project.add_task();
    let summary = project.add_task();
    project.set_task_unique_id(summary, 0).unwrap();

    let task = project.task_mut(work).unwrap();
    task.set_start(at(2024, 1, 2, 8));
    task.set_finish(at(2024, 1, 5, 17));
    let task = project.task_mut(milestone).unwrap();
    task.set_milestone(true);
    task.set_start(at(2023, 12, 1, 8));
    task.set_finish(at(2024, 1, 1, 12));
    let task = project.task_mut(summary).unwrap();
    task.set_start(at(2023, 6, 1, 8));
    task.set_finish(at(2025, 6, 1, 17));

    assert_eq!(project.start_date(), Some(at(2024, 1, 1, 12)));
    assert_eq!(project.finish_date(), Some(at(2024, 1, 5, 17)));

    project.task_mut(work).unwrap().set_actual_finish(at(2024, 1, 8, 12));
    assert_eq!(project.finish_date(), Some(at(2024, 1, 8, 12)));
    assert_eq!(Project::new().start_date(), None);
}

#[test]
fn complete_through_walks_the_default_calendar() {
    let mut project = Project::new();
    project.add_default_base_calendar().unwrap();
    let key = project.add_task();
    let task = project.task_mut(key).unwrap();
    task.set_actual_start(at(2024, 1, 1, 8));
    task.set_duration(Duration::days(5.0));
    task.set_percent_complete(40.0);

    assert_eq!(project.complete_through(key).unwrap(), Some(at(2024, 1, 3, 8)));
    assert_eq!(project.task(key).unwrap().complete_through(), None);

    project.task_mut(key).unwrap().set_percent_complete(60.0);
    assert_eq!(project.complete_through(key).unwrap(), Some(at(2024, 1, 4, 8)));

    let task = project.task_mut(key).unwrap();
    task.set_percent_complete(100.0);
    task.set_actual_finish(at(2024, 1, 5, 17));
    assert_eq!(project.task(key).unwrap().complete_through(), Some(at(2024, 1, 5, 17)));
    assert_eq!(project.complete_through(key).unwrap(), Some(at(2024, 1, 5, 17)));
}

#[test]
fn complete_through_follows_the_task_calendar() {
    let mut project = Project::new();
    let standard = project.add_default_base_calendar().unwrap();
    let night = project.add_base_calendar();
    let calendar = project.calendar_mut(night).unwrap();
    calendar.set_name("Night");
    for day in plan_core::calendar::WEEKDAYS {
        calendar.set_working(day, day == chrono::Weekday::Sun);
    }

    let key = project.add_task();
    let task = project.task_mut(key).unwrap();
    task.set_actual_start(at(2024, 1, 1, 8));
    task.set_duration(Duration::days(5.0));
    task.set_percent_complete(40.0);
    task.set_calendar_name("Standard");
    assert_eq!(project.complete_through(key).unwrap(), Some(at(2024, 1, 3, 8)));

    project.task_mut(key).unwrap().set_calendar_name("Night");
    // Two Sundays: the 7th and the 14th.
    assert_eq!(project.complete_through(key).unwrap(), Some(at(2024, 1, 15, 8)));

    project.task_mut(key).unwrap().set_calendar_name("Standard");
    project
        .calendar_mut(standard)
        .unwrap()
        .add_calendar_exception(d(2024, 1, 2), d(2024, 1, 2), false);
    assert_eq!(project.complete_through(key).unwrap(), Some(at(2024, 1, 4, 8)));
}

#[test]
fn linked_tasks_record_both_directions() {
    let mut project = Project::new();
    let first = project.add_task();
    let second = project.add_task();
    project
        .link_tasks(first, second, RelationType::FinishToStart, Duration::days(1.0))
        .unwrap();
    project
        .link_tasks(first, second, RelationType::StartToStart, Duration::days(0.0))
        .unwrap();

    let successor = project.task(second).unwrap();
    assert_eq!(successor.predecessors().len(), 1);
    assert_eq!(successor.predecessors()[0].task_id, 1);
    assert_eq!(successor.predecessors()[0].kind, RelationType::FinishToStart);
    assert_eq!(successor.unique_id_predecessors().len(), 1);
    let predecessor = project.task(first).unwrap();
    assert_eq!(predecessor.successors().len(), 2);
    assert_eq!(predecessor.successors()[1].kind, RelationType::StartToStart);
}

#[test]
fn field_aliases_resolve_both_ways() {
    let mut project = Project::new();
    project.set_task_field_alias(TaskField::Text3, "Site");
    assert_eq!(project.task_field_alias(TaskField::Text3), Some("Site"));
    assert_eq!(project.alias_task_field("Site"), Some(TaskField::Text3));
    assert_eq!(project.alias_task_field("Phase"), None);
}

#[derive(Clone, Default)]
struct Events(Rc<RefCell<Vec<String>>>);

impl ProjectListener for Events {
    fn task_read(&mut self, task: &Task) {
        self.0.borrow_mut().push(format!("read {:?}", task.unique_id()));
    }

    fn task_written(&mut self, task: &Task) {
        self.0.borrow_mut().push(format!("written {:?}", task.unique_id()));
    }
}

#[test]
fn project_listeners_receive_task_events() {
    let mut project = Project::new();
    let events = Events::default();
    project.add_project_listener(events.clone());
    let key = project.add_task();

    project.fire_task_read_event(key);
    project.fire_task_written_event(key);
    let resource = project.add_resource();
    project.fire_resource_read_event(resource);

    assert_eq!(*events.0.borrow(), vec!["read Some(1)".to_string(), "written Some(1)".to_string()]);
}
