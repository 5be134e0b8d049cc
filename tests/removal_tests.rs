use plan_core::{Project, ProjectConfig, Task};

#[test]
fn removing_a_task_takes_children_and_assignments() {
    let mut project = Project::new();
    let parent = project.add_task();
    let first = project.add_child_task(parent).unwrap();
    let second = project.add_child_task(parent).unwrap();
    let sibling = project.add_task();
    let resource = project.add_resource();
    project.add_resource_assignment(parent, resource).unwrap();
    let child_unique_id = project.task(first).unwrap().unique_id().unwrap();

    assert!(project.remove_task(parent));

    assert_eq!(project.all_tasks(), &[sibling]);
    assert_eq!(project.root_tasks(), &[sibling]);
    assert!(project.task(first).is_none());
    assert!(project.task(second).is_none());
    assert!(project.get_task_by_unique_id(child_unique_id).is_none());
    assert!(project.all_assignments().is_empty());
    assert!(project.resource(resource).unwrap().assignments().is_empty());
    assert!(!project.remove_task(parent));
    project.validate_structure().unwrap();
}

#[test]
fn removing_a_child_keeps_its_parent() {
    let mut project = Project::new();
    let parent = project.add_task();
    let first = project.add_child_task(parent).unwrap();
    let second = project.add_child_task(parent).unwrap();

    assert!(project.remove_task(first));
    assert_eq!(project.task(parent).unwrap().children(), &[second]);
    assert_eq!(project.root_tasks(), &[parent]);
    assert_eq!(project.get_task_by_id(3).map(Task::key), Some(second));
}

#[test]
fn removing_an_assignment_unlinks_both_ends() {
    let mut project = Project::new();
    let task = project.add_task();
    let resource = project.add_resource();
    let assignment = project.add_resource_assignment(task, resource).unwrap();

    assert!(project.remove_assignment(assignment));
    assert!(project.task(task).unwrap().assignments().is_empty());
    assert!(project.resource(resource).unwrap().assignments().is_empty());
    assert!(!project.remove_assignment(assignment));
}

#[test]
fn removing_a_resource_takes_its_assignments_and_calendar() {
    let mut project = Project::new();
    project.add_default_base_calendar().unwrap();
    let task = project.add_task();
    let resource = project.add_resource();
    let calendar = project.add_resource_calendar(resource).unwrap();
    project.add_resource_assignment(task, resource).unwrap();

    assert!(project.remove_resource(resource));
    assert!(project.task(task).unwrap().assignments().is_empty());
    assert!(project.all_assignments().is_empty());
    assert!(project.calendar(calendar).is_none());
    assert!(project.resource_calendars().is_empty());
    assert!(project.get_resource_by_unique_id(1).is_none());
    assert_eq!(project.base_calendars().len(), 1);
}

#[test]
fn removing_a_resource_calendar_frees_the_slot() {
    let mut project = Project::new();
    project.add_default_base_calendar().unwrap();
    let resource = project.add_resource();
    let calendar = project.add_resource_calendar(resource).unwrap();

    assert!(project.remove_calendar(calendar));
    assert_eq!(project.resource(resource).unwrap().calendar(), None);
    assert!(project.resource_calendars().is_empty());
    let replacement = project.add_resource_calendar(resource).unwrap();
    assert_ne!(replacement, calendar);
    assert!(!project.remove_calendar(calendar));
}

#[test]
fn removing_a_base_calendar_drops_it_from_the_list() {
    let mut project = Project::new();
    let standard = project.add_default_base_calendar().unwrap();
    assert!(project.remove_calendar(standard));
    assert!(project.base_calendars().is_empty());
    assert_eq!(project.base_calendar("Standard"), None);
}

#[test]
fn removing_a_task_unlinks_a_resource_without_unique_id() {
    let config = ProjectConfig {
        auto_task_id: true,
        auto_task_unique_id: true,
        auto_resource_id: true,
        ..ProjectConfig::manual()
    };
    let mut project = Project::with_config(config);
    let task = project.add_task();
    let resource = project.add_resource();
    assert_eq!(project.resource(resource).unwrap().unique_id(), None);
    let assignment = project.add_resource_assignment(task, resource).unwrap();
    assert_eq!(project.assignment_resource(assignment), Some(resource));

    assert!(project.remove_task(task));

    assert!(project.all_assignments().is_empty());
    assert!(project.resource(resource).unwrap().assignments().is_empty());
}

#[test]
fn removing_an_assignment_unlinks_a_resource_with_a_shared_unique_id() {
    let mut project = Project::new();
    let task = project.add_task();
    let first = project.add_resource();
    let second = project.add_resource();
    let assignment = project.add_resource_assignment(task, first).unwrap();
    let shared = project.resource(first).unwrap().unique_id().unwrap();
    project.set_resource_unique_id(second, shared).unwrap();

    assert!(project.remove_assignment(assignment));

    assert!(project.resource(first).unwrap().assignments().is_empty());
    assert!(project.task(task).unwrap().assignments().is_empty());
}
