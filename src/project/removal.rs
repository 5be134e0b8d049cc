use super::Project;
use crate::arena::{AssignmentKey, CalendarKey, ResourceKey, TaskKey};
use log::{debug, warn};

impl Project {
    /// Remove a task together with its assignments and, recursively, its
    /// children. Returns `false` if the task was already gone.
    pub fn remove_task(&mut self, key: TaskKey) -> bool {
        let Some(task) = self.tasks.remove(key) else {
            return false;
        };
        self.all_tasks.retain(|existing| *existing != key);
        if let Some(id) = task.id() {
            if self.task_ids.get(&id) == Some(&key) {
                self.task_ids.remove(&id);
            }
        }
        if let Some(unique_id) = task.unique_id() {
            if self.task_unique_ids.get(&unique_id) == Some(&key) {
                self.task_unique_ids.remove(&unique_id);
            }
        }

        match task.parent() {
            Some(parent) => {
                if let Some(parent) = self.tasks.get_mut(parent) {
                    parent.children.retain(|child| *child != key);
                }
            }
            None => self.root_tasks.retain(|root| *root != key),
        }

        for assignment in task.assignments() {
            self.remove_assignment(*assignment);
        }
        for child in task.children() {
            self.remove_task(*child);
        }
        debug!(
            "event=task_remove unique_id={:?} children={} assignments={}",
            task.unique_id(),
            task.child_task_count(),
            task.assignments().len()
        );
        true
    }

    /// Remove an assignment from the project, its task and its resource.
    pub fn remove_assignment(&mut self, key: AssignmentKey) -> bool {
        let resource = self.assignment_resource(key);
        let Some(assignment) = self.assignments.remove(key) else {
            return false;
        };
        self.all_assignments.retain(|existing| *existing != key);
        if let Some(task) = self.tasks.get_mut(assignment.task()) {
            task.assignments.retain(|existing| *existing != key);
        }
        if let Some(resource) = resource.and_then(|resource| self.resources.get_mut(resource)) {
            resource.assignments.retain(|existing| *existing != key);
        }
        true
    }

    /// Remove a resource, its assignments and the calendar it owns.
    pub fn remove_resource(&mut self, key: ResourceKey) -> bool {
        let Some(resource) = self.resources.remove(key) else {
            return false;
        };
        self.all_resources.retain(|existing| *existing != key);
        if let Some(id) = resource.id() {
            if self.resource_ids.get(&id) == Some(&key) {
                self.resource_ids.remove(&id);
            }
        }
        if let Some(unique_id) = resource.unique_id() {
            if self.resource_unique_ids.get(&unique_id) == Some(&key) {
                self.resource_unique_ids.remove(&unique_id);
            }
        }

        for assignment in resource.assignments() {
            if let Some(removed) = self.assignments.remove(*assignment) {
                self.all_assignments.retain(|existing| existing != assignment);
                if let Some(task) = self.tasks.get_mut(removed.task()) {
                    task.assignments.retain(|existing| existing != assignment);
                }
            }
        }
        if let Some(calendar) = resource.calendar() {
            self.remove_calendar(calendar);
        }
        debug!(
            "event=resource_remove unique_id={:?} assignments={}",
            resource.unique_id(),
            resource.assignments().len()
        );
        true
    }

    /// Remove a calendar. A resource calendar is detached from its resource.
    /// Calendars still deriving from it will fail to resolve DEFAULT days.
    pub fn remove_calendar(&mut self, key: CalendarKey) -> bool {
        let Some(calendar) = self.calendars.remove(key) else {
            return false;
        };
        match calendar.resource() {
            Some(owner) => {
                if let Some(resource) = self.resources.get_mut(owner) {
                    if resource.calendar == Some(key) {
                        resource.calendar = None;
                    }
                }
            }
            None => self.base_calendars.retain(|existing| *existing != key),
        }
        self.resource_calendars.retain(|existing| *existing != key);

        let dependents = self
            .calendars
            .iter()
            .filter(|(_, other)| other.base_calendar() == Some(key))
            .count();
        if dependents > 0 {
            warn!(
                "event=calendar_remove status=dangling_base calendar={} dependents={dependents}",
                calendar.display_name()
            );
        }
        debug!("event=calendar_remove calendar={}", calendar.display_name());
        true
    }
}
