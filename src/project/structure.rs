use super::Project;
use crate::arena::TaskKey;
use crate::task::Task;
use log::{debug, warn};

/// Code for the next child under a parent whose code is `parent_code`.
/// A trailing ".0" on the parent is dropped and a bare "0" parent yields
/// top-level numbering.
pub(crate) fn child_code(parent_code: Option<&str>, sibling_count: usize) -> String {
    let parent_code = parent_code.unwrap_or("");
    let prefix = parent_code.strip_suffix(".0").unwrap_or(parent_code);
    let position = sibling_count + 1;
    if prefix.is_empty() || prefix == "0" {
        position.to_string()
    } else {
        format!("{prefix}.{position}")
    }
}

impl Project {
    /// WBS for a task about to be linked under `parent` (or as a root).
    /// Must run before the link, since it reads the current sibling count.
    pub(crate) fn generate_wbs(&self, unique_id: Option<i32>, parent: Option<TaskKey>) -> String {
        match parent.and_then(|parent| self.tasks.get(parent)) {
            Some(parent) => child_code(parent.wbs(), parent.child_task_count()),
            None => self.root_code(unique_id),
        }
    }

    pub(crate) fn generate_outline_number(&self, unique_id: Option<i32>, parent: Option<TaskKey>) -> String {
        match parent.and_then(|parent| self.tasks.get(parent)) {
            Some(parent) => child_code(parent.outline_number(), parent.child_task_count()),
            None => self.root_code(unique_id),
        }
    }

    fn root_code(&self, unique_id: Option<i32>) -> String {
        if unique_id == Some(0) {
            "0".to_string()
        } else {
            (self.root_tasks.len() + 1).to_string()
        }
    }

    fn parent_of(&self, key: TaskKey) -> Option<TaskKey> {
        self.tasks.get(key).and_then(Task::parent)
    }

    fn level_of(&self, key: TaskKey) -> i32 {
        self.tasks.get(key).and_then(Task::outline_level).unwrap_or(1)
    }

    /// Rebuild the whole outline from id order and stored outline levels.
    ///
    /// Each task is placed relative to the previous one: same level means
    /// same parent, deeper means child of the previous task, shallower means
    /// child of the nearest ancestor whose level is below its own (or a root
    /// when there is none). WBS and outline numbers are regenerated on the
    /// way when their auto flags are set.
    pub fn update_structure(&mut self) {
        self.sort_tasks_by_id();
        self.root_tasks.clear();

        let order = self.all_tasks.clone();
        let mut last: Option<(TaskKey, i32)> = None;
        for key in order {
            let Some(task) = self.tasks.get_mut(key) else {
                continue;
            };
            task.children.clear();
            task.parent = None;
            let level = task.outline_level().unwrap_or(1);
            let unique_id = task.unique_id();

            let parent = match last {
                None => None,
                Some((previous, previous_level)) if level == previous_level => self.parent_of(previous),
                Some((previous, previous_level)) if level > previous_level => Some(previous),
                Some((previous, _)) => self.ancestor_above(previous, level),
            };

            if self.config.auto_wbs {
                let wbs = self.generate_wbs(unique_id, parent);
                if let Some(task) = self.tasks.get_mut(key) {
                    task.set_wbs(wbs);
                }
            }
            if self.config.auto_outline_number {
                let outline_number = self.generate_outline_number(unique_id, parent);
                if let Some(task) = self.tasks.get_mut(key) {
                    task.set_outline_number(outline_number);
                }
            }

            self.link_task(key, parent);
            last = Some((key, level));
        }
        debug!(
            "event=outline_rebuild tasks={} roots={}",
            self.all_tasks.len(),
            self.root_tasks.len()
        );
    }

    /// Nearest strict ancestor of `key` whose outline level is below `level`.
    fn ancestor_above(&self, key: TaskKey, level: i32) -> Option<TaskKey> {
        let mut candidate = self.parent_of(key);
        while let Some(ancestor) = candidate {
            if self.level_of(ancestor) < level {
                return Some(ancestor);
            }
            candidate = self.parent_of(ancestor);
        }
        None
    }

    fn sort_tasks_by_id(&mut self) {
        let tasks = &self.tasks;
        self.all_tasks
            .sort_by_key(|key| tasks.get(*key).and_then(Task::id).unwrap_or(i32::MAX));
    }

    /// Renumber task ids densely in their current id order. Numbering starts
    /// at 0 when the first task already has id 0, otherwise at 1. The id
    /// counter never moves back.
    pub fn synchronize_task_ids(&mut self) {
        self.sort_tasks_by_id();
        let first = self.all_tasks.first().and_then(|key| self.tasks.get(*key)).and_then(Task::id);
        let mut next = if first == Some(0) { 0 } else { 1 };

        self.task_ids.clear();
        for key in self.all_tasks.clone() {
            if let Some(task) = self.tasks.get_mut(key) {
                task.store_id(next);
                self.task_ids.insert(next, key);
                next += 1;
            }
            self.sync_task_links(key);
        }
        self.counters.task_id = self.counters.task_id.max(next - 1);
        debug!("event=ids_synchronized entity=task count={}", self.all_tasks.len());
    }

    /// Renumber resource ids densely from 1 in their current id order.
    pub fn synchronize_resource_ids(&mut self) {
        let resources = &self.resources;
        self.all_resources.sort_by_key(|key| {
            resources
                .get(*key)
                .and_then(|resource| resource.id())
                .unwrap_or(i32::MAX)
        });

        let mut next = 1;
        self.resource_ids.clear();
        for key in self.all_resources.clone() {
            if let Some(resource) = self.resources.get_mut(key) {
                resource.store_id(next);
                self.resource_ids.insert(next, key);
                next += 1;
            }
            self.sync_resource_links(key);
        }
        self.counters.resource_id = self.counters.resource_id.max(next - 1);
        debug!("event=ids_synchronized entity=resource count={}", self.all_resources.len());
    }

    /// Raise every counter to at least the largest identifier in use, so the
    /// next automatic identifier cannot collide with one loaded from outside.
    pub fn update_unique_counters(&mut self) {
        for task in self.tasks.iter().map(|(_, task)| task) {
            if let Some(id) = task.id() {
                self.counters.task_id = self.counters.task_id.max(id);
            }
            if let Some(unique_id) = task.unique_id() {
                self.counters.task_unique_id = self.counters.task_unique_id.max(unique_id);
            }
        }
        for resource in self.resources.iter().map(|(_, resource)| resource) {
            if let Some(id) = resource.id() {
                self.counters.resource_id = self.counters.resource_id.max(id);
            }
            if let Some(unique_id) = resource.unique_id() {
                self.counters.resource_unique_id = self.counters.resource_unique_id.max(unique_id);
            }
        }
        for calendar in self.calendars.iter().map(|(_, calendar)| calendar) {
            if let Some(unique_id) = calendar.unique_id() {
                self.counters.calendar_unique_id = self.counters.calendar_unique_id.max(unique_id);
            }
        }
    }

    /// Give every task and resource that lacks a unique id its display id.
    pub fn update_unique_identifiers(&mut self) {
        let tasks: Vec<(TaskKey, i32)> = self
            .all_tasks
            .iter()
            .filter_map(|key| self.tasks.get(*key))
            .filter(|task| task.unique_id().is_none())
            .filter_map(|task| task.id().map(|id| (task.key(), id)))
            .collect();
        for (key, id) in tasks {
            if self.task_unique_ids.contains_key(&id) {
                warn!("event=unique_id_fill entity=task status=taken value={id}");
            }
            self.install_task_unique_id(key, id);
            self.counters.task_unique_id = self.counters.task_unique_id.max(id);
            self.sync_task_links(key);
        }

        let resources: Vec<_> = self
            .resources()
            .filter(|resource| resource.unique_id().is_none())
            .filter_map(|resource| resource.id().map(|id| (resource.key(), id)))
            .collect();
        for (key, id) in resources {
            if self.resource_unique_ids.contains_key(&id) {
                warn!("event=unique_id_fill entity=resource status=taken value={id}");
            }
            self.install_resource_unique_id(key, id);
            self.counters.resource_unique_id = self.counters.resource_unique_id.max(id);
            self.sync_resource_links(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::child_code;

    #[test]
    fn child_codes_extend_the_parent() {
        assert_eq!(child_code(Some("1"), 0), "1.1");
        assert_eq!(child_code(Some("1.2"), 2), "1.2.3");
    }

    #[test]
    fn trailing_zero_segment_is_stripped() {
        assert_eq!(child_code(Some("3.0"), 1), "3.2");
        assert_eq!(child_code(Some("0"), 4), "5");
        assert_eq!(child_code(Some("0.0"), 0), "1");
        assert_eq!(child_code(None, 0), "1");
    }
}
