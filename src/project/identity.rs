use super::Project;
use crate::arena::{ResourceKey, TaskKey};
use crate::error::{ProjectError, ProjectResult};
use crate::resource::Resource;
use crate::task::Task;
use log::{trace, warn};

/// Highest identifiers handed out so far. Counters only move upwards and the
/// first value issued is 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityCounters {
    pub task_id: i32,
    pub task_unique_id: i32,
    pub resource_id: i32,
    pub resource_unique_id: i32,
    pub calendar_unique_id: i32,
}

impl IdentityCounters {
    pub(crate) fn next_task_id(&mut self) -> i32 {
        self.task_id += 1;
        self.task_id
    }

    pub(crate) fn next_task_unique_id(&mut self) -> i32 {
        self.task_unique_id += 1;
        self.task_unique_id
    }

    pub(crate) fn next_resource_id(&mut self) -> i32 {
        self.resource_id += 1;
        self.resource_id
    }

    pub(crate) fn next_resource_unique_id(&mut self) -> i32 {
        self.resource_unique_id += 1;
        self.resource_unique_id
    }

    pub(crate) fn next_calendar_unique_id(&mut self) -> i32 {
        self.calendar_unique_id += 1;
        self.calendar_unique_id
    }
}

impl Project {
    pub fn counters(&self) -> IdentityCounters {
        self.counters
    }

    pub fn get_task_by_id(&self, id: i32) -> Option<&Task> {
        self.task_ids.get(&id).and_then(|key| self.tasks.get(*key))
    }

    pub fn get_task_by_unique_id(&self, unique_id: i32) -> Option<&Task> {
        self.task_unique_ids.get(&unique_id).and_then(|key| self.tasks.get(*key))
    }

    pub fn get_resource_by_id(&self, id: i32) -> Option<&Resource> {
        self.resource_ids.get(&id).and_then(|key| self.resources.get(*key))
    }

    pub fn get_resource_by_unique_id(&self, unique_id: i32) -> Option<&Resource> {
        self.resource_unique_ids
            .get(&unique_id)
            .and_then(|key| self.resources.get(*key))
    }

    /// Change a task's display id. The old id stops resolving before the
    /// new one is installed.
    pub fn set_task_id(&mut self, key: TaskKey, id: i32) -> ProjectResult<()> {
        let previous = self
            .tasks
            .get(key)
            .ok_or(ProjectError::UnknownEntity { kind: "task" })?
            .id();
        if previous == Some(id) {
            return Ok(());
        }
        if let Some(previous) = previous {
            if self.task_ids.get(&previous) == Some(&key) {
                self.task_ids.remove(&previous);
            }
        }
        self.install_task_id(key, id);
        self.counters.task_id = self.counters.task_id.max(id);
        self.sync_task_links(key);
        trace!("event=identity_remap entity=task field=id old={previous:?} new={id}");
        Ok(())
    }

    pub fn set_task_unique_id(&mut self, key: TaskKey, unique_id: i32) -> ProjectResult<()> {
        let previous = self
            .tasks
            .get(key)
            .ok_or(ProjectError::UnknownEntity { kind: "task" })?
            .unique_id();
        if previous == Some(unique_id) {
            return Ok(());
        }
        if let Some(previous) = previous {
            if self.task_unique_ids.get(&previous) == Some(&key) {
                self.task_unique_ids.remove(&previous);
            }
        }
        self.install_task_unique_id(key, unique_id);
        self.counters.task_unique_id = self.counters.task_unique_id.max(unique_id);
        self.sync_task_links(key);
        trace!("event=identity_remap entity=task field=unique_id old={previous:?} new={unique_id}");
        Ok(())
    }

    pub fn set_resource_id(&mut self, key: ResourceKey, id: i32) -> ProjectResult<()> {
        let previous = self
            .resources
            .get(key)
            .ok_or(ProjectError::UnknownEntity { kind: "resource" })?
            .id();
        if previous == Some(id) {
            return Ok(());
        }
        if let Some(previous) = previous {
            if self.resource_ids.get(&previous) == Some(&key) {
                self.resource_ids.remove(&previous);
            }
        }
        self.install_resource_id(key, id);
        self.counters.resource_id = self.counters.resource_id.max(id);
        self.sync_resource_links(key);
        trace!("event=identity_remap entity=resource field=id old={previous:?} new={id}");
        Ok(())
    }

    /// Change a resource's unique id and push it to each of its assignments.
    pub fn set_resource_unique_id(&mut self, key: ResourceKey, unique_id: i32) -> ProjectResult<()> {
        let previous = self
            .resources
            .get(key)
            .ok_or(ProjectError::UnknownEntity { kind: "resource" })?
            .unique_id();
        if previous == Some(unique_id) {
            return Ok(());
        }
        if let Some(previous) = previous {
            if self.resource_unique_ids.get(&previous) == Some(&key) {
                self.resource_unique_ids.remove(&previous);
            }
        }
        self.install_resource_unique_id(key, unique_id);
        self.counters.resource_unique_id = self.counters.resource_unique_id.max(unique_id);
        self.sync_resource_links(key);
        trace!("event=identity_remap entity=resource field=unique_id old={previous:?} new={unique_id}");
        Ok(())
    }

    pub(crate) fn install_task_id(&mut self, key: TaskKey, id: i32) {
        if let Some(other) = self.task_ids.insert(id, key).filter(|other| *other != key) {
            warn!("event=identity_collision entity=task field=id value={id} displaced={other:?}");
        }
        if let Some(task) = self.tasks.get_mut(key) {
            task.store_id(id);
        }
    }

    pub(crate) fn install_task_unique_id(&mut self, key: TaskKey, unique_id: i32) {
        if let Some(other) = self.task_unique_ids.insert(unique_id, key).filter(|other| *other != key) {
            warn!("event=identity_collision entity=task field=unique_id value={unique_id} displaced={other:?}");
        }
        if let Some(task) = self.tasks.get_mut(key) {
            task.store_unique_id(unique_id);
        }
    }

    pub(crate) fn install_resource_id(&mut self, key: ResourceKey, id: i32) {
        if let Some(other) = self.resource_ids.insert(id, key).filter(|other| *other != key) {
            warn!("event=identity_collision entity=resource field=id value={id} displaced={other:?}");
        }
        if let Some(resource) = self.resources.get_mut(key) {
            resource.store_id(id);
        }
    }

    pub(crate) fn install_resource_unique_id(&mut self, key: ResourceKey, unique_id: i32) {
        if let Some(other) = self
            .resource_unique_ids
            .insert(unique_id, key)
            .filter(|other| *other != key)
        {
            warn!("event=identity_collision entity=resource field=unique_id value={unique_id} displaced={other:?}");
        }
        if let Some(resource) = self.resources.get_mut(key) {
            resource.store_unique_id(unique_id);
        }
    }

    /// Refresh the task id pair held by each of the task's assignments.
    pub(crate) fn sync_task_links(&mut self, key: TaskKey) {
        let Some(task) = self.tasks.get(key) else {
            return;
        };
        let (id, unique_id) = (task.id(), task.unique_id());
        for assignment in &task.assignments {
            if let Some(assignment) = self.assignments.get_mut(*assignment) {
                assignment.link_task_ids(id, unique_id);
            }
        }
    }

    pub(crate) fn sync_resource_links(&mut self, key: ResourceKey) {
        let Some(resource) = self.resources.get(key) else {
            return;
        };
        let (id, unique_id) = (resource.id(), resource.unique_id());
        for assignment in &resource.assignments {
            if let Some(assignment) = self.assignments.get_mut(*assignment) {
                assignment.link_resource_ids(id, unique_id);
            }
        }
    }
}
