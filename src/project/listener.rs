use super::Project;
use crate::arena::{ResourceKey, TaskKey};
use crate::resource::Resource;
use crate::task::Task;

/// Project-level notifications raised by readers and writers as they walk
/// the graph. Every method defaults to doing nothing.
pub trait ProjectListener {
    fn task_read(&mut self, _task: &Task) {}
    fn task_written(&mut self, _task: &Task) {}
    fn resource_read(&mut self, _resource: &Resource) {}
    fn resource_written(&mut self, _resource: &Resource) {}
}

impl Project {
    pub fn add_project_listener<L>(&mut self, listener: L)
    where
        L: ProjectListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn fire_task_read_event(&mut self, key: TaskKey) {
        if let Some(task) = self.tasks.get(key) {
            for listener in &mut self.listeners {
                listener.task_read(task);
            }
        }
    }

    pub fn fire_task_written_event(&mut self, key: TaskKey) {
        if let Some(task) = self.tasks.get(key) {
            for listener in &mut self.listeners {
                listener.task_written(task);
            }
        }
    }

    pub fn fire_resource_read_event(&mut self, key: ResourceKey) {
        if let Some(resource) = self.resources.get(key) {
            for listener in &mut self.listeners {
                listener.resource_read(resource);
            }
        }
    }

    pub fn fire_resource_written_event(&mut self, key: ResourceKey) {
        if let Some(resource) = self.resources.get(key) {
            for listener in &mut self.listeners {
                listener.resource_written(resource);
            }
        }
    }
}
