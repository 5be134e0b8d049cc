use super::Project;
use crate::error::{ProjectError, ProjectResult};
use std::collections::HashSet;

impl Project {
    /// Check the outline tree: links agree in both directions, every task is
    /// one level below its parent, roots sit at level 1 (the unique-id-0
    /// summary may sit at level 0), and no task is its own ancestor.
    pub fn validate_structure(&self) -> ProjectResult<()> {
        let mut seen_ids = HashSet::with_capacity(self.all_tasks.len());
        for key in &self.root_tasks {
            let task = self
                .tasks
                .get(*key)
                .ok_or_else(|| ProjectError::structure(format!("root {key:?} no longer exists")))?;
            if task.parent().is_some() {
                return Err(ProjectError::structure(format!("{} is a root but has a parent", task.label())));
            }
            let allowed = if task.unique_id() == Some(0) { 0..=1 } else { 1..=1 };
            if let Some(level) = task.outline_level() {
                if !allowed.contains(&level) {
                    return Err(ProjectError::structure(format!(
                        "root {} has outline level {level}",
                        task.label()
                    )));
                }
            }
        }

        for key in &self.all_tasks {
            let task = self
                .tasks
                .get(*key)
                .ok_or_else(|| ProjectError::structure(format!("task {key:?} no longer exists")))?;
            if let Some(id) = task.id() {
                if !seen_ids.insert(id) {
                    return Err(ProjectError::structure(format!("duplicate task id {id}")));
                }
            }

            if let Some(parent_key) = task.parent() {
                let parent = self.tasks.get(parent_key).ok_or_else(|| {
                    ProjectError::structure(format!("{} points at a removed parent", task.label()))
                })?;
                if !parent.children().contains(key) {
                    return Err(ProjectError::structure(format!(
                        "{} is missing from the children of {}",
                        task.label(),
                        parent.label()
                    )));
                }
                if let (Some(level), Some(parent_level)) = (task.outline_level(), parent.outline_level()) {
                    if level != parent_level + 1 {
                        return Err(ProjectError::structure(format!(
                            "{} has outline level {level} under a level {parent_level} parent",
                            task.label()
                        )));
                    }
                }
            } else if !self.root_tasks.contains(key) {
                return Err(ProjectError::structure(format!(
                    "{} has no parent and is not a root",
                    task.label()
                )));
            }

            for child in task.children() {
                if self.tasks.get(*child).and_then(|child| child.parent()) != Some(*key) {
                    return Err(ProjectError::structure(format!(
                        "child {child:?} of {} does not point back at it",
                        task.label()
                    )));
                }
            }

            let mut ancestor = task.parent();
            let mut steps = 0;
            while let Some(current) = ancestor {
                if current == *key || steps > self.all_tasks.len() {
                    return Err(ProjectError::structure(format!("{} is its own ancestor", task.label())));
                }
                ancestor = self.tasks.get(current).and_then(|task| task.parent());
                steps += 1;
            }
        }
        Ok(())
    }
}
