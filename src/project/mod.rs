//! The aggregate root owning every task, resource, assignment and calendar.

mod identity;
mod listener;
mod removal;
mod structure;
mod validation;

pub use identity::IdentityCounters;
pub use listener::ProjectListener;

use crate::arena::{Arena, AssignmentKey, CalendarKey, ResourceKey, TaskKey};
use crate::assignment::ResourceAssignment;
use crate::calendar::{Calendar, CalendarRef};
use crate::config::ProjectConfig;
use crate::duration::Duration;
use crate::error::{ProjectError, ProjectResult};
use crate::field::{ResourceField, TaskField};
use crate::relation::{Relation, RelationType};
use crate::resource::Resource;
use crate::task::Task;
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;

pub struct Project {
    config: ProjectConfig,
    tasks: Arena<TaskKey, Task>,
    resources: Arena<ResourceKey, Resource>,
    assignments: Arena<AssignmentKey, ResourceAssignment>,
    calendars: Arena<CalendarKey, Calendar>,
    all_tasks: Vec<TaskKey>,
    root_tasks: Vec<TaskKey>,
    all_resources: Vec<ResourceKey>,
    all_assignments: Vec<AssignmentKey>,
    base_calendars: Vec<CalendarKey>,
    resource_calendars: Vec<CalendarKey>,
    counters: IdentityCounters,
    task_ids: HashMap<i32, TaskKey>,
    task_unique_ids: HashMap<i32, TaskKey>,
    resource_ids: HashMap<i32, ResourceKey>,
    resource_unique_ids: HashMap<i32, ResourceKey>,
    task_aliases: HashMap<TaskField, String>,
    resource_aliases: HashMap<ResourceField, String>,
    listeners: Vec<Box<dyn ProjectListener>>,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("tasks", &self.all_tasks.len())
            .field("root_tasks", &self.root_tasks.len())
            .field("resources", &self.all_resources.len())
            .field("assignments", &self.all_assignments.len())
            .field("calendars", &self.calendars.len())
            .field("counters", &self.counters)
            .finish()
    }
}

impl Project {
    pub fn new() -> Self {
        Self::with_config(ProjectConfig::default())
    }

    pub fn with_config(config: ProjectConfig) -> Self {
        Self {
            config,
            tasks: Arena::new(),
            resources: Arena::new(),
            assignments: Arena::new(),
            calendars: Arena::new(),
            all_tasks: Vec::new(),
            root_tasks: Vec::new(),
            all_resources: Vec::new(),
            all_assignments: Vec::new(),
            base_calendars: Vec::new(),
            resource_calendars: Vec::new(),
            counters: IdentityCounters::default(),
            task_ids: HashMap::new(),
            task_unique_ids: HashMap::new(),
            resource_ids: HashMap::new(),
            resource_unique_ids: HashMap::new(),
            task_aliases: HashMap::new(),
            resource_aliases: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Replace the configuration. New duration settings reach every entity
    /// and drop their cached derived values.
    pub fn set_config(&mut self, config: ProjectConfig) -> ProjectResult<()> {
        config.validate()?;
        let defaults = config.duration_defaults;
        if defaults != self.config.duration_defaults {
            self.tasks.values_mut().for_each(|task| task.fields.set_defaults(defaults));
            self.resources.values_mut().for_each(|resource| resource.fields.set_defaults(defaults));
            self.assignments.values_mut().for_each(|assignment| assignment.fields.set_defaults(defaults));
        }
        self.config = config;
        Ok(())
    }

    // ----- tasks -----

    pub fn add_task(&mut self) -> TaskKey {
        self.create_task(None)
    }

    pub fn add_child_task(&mut self, parent: TaskKey) -> ProjectResult<TaskKey> {
        if !self.tasks.contains(parent) {
            return Err(ProjectError::UnknownEntity { kind: "task" });
        }
        Ok(self.create_task(Some(parent)))
    }

    /// Identity first, then codes derived from the pre-insertion sibling
    /// count, then the outline link.
    fn create_task(&mut self, parent: Option<TaskKey>) -> TaskKey {
        let defaults = self.config.duration_defaults;
        let key = self.tasks.insert_with(|key| Task::new(key, defaults));

        if self.config.auto_task_unique_id {
            let unique_id = self.counters.next_task_unique_id();
            self.install_task_unique_id(key, unique_id);
        }
        if self.config.auto_task_id {
            let id = self.counters.next_task_id();
            self.install_task_id(key, id);
        }

        let unique_id = self.tasks.get(key).and_then(Task::unique_id);
        let wbs = self.config.auto_wbs.then(|| self.generate_wbs(unique_id, parent));
        let outline_number = self
            .config
            .auto_outline_number
            .then(|| self.generate_outline_number(unique_id, parent));
        let outline_level = self.config.auto_outline_level.then(|| {
            parent
                .and_then(|parent| self.tasks.get(parent))
                .and_then(Task::outline_level)
                .map_or(1, |level| level + 1)
        });

        if let Some(task) = self.tasks.get_mut(key) {
            if let Some(wbs) = wbs {
                task.set_wbs(wbs);
            }
            if let Some(outline_number) = outline_number {
                task.set_outline_number(outline_number);
            }
            if let Some(level) = outline_level {
                task.set_outline_level(level);
            }
        }

        self.all_tasks.push(key);
        self.link_task(key, parent);
        key
    }

    fn link_task(&mut self, key: TaskKey, parent: Option<TaskKey>) {
        match parent {
            Some(parent) => {
                if let Some(parent_task) = self.tasks.get_mut(parent) {
                    parent_task.children.push(key);
                }
                if let Some(task) = self.tasks.get_mut(key) {
                    task.parent = Some(parent);
                }
            }
            None => self.root_tasks.push(key),
        }
    }

    pub fn task(&self, key: TaskKey) -> Option<&Task> {
        self.tasks.get(key)
    }

    pub fn task_mut(&mut self, key: TaskKey) -> Option<&mut Task> {
        self.tasks.get_mut(key)
    }

    /// Every task, in the project's current order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.all_tasks.iter().filter_map(|key| self.tasks.get(*key))
    }

    pub fn all_tasks(&self) -> &[TaskKey] {
        &self.all_tasks
    }

    pub fn root_tasks(&self) -> &[TaskKey] {
        &self.root_tasks
    }

    pub fn task_count(&self) -> usize {
        self.all_tasks.len()
    }

    /// Record `predecessor -> successor` on both tasks, by id and by unique id.
    pub fn link_tasks(
        &mut self,
        predecessor: TaskKey,
        successor: TaskKey,
        kind: RelationType,
        lag: Duration,
    ) -> ProjectResult<()> {
        let (pred_id, pred_unique_id) = self.task_identity(predecessor)?;
        let (succ_id, succ_unique_id) = self.task_identity(successor)?;

        if let Some(task) = self.tasks.get_mut(successor) {
            if let Some(id) = pred_id {
                task.add_predecessor(Relation::new(id, kind, lag));
            }
            if let Some(unique_id) = pred_unique_id {
                task.add_unique_id_predecessor(Relation::new(unique_id, kind, lag));
            }
        }
        if let Some(task) = self.tasks.get_mut(predecessor) {
            if let Some(id) = succ_id {
                task.add_successor(Relation::new(id, kind, lag));
            }
            if let Some(unique_id) = succ_unique_id {
                task.add_unique_id_successor(Relation::new(unique_id, kind, lag));
            }
        }
        Ok(())
    }

    fn task_identity(&self, key: TaskKey) -> ProjectResult<(Option<i32>, Option<i32>)> {
        self.tasks
            .get(key)
            .map(|task| (task.id(), task.unique_id()))
            .ok_or(ProjectError::UnknownEntity { kind: "task" })
    }

    // ----- resources and assignments -----

    pub fn add_resource(&mut self) -> ResourceKey {
        let defaults = self.config.duration_defaults;
        let key = self.resources.insert_with(|key| Resource::new(key, defaults));
        if self.config.auto_resource_unique_id {
            let unique_id = self.counters.next_resource_unique_id();
            self.install_resource_unique_id(key, unique_id);
        }
        if self.config.auto_resource_id {
            let id = self.counters.next_resource_id();
            self.install_resource_id(key, id);
        }
        self.all_resources.push(key);
        key
    }

    pub fn resource(&self, key: ResourceKey) -> Option<&Resource> {
        self.resources.get(key)
    }

    pub fn resource_mut(&mut self, key: ResourceKey) -> Option<&mut Resource> {
        self.resources.get_mut(key)
    }

    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.all_resources.iter().filter_map(|key| self.resources.get(*key))
    }

    pub fn all_resources(&self) -> &[ResourceKey] {
        &self.all_resources
    }

    /// New assignment on `task` with no resource yet.
    pub fn new_resource_assignment(&mut self, task: TaskKey) -> ProjectResult<AssignmentKey> {
        let (id, unique_id) = self.task_identity(task)?;
        let defaults = self.config.duration_defaults;
        let key = self
            .assignments
            .insert_with(|key| ResourceAssignment::new(key, task, defaults));
        if let Some(assignment) = self.assignments.get_mut(key) {
            assignment.link_task_ids(id, unique_id);
        }
        if let Some(task) = self.tasks.get_mut(task) {
            task.assignments.push(key);
        }
        self.all_assignments.push(key);
        Ok(key)
    }

    /// Assign `resource` to `task`, reusing an existing assignment for the
    /// same resource unique id. New assignments take the task's duration as
    /// their work.
    pub fn add_resource_assignment(&mut self, task: TaskKey, resource: ResourceKey) -> ProjectResult<AssignmentKey> {
        let resource_unique_id = self
            .resources
            .get(resource)
            .ok_or(ProjectError::UnknownEntity { kind: "resource" })?
            .unique_id();
        let task_ref = self.tasks.get(task).ok_or(ProjectError::UnknownEntity { kind: "task" })?;

        if resource_unique_id.is_some() {
            let existing = task_ref.assignments.iter().copied().find(|key| {
                self.assignments
                    .get(*key)
                    .is_some_and(|assignment| assignment.resource_unique_id() == resource_unique_id)
            });
            if let Some(existing) = existing {
                return Ok(existing);
            }
        }

        let work = task_ref.duration();
        let key = self.new_resource_assignment(task)?;
        self.assign_resource(key, resource)?;
        if let (Some(work), Some(assignment)) = (work, self.assignments.get_mut(key)) {
            assignment.set_work(work);
        }
        Ok(key)
    }

    /// Point an assignment at `resource`, moving it off its previous resource.
    pub fn assign_resource(&mut self, assignment: AssignmentKey, resource: ResourceKey) -> ProjectResult<()> {
        let (id, unique_id) = self
            .resources
            .get(resource)
            .map(|resource| (resource.id(), resource.unique_id()))
            .ok_or(ProjectError::UnknownEntity { kind: "resource" })?;
        let previous = self.assignment_resource(assignment);
        if previous == Some(resource) {
            return Ok(());
        }
        let Some(entry) = self.assignments.get_mut(assignment) else {
            return Err(ProjectError::UnknownEntity { kind: "assignment" });
        };
        entry.link_resource(resource, id, unique_id);

        if let Some(previous) = previous.and_then(|key| self.resources.get_mut(key)) {
            previous.assignments.retain(|key| *key != assignment);
        }
        if let Some(resource) = self.resources.get_mut(resource) {
            resource.assignments.push(assignment);
        }
        Ok(())
    }

    pub fn assignment(&self, key: AssignmentKey) -> Option<&ResourceAssignment> {
        self.assignments.get(key)
    }

    pub fn assignment_mut(&mut self, key: AssignmentKey) -> Option<&mut ResourceAssignment> {
        self.assignments.get_mut(key)
    }

    pub fn all_assignments(&self) -> &[AssignmentKey] {
        &self.all_assignments
    }

    /// Resource an assignment is linked to, whatever its identifiers say.
    pub fn assignment_resource(&self, key: AssignmentKey) -> Option<ResourceKey> {
        self.assignments.get(key)?.resource()
    }

    // ----- calendars -----

    /// New base calendar with every weekday working.
    pub fn add_base_calendar(&mut self) -> CalendarKey {
        let key = self.calendars.insert_with(Calendar::new_base);
        self.assign_calendar_unique_id(key);
        self.base_calendars.push(key);
        key
    }

    /// Base calendar named after the configured default, Monday to Friday
    /// working with the default hours template.
    pub fn add_default_base_calendar(&mut self) -> ProjectResult<CalendarKey> {
        let template = self.config.default_hours.clone();
        crate::calendar::TimeRange::parse_template(&template)?;

        let key = self.add_base_calendar();
        let name = self.config.default_calendar_name.clone();
        if let Some(calendar) = self.calendars.get_mut(key) {
            calendar.set_name(name.as_str());
            calendar.set_working(Weekday::Sat, false);
            calendar.set_working(Weekday::Sun, false);
            calendar.add_default_calendar_hours(&template)?;
        }
        debug!("event=calendar_create kind=base name={name}");
        Ok(key)
    }

    /// New derived calendar with every weekday DEFAULT, based on the default
    /// base calendar when one exists. It is not attached to any resource.
    pub fn new_resource_calendar(&mut self) -> CalendarKey {
        let base = self.base_calendar(&self.config.default_calendar_name);
        let key = self.calendars.insert_with(Calendar::new_derived);
        if let Some(calendar) = self.calendars.get_mut(key) {
            calendar.link_base_calendar(base);
        }
        self.assign_calendar_unique_id(key);
        self.resource_calendars.push(key);
        key
    }

    /// Create a derived calendar and attach it to `resource`.
    pub fn add_resource_calendar(&mut self, resource: ResourceKey) -> ProjectResult<CalendarKey> {
        self.check_calendar_slot(resource)?;
        let key = self.new_resource_calendar();
        self.set_resource_calendar(resource, key)?;
        debug!("event=calendar_create kind=resource calendar={key:?} resource={resource:?}");
        Ok(key)
    }

    pub fn set_resource_calendar(&mut self, resource: ResourceKey, calendar: CalendarKey) -> ProjectResult<()> {
        let name = self.check_calendar_slot(resource)?;
        let entry = self
            .calendars
            .get_mut(calendar)
            .ok_or(ProjectError::UnknownEntity { kind: "calendar" })?;
        if entry.is_base_calendar() {
            return Err(ProjectError::configuration(format!(
                "base calendar '{}' cannot be owned by a resource",
                entry.name()
            )));
        }
        if let Some(owner) = entry.resource() {
            return Err(ProjectError::identity(format!(
                "calendar {calendar:?} already belongs to {owner:?}"
            )));
        }
        entry.link_resource(Some(resource));
        if entry.name().is_empty() {
            entry.set_name(name);
        }
        if let Some(resource) = self.resources.get_mut(resource) {
            resource.calendar = Some(calendar);
        }
        Ok(())
    }

    /// Resource name, if the resource exists and has no calendar yet.
    fn check_calendar_slot(&self, resource: ResourceKey) -> ProjectResult<String> {
        let resource = self
            .resources
            .get(resource)
            .ok_or(ProjectError::UnknownEntity { kind: "resource" })?;
        if resource.calendar.is_some() {
            return Err(ProjectError::Capacity {
                entity: resource.label(),
                what: "a calendar",
            });
        }
        Ok(resource.name().unwrap_or_default().to_string())
    }

    /// Change the calendar `calendar` delegates DEFAULT days to. Base
    /// calendars take no base, and a chain leading back to `calendar` is refused.
    pub fn set_base_calendar(&mut self, calendar: CalendarKey, base: Option<CalendarKey>) -> ProjectResult<()> {
        let entry = self
            .calendars
            .get(calendar)
            .ok_or(ProjectError::UnknownEntity { kind: "calendar" })?;
        if entry.is_base_calendar() && base.is_some() {
            return Err(ProjectError::configuration(format!(
                "base calendar '{}' cannot derive from another calendar",
                entry.name()
            )));
        }
        let mut cursor = base;
        while let Some(key) = cursor {
            if key == calendar {
                return Err(ProjectError::configuration(format!(
                    "calendar '{}' would become its own base",
                    entry.name()
                )));
            }
            cursor = self
                .calendars
                .get(key)
                .ok_or(ProjectError::UnknownEntity { kind: "calendar" })?
                .base_calendar();
        }
        if let Some(entry) = self.calendars.get_mut(calendar) {
            entry.link_base_calendar(base);
        }
        Ok(())
    }

    fn assign_calendar_unique_id(&mut self, key: CalendarKey) {
        if !self.config.auto_calendar_unique_id {
            return;
        }
        let unique_id = self.counters.next_calendar_unique_id();
        if let Some(calendar) = self.calendars.get_mut(key) {
            calendar.set_unique_id(unique_id);
        }
    }

    pub fn calendar(&self, key: CalendarKey) -> Option<CalendarRef<'_>> {
        let calendar = self.calendars.get(key)?;
        Some(CalendarRef::new(&self.calendars, calendar, self.config.duration_defaults))
    }

    pub fn calendar_mut(&mut self, key: CalendarKey) -> Option<&mut Calendar> {
        self.calendars.get_mut(key)
    }

    pub fn base_calendars(&self) -> &[CalendarKey] {
        &self.base_calendars
    }

    pub fn resource_calendars(&self) -> &[CalendarKey] {
        &self.resource_calendars
    }

    /// Case-insensitive lookup by name.
    pub fn base_calendar(&self, name: &str) -> Option<CalendarKey> {
        if name.is_empty() {
            return None;
        }
        let wanted = name.to_lowercase();
        self.base_calendars.iter().copied().find(|key| {
            self.calendars
                .get(*key)
                .is_some_and(|calendar| calendar.name().to_lowercase() == wanted)
        })
    }

    pub fn base_calendar_by_unique_id(&self, unique_id: i32) -> Option<CalendarKey> {
        self.base_calendars.iter().copied().find(|key| {
            self.calendars
                .get(*key)
                .is_some_and(|calendar| calendar.unique_id() == Some(unique_id))
        })
    }

    fn named_calendar(&self, name: &str) -> ProjectResult<CalendarRef<'_>> {
        self.base_calendar(name)
            .and_then(|key| self.calendar(key))
            .ok_or_else(|| {
                warn!("event=calendar_lookup status=missing name={name}");
                ProjectError::configuration(format!("no base calendar named '{name}'"))
            })
    }

    /// Working days from `start` to `end` inclusive on the default calendar.
    pub fn get_duration(&self, start: NaiveDate, end: NaiveDate) -> ProjectResult<Duration> {
        self.get_duration_in(&self.config.default_calendar_name, start, end)
    }

    pub fn get_duration_in(&self, calendar: &str, start: NaiveDate, end: NaiveDate) -> ProjectResult<Duration> {
        self.named_calendar(calendar)?.duration(start, end)
    }

    pub fn get_date(&self, start: NaiveDate, duration: Duration) -> ProjectResult<NaiveDate> {
        self.get_date_in(&self.config.default_calendar_name, start, duration)
    }

    pub fn get_date_in(&self, calendar: &str, start: NaiveDate, duration: Duration) -> ProjectResult<NaiveDate> {
        self.named_calendar(calendar)?.date(start, duration)
    }

    // ----- derived project values -----

    /// Earliest task start, ignoring the unique-id-0 summary task.
    /// Milestones contribute their finish.
    pub fn start_date(&self) -> Option<NaiveDateTime> {
        self.tasks()
            .filter(|task| task.unique_id() != Some(0))
            .filter_map(|task| {
                if task.milestone() {
                    task.actual_finish().or(task.finish())
                } else {
                    task.actual_start().or(task.start())
                }
            })
            .min()
    }

    /// Latest task finish, ignoring the unique-id-0 summary task.
    pub fn finish_date(&self) -> Option<NaiveDateTime> {
        self.tasks()
            .filter(|task| task.unique_id() != Some(0))
            .filter_map(|task| task.actual_finish().or(task.finish()))
            .max()
    }

    /// Date up to which a task's work is done: its actual start plus the
    /// completed share of its duration, walked on the task's calendar (or
    /// the default calendar). Partial progress is walked on every call and
    /// never stored on the task, so calendar edits show up immediately.
    pub fn complete_through(&self, key: TaskKey) -> ProjectResult<Option<NaiveDateTime>> {
        let task = self.tasks.get(key).ok_or(ProjectError::UnknownEntity { kind: "task" })?;
        if let Some(value) = task.complete_through() {
            return Ok(Some(value));
        }
        let complete = task.percent_complete().unwrap_or(0.0);
        let (Some(start), Some(duration)) = (task.actual_start(), task.duration()) else {
            return Ok(None);
        };
        if complete <= 0.0 || complete >= 100.0 {
            return Ok(None);
        }
        let calendar = task
            .calendar_name()
            .unwrap_or(self.config.default_calendar_name.as_str());
        let date = self.get_date_in(calendar, start.date(), duration.scale(complete / 100.0))?;
        Ok(Some(date.and_time(start.time())))
    }

    // ----- field aliases -----

    pub fn set_task_field_alias(&mut self, field: TaskField, alias: impl Into<String>) {
        self.task_aliases.insert(field, alias.into());
    }

    pub fn task_field_alias(&self, field: TaskField) -> Option<&str> {
        self.task_aliases.get(&field).map(String::as_str)
    }

    pub fn alias_task_field(&self, alias: &str) -> Option<TaskField> {
        self.task_aliases
            .iter()
            .find(|(_, name)| name.as_str() == alias)
            .map(|(field, _)| *field)
    }

    pub fn set_resource_field_alias(&mut self, field: ResourceField, alias: impl Into<String>) {
        self.resource_aliases.insert(field, alias.into());
    }

    pub fn resource_field_alias(&self, field: ResourceField) -> Option<&str> {
        self.resource_aliases.get(&field).map(String::as_str)
    }

    pub fn alias_resource_field(&self, alias: &str) -> Option<ResourceField> {
        self.resource_aliases
            .iter()
            .find(|(_, name)| name.as_str() == alias)
            .map(|(field, _)| *field)
    }
}
