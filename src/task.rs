use crate::arena::{AssignmentKey, TaskKey};
use crate::duration::DurationDefaults;
use crate::error::{ProjectError, ProjectResult};
use crate::field::{FieldContainer, FieldListener, FieldValue, ListenerId, TaskField};
use crate::recurring::RecurringTask;
use crate::relation::Relation;
use std::collections::BTreeMap;

/// A node of the project outline.
///
/// Identity (`id`, `unique_id`) and tree links are owned by the
/// [`Project`](crate::Project); everything else is plain field data.
#[derive(Debug)]
pub struct Task {
    key: TaskKey,
    pub(crate) fields: FieldContainer<TaskField>,
    pub(crate) parent: Option<TaskKey>,
    pub(crate) children: Vec<TaskKey>,
    pub(crate) assignments: Vec<AssignmentKey>,
    predecessors: Vec<Relation>,
    unique_id_predecessors: Vec<Relation>,
    successors: Vec<Relation>,
    unique_id_successors: Vec<Relation>,
    recurring: Option<RecurringTask>,
    extended: BTreeMap<String, FieldValue>,
}

impl Task {
    pub(crate) fn new(key: TaskKey, defaults: DurationDefaults) -> Self {
        Self {
            key,
            fields: FieldContainer::new(key, defaults),
            parent: None,
            children: Vec::new(),
            assignments: Vec::new(),
            predecessors: Vec::new(),
            unique_id_predecessors: Vec::new(),
            successors: Vec::new(),
            unique_id_successors: Vec::new(),
            recurring: None,
            extended: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> TaskKey {
        self.key
    }

    pub fn id(&self) -> Option<i32> {
        self.fields.integer(TaskField::Id)
    }

    pub fn unique_id(&self) -> Option<i32> {
        self.fields.integer(TaskField::UniqueId)
    }

    pub(crate) fn store_id(&mut self, id: i32) {
        self.fields.store(TaskField::Id, Some(FieldValue::Integer(id)));
    }

    pub(crate) fn store_unique_id(&mut self, unique_id: i32) {
        self.fields.store(TaskField::UniqueId, Some(FieldValue::Integer(unique_id)));
    }

    pub fn parent(&self) -> Option<TaskKey> {
        self.parent
    }

    pub fn children(&self) -> &[TaskKey] {
        &self.children
    }

    pub fn child_task_count(&self) -> usize {
        self.children.len()
    }

    pub fn assignments(&self) -> &[AssignmentKey] {
        &self.assignments
    }

    pub fn fields(&self) -> &FieldContainer<TaskField> {
        &self.fields
    }

    pub fn get(&self, field: TaskField) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Generic write. Identity fields are refused here since changing them
    /// also has to update the project's lookup maps.
    pub fn set(&mut self, field: TaskField, value: Option<FieldValue>) -> ProjectResult<()> {
        if matches!(field, TaskField::Id | TaskField::UniqueId) {
            return Err(ProjectError::identity(format!(
                "task {field} must be changed through the project"
            )));
        }
        self.fields.set(field, value).map(|_| ())
    }

    field_accessors!(TaskField {
        text name / set_name => Name;
        text wbs / set_wbs => Wbs;
        text outline_number / set_outline_number => OutlineNumber;
        text notes / set_notes => Notes;
        text contact / set_contact => Contact;
        text hyperlink / set_hyperlink => Hyperlink;
        text calendar_name / set_calendar_name => CalendarName;
        integer outline_level / set_outline_level => OutlineLevel;
        integer priority / set_priority => Priority;
        integer constraint_type / set_constraint_type => ConstraintType;
        flag milestone / set_milestone => Milestone;
        flag summary / set_summary => Summary;
        flag marked / set_marked => Marked;
        flag critical => Critical;
        date start / set_start => Start;
        date finish / set_finish => Finish;
        date actual_start / set_actual_start => ActualStart;
        date actual_finish / set_actual_finish => ActualFinish;
        date baseline_start / set_baseline_start => BaselineStart;
        date baseline_finish / set_baseline_finish => BaselineFinish;
        date early_start / set_early_start => EarlyStart;
        date early_finish / set_early_finish => EarlyFinish;
        date late_start / set_late_start => LateStart;
        date late_finish / set_late_finish => LateFinish;
        date constraint_date / set_constraint_date => ConstraintDate;
        date deadline / set_deadline => Deadline;
        date created / set_created => Created;
        duration duration / set_duration => Duration;
        duration actual_duration / set_actual_duration => ActualDuration;
        duration remaining_duration / set_remaining_duration => RemainingDuration;
        duration baseline_duration / set_baseline_duration => BaselineDuration;
        duration free_slack / set_free_slack => FreeSlack;
        duration start_slack / set_start_slack => StartSlack;
        duration finish_slack / set_finish_slack => FinishSlack;
        duration total_slack => TotalSlack;
        duration start_variance => StartVariance;
        duration finish_variance => FinishVariance;
        duration duration_variance => DurationVariance;
        duration work / set_work => Work;
        duration actual_work / set_actual_work => ActualWork;
        duration remaining_work / set_remaining_work => RemainingWork;
        duration baseline_work / set_baseline_work => BaselineWork;
        duration overtime_work / set_overtime_work => OvertimeWork;
        duration work_variance => WorkVariance;
        number cost / set_cost => Cost;
        number actual_cost / set_actual_cost => ActualCost;
        number remaining_cost / set_remaining_cost => RemainingCost;
        number baseline_cost / set_baseline_cost => BaselineCost;
        number fixed_cost / set_fixed_cost => FixedCost;
        number cost_variance => CostVariance;
        number bcwp / set_bcwp => Bcwp;
        number bcws / set_bcws => Bcws;
        number acwp / set_acwp => Acwp;
        number cv => Cv;
        number sv => Sv;
        number percent_complete / set_percent_complete => PercentComplete;
        number percent_work_complete / set_percent_work_complete => PercentWorkComplete;
    });

    custom_field_accessors!(TaskField {
        text custom_text / set_custom_text => TEXT;
        number custom_number / set_custom_number => NUMBER;
        flag custom_flag / set_custom_flag => FLAG;
        date custom_date / set_custom_date => DATE;
        date custom_start / set_custom_start => START;
        date custom_finish / set_custom_finish => FINISH;
        number custom_cost / set_custom_cost => COST;
        duration custom_duration / set_custom_duration => DURATION;
        text outline_code / set_outline_code => OUTLINE_CODE;
    });

    /// Completion point when it can be derived without a calendar: unset
    /// below 100 %, the actual finish at 100 %. See
    /// [`Project::complete_through`](crate::Project::complete_through).
    pub fn complete_through(&self) -> Option<chrono::NaiveDateTime> {
        self.fields.date(TaskField::CompleteThrough)
    }

    pub fn extended(&self, name: &str) -> Option<&FieldValue> {
        self.extended.get(name)
    }

    pub fn set_extended(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.extended.insert(name.into(), value)
    }

    pub fn extended_fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.extended.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Record a predecessor by id. Returns `false` if one to the same task exists.
    pub fn add_predecessor(&mut self, relation: Relation) -> bool {
        push_unique(&mut self.predecessors, relation)
    }

    pub fn add_unique_id_predecessor(&mut self, relation: Relation) -> bool {
        push_unique(&mut self.unique_id_predecessors, relation)
    }

    pub fn add_successor(&mut self, relation: Relation) {
        self.successors.push(relation);
    }

    pub fn add_unique_id_successor(&mut self, relation: Relation) {
        self.unique_id_successors.push(relation);
    }

    pub fn predecessors(&self) -> &[Relation] {
        &self.predecessors
    }

    pub fn unique_id_predecessors(&self) -> &[Relation] {
        &self.unique_id_predecessors
    }

    pub fn successors(&self) -> &[Relation] {
        &self.successors
    }

    pub fn unique_id_successors(&self) -> &[Relation] {
        &self.unique_id_successors
    }

    pub fn add_recurring_task(&mut self) -> ProjectResult<&mut RecurringTask> {
        if self.recurring.is_some() {
            return Err(ProjectError::Capacity {
                entity: self.label(),
                what: "a recurring task definition",
            });
        }
        Ok(self.recurring.insert(RecurringTask::default()))
    }

    pub fn recurring_task(&self) -> Option<&RecurringTask> {
        self.recurring.as_ref()
    }

    pub fn add_field_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: FieldListener<TaskField> + 'static,
    {
        self.fields.add_listener(listener)
    }

    pub fn remove_field_listener(&mut self, id: ListenerId) -> bool {
        self.fields.remove_listener(id)
    }

    pub(crate) fn label(&self) -> String {
        match (self.unique_id(), self.name()) {
            (Some(unique_id), Some(name)) => format!("task {unique_id} ({name})"),
            (Some(unique_id), None) => format!("task {unique_id}"),
            (None, _) => format!("task {:?}", self.key),
        }
    }
}

fn push_unique(relations: &mut Vec<Relation>, relation: Relation) -> bool {
    if relations.iter().any(|existing| existing.task_id == relation.task_id) {
        return false;
    }
    relations.push(relation);
    true
}
