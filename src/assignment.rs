use crate::arena::{AssignmentKey, ResourceKey, TaskKey};
use crate::duration::DurationDefaults;
use crate::error::{ProjectError, ProjectResult};
use crate::field::{AssignmentField, FieldContainer, FieldListener, FieldValue, ListenerId};

pub const DEFAULT_UNITS: f64 = 100.0;

/// Work of one resource on one task. The task and resource keys are the
/// structural links; the id fields carry the authoritative identifiers.
#[derive(Debug)]
pub struct ResourceAssignment {
    key: AssignmentKey,
    task: TaskKey,
    resource: Option<ResourceKey>,
    pub(crate) fields: FieldContainer<AssignmentField>,
}

impl ResourceAssignment {
    pub(crate) fn new(key: AssignmentKey, task: TaskKey, defaults: DurationDefaults) -> Self {
        let mut fields = FieldContainer::new(key, defaults);
        fields.store(AssignmentField::Units, Some(FieldValue::Number(DEFAULT_UNITS)));
        Self {
            key,
            task,
            resource: None,
            fields,
        }
    }

    pub fn key(&self) -> AssignmentKey {
        self.key
    }

    pub fn task(&self) -> TaskKey {
        self.task
    }

    pub fn resource(&self) -> Option<ResourceKey> {
        self.resource
    }

    pub fn fields(&self) -> &FieldContainer<AssignmentField> {
        &self.fields
    }

    pub fn get(&self, field: AssignmentField) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Generic write; the task and resource links belong to the project.
    pub fn set(&mut self, field: AssignmentField, value: Option<FieldValue>) -> ProjectResult<()> {
        if matches!(
            field,
            AssignmentField::TaskId
                | AssignmentField::TaskUniqueId
                | AssignmentField::ResourceId
                | AssignmentField::ResourceUniqueId
        ) {
            return Err(ProjectError::identity(format!(
                "assignment {field} must be changed through the project"
            )));
        }
        self.fields.set(field, value).map(|_| ())
    }

    pub(crate) fn link_task_ids(&mut self, id: Option<i32>, unique_id: Option<i32>) {
        self.fields.store(AssignmentField::TaskId, id.map(FieldValue::Integer));
        self.fields.store(AssignmentField::TaskUniqueId, unique_id.map(FieldValue::Integer));
    }

    pub(crate) fn link_resource(&mut self, resource: ResourceKey, id: Option<i32>, unique_id: Option<i32>) {
        self.resource = Some(resource);
        self.link_resource_ids(id, unique_id);
    }

    pub(crate) fn link_resource_ids(&mut self, id: Option<i32>, unique_id: Option<i32>) {
        self.fields.store(AssignmentField::ResourceId, id.map(FieldValue::Integer));
        self.fields.store(AssignmentField::ResourceUniqueId, unique_id.map(FieldValue::Integer));
    }

    field_accessors!(AssignmentField {
        integer task_id => TaskId;
        integer task_unique_id => TaskUniqueId;
        integer resource_id => ResourceId;
        integer resource_unique_id => ResourceUniqueId;
        number units / set_units => Units;
        duration work / set_work => Work;
        duration actual_work / set_actual_work => ActualWork;
        duration remaining_work / set_remaining_work => RemainingWork;
        duration overtime_work / set_overtime_work => OvertimeWork;
        duration baseline_work / set_baseline_work => BaselineWork;
        duration work_variance => WorkVariance;
        number cost / set_cost => Cost;
        number actual_cost / set_actual_cost => ActualCost;
        number remaining_cost / set_remaining_cost => RemainingCost;
        number baseline_cost / set_baseline_cost => BaselineCost;
        number cost_variance => CostVariance;
        date start / set_start => Start;
        date finish / set_finish => Finish;
        date actual_start / set_actual_start => ActualStart;
        date actual_finish / set_actual_finish => ActualFinish;
        duration delay / set_delay => Delay;
        text notes / set_notes => Notes;
    });

    pub fn add_field_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: FieldListener<AssignmentField> + 'static,
    {
        self.fields.add_listener(listener)
    }

    pub fn remove_field_listener(&mut self, id: ListenerId) -> bool {
        self.fields.remove_listener(id)
    }
}
