use crate::arena::{AssignmentKey, CalendarKey, ResourceKey};
use crate::duration::DurationDefaults;
use crate::error::{ProjectError, ProjectResult};
use crate::field::{FieldContainer, FieldListener, FieldValue, ListenerId, ResourceField};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct Resource {
    key: ResourceKey,
    pub(crate) fields: FieldContainer<ResourceField>,
    pub(crate) calendar: Option<CalendarKey>,
    pub(crate) assignments: Vec<AssignmentKey>,
    extended: BTreeMap<String, FieldValue>,
}

impl Resource {
    pub(crate) fn new(key: ResourceKey, defaults: DurationDefaults) -> Self {
        Self {
            key,
            fields: FieldContainer::new(key, defaults),
            calendar: None,
            assignments: Vec::new(),
            extended: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> ResourceKey {
        self.key
    }

    pub fn id(&self) -> Option<i32> {
        self.fields.integer(ResourceField::Id)
    }

    pub fn unique_id(&self) -> Option<i32> {
        self.fields.integer(ResourceField::UniqueId)
    }

    pub(crate) fn store_id(&mut self, id: i32) {
        self.fields.store(ResourceField::Id, Some(FieldValue::Integer(id)));
    }

    pub(crate) fn store_unique_id(&mut self, unique_id: i32) {
        self.fields.store(ResourceField::UniqueId, Some(FieldValue::Integer(unique_id)));
    }

    /// The calendar owned by this resource, if any.
    pub fn calendar(&self) -> Option<CalendarKey> {
        self.calendar
    }

    pub fn assignments(&self) -> &[AssignmentKey] {
        &self.assignments
    }

    pub fn fields(&self) -> &FieldContainer<ResourceField> {
        &self.fields
    }

    pub fn get(&self, field: ResourceField) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: ResourceField, value: Option<FieldValue>) -> ProjectResult<()> {
        if matches!(field, ResourceField::Id | ResourceField::UniqueId) {
            return Err(ProjectError::identity(format!(
                "resource {field} must be changed through the project"
            )));
        }
        self.fields.set(field, value).map(|_| ())
    }

    field_accessors!(ResourceField {
        text name / set_name => Name;
        text initials / set_initials => Initials;
        text group / set_group => Group;
        text code / set_code => Code;
        text email_address / set_email_address => EmailAddress;
        text notes / set_notes => Notes;
        number max_units / set_max_units => MaxUnits;
        number peak_units / set_peak_units => PeakUnits;
        flag over_allocated => OverAllocated;
        number standard_rate / set_standard_rate => StandardRate;
        number overtime_rate / set_overtime_rate => OvertimeRate;
        number cost_per_use / set_cost_per_use => CostPerUse;
        number cost / set_cost => Cost;
        number actual_cost / set_actual_cost => ActualCost;
        number remaining_cost / set_remaining_cost => RemainingCost;
        number baseline_cost / set_baseline_cost => BaselineCost;
        number cost_variance => CostVariance;
        number bcwp / set_bcwp => Bcwp;
        number bcws / set_bcws => Bcws;
        number acwp / set_acwp => Acwp;
        number cv => Cv;
        number sv => Sv;
        duration work / set_work => Work;
        duration actual_work / set_actual_work => ActualWork;
        duration remaining_work / set_remaining_work => RemainingWork;
        duration baseline_work / set_baseline_work => BaselineWork;
        duration work_variance => WorkVariance;
        date start / set_start => Start;
        date finish / set_finish => Finish;
        date available_from / set_available_from => AvailableFrom;
        date available_to / set_available_to => AvailableTo;
    });

    custom_field_accessors!(ResourceField {
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

    pub fn extended(&self, name: &str) -> Option<&FieldValue> {
        self.extended.get(name)
    }

    pub fn set_extended(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.extended.insert(name.into(), value)
    }

    pub fn add_field_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: FieldListener<ResourceField> + 'static,
    {
        self.fields.add_listener(listener)
    }

    pub fn remove_field_listener(&mut self, id: ListenerId) -> bool {
        self.fields.remove_listener(id)
    }

    pub(crate) fn label(&self) -> String {
        match (self.unique_id(), self.name()) {
            (Some(unique_id), Some(name)) => format!("resource {unique_id} ({name})"),
            (Some(unique_id), None) => format!("resource {unique_id}"),
            (None, _) => format!("resource {:?}", self.key),
        }
    }
}
