use super::{FieldContainer, FieldValue, duration_difference, number_difference};
use crate::arena::AssignmentKey;

field_enum! {
    pub enum AssignmentField {
        TaskId => Integer,
        TaskUniqueId => Integer,
        ResourceId => Integer,
        ResourceUniqueId => Integer,
        Units => Number,
        Work => Duration,
        ActualWork => Duration,
        RemainingWork => Duration,
        OvertimeWork => Duration,
        BaselineWork => Duration,
        WorkVariance => Duration,
        Cost => Number,
        ActualCost => Number,
        RemainingCost => Number,
        BaselineCost => Number,
        CostVariance => Number,
        Start => Date,
        Finish => Date,
        ActualStart => Date,
        ActualFinish => Date,
        Delay => Duration,
        WorkContour => Integer,
        Notes => Text,
    }
}

dependency_table! {
    AssignmentField, owner = AssignmentKey, derive = derive_assignment_field,
    ASSIGNMENT_DEPENDENCIES = [
        CostVariance <= [Cost, BaselineCost],
        WorkVariance <= [Work, BaselineWork],
    ]
}

fn derive_assignment_field(field: AssignmentField, fields: &FieldContainer<AssignmentField>) -> Option<FieldValue> {
    match field {
        AssignmentField::CostVariance => {
            number_difference(fields, AssignmentField::Cost, AssignmentField::BaselineCost)
        }
        AssignmentField::WorkVariance => {
            duration_difference(fields, AssignmentField::Work, AssignmentField::BaselineWork)
        }
        _ => None,
    }
}
