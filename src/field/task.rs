use super::{
    FieldContainer, FieldValue, cost_variance, date_difference, duration_difference, number_difference,
    smaller_duration,
};
use crate::arena::TaskKey;

field_enum! {
    /// Every attribute a task can carry.
    pub enum TaskField {
        Id => Integer,
        UniqueId => Integer,
        Name => Text,
        Wbs => Text,
        OutlineNumber => Text,
        OutlineLevel => Integer,
        Notes => Text,
        Priority => Integer,
        Milestone => Boolean,
        Summary => Boolean,
        Active => Boolean,
        Marked => Boolean,
        Rollup => Boolean,
        HideBar => Boolean,
        EffortDriven => Boolean,
        Estimated => Boolean,
        Critical => Boolean,
        ConstraintType => Integer,
        ConstraintDate => Date,
        Deadline => Date,
        Created => Date,
        Start => Date,
        Finish => Date,
        ActualStart => Date,
        ActualFinish => Date,
        BaselineStart => Date,
        BaselineFinish => Date,
        EarlyStart => Date,
        EarlyFinish => Date,
        LateStart => Date,
        LateFinish => Date,
        Stop => Date,
        Resume => Date,
        CompleteThrough => Date,
        Duration => Duration,
        ActualDuration => Duration,
        RemainingDuration => Duration,
        BaselineDuration => Duration,
        DurationVariance => Duration,
        StartVariance => Duration,
        FinishVariance => Duration,
        FreeSlack => Duration,
        StartSlack => Duration,
        FinishSlack => Duration,
        TotalSlack => Duration,
        Work => Duration,
        ActualWork => Duration,
        RemainingWork => Duration,
        BaselineWork => Duration,
        OvertimeWork => Duration,
        WorkVariance => Duration,
        Cost => Number,
        ActualCost => Number,
        RemainingCost => Number,
        BaselineCost => Number,
        FixedCost => Number,
        CostVariance => Number,
        Bcwp => Number,
        Bcws => Number,
        Acwp => Number,
        Cv => Number,
        Sv => Number,
        PercentComplete => Number,
        PercentWorkComplete => Number,
        Contact => Text,
        Hyperlink => Text,
        HyperlinkAddress => Text,
        CalendarName => Text,
        Objects => Integer,
        Text1 => Text,
        Text2 => Text,
        Text3 => Text,
        Text4 => Text,
        Text5 => Text,
        Text6 => Text,
        Text7 => Text,
        Text8 => Text,
        Text9 => Text,
        Text10 => Text,
        Text11 => Text,
        Text12 => Text,
        Text13 => Text,
        Text14 => Text,
        Text15 => Text,
        Text16 => Text,
        Text17 => Text,
        Text18 => Text,
        Text19 => Text,
        Text20 => Text,
        Text21 => Text,
        Text22 => Text,
        Text23 => Text,
        Text24 => Text,
        Text25 => Text,
        Text26 => Text,
        Text27 => Text,
        Text28 => Text,
        Text29 => Text,
        Text30 => Text,
        Number1 => Number,
        Number2 => Number,
        Number3 => Number,
        Number4 => Number,
        Number5 => Number,
        Number6 => Number,
        Number7 => Number,
        Number8 => Number,
        Number9 => Number,
        Number10 => Number,
        Number11 => Number,
        Number12 => Number,
        Number13 => Number,
        Number14 => Number,
        Number15 => Number,
        Number16 => Number,
        Number17 => Number,
        Number18 => Number,
        Number19 => Number,
        Number20 => Number,
        Flag1 => Boolean,
        Flag2 => Boolean,
        Flag3 => Boolean,
        Flag4 => Boolean,
        Flag5 => Boolean,
        Flag6 => Boolean,
        Flag7 => Boolean,
        Flag8 => Boolean,
        Flag9 => Boolean,
        Flag10 => Boolean,
        Flag11 => Boolean,
        Flag12 => Boolean,
        Flag13 => Boolean,
        Flag14 => Boolean,
        Flag15 => Boolean,
        Flag16 => Boolean,
        Flag17 => Boolean,
        Flag18 => Boolean,
        Flag19 => Boolean,
        Flag20 => Boolean,
        Date1 => Date,
        Date2 => Date,
        Date3 => Date,
        Date4 => Date,
        Date5 => Date,
        Date6 => Date,
        Date7 => Date,
        Date8 => Date,
        Date9 => Date,
        Date10 => Date,
        Start1 => Date,
        Start2 => Date,
        Start3 => Date,
        Start4 => Date,
        Start5 => Date,
        Start6 => Date,
        Start7 => Date,
        Start8 => Date,
        Start9 => Date,
        Start10 => Date,
        Finish1 => Date,
        Finish2 => Date,
        Finish3 => Date,
        Finish4 => Date,
        Finish5 => Date,
        Finish6 => Date,
        Finish7 => Date,
        Finish8 => Date,
        Finish9 => Date,
        Finish10 => Date,
        Cost1 => Number,
        Cost2 => Number,
        Cost3 => Number,
        Cost4 => Number,
        Cost5 => Number,
        Cost6 => Number,
        Cost7 => Number,
        Cost8 => Number,
        Cost9 => Number,
        Cost10 => Number,
        Duration1 => Duration,
        Duration2 => Duration,
        Duration3 => Duration,
        Duration4 => Duration,
        Duration5 => Duration,
        Duration6 => Duration,
        Duration7 => Duration,
        Duration8 => Duration,
        Duration9 => Duration,
        Duration10 => Duration,
        OutlineCode1 => Text,
        OutlineCode2 => Text,
        OutlineCode3 => Text,
        OutlineCode4 => Text,
        OutlineCode5 => Text,
        OutlineCode6 => Text,
        OutlineCode7 => Text,
        OutlineCode8 => Text,
        OutlineCode9 => Text,
        OutlineCode10 => Text,
    }
}

impl TaskField {
    pub const TEXT: [TaskField; 30] = [
        TaskField::Text1, TaskField::Text2, TaskField::Text3, TaskField::Text4,
        TaskField::Text5, TaskField::Text6, TaskField::Text7, TaskField::Text8,
        TaskField::Text9, TaskField::Text10, TaskField::Text11, TaskField::Text12,
        TaskField::Text13, TaskField::Text14, TaskField::Text15, TaskField::Text16,
        TaskField::Text17, TaskField::Text18, TaskField::Text19, TaskField::Text20,
        TaskField::Text21, TaskField::Text22, TaskField::Text23, TaskField::Text24,
        TaskField::Text25, TaskField::Text26, TaskField::Text27, TaskField::Text28,
        TaskField::Text29, TaskField::Text30,
    ];

    pub const NUMBER: [TaskField; 20] = [
        TaskField::Number1, TaskField::Number2, TaskField::Number3, TaskField::Number4,
        TaskField::Number5, TaskField::Number6, TaskField::Number7, TaskField::Number8,
        TaskField::Number9, TaskField::Number10, TaskField::Number11, TaskField::Number12,
        TaskField::Number13, TaskField::Number14, TaskField::Number15, TaskField::Number16,
        TaskField::Number17, TaskField::Number18, TaskField::Number19, TaskField::Number20,
    ];

    pub const FLAG: [TaskField; 20] = [
        TaskField::Flag1, TaskField::Flag2, TaskField::Flag3, TaskField::Flag4,
        TaskField::Flag5, TaskField::Flag6, TaskField::Flag7, TaskField::Flag8,
        TaskField::Flag9, TaskField::Flag10, TaskField::Flag11, TaskField::Flag12,
        TaskField::Flag13, TaskField::Flag14, TaskField::Flag15, TaskField::Flag16,
        TaskField::Flag17, TaskField::Flag18, TaskField::Flag19, TaskField::Flag20,
    ];

    pub const DATE: [TaskField; 10] = [
        TaskField::Date1, TaskField::Date2, TaskField::Date3, TaskField::Date4,
        TaskField::Date5, TaskField::Date6, TaskField::Date7, TaskField::Date8,
        TaskField::Date9, TaskField::Date10,
    ];

    pub const START: [TaskField; 10] = [
        TaskField::Start1, TaskField::Start2, TaskField::Start3, TaskField::Start4,
        TaskField::Start5, TaskField::Start6, TaskField::Start7, TaskField::Start8,
        TaskField::Start9, TaskField::Start10,
    ];

    pub const FINISH: [TaskField; 10] = [
        TaskField::Finish1, TaskField::Finish2, TaskField::Finish3, TaskField::Finish4,
        TaskField::Finish5, TaskField::Finish6, TaskField::Finish7, TaskField::Finish8,
        TaskField::Finish9, TaskField::Finish10,
    ];

    pub const COST: [TaskField; 10] = [
        TaskField::Cost1, TaskField::Cost2, TaskField::Cost3, TaskField::Cost4,
        TaskField::Cost5, TaskField::Cost6, TaskField::Cost7, TaskField::Cost8,
        TaskField::Cost9, TaskField::Cost10,
    ];

    pub const DURATION: [TaskField; 10] = [
        TaskField::Duration1, TaskField::Duration2, TaskField::Duration3, TaskField::Duration4,
        TaskField::Duration5, TaskField::Duration6, TaskField::Duration7, TaskField::Duration8,
        TaskField::Duration9, TaskField::Duration10,
    ];

    pub const OUTLINE_CODE: [TaskField; 10] = [
        TaskField::OutlineCode1, TaskField::OutlineCode2, TaskField::OutlineCode3,
        TaskField::OutlineCode4, TaskField::OutlineCode5, TaskField::OutlineCode6,
        TaskField::OutlineCode7, TaskField::OutlineCode8, TaskField::OutlineCode9,
        TaskField::OutlineCode10,
    ];
}

dependency_table! {
    TaskField, owner = TaskKey, derive = derive_task_field,
    TASK_DEPENDENCIES = [
        StartVariance <= [Start, BaselineStart],
        FinishVariance <= [Finish, BaselineFinish],
        CostVariance <= [Cost, BaselineCost],
        DurationVariance <= [Duration, BaselineDuration],
        WorkVariance <= [Work, BaselineWork],
        Cv <= [Bcwp, Acwp],
        Sv <= [Bcwp, Bcws],
        CompleteThrough <= [Duration, PercentComplete, ActualStart, ActualFinish, CalendarName],
        StartSlack <= [EarlyStart, LateStart],
        FinishSlack <= [EarlyFinish, LateFinish],
        TotalSlack <= [StartSlack, FinishSlack],
        Critical <= [TotalSlack, PercentComplete],
    ]
}

fn derive_task_field(field: TaskField, fields: &FieldContainer<TaskField>) -> Option<FieldValue> {
    use TaskField::*;
    match field {
        StartVariance => date_difference(fields, Start, BaselineStart),
        FinishVariance => date_difference(fields, Finish, BaselineFinish),
        CostVariance => number_difference(fields, Cost, BaselineCost),
        DurationVariance => duration_difference(fields, Duration, BaselineDuration),
        WorkVariance => duration_difference(fields, Work, BaselineWork),
        Cv => cost_variance(fields, Bcwp, Acwp),
        Sv => number_difference(fields, Bcwp, Bcws),
        StartSlack => date_difference(fields, LateStart, EarlyStart),
        FinishSlack => date_difference(fields, LateFinish, EarlyFinish),
        TotalSlack => {
            let start = fields.duration(StartSlack)?;
            let finish = fields.duration(FinishSlack)?;
            Some(FieldValue::Duration(smaller_duration(start, finish, fields.defaults())))
        }
        Critical => {
            let slack = fields.duration(TotalSlack)?;
            let complete = fields.number(PercentComplete).unwrap_or(0.0);
            Some(FieldValue::Boolean(slack.value() <= 0.0 && complete != 100.0))
        }
        // Partial progress needs a calendar walk; see Project::complete_through.
        CompleteThrough => match fields.number(PercentComplete) {
            Some(complete) if complete >= 100.0 => fields.date(ActualFinish).map(FieldValue::Date),
            _ => None,
        },
        _ => None,
    }
}
