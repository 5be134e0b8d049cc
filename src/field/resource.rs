use super::{FieldContainer, FieldValue, cost_variance, duration_difference, number_difference};
use crate::arena::ResourceKey;

field_enum! {
    /// Every attribute a resource can carry.
    pub enum ResourceField {
        Id => Integer,
        UniqueId => Integer,
        Name => Text,
        Initials => Text,
        Group => Text,
        Code => Text,
        EmailAddress => Text,
        Notes => Text,
        Hyperlink => Text,
        HyperlinkAddress => Text,
        BaseCalendar => Text,
        Linked => Boolean,
        OverAllocated => Boolean,
        Objects => Integer,
        AccrueAt => Integer,
        MaxUnits => Number,
        PeakUnits => Number,
        StandardRate => Number,
        OvertimeRate => Number,
        CostPerUse => Number,
        PercentWorkComplete => Number,
        Cost => Number,
        ActualCost => Number,
        RemainingCost => Number,
        BaselineCost => Number,
        OvertimeCost => Number,
        CostVariance => Number,
        Bcwp => Number,
        Bcws => Number,
        Acwp => Number,
        Cv => Number,
        Sv => Number,
        Work => Duration,
        ActualWork => Duration,
        RemainingWork => Duration,
        BaselineWork => Duration,
        OvertimeWork => Duration,
        RegularWork => Duration,
        WorkVariance => Duration,
        Start => Date,
        Finish => Date,
        AvailableFrom => Date,
        AvailableTo => Date,
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

impl ResourceField {
    pub const TEXT: [ResourceField; 30] = [
        ResourceField::Text1, ResourceField::Text2, ResourceField::Text3, ResourceField::Text4,
        ResourceField::Text5, ResourceField::Text6, ResourceField::Text7, ResourceField::Text8,
        ResourceField::Text9, ResourceField::Text10, ResourceField::Text11,
        ResourceField::Text12, ResourceField::Text13, ResourceField::Text14,
        ResourceField::Text15, ResourceField::Text16, ResourceField::Text17,
        ResourceField::Text18, ResourceField::Text19, ResourceField::Text20,
        ResourceField::Text21, ResourceField::Text22, ResourceField::Text23,
        ResourceField::Text24, ResourceField::Text25, ResourceField::Text26,
        ResourceField::Text27, ResourceField::Text28, ResourceField::Text29,
        ResourceField::Text30,
    ];

    pub const NUMBER: [ResourceField; 20] = [
        ResourceField::Number1, ResourceField::Number2, ResourceField::Number3,
        ResourceField::Number4, ResourceField::Number5, ResourceField::Number6,
        ResourceField::Number7, ResourceField::Number8, ResourceField::Number9,
        ResourceField::Number10, ResourceField::Number11, ResourceField::Number12,
        ResourceField::Number13, ResourceField::Number14, ResourceField::Number15,
        ResourceField::Number16, ResourceField::Number17, ResourceField::Number18,
        ResourceField::Number19, ResourceField::Number20,
    ];

    pub const FLAG: [ResourceField; 20] = [
        ResourceField::Flag1, ResourceField::Flag2, ResourceField::Flag3, ResourceField::Flag4,
        ResourceField::Flag5, ResourceField::Flag6, ResourceField::Flag7, ResourceField::Flag8,
        ResourceField::Flag9, ResourceField::Flag10, ResourceField::Flag11,
        ResourceField::Flag12, ResourceField::Flag13, ResourceField::Flag14,
        ResourceField::Flag15, ResourceField::Flag16, ResourceField::Flag17,
        ResourceField::Flag18, ResourceField::Flag19, ResourceField::Flag20,
    ];

    pub const DATE: [ResourceField; 10] = [
        ResourceField::Date1, ResourceField::Date2, ResourceField::Date3, ResourceField::Date4,
        ResourceField::Date5, ResourceField::Date6, ResourceField::Date7, ResourceField::Date8,
        ResourceField::Date9, ResourceField::Date10,
    ];

    pub const START: [ResourceField; 10] = [
        ResourceField::Start1, ResourceField::Start2, ResourceField::Start3,
        ResourceField::Start4, ResourceField::Start5, ResourceField::Start6,
        ResourceField::Start7, ResourceField::Start8, ResourceField::Start9,
        ResourceField::Start10,
    ];

    pub const FINISH: [ResourceField; 10] = [
        ResourceField::Finish1, ResourceField::Finish2, ResourceField::Finish3,
        ResourceField::Finish4, ResourceField::Finish5, ResourceField::Finish6,
        ResourceField::Finish7, ResourceField::Finish8, ResourceField::Finish9,
        ResourceField::Finish10,
    ];

    pub const COST: [ResourceField; 10] = [
        ResourceField::Cost1, ResourceField::Cost2, ResourceField::Cost3, ResourceField::Cost4,
        ResourceField::Cost5, ResourceField::Cost6, ResourceField::Cost7, ResourceField::Cost8,
        ResourceField::Cost9, ResourceField::Cost10,
    ];

    pub const DURATION: [ResourceField; 10] = [
        ResourceField::Duration1, ResourceField::Duration2, ResourceField::Duration3,
        ResourceField::Duration4, ResourceField::Duration5, ResourceField::Duration6,
        ResourceField::Duration7, ResourceField::Duration8, ResourceField::Duration9,
        ResourceField::Duration10,
    ];

    pub const OUTLINE_CODE: [ResourceField; 10] = [
        ResourceField::OutlineCode1, ResourceField::OutlineCode2, ResourceField::OutlineCode3,
        ResourceField::OutlineCode4, ResourceField::OutlineCode5, ResourceField::OutlineCode6,
        ResourceField::OutlineCode7, ResourceField::OutlineCode8, ResourceField::OutlineCode9,
        ResourceField::OutlineCode10,
    ];
}

dependency_table! {
    ResourceField, owner = ResourceKey, derive = derive_resource_field,
    RESOURCE_DEPENDENCIES = [
        CostVariance <= [Cost, BaselineCost],
        WorkVariance <= [Work, BaselineWork],
        Cv <= [Bcwp, Acwp],
        Sv <= [Bcwp, Bcws],
        OverAllocated <= [PeakUnits, MaxUnits],
    ]
}

fn derive_resource_field(field: ResourceField, fields: &FieldContainer<ResourceField>) -> Option<FieldValue> {
    use ResourceField::*;
    match field {
        CostVariance => number_difference(fields, Cost, BaselineCost),
        WorkVariance => duration_difference(fields, Work, BaselineWork),
        Cv => cost_variance(fields, Bcwp, Acwp),
        Sv => number_difference(fields, Bcwp, Bcws),
        OverAllocated => {
            let peak = fields.number(PeakUnits).unwrap_or(0.0);
            let max = fields.number(MaxUnits).unwrap_or(0.0);
            Some(FieldValue::Boolean(peak > max))
        }
        _ => None,
    }
}
