//! In-memory project plan model: tasks, resources, assignments and
//! working-time calendars, with lazily derived fields and outline rebuilds.

macro_rules! field_accessors {
    ($field:ident { $($kind:ident $getter:ident $(/ $setter:ident)? => $variant:ident;)* }) => {
        $(
            field_accessors!(@get $field $kind $getter $variant);
            $(field_accessors!(@set $field $kind $setter $variant);)?
        )*
    };
    (@get $field:ident text $getter:ident $variant:ident) => {
        pub fn $getter(&self) -> Option<&str> {
            self.fields.text($field::$variant)
        }
    };
    (@get $field:ident integer $getter:ident $variant:ident) => {
        pub fn $getter(&self) -> Option<i32> {
            self.fields.integer($field::$variant)
        }
    };
    (@get $field:ident number $getter:ident $variant:ident) => {
        pub fn $getter(&self) -> Option<f64> {
            self.fields.number($field::$variant)
        }
    };
    (@get $field:ident flag $getter:ident $variant:ident) => {
        pub fn $getter(&self) -> bool {
            self.fields.boolean($field::$variant).unwrap_or(false)
        }
    };
    (@get $field:ident date $getter:ident $variant:ident) => {
        pub fn $getter(&self) -> Option<::chrono::NaiveDateTime> {
            self.fields.date($field::$variant)
        }
    };
    (@get $field:ident duration $getter:ident $variant:ident) => {
        pub fn $getter(&self) -> Option<$crate::duration::Duration> {
            self.fields.duration($field::$variant)
        }
    };
    (@set $field:ident text $setter:ident $variant:ident) => {
        pub fn $setter(&mut self, value: impl Into<String>) {
            self.fields.store($field::$variant, Some($crate::field::FieldValue::Text(value.into())));
        }
    };
    (@set $field:ident integer $setter:ident $variant:ident) => {
        pub fn $setter(&mut self, value: i32) {
            self.fields.store($field::$variant, Some($crate::field::FieldValue::Integer(value)));
        }
    };
    (@set $field:ident number $setter:ident $variant:ident) => {
        pub fn $setter(&mut self, value: f64) {
            self.fields.store($field::$variant, Some($crate::field::FieldValue::Number(value)));
        }
    };
    (@set $field:ident flag $setter:ident $variant:ident) => {
        pub fn $setter(&mut self, value: bool) {
            self.fields.store($field::$variant, Some($crate::field::FieldValue::Boolean(value)));
        }
    };
    (@set $field:ident date $setter:ident $variant:ident) => {
        pub fn $setter(&mut self, value: ::chrono::NaiveDateTime) {
            self.fields.store($field::$variant, Some($crate::field::FieldValue::Date(value)));
        }
    };
    (@set $field:ident duration $setter:ident $variant:ident) => {
        pub fn $setter(&mut self, value: $crate::duration::Duration) {
            self.fields.store($field::$variant, Some($crate::field::FieldValue::Duration(value)));
        }
    };
}

/// Numbered custom-field families (`Text1`..`Text30` and so on), addressed 1-based.
macro_rules! custom_field_accessors {
    ($field:ident { $($kind:ident $getter:ident / $setter:ident => $family:ident;)* }) => {
        $(
            custom_field_accessors!(@pair $field $kind $getter $setter $family);
        )*
    };
    (@pair $field:ident text $getter:ident $setter:ident $family:ident) => {
        pub fn $getter(&self, number: usize) -> $crate::error::ProjectResult<Option<&str>> {
            let field = $crate::field::indexed(&$field::$family, stringify!($family), number)?;
            Ok(self.fields.text(field))
        }
        custom_field_accessors!(@set $field $setter $family, value: impl Into<String> => Text(value.into()));
    };
    (@pair $field:ident number $getter:ident $setter:ident $family:ident) => {
        pub fn $getter(&self, number: usize) -> $crate::error::ProjectResult<Option<f64>> {
            let field = $crate::field::indexed(&$field::$family, stringify!($family), number)?;
            Ok(self.fields.number(field))
        }
        custom_field_accessors!(@set $field $setter $family, value: f64 => Number(value));
    };
    (@pair $field:ident flag $getter:ident $setter:ident $family:ident) => {
        pub fn $getter(&self, number: usize) -> $crate::error::ProjectResult<bool> {
            let field = $crate::field::indexed(&$field::$family, stringify!($family), number)?;
            Ok(self.fields.boolean(field).unwrap_or(false))
        }
        custom_field_accessors!(@set $field $setter $family, value: bool => Boolean(value));
    };
    (@pair $field:ident date $getter:ident $setter:ident $family:ident) => {
        pub fn $getter(&self, number: usize) -> $crate::error::ProjectResult<Option<::chrono::NaiveDateTime>> {
            let field = $crate::field::indexed(&$field::$family, stringify!($family), number)?;
            Ok(self.fields.date(field))
        }
        custom_field_accessors!(@set $field $setter $family, value: ::chrono::NaiveDateTime => Date(value));
    };
    (@pair $field:ident duration $getter:ident $setter:ident $family:ident) => {
        pub fn $getter(&self, number: usize) -> $crate::error::ProjectResult<Option<$crate::duration::Duration>> {
            let field = $crate::field::indexed(&$field::$family, stringify!($family), number)?;
            Ok(self.fields.duration(field))
        }
        custom_field_accessors!(@set $field $setter $family, value: $crate::duration::Duration => Duration(value));
    };
    (@set $field:ident $setter:ident $family:ident, $param:ident: $ty:ty => $variant:ident($convert:expr)) => {
        pub fn $setter(&mut self, number: usize, $param: $ty) -> $crate::error::ProjectResult<()> {
            let field = $crate::field::indexed(&$field::$family, stringify!($family), number)?;
            self.fields.store(field, Some($crate::field::FieldValue::$variant($convert)));
            Ok(())
        }
    };
}

pub mod arena;
pub mod assignment;
pub mod calendar;
pub mod config;
pub mod duration;
pub mod error;
pub mod field;
pub mod project;
pub mod recurring;
pub mod relation;
pub mod resource;
pub mod task;

pub use arena::{AssignmentKey, CalendarKey, ResourceKey, TaskKey};
pub use assignment::ResourceAssignment;
pub use calendar::{Calendar, CalendarException, CalendarHours, CalendarRef, DayType, TimeRange};
pub use config::ProjectConfig;
pub use duration::{Duration, DurationDefaults, TimeUnit};
pub use error::{ProjectError, ProjectResult};
pub use field::{AssignmentField, FieldContainer, FieldListener, FieldValue, ListenerId, ResourceField, TaskField};
pub use project::{Project, ProjectListener};
pub use recurring::{RecurrencePattern, RecurringTask};
pub use relation::{Relation, RelationType};
pub use resource::Resource;
pub use task::Task;
