//! Typed attribute storage shared by every entity.
//!
//! Each entity kind declares a closed field enumeration and a static
//! dependency table listing, for every derived field, the stored fields it is
//! computed from. Derived values are computed on first read, cached, and
//! dropped again when any of their inputs is written. The table is checked at
//! compile time: every entry may only read stored fields or derived fields
//! declared by an earlier entry, so no derived field can depend on itself.

use crate::duration::{Duration, DurationDefaults};
use crate::error::{ProjectError, ProjectResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

macro_rules! field_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $ty:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($variant),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
            pub const COUNT: usize = Self::ALL.len();

            pub const fn ordinal(self) -> usize {
                self as usize
            }

            pub const fn data_type(self) -> $crate::field::DataType {
                match self {
                    $($name::$variant => $crate::field::DataType::$ty),*
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

macro_rules! dependency_table {
    (
        $field:ident, owner = $owner:ty, derive = $derive:ident,
        $table:ident = [ $( $derived:ident <= [ $($input:ident),* $(,)? ] ),* $(,)? ]
    ) => {
        pub const $table: &[$crate::field::Dependency<$field>] = &[
            $(
                $crate::field::Dependency {
                    derived: $field::$derived,
                    inputs: &[$($field::$input),*],
                }
            ),*
        ];

        const DERIVED_MASK: [bool; $field::COUNT] = {
            let mut mask = [false; $field::COUNT];
            let mut i = 0;
            while i < $table.len() {
                mask[$table[i].derived.ordinal()] = true;
                i += 1;
            }
            mask
        };

        const _: () = {
            let mut i = 0;
            while i < $table.len() {
                let inputs = $table[i].inputs;
                let mut k = 0;
                while k < inputs.len() {
                    let mut j = i;
                    while j < $table.len() {
                        assert!(
                            inputs[k].ordinal() != $table[j].derived.ordinal(),
                            "derived field reads itself or a derived field declared after it"
                        );
                        j += 1;
                    }
                    k += 1;
                }
                i += 1;
            }
        };

        impl $crate::field::FieldKind for $field {
            type Owner = $owner;
            const COUNT: usize = $field::COUNT;

            fn all() -> &'static [Self] {
                $field::ALL
            }

            fn index(self) -> usize {
                self.ordinal()
            }

            fn data_type(self) -> $crate::field::DataType {
                $field::data_type(self)
            }

            fn name(self) -> &'static str {
                $field::name(self)
            }

            fn dependencies() -> &'static [$crate::field::Dependency<Self>] {
                $table
            }

            fn is_derived(self) -> bool {
                DERIVED_MASK[self.ordinal()]
            }

            fn derive(self, fields: &$crate::field::FieldContainer<Self>) -> Option<$crate::field::FieldValue> {
                $derive(self, fields)
            }
        }
    };
}

mod assignment;
mod container;
mod resource;
mod task;

pub use assignment::{ASSIGNMENT_DEPENDENCIES, AssignmentField};
pub use container::{FieldContainer, FieldListener, ListenerId};
pub use resource::{RESOURCE_DEPENDENCIES, ResourceField};
pub use task::{TASK_DEPENDENCIES, TaskField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Text,
    Integer,
    Number,
    Boolean,
    Date,
    Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Integer(i32),
    Number(f64),
    Boolean(bool),
    Date(NaiveDateTime),
    Duration(Duration),
}

impl FieldValue {
    pub fn data_type(&self) -> DataType {
        match self {
            FieldValue::Text(_) => DataType::Text,
            FieldValue::Integer(_) => DataType::Integer,
            FieldValue::Number(_) => DataType::Number,
            FieldValue::Boolean(_) => DataType::Boolean,
            FieldValue::Date(_) => DataType::Date,
            FieldValue::Duration(_) => DataType::Duration,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            FieldValue::Duration(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::Boolean(value) => write!(f, "{value}"),
            FieldValue::Date(value) => write!(f, "{value}"),
            FieldValue::Duration(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Date(value)
    }
}

impl From<Duration> for FieldValue {
    fn from(value: Duration) -> Self {
        FieldValue::Duration(value)
    }
}

/// One derived field and the fields whose writes invalidate it.
#[derive(Debug, Clone, Copy)]
pub struct Dependency<F: 'static> {
    pub derived: F,
    pub inputs: &'static [F],
}

/// A closed field enumeration for one entity kind.
pub trait FieldKind: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Handle reported to listeners as the owner of a changed field.
    type Owner: Copy + fmt::Debug;

    const COUNT: usize;

    fn all() -> &'static [Self];
    fn index(self) -> usize;
    fn data_type(self) -> DataType;
    fn name(self) -> &'static str;
    fn dependencies() -> &'static [Dependency<Self>];
    fn is_derived(self) -> bool;

    /// Compute a derived field from the container's current inputs.
    /// Returns `None` for stored fields and when inputs are missing.
    fn derive(self, fields: &FieldContainer<Self>) -> Option<FieldValue>;
}

/// Look up the `number`th (1-based) entry of a custom field family.
pub(crate) fn indexed<F: Copy>(family: &[F], kind: &'static str, number: usize) -> ProjectResult<F> {
    number
        .checked_sub(1)
        .and_then(|index| family.get(index))
        .copied()
        .ok_or(ProjectError::FieldIndex {
            kind,
            index: number,
        })
}

pub(crate) fn number_difference<F: FieldKind>(fields: &FieldContainer<F>, value: F, baseline: F) -> Option<FieldValue> {
    Some(FieldValue::Number(fields.number(value)? - fields.number(baseline)?))
}

pub(crate) fn cost_variance<F: FieldKind>(fields: &FieldContainer<F>, bcwp: F, acwp: F) -> Option<FieldValue> {
    let earned = fields.number(bcwp).unwrap_or(0.0);
    let actual = fields.number(acwp).unwrap_or(0.0);
    Some(FieldValue::Number(earned - actual))
}

pub(crate) fn duration_difference<F: FieldKind>(fields: &FieldContainer<F>, value: F, baseline: F) -> Option<FieldValue> {
    let value = fields.duration(value)?;
    let baseline = fields.duration(baseline)?;
    Some(FieldValue::Duration(value.minus(baseline, fields.defaults())))
}

/// `later - earlier` in elapsed days.
pub(crate) fn date_difference<F: FieldKind>(fields: &FieldContainer<F>, later: F, earlier: F) -> Option<FieldValue> {
    let minutes = (fields.date(later)? - fields.date(earlier)?).num_minutes();
    Some(FieldValue::Duration(Duration::elapsed_days(minutes as f64 / (24.0 * 60.0))))
}

pub(crate) fn smaller_duration(a: Duration, b: Duration, defaults: &DurationDefaults) -> Duration {
    if a.in_minutes(defaults) < b.in_minutes(defaults) { a } else { b }
}
