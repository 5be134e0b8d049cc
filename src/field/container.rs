use super::{FieldKind, FieldValue};
use crate::duration::{Duration, DurationDefaults};
use crate::error::{ProjectError, ProjectResult};
use chrono::NaiveDateTime;
use std::cell::OnceCell;
use std::fmt;

/// Receives `(owner, field, old, new)` after every write to a container.
pub trait FieldListener<F: FieldKind> {
    fn field_changed(
        &mut self,
        owner: F::Owner,
        field: F,
        old: Option<&FieldValue>,
        new: Option<&FieldValue>,
    );
}

impl<F, C> FieldListener<F> for C
where
    F: FieldKind,
    C: FnMut(F::Owner, F, Option<&FieldValue>, Option<&FieldValue>),
{
    fn field_changed(
        &mut self,
        owner: F::Owner,
        field: F,
        old: Option<&FieldValue>,
        new: Option<&FieldValue>,
    ) {
        self(owner, field, old, new)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Fixed-size slot store indexed by a field enumeration.
///
/// Stored fields hold whatever was last written. Derived fields hold a cache
/// that is filled on read and emptied whenever one of the inputs named in
/// `F::dependencies()` is written, directly or through another derived field.
pub struct FieldContainer<F: FieldKind> {
    owner: F::Owner,
    slots: Vec<OnceCell<FieldValue>>,
    defaults: DurationDefaults,
    listeners: Vec<(ListenerId, Box<dyn FieldListener<F>>)>,
    next_listener: u64,
}

impl<F: FieldKind> FieldContainer<F> {
    pub fn new(owner: F::Owner, defaults: DurationDefaults) -> Self {
        Self {
            owner,
            slots: (0..F::COUNT).map(|_| OnceCell::new()).collect(),
            defaults,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn owner(&self) -> F::Owner {
        self.owner
    }

    pub fn defaults(&self) -> &DurationDefaults {
        &self.defaults
    }

    /// Swap the unit-conversion settings; every cached derived value is dropped.
    pub fn set_defaults(&mut self, defaults: DurationDefaults) {
        self.defaults = defaults;
        for field in F::all() {
            if field.is_derived() {
                self.slots[field.index()].take();
            }
        }
    }

    pub fn get(&self, field: F) -> Option<&FieldValue> {
        let slot = &self.slots[field.index()];
        if slot.get().is_none() && field.is_derived() {
            if let Some(value) = field.derive(self) {
                return Some(slot.get_or_init(|| value));
            }
        }
        slot.get()
    }

    pub fn is_cached(&self, field: F) -> bool {
        self.slots[field.index()].get().is_some()
    }

    /// Type-checked write. Returns the previous value.
    pub fn set(&mut self, field: F, value: Option<FieldValue>) -> ProjectResult<Option<FieldValue>> {
        if let Some(value) = &value {
            let found = value.data_type();
            if found != field.data_type() {
                return Err(ProjectError::FieldType {
                    field: field.name(),
                    expected: field.data_type(),
                    found,
                });
            }
        }
        Ok(self.store(field, value))
    }

    pub(crate) fn store(&mut self, field: F, value: Option<FieldValue>) -> Option<FieldValue> {
        debug_assert!(value.as_ref().is_none_or(|v| v.data_type() == field.data_type()));
        let index = field.index();
        let old = self.slots[index].take();
        if let Some(value) = value {
            self.slots[index].get_or_init(|| value);
        }
        self.invalidate_dependents(field);

        let new = self.slots[index].get();
        for (_, listener) in &mut self.listeners {
            listener.field_changed(self.owner, field, old.as_ref(), new);
        }
        old
    }

    fn invalidate_dependents(&mut self, field: F) {
        let mut stale = vec![field];
        for dependency in F::dependencies() {
            if dependency.inputs.iter().any(|input| stale.contains(input)) {
                self.slots[dependency.derived.index()].take();
                stale.push(dependency.derived);
            }
        }
    }

    pub fn add_listener<L>(&mut self, listener: L) -> ListenerId
    where
        L: FieldListener<F> + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Fields currently holding a value, without computing derived ones.
    pub fn populated(&self) -> impl Iterator<Item = (F, &FieldValue)> {
        F::all()
            .iter()
            .filter_map(|field| self.slots[field.index()].get().map(|value| (*field, value)))
    }

    pub fn text(&self, field: F) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn integer(&self, field: F) -> Option<i32> {
        self.get(field).and_then(FieldValue::as_integer)
    }

    pub fn number(&self, field: F) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    pub fn boolean(&self, field: F) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_boolean)
    }

    pub fn date(&self, field: F) -> Option<NaiveDateTime> {
        self.get(field).and_then(FieldValue::as_date)
    }

    pub fn duration(&self, field: F) -> Option<Duration> {
        self.get(field).and_then(FieldValue::as_duration)
    }
}

impl<F: FieldKind> fmt::Debug for FieldContainer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldContainer")
            .field("owner", &self.owner)
            .field("populated", &self.populated().count())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
