use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Typed index into an [`Arena`]. Keys are never reused once their slot is freed.
pub trait ArenaKey: Copy + Eq + Hash + fmt::Debug {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

macro_rules! arena_key {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(u32);

            impl ArenaKey for $name {
                fn from_index(index: usize) -> Self {
                    Self(index as u32)
                }

                fn index(self) -> usize {
                    self.0 as usize
                }
            }
        )*
    };
}

arena_key!(
    /// Handle to a task owned by a `Project`.
    TaskKey,
    /// Handle to a resource owned by a `Project`.
    ResourceKey,
    /// Handle to a resource assignment owned by a `Project`.
    AssignmentKey,
    /// Handle to a calendar owned by a `Project`.
    CalendarKey,
);

/// Append-only slot store. Removing an entry leaves a hole so outstanding
/// keys to other entries stay valid and a stale key resolves to `None`.
#[derive(Debug)]
pub struct Arena<K, T> {
    slots: Vec<Option<T>>,
    len: usize,
    _key: PhantomData<fn() -> K>,
}

impl<K: ArenaKey, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ArenaKey, T> Arena<K, T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
            _key: PhantomData,
        }
    }

    pub fn insert_with(&mut self, build: impl FnOnce(K) -> T) -> K {
        let key = K::from_index(self.slots.len());
        self.slots.push(Some(build(key)));
        self.len += 1;
        key
    }

    pub fn get(&self, key: K) -> Option<&T> {
        self.slots.get(key.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.slots.get_mut(key.index()).and_then(Option::as_mut)
    }

    pub fn remove(&mut self, key: K) -> Option<T> {
        let removed = self.slots.get_mut(key.index()).and_then(Option::take);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|value| (K::from_index(index), value)))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_keys_are_not_reused() {
        let mut arena: Arena<TaskKey, &str> = Arena::new();
        let a = arena.insert_with(|_| "a");
        let b = arena.insert_with(|_| "b");
        assert_eq!(arena.remove(a), Some("a"));
        let c = arena.insert_with(|_| "c");
        assert_ne!(a, c);
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn insert_with_hands_the_key_to_the_builder() {
        let mut arena: Arena<CalendarKey, CalendarKey> = Arena::new();
        let key = arena.insert_with(|key| key);
        assert_eq!(arena.get(key), Some(&key));
        assert_eq!(arena.iter().count(), 1);
    }
}
