//! Structural field kinds: maps, pointers and sequences, plus deferred inputs.

use std::any::type_name;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Field, Target};
use crate::deferred::{Capability, Deferred};
use crate::error::{BindError, BindResult};

/// A string-keyed map field.
pub trait MapSlot {
    /// Whether the map has no entries.
    fn is_empty(&self) -> bool;

    /// Name of the value type, for mismatch reports.
    fn value_type(&self) -> &'static str;

    /// Decodes `value` and stores it under `key`, replacing any existing
    /// entry. Returns `false`, leaving the map unchanged, when `value` does
    /// not decode as the value type.
    fn insert_json(&mut self, key: String, value: Value) -> bool;
}

/// An optional boxed field, the binder's notion of a pointer.
pub trait PointerSlot {
    /// Whether nothing is allocated yet.
    fn is_null(&self) -> bool;

    /// Allocates a default pointee when empty and borrows it.
    fn pointee(&mut self) -> Target<'_>;
}

/// A vector or fixed-size array field.
pub trait SequenceSlot {
    /// Current number of elements.
    fn len(&self) -> usize;

    /// Index at which incoming elements are written.
    ///
    /// Vectors append past their current length; arrays overwrite from the
    /// start.
    fn write_offset(&self) -> usize;

    /// Appends a default element, returning `false` when the sequence has a
    /// fixed length.
    fn grow(&mut self) -> bool;

    /// Borrows the element at `index`.
    fn element(&mut self, index: usize) -> Option<Target<'_>>;
}

// The serde error is discarded: its message can quote the rejected value.
fn decode<V: DeserializeOwned>(value: Value) -> Option<V> {
    serde_json::from_value(value).ok()
}

fn map_display<M: Serialize>(map: &M) -> BindResult<Value> {
    serde_json::to_value(map).map_err(|source| BindError::InvalidJson {
        key: String::from("<display>"),
        source,
    })
}

impl<V, S> MapSlot for HashMap<String, V, S>
where
    V: DeserializeOwned,
    S: BuildHasher,
{
    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }

    fn value_type(&self) -> &'static str {
        type_name::<V>()
    }

    fn insert_json(&mut self, key: String, value: Value) -> bool {
        let Some(decoded) = decode::<V>(value) else {
            return false;
        };
        self.insert(key, decoded);
        true
    }
}

impl<V, S> Field for HashMap<String, V, S>
where
    V: Serialize + DeserializeOwned,
    S: BuildHasher,
{
    fn target(&mut self) -> Target<'_> {
        Target::Map(self)
    }

    fn display_value(&self) -> BindResult<Value> {
        map_display(self)
    }
}

impl<V: DeserializeOwned> MapSlot for BTreeMap<String, V> {
    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }

    fn value_type(&self) -> &'static str {
        type_name::<V>()
    }

    fn insert_json(&mut self, key: String, value: Value) -> bool {
        let Some(decoded) = decode::<V>(value) else {
            return false;
        };
        self.insert(key, decoded);
        true
    }
}

impl<V> Field for BTreeMap<String, V>
where
    V: Serialize + DeserializeOwned,
{
    fn target(&mut self) -> Target<'_> {
        Target::Map(self)
    }

    fn display_value(&self) -> BindResult<Value> {
        map_display(self)
    }
}

impl<T: Field + Default> PointerSlot for Option<Box<T>> {
    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn pointee(&mut self) -> Target<'_> {
        self.get_or_insert_with(Box::default).target()
    }
}

impl<T: Field + Default> Field for Option<Box<T>> {
    fn target(&mut self) -> Target<'_> {
        Target::Pointer(self)
    }

    fn display_value(&self) -> BindResult<Value> {
        self.as_deref()
            .map_or(Ok(Value::Null), Field::display_value)
    }
}

impl<T: Field + Default> SequenceSlot for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn write_offset(&self) -> usize {
        Vec::len(self)
    }

    fn grow(&mut self) -> bool {
        self.push(T::default());
        true
    }

    fn element(&mut self, index: usize) -> Option<Target<'_>> {
        self.get_mut(index).map(Field::target)
    }
}

impl<T: Field + Default> Field for Vec<T> {
    fn target(&mut self) -> Target<'_> {
        Target::Sequence(self)
    }

    fn display_value(&self) -> BindResult<Value> {
        self.iter()
            .map(Field::display_value)
            .collect::<BindResult<Vec<_>>>()
            .map(Value::Array)
    }
}

impl<T: Field, const N: usize> SequenceSlot for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn write_offset(&self) -> usize {
        0
    }

    fn grow(&mut self) -> bool {
        false
    }

    fn element(&mut self, index: usize) -> Option<Target<'_>> {
        self.get_mut(index).map(Field::target)
    }
}

impl<T: Field, const N: usize> Field for [T; N] {
    fn target(&mut self) -> Target<'_> {
        Target::Sequence(self)
    }

    fn display_value(&self) -> BindResult<Value> {
        self.iter()
            .map(Field::display_value)
            .collect::<BindResult<Vec<_>>>()
            .map(Value::Array)
    }
}

impl<C: Capability> Field for Option<Deferred<C>> {
    fn target(&mut self) -> Target<'_> {
        Target::Deferred(C::target(self))
    }

    fn display_value(&self) -> BindResult<Value> {
        Ok(self
            .as_ref()
            .map_or(Value::Null, |value| Value::from(value.kind().placeholder())))
    }
}
