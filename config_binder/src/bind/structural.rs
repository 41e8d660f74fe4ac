//! Merges decoded JSON into structural fields.
//!
//! Objects bind into structs field by field and merge into maps. Arrays
//! append to vectors past their current length and overwrite fixed arrays
//! from index zero. `null` is a no-op everywhere, and a deferred field that
//! holds a pending handle is never replaced.
//!
//! `secret` marks input that came from a secure store entry. Deferred fields
//! bound from such input become secret literals.

use serde_json::{Map, Number, Value};

use super::KeyPath;
use crate::deferred::{Capability, Deferred, truncate_to_i64};
use crate::error::{BindError, BindResult};
use crate::field::{Bind, DeferredTarget, FloatSlot, IntSlot, MapSlot, SequenceSlot, Target};

pub(super) fn parse(path: &KeyPath, text: &str) -> BindResult<Value> {
    serde_json::from_str(text).map_err(|source| BindError::InvalidJson {
        key: path.to_string(),
        source,
    })
}

pub(super) fn bind_value(
    path: &KeyPath,
    value: Value,
    target: Target<'_>,
    secret: bool,
) -> BindResult<()> {
    if value.is_null() {
        return Ok(());
    }
    match target {
        Target::Bool(field) => match value {
            Value::Bool(flag) => {
                *field = flag;
                Ok(())
            }
            other => Err(mismatch(path, "bool", &other)),
        },
        Target::Int(slot) => bind_int(path, &value, slot),
        Target::Float(slot) => bind_float(path, &value, slot),
        Target::String(field) => match value {
            Value::String(text) => {
                *field = text;
                Ok(())
            }
            other => Err(mismatch(path, "string", &other)),
        },
        Target::Map(slot) => match value {
            Value::Object(entries) => bind_map(path, entries, slot),
            other => Err(mismatch(path, "object", &other)),
        },
        Target::Struct(nested) => match value {
            Value::Object(entries) => bind_object(path, entries, nested, secret),
            other => Err(mismatch(path, "object", &other)),
        },
        Target::Pointer(slot) => bind_value(path, value, slot.pointee(), secret),
        Target::Sequence(slot) => match value {
            Value::Array(items) => bind_array(path, items, slot, secret),
            other => Err(mismatch(path, "array", &other)),
        },
        Target::Deferred(slot) => bind_deferred(path, &value, slot, secret),
        Target::Unsupported(name) => Err(BindError::unsupported(path, name)),
    }
}

fn bind_object(
    path: &KeyPath,
    mut entries: Map<String, Value>,
    nested: &mut dyn Bind,
    secret: bool,
) -> BindResult<()> {
    for slot in nested.fields() {
        let (descriptor, target) = slot.into_parts();
        let Some(key) = descriptor.json_key() else {
            continue;
        };
        if let Some(value) = entries.remove(key) {
            bind_value(&path.key(key), value, target, secret)?;
        }
    }
    Ok(())
}

fn bind_array(
    path: &KeyPath,
    items: Vec<Value>,
    slot: &mut dyn SequenceSlot,
    secret: bool,
) -> BindResult<()> {
    let offset = slot.write_offset();
    let incoming = items.len();
    for (position, item) in items.into_iter().enumerate() {
        let index = offset + position;
        if index >= slot.len() && !slot.grow() {
            return Err(BindError::type_mismatch(
                path,
                format!("at most {} elements", slot.len()),
                format!("array of {incoming}"),
            ));
        }
        let element_path = path.index(index);
        let Some(element) = slot.element(index) else {
            return Err(BindError::type_mismatch(&element_path, "element", "nothing"));
        };
        bind_value(&element_path, item, element, secret)?;
    }
    Ok(())
}

// Entries before a rejected one stay merged, like struct fields do.
fn bind_map(
    path: &KeyPath,
    entries: Map<String, Value>,
    slot: &mut dyn MapSlot,
) -> BindResult<()> {
    for (key, value) in entries {
        if value.is_null() {
            continue;
        }
        let found = shape(&value);
        let entry_path = path.key(&key);
        if !slot.insert_json(key, value) {
            return Err(BindError::type_mismatch(&entry_path, slot.value_type(), found));
        }
    }
    Ok(())
}

fn bind_int(path: &KeyPath, value: &Value, slot: &mut dyn IntSlot) -> BindResult<()> {
    let Value::Number(number) = value else {
        return Err(mismatch(path, slot.type_name(), value));
    };
    if store_number(number, slot) {
        Ok(())
    } else {
        Err(BindError::type_mismatch(
            path,
            slot.type_name(),
            "out-of-range number",
        ))
    }
}

fn store_number(number: &Number, slot: &mut dyn IntSlot) -> bool {
    if let Some(signed) = number.as_i64() {
        return slot.set_i64(signed);
    }
    if let Some(unsigned) = number.as_u64() {
        return slot.set_u64(unsigned);
    }
    number
        .as_f64()
        .and_then(truncate_to_i64)
        .is_some_and(|truncated| slot.set_i64(truncated))
}

fn bind_float(path: &KeyPath, value: &Value, slot: &mut dyn FloatSlot) -> BindResult<()> {
    let Some(number) = value.as_f64() else {
        return Err(mismatch(path, slot.type_name(), value));
    };
    slot.set_f64(number);
    Ok(())
}

fn bind_deferred(
    path: &KeyPath,
    value: &Value,
    slot: DeferredTarget<'_>,
    secret: bool,
) -> BindResult<()> {
    match slot {
        DeferredTarget::String(slot) => assign_literal(path, value, slot, secret),
        DeferredTarget::Bool(slot) => assign_literal(path, value, slot, secret),
        DeferredTarget::Int(slot) => assign_literal(path, value, slot, secret),
        DeferredTarget::Float(slot) => assign_literal(path, value, slot, secret),
    }
}

fn assign_literal<C: Capability>(
    path: &KeyPath,
    value: &Value,
    slot: &mut Option<Deferred<C>>,
    secret: bool,
) -> BindResult<()> {
    if slot.as_ref().is_some_and(|current| !current.is_literal()) {
        tracing::trace!(key = %path, "pending deferred value kept");
        return Ok(());
    }
    let Some(literal) = C::from_json(value) else {
        return Err(mismatch(path, C::KIND.type_name(), value));
    };
    let was_secret = slot.as_ref().is_some_and(Deferred::is_secret);
    *slot = Some(if secret || was_secret {
        Deferred::secret_literal(literal)
    } else {
        Deferred::literal(literal)
    });
    Ok(())
}

fn mismatch(path: &KeyPath, expected: &str, found: &Value) -> BindError {
    BindError::type_mismatch(path, expected, shape(found))
}

const fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
