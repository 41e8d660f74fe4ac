//! Scalar and deferred fields, read through typed accessors.
//!
//! A zero read counts as "not provided" and never overwrites the field.

use crate::deferred::{Capability, Deferred};
use crate::error::{BindError, BindResult};
use crate::field::{DeferredTarget, Target};
use crate::source::ConfigSource;

pub(super) fn bind_scalar(
    source: &ConfigSource<'_>,
    key: &str,
    required: bool,
    field: Target<'_>,
) -> BindResult<()> {
    match field {
        Target::Bool(value) => {
            if source.get_bool(key, required)? {
                *value = true;
            }
        }
        Target::Int(slot) => {
            let read = source.get_int(key, required)?;
            if read != 0 && !slot.set_i64(read) {
                return Err(BindError::InvalidValue {
                    key: source.qualify(key),
                    expected: slot.type_name(),
                });
            }
        }
        Target::Float(slot) => {
            let read = source.get_float(key, required)?;
            if !Capability::is_zero(&read) {
                slot.set_f64(read);
            }
        }
        Target::String(value) => {
            let read = source.get_string(key, required)?;
            if !read.is_empty() {
                *value = read;
            }
        }
        other => {
            return Err(BindError::unsupported(source.qualify(key), other.kind()));
        }
    }
    Ok(())
}

pub(super) fn bind_secret(
    source: &ConfigSource<'_>,
    key: &str,
    required: bool,
    slot: DeferredTarget<'_>,
) -> BindResult<()> {
    match slot {
        DeferredTarget::String(slot) => assign_pending(source, key, required, slot),
        DeferredTarget::Bool(slot) => assign_pending(source, key, required, slot),
        DeferredTarget::Int(slot) => assign_pending(source, key, required, slot),
        DeferredTarget::Float(slot) => assign_pending(source, key, required, slot),
    }
}

pub(super) fn bind_deferred(
    source: &ConfigSource<'_>,
    key: &str,
    required: bool,
    slot: DeferredTarget<'_>,
) -> BindResult<()> {
    match slot {
        DeferredTarget::String(slot) => assign_literal(source, key, required, slot),
        DeferredTarget::Bool(slot) => assign_literal(source, key, required, slot),
        DeferredTarget::Int(slot) => assign_literal(source, key, required, slot),
        DeferredTarget::Float(slot) => assign_literal(source, key, required, slot),
    }
}

fn assign_pending<C: Capability>(
    source: &ConfigSource<'_>,
    key: &str,
    required: bool,
    slot: &mut Option<Deferred<C>>,
) -> BindResult<()> {
    *slot = Some(source.get_deferred(key, required, true)?);
    Ok(())
}

fn assign_literal<C: Capability>(
    source: &ConfigSource<'_>,
    key: &str,
    required: bool,
    slot: &mut Option<Deferred<C>>,
) -> BindResult<()> {
    let read: C = source.get(key, required)?;
    if read.is_zero() {
        return Ok(());
    }
    if slot.as_ref().is_some_and(|current| !current.is_literal()) {
        tracing::trace!(key, "pending deferred value kept");
        return Ok(());
    }
    let was_secret = slot.as_ref().is_some_and(Deferred::is_secret);
    let literal = if was_secret || source.is_secure(key) {
        Deferred::secret_literal(read)
    } else {
        Deferred::literal(read)
    };
    *slot = Some(literal);
    Ok(())
}
