//! Walks a target's tagged fields and fills them from a configuration source.
//!
//! Each field takes one of three paths, chosen by its [`Target`] kind:
//! scalars and deferred inputs are read through typed accessors (see
//! `scalar`), while maps, structs, pointers and sequences are filled from a
//! JSON blob (see `structural`). The first error aborts the walk; fields
//! already written keep their new values.

mod path;
mod scalar;
mod structural;

use serde_json::Value;

pub use path::KeyPath;

use crate::error::{BindError, BindResult};
use crate::field::{Bind, Field, FieldDescriptor, SourceKey, Target};
use crate::source::{ConfigSource, JsonBlob};
use crate::store::ConfigStore;

/// Binds `target` from `namespace` of `store`.
///
/// Equivalent to `store.source(namespace).bind(target)`.
///
/// # Errors
///
/// Returns the first [`BindError`] raised by any field.
pub fn bind_from_source<T: Bind + ?Sized>(
    store: &ConfigStore,
    namespace: &str,
    target: &mut T,
) -> BindResult<()> {
    store.source(namespace).bind(target)
}

/// Merges JSON text into `target`.
///
/// Blank text is a no-op. Objects bind into structs and maps, arrays append
/// to vectors (or overwrite arrays from the start), and `null` leaves the
/// target untouched.
///
/// ```rust
/// use config_binder::{Bind, bind_json};
///
/// #[derive(Debug, Default, Bind)]
/// struct User {
///     #[bind(data = "username")]
///     username: String,
/// }
///
/// let mut users: Vec<User> = Vec::new();
/// bind_json(r#"[{"username": "a"}]"#, &mut users)?;
/// bind_json(r#"[{"username": "b"}]"#, &mut users)?;
/// let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
/// assert_eq!(names, ["a", "b"]);
/// # Ok::<_, config_binder::BindError>(())
/// ```
///
/// # Errors
///
/// Returns [`BindError::InvalidJson`] when the text does not parse and
/// [`BindError::TypeMismatch`] when its shape does not fit `target`.
pub fn bind_json<F: Field + ?Sized>(text: &str, target: &mut F) -> BindResult<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let root = KeyPath::root();
    let value = structural::parse(&root, text)?;
    structural::bind_value(&root, value, target.target(), false)
}

/// Merges an already-decoded JSON value into `target`.
///
/// # Errors
///
/// See [`bind_json`].
pub fn bind_json_value<F: Field + ?Sized>(value: Value, target: &mut F) -> BindResult<()> {
    structural::bind_value(&KeyPath::root(), value, target.target(), false)
}

pub(crate) fn bind_source<T: Bind + ?Sized>(
    source: &ConfigSource<'_>,
    target: &mut T,
) -> BindResult<()> {
    let root = KeyPath::namespaced(source.namespace());
    let type_name = target.type_name();
    tracing::debug!(target_type = type_name, namespace = source.namespace(), "binding");
    for slot in target.fields() {
        let (descriptor, field) = slot.into_parts();
        let Some(key) = descriptor.source_key() else {
            tracing::trace!(field = descriptor.ident(), "no source key; skipped");
            continue;
        };
        bind_field(source, &descriptor, key, &root.key(key.name), field)?;
    }
    Ok(())
}

fn bind_field(
    source: &ConfigSource<'_>,
    descriptor: &FieldDescriptor,
    key: SourceKey,
    path: &KeyPath,
    mut field: Target<'_>,
) -> BindResult<()> {
    let kind = field.kind();
    let is_zero = field.is_zero();
    let required = descriptor.is_declared_required() && is_zero;
    tracing::debug!(key = %path, %kind, required, "binding field");

    match field {
        Target::Unsupported(name) => Err(BindError::unsupported(path, name)),
        Target::Deferred(slot) if key.secret => scalar::bind_secret(source, key.name, required, slot),
        Target::Deferred(slot) => scalar::bind_deferred(source, key.name, required, slot),
        _ if key.secret => {
            source.ensure_present(key.name, required)?;
            Err(BindError::secret_on_non_deferred(path, kind))
        }
        structural_field if kind.is_structural() => {
            let blob =
                source.get_json_blob(key.name, descriptor.is_declared_required(), is_zero)?;
            match blob {
                JsonBlob::Empty => {
                    tracing::trace!(key = %path, "no JSON configuration supplied");
                    Ok(())
                }
                JsonBlob::Text(text) => {
                    let value = structural::parse(path, &text)?;
                    let secret = source.is_secure(key.name);
                    structural::bind_value(path, value, structural_field, secret)
                }
            }
        }
        scalar_field => scalar::bind_scalar(source, key.name, required, scalar_field),
    }
}

#[cfg(test)]
mod tests;
