//! Redacted display form of bound structs.
//!
//! Deferred fields are replaced by their capability placeholder at every
//! depth, so neither literals nor handles reach the output.

use serde_json::Value;

use crate::error::{BindError, BindResult};
use crate::field::Bind;

/// Builds the redacted JSON object for `target`.
///
/// # Errors
///
/// Returns [`BindError::InvalidJson`] when a map field cannot be represented
/// as JSON.
pub fn display_value<T: Bind + ?Sized>(target: &T) -> BindResult<Value> {
    target.display_map().map(Value::Object)
}

/// Serializes the redacted display form of `target` to JSON text.
///
/// ```rust
/// use config_binder::{Bind, Deferred, StringInput, serialize_for_display};
///
/// #[derive(Default, Bind)]
/// struct Login {
///     #[bind(data = "username")]
///     username: String,
///     #[bind(secret = "password")]
///     password: StringInput,
/// }
///
/// let login = Login {
///     username: "app".into(),
///     password: Some(Deferred::secret_literal("hunter2".to_owned())),
/// };
/// assert_eq!(
///     serialize_for_display(&login)?,
///     r#"{"password":"[StringOutput]","username":"app"}"#
/// );
/// # Ok::<_, config_binder::BindError>(())
/// ```
///
/// # Errors
///
/// See [`display_value`].
pub fn serialize_for_display<T: Bind + ?Sized>(target: &T) -> BindResult<String> {
    let value = display_value(target)?;
    serde_json::to_string(&value).map_err(|source| BindError::InvalidJson {
        key: String::from("<display>"),
        source,
    })
}
