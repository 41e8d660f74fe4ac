//! Values held by a configuration store.

use std::borrow::Cow;

use serde_json::Value;

use crate::deferred::Capability;
use crate::error::{BindError, BindResult};

/// A stored configuration value.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// Plain text.
    Text(String),
    /// A structured value, read back as JSON text by blob accessors.
    Structured(Value),
    /// Text that must only reach typed fields as a secret.
    Secure(String),
}

impl ConfigValue {
    /// Classifies a JSON value the way stack files encode entries.
    ///
    /// Strings become [`Self::Text`], objects of the exact shape
    /// `{"secure": "<text>"}` become [`Self::Secure`], and everything else is
    /// kept as [`Self::Structured`].
    ///
    /// ```rust
    /// use config_binder::ConfigValue;
    /// use serde_json::json;
    ///
    /// assert_eq!(ConfigValue::from_json(json!("x")), ConfigValue::Text("x".into()));
    /// assert_eq!(
    ///     ConfigValue::from_json(json!({"secure": "s3cret"})),
    ///     ConfigValue::Secure("s3cret".into())
    /// );
    /// assert!(matches!(ConfigValue::from_json(json!(5)), ConfigValue::Structured(_)));
    /// ```
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Object(mut map)
                if map.len() == 1 && map.get("secure").is_some_and(Value::is_string) =>
            {
                match map.remove("secure") {
                    Some(Value::String(text)) => Self::Secure(text),
                    _ => Self::Structured(Value::Object(map)),
                }
            }
            other => Self::Structured(other),
        }
    }

    /// Whether the value was stored as a secret.
    #[must_use]
    pub const fn is_secure(&self) -> bool {
        matches!(self, Self::Secure(_))
    }

    /// Textual form: the text itself, or JSON for structured values.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) | Self::Secure(text) => Cow::Borrowed(text),
            Self::Structured(Value::String(text)) => Cow::Borrowed(text),
            Self::Structured(value) => Cow::Owned(value.to_string()),
        }
    }

    /// Reads the value as capability `C`.
    ///
    /// Empty text reads as the zero value, matching an absent key.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::InvalidValue`] naming `key` when the value cannot
    /// be read as `C`. The value itself is never included.
    pub fn read<C: Capability>(&self, key: &str) -> BindResult<C> {
        let parsed = match self {
            Self::Text(text) | Self::Secure(text) if text.is_empty() => Some(C::zero()),
            Self::Text(text) | Self::Secure(text) => C::parse_text(text),
            Self::Structured(Value::String(text)) => C::parse_text(text),
            Self::Structured(value) => {
                C::from_json(value).or_else(|| C::parse_text(&value.to_string()))
            }
        };
        parsed.ok_or_else(|| BindError::InvalidValue {
            key: key.to_owned(),
            expected: C::KIND.type_name(),
        })
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Value> for ConfigValue {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}
