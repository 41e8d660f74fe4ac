//! Namespaced, read-only view over a [`ConfigStore`].
//!
//! Every key passed to a [`ConfigSource`] accessor is relative to the
//! namespace; lookups use `namespace:key`. Plain accessors return the zero
//! value for an absent optional key, and [`BindError::MissingConfig`] for an
//! absent required one.

use serde_json::Value;

use crate::deferred::{Capability, Deferred, PendingHandle};
use crate::error::{BindError, BindResult};
use crate::field::Bind;
use crate::store::{ConfigStore, ConfigValue};

/// Raw JSON text fetched for a structural field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JsonBlob {
    /// Non-empty JSON text to parse.
    Text(String),
    /// The key was absent or held empty text; there is nothing to bind.
    Empty,
}

impl JsonBlob {
    /// Whether there is nothing to bind.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Read-only accessor scoped to one namespace of a store.
#[derive(Clone, Copy, Debug)]
pub struct ConfigSource<'a> {
    store: &'a ConfigStore,
    namespace: &'a str,
}

impl<'a> ConfigSource<'a> {
    /// Scopes `store` to `namespace`.
    #[must_use]
    pub const fn new(store: &'a ConfigStore, namespace: &'a str) -> Self {
        Self { store, namespace }
    }

    /// Namespace prefix applied to every key.
    #[must_use]
    pub const fn namespace(&self) -> &'a str {
        self.namespace
    }

    /// Fully-qualified form of `key`.
    #[must_use]
    pub fn qualify(&self, key: &str) -> String {
        ConfigStore::qualify(self.namespace, key)
    }

    /// Whether `key` holds a secure value.
    #[must_use]
    pub fn is_secure(&self, key: &str) -> bool {
        self.store
            .get(&self.qualify(key))
            .is_some_and(ConfigValue::is_secure)
    }

    fn lookup(&self, key: &str, required: bool) -> BindResult<(String, Option<&'a ConfigValue>)> {
        let full = self.qualify(key);
        match self.store.get(&full) {
            None if required => Err(BindError::missing(full)),
            found => Ok((full, found)),
        }
    }

    /// Fails when `required` and `key` is absent, without reading the value.
    pub(crate) fn ensure_present(&self, key: &str, required: bool) -> BindResult<()> {
        self.lookup(key, required).map(|_| ())
    }

    /// Reads `key` as a plain value of capability `C`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::MissingConfig`] when `required` and the key is
    /// absent, or [`BindError::InvalidValue`] when the text does not parse.
    pub fn get<C: Capability>(&self, key: &str, required: bool) -> BindResult<C> {
        match self.lookup(key, required)? {
            (_, None) => Ok(C::zero()),
            (full, Some(value)) => {
                if value.is_secure() {
                    tracing::warn!(key = %full, "secure configuration value read as plain text");
                }
                value.read(&full)
            }
        }
    }

    /// Reads `key` as a string.
    ///
    /// # Errors
    ///
    /// See [`Self::get`].
    pub fn get_string(&self, key: &str, required: bool) -> BindResult<String> {
        self.get(key, required)
    }

    /// Reads `key` as a boolean.
    ///
    /// # Errors
    ///
    /// See [`Self::get`].
    pub fn get_bool(&self, key: &str, required: bool) -> BindResult<bool> {
        self.get(key, required)
    }

    /// Reads `key` as an integer.
    ///
    /// # Errors
    ///
    /// See [`Self::get`].
    pub fn get_int(&self, key: &str, required: bool) -> BindResult<i64> {
        self.get(key, required)
    }

    /// Reads `key` as a float.
    ///
    /// # Errors
    ///
    /// See [`Self::get`].
    pub fn get_float(&self, key: &str, required: bool) -> BindResult<f64> {
        self.get(key, required)
    }

    /// Issues a pending handle for `key`.
    ///
    /// The handle is secret when `secret` is set or the stored value is
    /// secure. An absent optional key still yields a handle; it resolves to
    /// the zero value.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::MissingConfig`] when `required` and the key is
    /// absent.
    pub fn get_deferred<C: Capability>(
        &self,
        key: &str,
        required: bool,
        secret: bool,
    ) -> BindResult<Deferred<C>> {
        let (full, value) = self.lookup(key, required)?;
        let is_secret = secret || value.is_some_and(ConfigValue::is_secure);
        Ok(Deferred::pending(
            PendingHandle::issue(&full, C::KIND),
            is_secret,
        ))
    }

    /// [`Self::get_deferred`] for strings.
    ///
    /// # Errors
    ///
    /// See [`Self::get_deferred`].
    pub fn get_deferred_string(
        &self,
        key: &str,
        required: bool,
        secret: bool,
    ) -> BindResult<Deferred<String>> {
        self.get_deferred(key, required, secret)
    }

    /// [`Self::get_deferred`] for booleans.
    ///
    /// # Errors
    ///
    /// See [`Self::get_deferred`].
    pub fn get_deferred_bool(
        &self,
        key: &str,
        required: bool,
        secret: bool,
    ) -> BindResult<Deferred<bool>> {
        self.get_deferred(key, required, secret)
    }

    /// [`Self::get_deferred`] for integers.
    ///
    /// # Errors
    ///
    /// See [`Self::get_deferred`].
    pub fn get_deferred_int(
        &self,
        key: &str,
        required: bool,
        secret: bool,
    ) -> BindResult<Deferred<i64>> {
        self.get_deferred(key, required, secret)
    }

    /// [`Self::get_deferred`] for floats.
    ///
    /// # Errors
    ///
    /// See [`Self::get_deferred`].
    pub fn get_deferred_float(
        &self,
        key: &str,
        required: bool,
        secret: bool,
    ) -> BindResult<Deferred<f64>> {
        self.get_deferred(key, required, secret)
    }

    /// Fetches the JSON text stored under `key` for a structural field.
    ///
    /// An absent key or empty text is [`JsonBlob::Empty`], not an error,
    /// unless the field is `required` and `existing_is_zero`: a required
    /// field that already holds data is satisfied without the key.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::MissingConfig`] for a required, still-zero field
    /// with no usable text.
    pub fn get_json_blob(
        &self,
        key: &str,
        required: bool,
        existing_is_zero: bool,
    ) -> BindResult<JsonBlob> {
        let full = self.qualify(key);
        let text = self.store.get(&full).map(|value| match value {
            ConfigValue::Structured(Value::Null) => String::new(),
            ConfigValue::Secure(_) => {
                tracing::warn!(key = %full, "secure configuration value read as plain text");
                value.as_text().into_owned()
            }
            other => other.as_text().into_owned(),
        });
        match text {
            Some(text) if !text.is_empty() => Ok(JsonBlob::Text(text)),
            _ if required && existing_is_zero => Err(BindError::missing(full)),
            _ => Ok(JsonBlob::Empty),
        }
    }

    /// Populates the tagged fields of `target` from this namespace.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; fields bound before it stay
    /// bound.
    pub fn bind<T: Bind + ?Sized>(&self, target: &mut T) -> BindResult<()> {
        crate::bind::bind_source(self, target)
    }
}
