//! Flat store of fully-qualified configuration keys.
//!
//! Keys take the form `namespace:key`. A store is an ordinary value owned by
//! the caller; binding borrows it through [`ConfigStore::source`].

mod loader;
mod value;

use std::collections::BTreeMap;

pub use value::ConfigValue;

use crate::deferred::{Capability, PendingHandle};
use crate::error::BindResult;
use crate::source::ConfigSource;

/// Mapping from fully-qualified key to stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigStore {
    entries: BTreeMap<String, ConfigValue>,
}

impl ConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins a namespace and key the way stored keys are written.
    ///
    /// ```rust
    /// use config_binder::ConfigStore;
    /// assert_eq!(ConfigStore::qualify("pg", "database"), "pg:database");
    /// assert_eq!(ConfigStore::qualify("", "database"), "database");
    /// ```
    #[must_use]
    pub fn qualify(namespace: &str, key: &str) -> String {
        if namespace.is_empty() {
            key.to_owned()
        } else {
            format!("{namespace}:{key}")
        }
    }

    /// Inserts a value under a fully-qualified key, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) -> Option<ConfigValue> {
        self.entries.insert(key.into(), value)
    }

    /// Adds a plain text value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, ConfigValue::Text(value.into()));
        self
    }

    /// Adds a secret value.
    #[must_use]
    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, ConfigValue::Secure(value.into()));
        self
    }

    /// Adds a structured (JSON) value.
    #[must_use]
    pub fn with_structured(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.insert(key, ConfigValue::Structured(value));
        self
    }

    /// Looks up a fully-qualified key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over stored keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Adds every entry of `other`, overwriting keys present in both.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Scopes the store to `namespace` for binding.
    #[must_use]
    pub fn source<'a>(&'a self, namespace: &'a str) -> ConfigSource<'a> {
        ConfigSource::new(self, namespace)
    }

    /// Resolves a pending handle against the stored value.
    ///
    /// This is the hook an external engine uses once it decides a deferred
    /// value may be materialised. The binder never calls it. An absent key
    /// resolves to the capability's zero value.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::InvalidValue`] when the stored value cannot be
    /// read as `C`.
    pub fn resolve<C: Capability>(&self, handle: &PendingHandle) -> BindResult<C> {
        let key = handle.key();
        self.get(key)
            .map_or_else(|| Ok(C::zero()), |value| value.read::<C>(key))
    }
}
