//! Building stores from figment providers.
//!
//! Documents are flattened into `namespace:key` entries:
//! - a top-level key that already contains `:` is kept verbatim;
//! - a top-level `config` table (the stack-file layout) is unwrapped first;
//! - any other top-level table is a namespace, each entry becoming
//!   `table:entry`;
//! - remaining top-level values are stored under their bare key.

use std::collections::BTreeMap;

use camino::Utf8Path;
use figment::Figment;
use figment::providers::Env;
#[cfg(any(feature = "toml", feature = "json"))]
use figment::providers::Format;
#[cfg(feature = "json")]
use figment::providers::Json;
#[cfg(feature = "toml")]
use figment::providers::Toml;
use serde_json::{Map, Value};

use super::{ConfigStore, ConfigValue};
use crate::error::{BindError, BindResult};

const STACK_CONFIG_KEY: &str = "config";

impl ConfigStore {
    /// Extracts and flattens the document produced by `figment`.
    ///
    /// ```rust
    /// use config_binder::ConfigStore;
    /// use figment::{Figment, providers::{Format, Toml}};
    ///
    /// let figment = Figment::from(Toml::string(r#"
    ///     [pg]
    ///     database = "orders"
    ///     provider = { host = "db", port = 5432 }
    /// "#));
    /// let store = ConfigStore::from_figment(&figment)?;
    /// let source = store.source("pg");
    /// assert_eq!(source.get_string("database", true)?, "orders");
    /// # Ok::<_, config_binder::BindError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Gathering`] when the providers fail or the
    /// document is not a table.
    pub fn from_figment(figment: &Figment) -> BindResult<Self> {
        let document: BTreeMap<String, Value> = figment.extract()?;
        let mut store = Self::new();
        for (key, value) in document {
            store.absorb(key, value);
        }
        tracing::debug!(keys = store.len(), "loaded configuration store");
        Ok(store)
    }

    /// Loads a TOML or JSON file, chosen by extension.
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::UnsupportedFormat`] for other extensions (or when
    /// the matching cargo feature is disabled) and [`BindError::Gathering`]
    /// when parsing fails.
    pub fn load_file(path: impl AsRef<Utf8Path>) -> BindResult<Self> {
        let path = path.as_ref();
        let extension = path.extension().map(str::to_ascii_lowercase);
        let figment = match extension.as_deref() {
            #[cfg(feature = "toml")]
            Some("toml") => Figment::from(Toml::file(path)),
            #[cfg(feature = "json")]
            Some("json") => Figment::from(Json::file(path)),
            _ => {
                return Err(BindError::UnsupportedFormat {
                    path: path.to_owned(),
                });
            }
        };
        Self::from_figment(&figment)
    }

    /// Reads environment variables starting with `prefix`.
    ///
    /// `__` separates a namespace from its key, so `APP_PG__DATABASE`
    /// becomes `pg:database` for prefix `APP_`. Keys are lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Gathering`] when figment rejects the environment.
    pub fn from_env(prefix: &str) -> BindResult<Self> {
        Self::from_figment(&Figment::from(Env::prefixed(prefix).split("__")))
    }

    fn absorb(&mut self, key: String, value: Value) {
        match value {
            Value::Object(table) if key == STACK_CONFIG_KEY => {
                for (nested_key, nested) in table {
                    self.absorb(nested_key, nested);
                }
            }
            Value::Object(table) if !key.contains(':') && !is_secure_shape(&table) => {
                for (entry, nested) in table {
                    self.insert(Self::qualify(&key, &entry), ConfigValue::from_json(nested));
                }
            }
            other => {
                self.insert(key, ConfigValue::from_json(other));
            }
        }
    }
}

fn is_secure_shape(table: &Map<String, Value>) -> bool {
    table.len() == 1 && table.get("secure").is_some_and(Value::is_string)
}
