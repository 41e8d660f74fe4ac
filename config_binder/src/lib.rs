//! Core crate for the `config_binder` configuration binder.
//!
//! The binder populates typed object graphs from a namespaced key/value
//! [`ConfigStore`] and from JSON blobs embedded in that store. Struct fields
//! opt in through `#[bind(...)]` attributes understood by the
//! [`Bind`](macro@Bind) derive, which lives in the companion
//! `config_binder_macros` crate.
//!
//! Values that are only known later, such as secrets handed to an external
//! orchestration engine, are modelled as [`Deferred`] values. The binder
//! constructs and propagates them but never resolves them.
//!
//! ```rust
//! use config_binder::{Bind, ConfigStore, StringInput};
//!
//! #[derive(Debug, Default, Bind)]
//! struct Provider {
//!     #[bind(config = "host", required)]
//!     host: String,
//!     #[bind(secret = "password")]
//!     password: StringInput,
//!     #[bind(data = "port")]
//!     port: u16,
//! }
//!
//! let store = ConfigStore::new()
//!     .with_value("db:host", "db.internal")
//!     .with_secret("db:password", "hunter2")
//!     .with_value("db:port", "5432");
//!
//! let mut provider = Provider::default();
//! store.source("db").bind(&mut provider)?;
//! assert_eq!(provider.host, "db.internal");
//! assert_eq!(provider.port, 5432);
//!
//! let shown = config_binder::serialize_for_display(&provider)?;
//! assert!(!shown.contains("hunter2"));
//! # Ok::<_, config_binder::BindError>(())
//! ```

extern crate self as config_binder;

pub use config_binder_macros::Bind;

mod bind;
mod deferred;
mod display;
mod error;
pub mod field;
mod source;
mod store;

pub use bind::{KeyPath, bind_from_source, bind_json, bind_json_value};
pub use deferred::{
    BoolInput, Capability, CapabilityKind, Deferred, DeferredState, FloatInput, IntInput,
    PendingHandle, StringInput,
};
pub use display::{display_value, serialize_for_display};
pub use error::{BindError, BindResult};
pub use field::{Bind, Field, FieldDescriptor, FieldKind, FieldSlot, Target};
pub use source::{ConfigSource, JsonBlob};
pub use store::{ConfigStore, ConfigValue};

/// Paths used by `#[derive(Bind)]` expansions. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use serde_json::{Map, Value};
}
