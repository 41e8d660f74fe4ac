//! Error types produced while loading and binding configuration.

mod constructors;
mod types;

pub use types::{BindError, BindResult};
