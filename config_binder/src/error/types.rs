//! Primary error enum for binding flows.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

/// Result alias used across the binder.
pub type BindResult<T> = Result<T, BindError>;

/// Errors that can occur while loading a store or binding a target.
///
/// The first error aborts the bind call. Fields mutated before the failure
/// stay mutated; there is no rollback. Messages never include the value of a
/// configuration entry, so secrets cannot leak through error text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// A required key is absent from the configuration source.
    #[error("missing required configuration key '{key}'")]
    MissingConfig {
        /// Fully-qualified key that was looked up.
        key: String,
    },

    /// A tagged field has a type the binder cannot populate.
    #[error("unsupported field type for '{field}': {kind}")]
    UnsupportedFieldType {
        /// Key path of the offending field.
        field: String,
        /// Description of the unsupported type.
        kind: String,
    },

    /// A `secret` tag was applied to a field that is not a deferred input.
    #[error("field '{field}' is marked as secret but its type ({kind}) is not a deferred input")]
    SecretOnNonDeferredField {
        /// Key path of the offending field.
        field: String,
        /// Kind of the field that carried the tag.
        kind: String,
    },

    /// The shape of a JSON value does not match the target field.
    #[error("type mismatch at '{path}': expected {expected}, found {actual}")]
    TypeMismatch {
        /// Key path where the mismatch was detected.
        path: String,
        /// Shape the target expected.
        expected: String,
        /// Shape found in the input.
        actual: String,
    },

    /// A stored text value could not be parsed as the requested type.
    #[error("invalid value for '{key}': expected {expected}")]
    InvalidValue {
        /// Fully-qualified key holding the value.
        key: String,
        /// Name of the type the accessor expected.
        expected: &'static str,
    },

    /// A JSON blob could not be parsed.
    #[error("failed to parse JSON configuration for '{key}': {source}")]
    InvalidJson {
        /// Key path of the blob.
        key: String,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// Error while gathering configuration from figment providers.
    #[error("Failed to gather configuration: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// A configuration file has an extension no provider understands.
    #[error("unsupported configuration file format for '{path}'")]
    UnsupportedFormat {
        /// Path of the rejected file.
        path: Utf8PathBuf,
    },
}
