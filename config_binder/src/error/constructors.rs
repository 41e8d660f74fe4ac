//! Constructors for `BindError`.

use figment::Error as FigmentError;

use super::BindError;

impl BindError {
    /// Construct a missing-key error.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_binder::BindError;
    /// let e = BindError::missing("pg:database");
    /// assert_eq!(e.to_string(), "missing required configuration key 'pg:database'");
    /// ```
    #[must_use]
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingConfig { key: key.into() }
    }

    /// Construct a type mismatch error for `path`.
    #[must_use]
    pub fn type_mismatch(
        path: impl ToString,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            path: path.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Construct an unsupported field type error.
    #[must_use]
    pub fn unsupported(field: impl ToString, kind: impl ToString) -> Self {
        Self::UnsupportedFieldType {
            field: field.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Construct an error for a `secret` tag on a non-deferred field.
    #[must_use]
    pub fn secret_on_non_deferred(field: impl ToString, kind: impl ToString) -> Self {
        Self::SecretOnNonDeferredField {
            field: field.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Construct a gathering error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use config_binder::BindError;
    /// let e = BindError::gathering(figment::Error::from("boom"));
    /// assert!(matches!(e, BindError::Gathering(_)));
    /// ```
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }

    /// Returns the key or key path the error refers to, when it has one.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingConfig { key }
            | Self::InvalidValue { key, .. }
            | Self::InvalidJson { key, .. } => Some(key),
            Self::UnsupportedFieldType { field, .. }
            | Self::SecretOnNonDeferredField { field, .. } => Some(field),
            Self::TypeMismatch { path, .. } => Some(path),
            Self::Gathering(_) | Self::UnsupportedFormat { .. } => None,
        }
    }
}

impl From<FigmentError> for BindError {
    fn from(e: FigmentError) -> Self {
        Self::gathering(e)
    }
}
