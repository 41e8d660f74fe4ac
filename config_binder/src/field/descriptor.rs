//! Static metadata describing how a field maps to configuration keys.

/// Key a field is read from in the configuration source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceKey {
    /// Key relative to the source namespace.
    pub name: &'static str,
    /// Whether the key came from a `secret` tag.
    pub secret: bool,
}

/// Per-field metadata generated by `#[derive(Bind)]`.
///
/// Tags are resolved in priority order `config`, `data`, `secret`. A field
/// with none of them never reaches the binder.
///
/// ```rust
/// use config_binder::FieldDescriptor;
///
/// const PASSWORD: FieldDescriptor = FieldDescriptor::new("password")
///     .with_secret("superuserPassword")
///     .required();
/// let key = PASSWORD.source_key().expect("secret tag present");
/// assert_eq!(key.name, "superuserPassword");
/// assert!(key.secret);
/// assert_eq!(PASSWORD.json_key(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    ident: &'static str,
    config: Option<&'static str>,
    data: Option<&'static str>,
    secret: Option<&'static str>,
    required: bool,
}

impl FieldDescriptor {
    /// Descriptor for the Rust field `ident` with no tags.
    #[must_use]
    pub const fn new(ident: &'static str) -> Self {
        Self {
            ident,
            config: None,
            data: None,
            secret: None,
            required: false,
        }
    }

    /// Sets the `config` tag.
    #[must_use]
    pub const fn with_config(mut self, key: &'static str) -> Self {
        self.config = Some(key);
        self
    }

    /// Sets the `data` tag.
    #[must_use]
    pub const fn with_data(mut self, key: &'static str) -> Self {
        self.data = Some(key);
        self
    }

    /// Sets the `secret` tag.
    #[must_use]
    pub const fn with_secret(mut self, key: &'static str) -> Self {
        self.secret = Some(key);
        self
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Rust identifier of the field.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Whether the field carries the `required` tag.
    #[must_use]
    pub const fn is_declared_required(&self) -> bool {
        self.required
    }

    /// Key used for the configuration source, by tag priority.
    #[must_use]
    pub const fn source_key(&self) -> Option<SourceKey> {
        match (self.config, self.data, self.secret) {
            (Some(name), _, _) | (None, Some(name), _) => Some(SourceKey {
                name,
                secret: false,
            }),
            (None, None, Some(name)) => Some(SourceKey { name, secret: true }),
            (None, None, None) => None,
        }
    }

    /// Key used inside nested JSON objects. Secret tags do not apply there.
    #[must_use]
    pub const fn json_key(&self) -> Option<&'static str> {
        match self.config {
            Some(name) => Some(name),
            None => self.data,
        }
    }

    /// Key used by display serialization: the data tag or the identifier.
    #[must_use]
    pub const fn display_key(&self) -> &'static str {
        match self.data {
            Some(name) => name,
            None => self.ident,
        }
    }
}
