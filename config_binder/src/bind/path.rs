//! Key paths reported by binding errors.

use std::fmt;

/// Location of a field within a bind call, such as
/// `pg:provider.users[1].username`.
///
/// ```rust
/// use config_binder::KeyPath;
///
/// let path = KeyPath::namespaced("pg").key("users").index(1).key("username");
/// assert_eq!(path.to_string(), "pg:users[1].username");
/// assert_eq!(KeyPath::root().to_string(), "$");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPath {
    rendered: String,
    open: bool,
}

impl KeyPath {
    /// Path of a top-level JSON document.
    #[must_use]
    pub fn root() -> Self {
        Self {
            rendered: String::new(),
            open: true,
        }
    }

    /// Path of a source namespace; keys below it are joined with `:`.
    #[must_use]
    pub fn namespaced(namespace: &str) -> Self {
        if namespace.is_empty() {
            return Self::root();
        }
        Self {
            rendered: format!("{namespace}:"),
            open: true,
        }
    }

    /// Path of the member `key` below this one.
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        let rendered = if self.open {
            format!("{}{key}", self.rendered)
        } else {
            format!("{}.{key}", self.rendered)
        };
        Self {
            rendered,
            open: false,
        }
    }

    /// Path of the element `index` below this one.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self {
            rendered: format!("{}[{index}]", self.rendered),
            open: false,
        }
    }

    /// Rendered form; empty at the root.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl Default for KeyPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rendered.is_empty() {
            f.write_str("$")
        } else {
            f.write_str(&self.rendered)
        }
    }
}
