//! Opaque handles for values an external engine resolves later.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::CapabilityKind;

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Reference to a value that is not known at bind time.
///
/// Handles are issued by [`crate::ConfigSource`] and carry no value. The
/// engine that owns resolution identifies the value through [`Self::key`];
/// see [`crate::ConfigStore::resolve`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PendingHandle {
    id: u64,
    key: Arc<str>,
    kind: CapabilityKind,
}

impl PendingHandle {
    /// Issue a fresh handle for `key`.
    #[must_use]
    pub fn issue(key: &str, kind: CapabilityKind) -> Self {
        Self {
            id: NEXT_HANDLE.fetch_add(1, Ordering::Relaxed),
            key: Arc::from(key),
            kind,
        }
    }

    /// Process-unique identifier of the handle.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Fully-qualified configuration key the handle was issued for.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Capability the handle resolves to.
    #[must_use]
    pub const fn kind(&self) -> CapabilityKind {
        self.kind
    }
}

impl fmt::Debug for PendingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingHandle")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("kind", &self.kind)
            .finish()
    }
}
