//! Values that may only be known after binding.
//!
//! A [`Deferred`] value is either a literal available now or a
//! [`PendingHandle`] that an external engine resolves later. The binder only
//! constructs and moves these values around. Nothing in this crate waits on a
//! handle, and secret literals are never rendered by `Debug`.

mod capability;
mod handle;

use std::fmt;

pub(crate) use capability::truncate_to_i64;
pub use capability::{Capability, CapabilityKind};
pub use handle::PendingHandle;

/// Deferred string input. `None` means the field has not been set.
pub type StringInput = Option<Deferred<String>>;
/// Deferred boolean input. `None` means the field has not been set.
pub type BoolInput = Option<Deferred<bool>>;
/// Deferred integer input. `None` means the field has not been set.
pub type IntInput = Option<Deferred<i64>>;
/// Deferred floating-point input. `None` means the field has not been set.
pub type FloatInput = Option<Deferred<f64>>;

#[derive(Clone, PartialEq)]
enum Inner<C> {
    Literal(C),
    Pending(PendingHandle),
}

/// A literal or a handle to a value resolved later, tagged with secrecy.
///
/// The capability `C` is fixed by the type, so a deferred value never changes
/// kind once constructed.
#[derive(Clone, PartialEq)]
pub struct Deferred<C: Capability> {
    inner: Inner<C>,
    secret: bool,
}

/// Borrowed view of a [`Deferred`] value for pattern matching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeferredState<'a, C> {
    /// The value is known now.
    Literal(&'a C),
    /// The value will be supplied by an external engine.
    Pending(&'a PendingHandle),
}

impl<C: Capability> Deferred<C> {
    /// Wrap a known, non-secret value.
    #[must_use]
    pub const fn literal(value: C) -> Self {
        Self {
            inner: Inner::Literal(value),
            secret: false,
        }
    }

    /// Wrap a known value that must be treated as secret.
    #[must_use]
    pub const fn secret_literal(value: C) -> Self {
        Self {
            inner: Inner::Literal(value),
            secret: true,
        }
    }

    /// Wrap a handle issued for a value resolved later.
    #[must_use]
    pub const fn pending(handle: PendingHandle, secret: bool) -> Self {
        Self {
            inner: Inner::Pending(handle),
            secret,
        }
    }

    /// Returns a borrowed view of the value.
    #[must_use]
    pub const fn state(&self) -> DeferredState<'_, C> {
        match &self.inner {
            Inner::Literal(value) => DeferredState::Literal(value),
            Inner::Pending(handle) => DeferredState::Pending(handle),
        }
    }

    /// Returns the literal when the value is already known.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&C> {
        match &self.inner {
            Inner::Literal(value) => Some(value),
            Inner::Pending(_) => None,
        }
    }

    /// Returns the handle when the value is still pending.
    #[must_use]
    pub const fn handle(&self) -> Option<&PendingHandle> {
        match &self.inner {
            Inner::Literal(_) => None,
            Inner::Pending(handle) => Some(handle),
        }
    }

    /// Whether the value is known now.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self.inner, Inner::Literal(_))
    }

    /// Whether the value must not be logged or displayed in cleartext.
    #[must_use]
    pub const fn is_secret(&self) -> bool {
        self.secret
    }

    /// Marks the value as secret. Secrecy cannot be removed once set.
    #[must_use]
    pub const fn into_secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// The capability this value carries.
    #[must_use]
    pub const fn kind(&self) -> CapabilityKind {
        C::KIND
    }

    /// Whether the value is a literal equal to the capability's zero value.
    ///
    /// Pending values are never zero: their content is unknown.
    #[must_use]
    pub fn is_zero_literal(&self) -> bool {
        self.as_literal().is_some_and(Capability::is_zero)
    }
}

impl<C: Capability> From<C> for Deferred<C> {
    fn from(value: C) -> Self {
        Self::literal(value)
    }
}

impl<C: Capability> fmt::Debug for Deferred<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Deferred");
        out.field("kind", &C::KIND).field("secret", &self.secret);
        match (&self.inner, self.secret) {
            (Inner::Literal(_), true) => out.field("literal", &"[secret]"),
            (Inner::Literal(value), false) => out.field("literal", value),
            (Inner::Pending(handle), _) => out.field("pending", handle),
        };
        out.finish()
    }
}
