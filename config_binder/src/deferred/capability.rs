//! The four scalar capabilities a deferred value may carry.

use std::fmt;

use serde_json::Value;

use super::Deferred;
use crate::field::DeferredTarget;

mod sealed {
    pub trait Sealed {}
    impl Sealed for String {}
    impl Sealed for bool {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
}

/// Tag naming the capability of a deferred value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    /// String-valued input.
    String,
    /// Boolean-valued input.
    Bool,
    /// Integer-valued input.
    Int,
    /// Float-valued input.
    Float,
}

impl CapabilityKind {
    /// Fixed token emitted by display serialization in place of the value.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::String => "[StringOutput]",
            Self::Bool => "[BoolOutput]",
            Self::Int => "[IntOutput]",
            Self::Float => "[Float64Output]",
        }
    }

    /// Name of the scalar type, as used in error messages.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Scalar types that can sit inside a [`Deferred`] value.
///
/// This trait is sealed: the capabilities are exactly `String`, `bool`,
/// `i64` and `f64`.
pub trait Capability: sealed::Sealed + Clone + PartialEq + fmt::Debug + Sized + 'static {
    /// Tag for this capability.
    const KIND: CapabilityKind;

    /// The zero value (`""`, `false`, `0`, `0.0`).
    fn zero() -> Self;

    /// Whether the value is the zero value.
    fn is_zero(&self) -> bool;

    /// Converts a JSON value, returning `None` when the shape does not fit.
    ///
    /// Integers accept JSON floats, truncating toward zero.
    fn from_json(value: &Value) -> Option<Self>;

    /// Parses the textual form held by a configuration store.
    fn parse_text(raw: &str) -> Option<Self>;

    /// Borrows a deferred slot as a binder target.
    fn target(slot: &mut Option<Deferred<Self>>) -> DeferredTarget<'_>;
}

impl Capability for String {
    const KIND: CapabilityKind = CapabilityKind::String;

    fn zero() -> Self {
        String::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(ToOwned::to_owned)
    }

    fn parse_text(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }

    fn target(slot: &mut Option<Deferred<Self>>) -> DeferredTarget<'_> {
        DeferredTarget::String(slot)
    }
}

impl Capability for bool {
    const KIND: CapabilityKind = CapabilityKind::Bool;

    fn zero() -> Self {
        false
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn parse_text(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    fn target(slot: &mut Option<Deferred<Self>>) -> DeferredTarget<'_> {
        DeferredTarget::Bool(slot)
    }
}

impl Capability for i64 {
    const KIND: CapabilityKind = CapabilityKind::Int;

    fn zero() -> Self {
        0
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn from_json(value: &Value) -> Option<Self> {
        value
            .as_i64()
            .or_else(|| value.as_f64().and_then(truncate_to_i64))
    }

    fn parse_text(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    fn target(slot: &mut Option<Deferred<Self>>) -> DeferredTarget<'_> {
        DeferredTarget::Int(slot)
    }
}

impl Capability for f64 {
    const KIND: CapabilityKind = CapabilityKind::Float;

    fn zero() -> Self {
        0.0
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    fn parse_text(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    fn target(slot: &mut Option<Deferred<Self>>) -> DeferredTarget<'_> {
        DeferredTarget::Float(slot)
    }
}

/// Truncates a float toward zero, returning `None` when it does not fit.
#[expect(
    clippy::cast_possible_truncation,
    reason = "range is checked before the cast"
)]
pub(crate) fn truncate_to_i64(value: f64) -> Option<i64> {
    // 2^63 is the first f64 past i64::MAX; i64::MIN is exactly -2^63.
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    const LOWER: f64 = -9_223_372_036_854_775_808.0;
    let truncated = value.trunc();
    (truncated.is_finite() && (LOWER..UPPER).contains(&truncated)).then(|| truncated as i64)
}
