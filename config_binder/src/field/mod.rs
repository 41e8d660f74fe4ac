//! Field metadata and the typed slots the binder writes through.
//!
//! `#[derive(Bind)]` turns every tagged field of a struct into a
//! [`FieldSlot`]: a static [`FieldDescriptor`] paired with a [`Target`], a
//! mutable borrow of the field classified into one of a closed set of kinds.
//! The binder pattern-matches on [`Target`] and never inspects types at
//! runtime.
//!
//! Types outside the built-in set take part by implementing [`Field`]. Derived
//! structs implement it automatically.

mod collections;
mod descriptor;
mod scalar;

use std::fmt;

use serde_json::{Map, Value};

use crate::deferred::{CapabilityKind, Deferred};
use crate::error::BindResult;

pub use collections::{MapSlot, PointerSlot, SequenceSlot};
pub use descriptor::{FieldDescriptor, SourceKey};
pub use scalar::{FloatSlot, IntSlot};

/// A value the binder can populate and display.
pub trait Field {
    /// Borrows the value as a binder target.
    fn target(&mut self) -> Target<'_>;

    /// Produces the redacted display form of the value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BindError::InvalidJson`] when a map value cannot be
    /// represented as JSON.
    fn display_value(&self) -> BindResult<Value>;
}

/// Structs whose tagged fields can be bound. Usually derived.
///
/// ```rust
/// use config_binder::{Bind, FieldKind};
///
/// #[derive(Default, Bind)]
/// struct Role {
///     #[bind(data = "permission")]
///     permission: String,
///     runtime_only: u32,
/// }
///
/// let mut role = Role::default();
/// let kinds: Vec<_> = role.fields().iter().map(|slot| slot.target().kind()).collect();
/// assert_eq!(kinds, vec![FieldKind::String]);
/// ```
pub trait Bind {
    /// Name of the struct, used in diagnostics.
    fn type_name(&self) -> &'static str;

    /// Tagged fields in declaration order. Untagged fields are omitted.
    fn fields(&mut self) -> Vec<FieldSlot<'_>>;

    /// Display form of every field not marked `#[bind(skip)]`, keyed by data
    /// tag or field name.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Field::display_value`].
    fn display_map(&self) -> BindResult<Map<String, Value>>;

    /// Whether every tagged field holds its zero value.
    fn is_zero(&mut self) -> bool {
        self.fields()
            .iter_mut()
            .all(|slot| slot.target_mut().is_zero())
    }
}

/// A tagged field ready for binding.
pub struct FieldSlot<'a> {
    descriptor: FieldDescriptor,
    target: Target<'a>,
}

impl<'a> FieldSlot<'a> {
    /// Pair a descriptor with the field it describes.
    #[must_use]
    pub const fn new(descriptor: FieldDescriptor, target: Target<'a>) -> Self {
        Self { descriptor, target }
    }

    /// Static metadata of the field.
    #[must_use]
    pub const fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// The borrowed field.
    #[must_use]
    pub const fn target(&self) -> &Target<'a> {
        &self.target
    }

    /// The borrowed field, mutably.
    #[must_use]
    pub const fn target_mut(&mut self) -> &mut Target<'a> {
        &mut self.target
    }

    /// Splits the slot into its parts.
    #[must_use]
    pub fn into_parts(self) -> (FieldDescriptor, Target<'a>) {
        (self.descriptor, self.target)
    }
}

/// Kind of a field, as classified from its static type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// `bool`.
    Bool,
    /// Any primitive integer.
    Int,
    /// `f32` or `f64`.
    Float,
    /// `String`.
    String,
    /// String-keyed map.
    Map,
    /// Struct implementing [`Bind`].
    Struct,
    /// `Option<Box<T>>`.
    Pointer,
    /// `Vec<T>` or `[T; N]`.
    Sequence,
    /// Deferred input of the given capability.
    Deferred(CapabilityKind),
    /// A type the binder cannot populate.
    Unsupported(&'static str),
}

impl FieldKind {
    /// Whether the kind is filled from a JSON blob rather than a scalar read.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Map | Self::Struct | Self::Pointer | Self::Sequence)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::String => f.write_str("string"),
            Self::Map => f.write_str("map"),
            Self::Struct => f.write_str("struct"),
            Self::Pointer => f.write_str("pointer"),
            Self::Sequence => f.write_str("sequence"),
            Self::Deferred(kind) => write!(f, "deferred {kind}"),
            Self::Unsupported(name) => f.write_str(name),
        }
    }
}

/// Mutable borrow of a field, classified by kind.
pub enum Target<'a> {
    /// A `bool` field.
    Bool(&'a mut bool),
    /// An integer field of any width.
    Int(&'a mut dyn IntSlot),
    /// A floating-point field.
    Float(&'a mut dyn FloatSlot),
    /// A `String` field.
    String(&'a mut String),
    /// A string-keyed map field.
    Map(&'a mut dyn MapSlot),
    /// A nested struct.
    Struct(&'a mut dyn Bind),
    /// An optional boxed value.
    Pointer(&'a mut dyn PointerSlot),
    /// A vector or fixed-size array.
    Sequence(&'a mut dyn SequenceSlot),
    /// A deferred input.
    Deferred(DeferredTarget<'a>),
    /// A field whose type the binder does not support.
    Unsupported(&'static str),
}

impl Target<'_> {
    /// Kind of the borrowed field.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Bool(_) => FieldKind::Bool,
            Self::Int(_) => FieldKind::Int,
            Self::Float(_) => FieldKind::Float,
            Self::String(_) => FieldKind::String,
            Self::Map(_) => FieldKind::Map,
            Self::Struct(_) => FieldKind::Struct,
            Self::Pointer(_) => FieldKind::Pointer,
            Self::Sequence(_) => FieldKind::Sequence,
            Self::Deferred(target) => FieldKind::Deferred(target.capability()),
            Self::Unsupported(name) => FieldKind::Unsupported(*name),
        }
    }

    /// Whether the field holds its zero value.
    ///
    /// Deferred fields are zero when unset or holding a zero literal; a
    /// pending handle is never zero. Structs are zero when all their tagged
    /// fields are.
    #[must_use]
    pub fn is_zero(&mut self) -> bool {
        match self {
            Self::Bool(value) => !**value,
            Self::Int(slot) => slot.is_zero(),
            Self::Float(slot) => slot.is_zero(),
            Self::String(value) => value.is_empty(),
            Self::Map(slot) => slot.is_empty(),
            Self::Struct(nested) => nested.is_zero(),
            Self::Unsupported(_) => false,
            Self::Pointer(slot) => slot.is_null(),
            Self::Sequence(slot) => slot.len() == 0,
            Self::Deferred(target) => target.is_zero(),
        }
    }
}

/// Mutable borrow of a deferred field, one variant per capability.
pub enum DeferredTarget<'a> {
    /// [`crate::StringInput`].
    String(&'a mut Option<Deferred<String>>),
    /// [`crate::BoolInput`].
    Bool(&'a mut Option<Deferred<bool>>),
    /// [`crate::IntInput`].
    Int(&'a mut Option<Deferred<i64>>),
    /// [`crate::FloatInput`].
    Float(&'a mut Option<Deferred<f64>>),
}

impl DeferredTarget<'_> {
    /// Capability of the borrowed field.
    #[must_use]
    pub const fn capability(&self) -> CapabilityKind {
        match self {
            Self::String(_) => CapabilityKind::String,
            Self::Bool(_) => CapabilityKind::Bool,
            Self::Int(_) => CapabilityKind::Int,
            Self::Float(_) => CapabilityKind::Float,
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Self::String(slot) => slot_is_zero(slot),
            Self::Bool(slot) => slot_is_zero(slot),
            Self::Int(slot) => slot_is_zero(slot),
            Self::Float(slot) => slot_is_zero(slot),
        }
    }
}

fn slot_is_zero<C: crate::Capability>(slot: &Option<Deferred<C>>) -> bool {
    slot.as_ref().is_none_or(Deferred::is_zero_literal)
}
