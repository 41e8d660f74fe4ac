//! Scalar field kinds: booleans, the integer family, floats and strings.

use serde_json::Value;

use super::{Field, Target};
use crate::error::BindResult;

/// An integer field of any primitive width.
///
/// Writes are range-checked; a value that does not fit is rejected and the
/// field is left unchanged.
pub trait IntSlot {
    /// Rust name of the integer type.
    fn type_name(&self) -> &'static str;

    /// Whether the field holds zero.
    fn is_zero(&self) -> bool;

    /// Stores `value`, returning `false` when it is out of range.
    fn set_i64(&mut self, value: i64) -> bool;

    /// Stores `value`, returning `false` when it is out of range.
    fn set_u64(&mut self, value: u64) -> bool;
}

/// A floating-point field.
pub trait FloatSlot {
    /// Rust name of the float type.
    fn type_name(&self) -> &'static str;

    /// Whether the field holds zero.
    fn is_zero(&self) -> bool;

    /// Stores `value`, narrowing when the field is `f32`.
    fn set_f64(&mut self, value: f64);
}

macro_rules! int_field {
    ($($ty:ty),* $(,)?) => {$(
        impl IntSlot for $ty {
            fn type_name(&self) -> &'static str {
                stringify!($ty)
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }

            fn set_i64(&mut self, value: i64) -> bool {
                <$ty>::try_from(value).map(|v| *self = v).is_ok()
            }

            fn set_u64(&mut self, value: u64) -> bool {
                <$ty>::try_from(value).map(|v| *self = v).is_ok()
            }
        }

        impl Field for $ty {
            fn target(&mut self) -> Target<'_> {
                Target::Int(self)
            }

            fn display_value(&self) -> BindResult<Value> {
                Ok(Value::from(*self))
            }
        }
    )*};
}

int_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FloatSlot for f64 {
    fn type_name(&self) -> &'static str {
        "f64"
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn set_f64(&mut self, value: f64) {
        *self = value;
    }
}

impl FloatSlot for f32 {
    fn type_name(&self) -> &'static str {
        "f32"
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "f32 fields accept the precision loss of narrowing"
    )]
    fn set_f64(&mut self, value: f64) {
        *self = value as f32;
    }
}

impl Field for f64 {
    fn target(&mut self) -> Target<'_> {
        Target::Float(self)
    }

    fn display_value(&self) -> BindResult<Value> {
        Ok(Value::from(*self))
    }
}

impl Field for f32 {
    fn target(&mut self) -> Target<'_> {
        Target::Float(self)
    }

    fn display_value(&self) -> BindResult<Value> {
        Ok(Value::from(*self))
    }
}

impl Field for bool {
    fn target(&mut self) -> Target<'_> {
        Target::Bool(self)
    }

    fn display_value(&self) -> BindResult<Value> {
        Ok(Value::Bool(*self))
    }
}

impl Field for String {
    fn target(&mut self) -> Target<'_> {
        Target::String(self)
    }

    fn display_value(&self) -> BindResult<Value> {
        Ok(Value::String(self.clone()))
    }
}
