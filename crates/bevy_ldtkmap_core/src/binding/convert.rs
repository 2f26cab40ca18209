//! Conversions from [`FieldValue`] into record storage types.
//!
//! Implemented for the primitive storage kinds, Bevy colors and vectors, and
//! `Option<T>`. Unit enums get an implementation through
//! `#[derive(LdtkEnum)]`.

use bevy::prelude::*;
use bevy_ldtkmap_assets::model::FieldValue;
use thiserror::Error;

/// Storage kind a record slot expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Int,
    Float,
    Bool,
    String,
    /// Unit enum parsed from a case name.
    Enum,
    Color,
    Point,
}

/// Error converting a field value into slot storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("expected {expected:?}, found {found}")]
    Mismatch {
        expected: SlotKind,
        found: &'static str,
    },

    #[error("value is null but the slot is not optional")]
    Null,

    #[error("'{case}' is not a case of {enum_name}")]
    UnknownCase {
        enum_name: &'static str,
        case: String,
    },

    #[error("{value} does not fit in {target}")]
    OutOfRange { value: i64, target: &'static str },
}

/// Trait for types a field value can be stored into.
///
/// # Example
///
/// ```ignore
/// use bevy_ldtkmap_assets::model::FieldValue;
/// use bevy_ldtkmap_core::binding::FromFieldValue;
///
/// let value = FieldValue::Int(Some(3));
/// assert_eq!(f32::from_field_value(&value), Ok(3.0));
/// ```
pub trait FromFieldValue: Sized {
    /// Kind reported in slot tables and conversion errors.
    const KIND: SlotKind;

    fn from_field_value(value: &FieldValue) -> Result<Self, ConvertError>;
}

fn mismatch(expected: SlotKind, value: &FieldValue) -> ConvertError {
    ConvertError::Mismatch {
        expected,
        found: value.kind_name(),
    }
}

/// Numeric view of a value. Floats are rounded when an integer is wanted.
fn as_i64(value: &FieldValue) -> Result<i64, ConvertError> {
    match value {
        FieldValue::Int(Some(i)) => Ok(*i),
        FieldValue::Float(Some(f)) => Ok(f.round() as i64),
        FieldValue::Int(None) | FieldValue::Float(None) => Err(ConvertError::Null),
        _ => Err(mismatch(SlotKind::Int, value)),
    }
}

fn as_f64(value: &FieldValue) -> Result<f64, ConvertError> {
    match value {
        FieldValue::Float(Some(f)) => Ok(*f),
        FieldValue::Int(Some(i)) => Ok(*i as f64),
        FieldValue::Int(None) | FieldValue::Float(None) => Err(ConvertError::Null),
        _ => Err(mismatch(SlotKind::Float, value)),
    }
}

macro_rules! impl_from_field_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromFieldValue for $ty {
                const KIND: SlotKind = SlotKind::Int;

                fn from_field_value(value: &FieldValue) -> Result<Self, ConvertError> {
                    let i = as_i64(value)?;
                    <$ty>::try_from(i).map_err(|_| ConvertError::OutOfRange {
                        value: i,
                        target: stringify!($ty),
                    })
                }
            }
        )*
    };
}

impl_from_field_value_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl FromFieldValue for f32 {
    const KIND: SlotKind = SlotKind::Float;

    fn from_field_value(value: &FieldValue) -> Result<Self, ConvertError> {
        as_f64(value).map(|f| f as f32)
    }
}

impl FromFieldValue for f64 {
    const KIND: SlotKind = SlotKind::Float;

    fn from_field_value(value: &FieldValue) -> Result<Self, ConvertError> {
        as_f64(value)
    }
}

impl FromFieldValue for bool {
    const KIND: SlotKind = SlotKind::Bool;

    fn from_field_value(value: &FieldValue) -> Result<Self, ConvertError> {
        match value {
            FieldValue::Bool(b) => Ok(*b),
            _ => Err(mismatch(SlotKind::Bool, value)),
        }
    }
}

impl FromFieldValue for String {
    const KIND: SlotKind = SlotKind::String;

    /// Enum values convert to their case name.
    fn from_field_value(value: &FieldValue) -> Result<Self, ConvertError> {
        match value {
            FieldValue::String(Some(s))
            | FieldValue::Enum { case: Some(s), .. }
            | FieldValue::LocalEnum { case: Some(s), .. } => Ok(s.clone()),
            FieldValue::String(None)
            | FieldValue::Enum { case: None, .. }
            | FieldValue::LocalEnum { case: None, .. } => Err(ConvertError::Null),
            _ => Err(mismatch(SlotKind::String, value)),
        }
    }
}

impl FromFieldValue for Color {
    const KIND: SlotKind = SlotKind::Color;

    fn from_field_value(value: &FieldValue) -> Result<Self, ConvertError> {
        match value {
            FieldValue::Color(color) => Ok(*color),
            _ => Err(mismatch(SlotKind::Color, value)),
        }
    }
}

/// Grid cell of a point. An unplaced point is `(0, 0)`.
impl FromFieldValue for IVec2 {
    const KIND: SlotKind = SlotKind::Point;

    fn from_field_value(value: &FieldValue) -> Result<Self, ConvertError> {
        match value {
            FieldValue::Point(point) => Ok(point.unwrap_or(IVec2::ZERO)),
            _ => Err(mismatch(SlotKind::Point, value)),
        }
    }
}

impl FromFieldValue for Vec2 {
    const KIND: SlotKind = SlotKind::Point;

    fn from_field_value(value: &FieldValue) -> Result<Self, ConvertError> {
        IVec2::from_field_value(value).map(|cell| cell.as_vec2())
    }
}

/// `None` for null values; kind mismatches are still errors.
impl<T: FromFieldValue> FromFieldValue for Option<T> {
    const KIND: SlotKind = T::KIND;

    fn from_field_value(value: &FieldValue) -> Result<Self, ConvertError> {
        if value.is_null() {
            return Ok(None);
        }
        T::from_field_value(value).map(Some)
    }
}

/// Unit enum whose cases are addressed by name in the editor.
///
/// Usually derived with `#[derive(LdtkEnum)]`, which also implements
/// [`FromFieldValue`] through [`enum_from_field_value`].
pub trait LdtkEnum: Sized {
    /// Name used in error messages.
    const NAME: &'static str;

    /// Case names in declaration order.
    const CASES: &'static [&'static str];

    fn from_case(case: &str) -> Option<Self>;
}

/// Parse an `Enum`/`LocalEnum` (or plain string) value into `T`.
pub fn enum_from_field_value<T: LdtkEnum>(value: &FieldValue) -> Result<T, ConvertError> {
    let case = match value {
        FieldValue::LocalEnum { case, .. } | FieldValue::Enum { case, .. } => case.as_deref(),
        FieldValue::String(s) => s.as_deref(),
        _ => return Err(mismatch(SlotKind::Enum, value)),
    };
    let case = case.ok_or(ConvertError::Null)?;

    T::from_case(case).ok_or_else(|| ConvertError::UnknownCase {
        enum_name: T::NAME,
        case: case.to_string(),
    })
}
