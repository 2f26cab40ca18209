//! Field instances: named, kind-tagged values attached to entities and levels.
//!
//! The kind of a field is decided once, when the instance is constructed from
//! its type tag. Binding code downstream only ever sees a closed
//! [`FieldValue`], so an unknown kind can never reach it.

use bevy::color::{Color, Srgba};
use bevy::math::IVec2;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while decoding a field instance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// The type tag names a kind this crate does not bind.
    #[error("Unknown field type '{type_tag}' on field '{field}'")]
    UnknownType { field: String, type_tag: String },

    /// The raw value does not have the shape its type tag promises.
    #[error("Malformed value for field '{field}' of type '{type_tag}': {reason}")]
    MalformedValue {
        field: String,
        type_tag: String,
        reason: String,
    },

    /// A color string that is not `#RRGGBB` or `#RRGGBBAA`.
    #[error("Malformed color '{0}'")]
    MalformedColor(String),
}

/// Decoded value of a [`FieldInstance`].
///
/// Nullable kinds carry an `Option`; `None` means the field was left empty in
/// the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(Option<i64>),
    Float(Option<f64>),
    Bool(bool),
    String(Option<String>),
    /// Project-level enum. `qualifier` is the part of the type tag after the
    /// first `.`, if any.
    Enum {
        qualifier: Option<String>,
        case: Option<String>,
    },
    /// Enum defined inside the project (`LocalEnum.Direction`).
    LocalEnum {
        qualifier: Option<String>,
        case: Option<String>,
    },
    Color(Color),
    /// Grid cell coordinates; `None` when the point was not placed.
    Point(Option<IVec2>),
}

impl FieldValue {
    /// Short name of the value kind, used in conversion errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Int(_) => "Int",
            FieldValue::Float(_) => "Float",
            FieldValue::Bool(_) => "Bool",
            FieldValue::String(_) => "String",
            FieldValue::Enum { .. } => "Enum",
            FieldValue::LocalEnum { .. } => "LocalEnum",
            FieldValue::Color(_) => "Color",
            FieldValue::Point(_) => "Point",
        }
    }

    /// Rebuild the editor type tag for this value.
    pub fn type_tag(&self) -> String {
        match self {
            FieldValue::Enum {
                qualifier: Some(q), ..
            }
            | FieldValue::LocalEnum {
                qualifier: Some(q), ..
            } => format!("{}.{}", self.kind_name(), q),
            _ => self.kind_name().to_string(),
        }
    }

    /// Whether the editor left this value empty.
    pub fn is_null(&self) -> bool {
        match self {
            FieldValue::Int(v) => v.is_none(),
            FieldValue::Float(v) => v.is_none(),
            FieldValue::String(v) => v.is_none(),
            FieldValue::Enum { case, .. } | FieldValue::LocalEnum { case, .. } => case.is_none(),
            FieldValue::Point(v) => v.is_none(),
            FieldValue::Bool(_) | FieldValue::Color(_) => false,
        }
    }

    /// Decode a raw document value according to `type_tag`.
    ///
    /// The tag is split on `.`; the head selects the kind and the rest is kept
    /// as the enum qualifier.
    pub fn from_json(field: &str, type_tag: &str, raw: &Value) -> Result<Self, FieldError> {
        let (head, qualifier) = match type_tag.split_once('.') {
            Some((head, rest)) => (head, Some(rest.to_string())),
            None => (type_tag, None),
        };

        let malformed = |reason: &str| FieldError::MalformedValue {
            field: field.to_string(),
            type_tag: type_tag.to_string(),
            reason: reason.to_string(),
        };

        match head {
            "Int" => match raw {
                Value::Null => Ok(FieldValue::Int(None)),
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f.round() as i64))
                    .map(|i| FieldValue::Int(Some(i)))
                    .ok_or_else(|| malformed("not an integer")),
                _ => Err(malformed("expected a number")),
            },
            "Float" => match raw {
                Value::Null => Ok(FieldValue::Float(None)),
                Value::Number(n) => n
                    .as_f64()
                    .map(|f| FieldValue::Float(Some(f)))
                    .ok_or_else(|| malformed("not a float")),
                _ => Err(malformed("expected a number")),
            },
            "Bool" => raw
                .as_bool()
                .map(FieldValue::Bool)
                .ok_or_else(|| malformed("expected a boolean")),
            "String" => match raw {
                Value::Null => Ok(FieldValue::String(None)),
                Value::String(s) => Ok(FieldValue::String(Some(s.clone()))),
                _ => Err(malformed("expected a string")),
            },
            "Enum" | "LocalEnum" => {
                let case = match raw {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    _ => return Err(malformed("expected an enum case name")),
                };
                if head == "Enum" {
                    Ok(FieldValue::Enum { qualifier, case })
                } else {
                    Ok(FieldValue::LocalEnum { qualifier, case })
                }
            }
            "Color" => {
                let hex = raw.as_str().ok_or_else(|| malformed("expected a color string"))?;
                parse_hex_color(hex).map(FieldValue::Color)
            }
            "Point" => match raw {
                Value::Null => Ok(FieldValue::Point(None)),
                Value::Object(map) => {
                    let coord = |key: &str| {
                        map.get(key)
                            .and_then(Value::as_i64)
                            .and_then(|v| i32::try_from(v).ok())
                            .ok_or_else(|| malformed(&format!("missing integer '{key}'")))
                    };
                    Ok(FieldValue::Point(Some(IVec2::new(coord("cx")?, coord("cy")?))))
                }
                _ => Err(malformed("expected a {cx, cy} object")),
            },
            _ => Err(FieldError::UnknownType {
                field: field.to_string(),
                type_tag: type_tag.to_string(),
            }),
        }
    }
}

/// Parse a `#RRGGBB` or `#RRGGBBAA` string. Six-digit colors are opaque.
pub fn parse_hex_color(hex: &str) -> Result<Color, FieldError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 && digits.len() != 8 {
        return Err(FieldError::MalformedColor(hex.to_string()));
    }
    Srgba::hex(digits)
        .map(Color::Srgba)
        .map_err(|_| FieldError::MalformedColor(hex.to_string()))
}

/// One named value on an entity instance or a level.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInstance {
    identifier: String,
    type_tag: String,
    value: FieldValue,
}

impl FieldInstance {
    /// Build a field from an already decoded value. The type tag is derived
    /// from the value.
    pub fn new(identifier: impl Into<String>, value: FieldValue) -> Self {
        Self {
            identifier: identifier.into(),
            type_tag: value.type_tag(),
            value,
        }
    }

    /// Decode a field from its document form.
    pub fn from_json(identifier: &str, type_tag: &str, raw: &Value) -> Result<Self, FieldError> {
        let value = FieldValue::from_json(identifier, type_tag, raw)?;
        Ok(Self {
            identifier: identifier.to_string(),
            type_tag: type_tag.to_string(),
            value,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Type tag as written by the editor, e.g. `LocalEnum.Direction`.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = FieldInstance::from_json("Spin", "Quaternion", &json!([0, 0, 0, 1])).unwrap_err();
        assert_eq!(
            err,
            FieldError::UnknownType {
                field: "Spin".to_string(),
                type_tag: "Quaternion".to_string(),
            }
        );
    }

    #[test]
    fn test_six_digit_color_is_opaque() {
        let field = FieldInstance::from_json("Tint", "Color", &json!("#FF0000")).unwrap();
        assert_eq!(field.value(), &FieldValue::Color(Color::srgb_u8(255, 0, 0)));
    }

    #[test]
    fn test_eight_digit_color_reads_trailing_alpha() {
        let color = parse_hex_color("#00FF0080").unwrap();
        assert_eq!(color, Color::srgba_u8(0, 255, 0, 0x80));
    }

    #[test]
    fn test_bad_color_length() {
        assert!(matches!(
            parse_hex_color("#FFF0"),
            Err(FieldError::MalformedColor(_))
        ));
    }

    #[test]
    fn test_enum_qualifier_split() {
        let field =
            FieldInstance::from_json("Facing", "LocalEnum.Direction", &json!("North")).unwrap();
        assert_eq!(
            field.value(),
            &FieldValue::LocalEnum {
                qualifier: Some("Direction".to_string()),
                case: Some("North".to_string()),
            }
        );
        assert_eq!(field.value().type_tag(), "LocalEnum.Direction");
    }

    #[test]
    fn test_point_reads_named_coordinates() {
        let placed = FieldValue::from_json("Target", "Point", &json!({"cx": 3, "cy": 4})).unwrap();
        assert_eq!(placed, FieldValue::Point(Some(IVec2::new(3, 4))));

        let empty = FieldValue::from_json("Target", "Point", &Value::Null).unwrap();
        assert_eq!(empty, FieldValue::Point(None));
        assert!(empty.is_null());
    }

    #[test]
    fn test_nullable_int() {
        let value = FieldValue::from_json("Ammo", "Int", &Value::Null).unwrap();
        assert_eq!(value, FieldValue::Int(None));

        let err = FieldValue::from_json("Ammo", "Int", &json!("three")).unwrap_err();
        assert!(matches!(err, FieldError::MalformedValue { .. }));
    }
}
