//! Typed argument values.
//!
//! Every literal the parser recognizes becomes a [`Value`]. Commands declare
//! their parameters as [`ValueType`] tags, and handlers read arguments back
//! through [`FromValue`].

use std::fmt;

use bevy::color::Srgba;
use bevy::math::{Vec2, Vec3, Vec4};
use bevy::prelude::Entity;

/// A parsed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The `null` literal, or an object reference that could not be found.
    Null,
    Bool(bool),
    Int(i32),
    Float(f32),
    Char(char),
    String(String),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Color(Srgba),
    /// An entity found by name through an [`ObjectLookup`](super::ObjectLookup).
    Object(Entity),
    /// A reference to a console variable, substituted before invocation.
    Variable(VariableName),
}

impl Value {
    /// The runtime type of this value.
    ///
    /// `Null` has no type: it scores as "unknown" during overload resolution.
    pub fn value_type(&self) -> Option<ValueType> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Char(_) => ValueType::Char,
            Value::String(_) => ValueType::String,
            Value::Vec2(_) => ValueType::Vec2,
            Value::Vec3(_) => ValueType::Vec3,
            Value::Vec4(_) => ValueType::Vec4,
            Value::Color(_) => ValueType::Color,
            Value::Object(_) => ValueType::Object,
            Value::Variable(_) => ValueType::Variable,
        })
    }

    /// Human readable name of the value's type, `null` for [`Value::Null`].
    pub fn type_name(&self) -> &'static str {
        self.value_type().map_or("null", ValueType::name)
    }

    /// Check if this is the [`Value::Null`] value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Char(c) => write!(f, "{c}"),
            Value::String(s) => f.write_str(s),
            Value::Vec2(v) => write_components(f, "", &v.to_array()),
            Value::Vec3(v) => write_components(f, "", &v.to_array()),
            Value::Vec4(v) => write_components(f, "", &v.to_array()),
            Value::Color(c) => write_components(f, "rgba", &[c.red, c.green, c.blue, c.alpha]),
            Value::Object(e) => write!(f, "{{{e}}}"),
            Value::Variable(name) => write!(f, "{name}"),
        }
    }
}

fn write_components(f: &mut fmt::Formatter<'_>, prefix: &str, components: &[f32]) -> fmt::Result {
    f.write_str(prefix)?;
    f.write_str("(")?;
    for (i, c) in components.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&format_float(*c))?;
    }
    f.write_str(")")
}

/// Integral floats print without a fractional part.
pub(crate) fn format_float(value: f32) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Declared type of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    Char,
    String,
    Vec2,
    Vec3,
    Vec4,
    Color,
    Object,
    /// Receives the variable identifier itself instead of its stored value.
    Variable,
    /// Accepts any value, including `null`.
    Any,
}

impl ValueType {
    /// Name used in signatures and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Char => "char",
            ValueType::String => "string",
            ValueType::Vec2 => "Vec2",
            ValueType::Vec3 => "Vec3",
            ValueType::Vec4 => "Vec4",
            ValueType::Color => "Color",
            ValueType::Object => "Entity",
            ValueType::Variable => "Variable",
            ValueType::Any => "any",
        }
    }

    /// Reference-like types may receive a value of unknown type
    /// (`null` or an unbound variable) without being disqualified.
    pub fn is_nullable(self) -> bool {
        matches!(self, ValueType::String | ValueType::Object | ValueType::Any)
    }

    /// Widening relation used for the +1 score: `Any` takes everything and
    /// `Float` takes `Int`. Exact matches are not included.
    pub fn accepts(self, other: ValueType) -> bool {
        match self {
            ValueType::Any => true,
            ValueType::Float => other == ValueType::Int,
            _ => false,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of a console variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableName(Box<str>);

impl VariableName {
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for VariableName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VariableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Types that can be read out of a [`Value`] by a command handler.
///
/// `TYPE` is what a parameter declared with this Rust type is scored as.
///
/// # Examples
///
/// ```
/// use bevy_console_overloads::core::{FromValue, Value, ValueType};
///
/// assert_eq!(<f32 as FromValue>::TYPE, ValueType::Float);
/// assert_eq!(f32::from_value(&Value::Int(3)), Some(3.0));
/// assert_eq!(i32::from_value(&Value::Float(3.0)), None);
/// ```
pub trait FromValue: Sized {
    /// Declared parameter type for this Rust type.
    const TYPE: ValueType;

    /// Extract from a value, `None` on a type mismatch.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($ty:ty, $tag:ident, $variant:ident) => {
        impl FromValue for $ty {
            const TYPE: ValueType = ValueType::$tag;

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_from_value!(bool, Bool, Bool);
impl_from_value!(i32, Int, Int);
impl_from_value!(char, Char, Char);
impl_from_value!(String, String, String);
impl_from_value!(Vec2, Vec2, Vec2);
impl_from_value!(Vec3, Vec3, Vec3);
impl_from_value!(Vec4, Vec4, Vec4);
impl_from_value!(Srgba, Color, Color);
impl_from_value!(Entity, Object, Object);
impl_from_value!(VariableName, Variable, Variable);

impl FromValue for f32 {
    const TYPE: ValueType = ValueType::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f32),
            _ => None,
        }
    }
}

impl FromValue for Value {
    const TYPE: ValueType = ValueType::Any;

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

/// `null` reads as `None`, anything else must match `T`.
impl<T: FromValue> FromValue for Option<T> {
    const TYPE: ValueType = T::TYPE;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}
