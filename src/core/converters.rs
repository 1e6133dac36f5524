//! Literal converters.
//!
//! A converter recognizes one literal syntax at the start of the remaining
//! parameter text and decodes it into a [`Value`]. Recognized tokens must be
//! followed by whitespace or the end of input, so `346x` is not an int and
//! `3.4` is never an int followed by `.4`.
//!
//! Converters are tried in a fixed order and the first one that recognizes
//! the input wins:
//!
//! | # | Converter  | Syntax                          |
//! |---|------------|---------------------------------|
//! | 1 | null       | `null`, `Null`                  |
//! | 2 | float      | `-1.5`                          |
//! | 3 | string     | `"with \" escapes"`             |
//! | 4 | bool       | `true`, `False`                 |
//! | 5 | char       | `'c'`                           |
//! | 6 | int        | `-42`                           |
//! | 7-9 | vectors  | `(1, 2)`, `(1, 2, 3)`, `(1, 2, 3, 4)` |
//! | 10 | rgb       | `rgb(1, 0.5, 0)`                |
//! | 11 | rgba      | `rgba(1, 0.5, 0, 0.5)`          |
//! | 12 | html      | `#FF8800`, `#FF880080`, `red`   |
//! | 13 | object    | `{Player One}`                  |
//! | 14 | variable  | `speed`                         |

use std::collections::HashMap;
use std::sync::LazyLock;

use bevy::color::Srgba;
use bevy::ecs::name::Name;
use bevy::math::{Vec2, Vec3, Vec4};
use bevy::prelude::{Entity, World};
use regex::Regex;

use super::{ConversionError, Value, ValueType, VariableName, validate_identifier};

/// Color names accepted as bare literals, with their `#RRGGBB` values.
pub const LITERAL_COLORS: &[(&str, &str)] = &[
    ("red", "FF0000"),
    ("cyan", "00FFFF"),
    ("blue", "0000FF"),
    ("darkblue", "0000A0"),
    ("lightblue", "ADD8E6"),
    ("purple", "800080"),
    ("yellow", "FFFF00"),
    ("lime", "00FF00"),
    ("fuchsia", "FF00FF"),
    ("white", "FFFFFF"),
    ("silver", "C0C0C0"),
    ("grey", "808080"),
    ("black", "000000"),
    ("orange", "FFA500"),
    ("brown", "A52A2A"),
    ("maroon", "800000"),
    ("green", "008000"),
    ("olive", "808000"),
    ("navy", "000080"),
    ("teal", "008080"),
    ("aqua", "00FFFF"),
    ("magenta", "FF00FF"),
];

/// Check if `name` is one of the [`LITERAL_COLORS`] (case-sensitive).
pub fn is_literal_color(name: &str) -> bool {
    LITERAL_COLORS.iter().any(|(n, _)| *n == name)
}

/// Resolves `{name}` object references.
pub trait ObjectLookup {
    fn find_object(&mut self, name: &str) -> Option<Entity>;
}

/// Finds the first entity whose [`Name`] matches exactly.
impl ObjectLookup for World {
    fn find_object(&mut self, name: &str) -> Option<Entity> {
        let mut query = self.query::<(Entity, &Name)>();
        query
            .iter(self)
            .find(|(_, n)| n.as_str() == name)
            .map(|(entity, _)| entity)
    }
}

impl ObjectLookup for HashMap<String, Entity> {
    fn find_object(&mut self, name: &str) -> Option<Entity> {
        self.get(name).copied()
    }
}

/// A lookup that never finds anything.
impl ObjectLookup for () {
    fn find_object(&mut self, _name: &str) -> Option<Entity> {
        None
    }
}

/// State shared by converters while one parameter string is parsed.
pub struct ConvertContext<'a> {
    lookup: &'a mut dyn ObjectLookup,
    warnings: Vec<String>,
}

impl<'a> ConvertContext<'a> {
    pub fn new(lookup: &'a mut dyn ObjectLookup) -> Self {
        Self {
            lookup,
            warnings: Vec::new(),
        }
    }

    /// Record a non-fatal problem.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn find_object(&mut self, name: &str) -> Option<Entity> {
        self.lookup.find_object(name)
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

/// One literal syntax.
pub trait Converter: Send + Sync {
    /// Short name, used for diagnostics and order checks.
    fn name(&self) -> &'static str;

    /// Recognize a token at the start of `input`.
    ///
    /// Returns the token and the unconsumed rest. The token must end at
    /// whitespace or at the end of `input`.
    fn recognize<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)>;

    /// Decode a token previously returned by [`recognize`](Self::recognize).
    fn convert(&self, token: &str, ctx: &mut ConvertContext) -> Result<Value, ConversionError>;
}

/// Accept `input[..len]` as a token only if it ends at a boundary.
fn split_at_boundary(input: &str, len: usize) -> Option<(&str, &str)> {
    let (token, rest) = input.split_at(len);
    match rest.chars().next() {
        None => Some((token, rest)),
        Some(c) if c.is_whitespace() => Some((token, rest)),
        Some(_) => None,
    }
}

fn match_prefix<'a>(re: &Regex, input: &'a str) -> Option<(&'a str, &'a str)> {
    let m = re.find(input)?;
    split_at_boundary(input, m.end())
}

const NUMBER: &str = r"-?[0-9]+(?:\.[0-9]+)?";

/// `^{prefix}(n, n, ...)` with `arity` components.
fn bracket_pattern(prefix: &str, arity: usize) -> String {
    let component = format!(r"\s*{NUMBER}\s*");
    let rest = vec![component.as_str(); arity].join(",");
    format!(r"^{prefix}\({rest}\)")
}

static NULL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[Nn]ull").unwrap());
static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?[0-9]+\.[0-9]+").unwrap());
static BOOL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:[Tt]rue|[Ff]alse)").unwrap());
static CHAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^'.'").unwrap());
static INT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?[0-9]+").unwrap());
static HEX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]+").unwrap());
static IDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*").unwrap());
static COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(NUMBER).unwrap());

static VEC2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(&bracket_pattern("", 2)).unwrap());
static VEC3_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(&bracket_pattern("", 3)).unwrap());
static VEC4_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(&bracket_pattern("", 4)).unwrap());
static RGB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(&bracket_pattern("rgb", 3)).unwrap());
static RGBA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(&bracket_pattern("rgba", 4)).unwrap());

/// `null` / `Null`.
pub struct NullConverter;

impl Converter for NullConverter {
    fn name(&self) -> &'static str {
        "null"
    }

    fn recognize<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        match_prefix(&NULL_RE, input)
    }

    fn convert(&self, _token: &str, _ctx: &mut ConvertContext) -> Result<Value, ConversionError> {
        Ok(Value::Null)
    }
}

pub struct FloatConverter;

impl Converter for FloatConverter {
    fn name(&self) -> &'static str {
        "float"
    }

    fn recognize<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        match_prefix(&FLOAT_RE, input)
    }

    fn convert(&self, token: &str, _ctx: &mut ConvertContext) -> Result<Value, ConversionError> {
        parse_component(token, ValueType::Float).map(Value::Float)
    }
}

/// Double-quoted string; `\"` and `\\` are unescaped.
pub struct StringConverter;

impl Converter for StringConverter {
    fn name(&self) -> &'static str {
        "string"
    }

    fn recognize<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        let mut chars = input.char_indices();
        if !matches!(chars.next(), Some((_, '"'))) {
            return None;
        }
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                // An unescaped quote always closes; anything glued to it fails the token.
                '"' => return split_at_boundary(input, i + 1),
                _ => {}
            }
        }
        None
    }

    fn convert(&self, token: &str, _ctx: &mut ConvertContext) -> Result<Value, ConversionError> {
        let inner = &token[1..token.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some(escaped @ ('"' | '\\')) => out.push(escaped),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => out.push('\\'),
                }
            } else {
                out.push(c);
            }
        }
        Ok(Value::String(out))
    }
}

pub struct BoolConverter;

impl Converter for BoolConverter {
    fn name(&self) -> &'static str {
        "bool"
    }

    fn recognize<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        match_prefix(&BOOL_RE, input)
    }

    fn convert(&self, token: &str, _ctx: &mut ConvertContext) -> Result<Value, ConversionError> {
        Ok(Value::Bool(token.eq_ignore_ascii_case("true")))
    }
}

pub struct CharConverter;

impl Converter for CharConverter {
    fn name(&self) -> &'static str {
        "char"
    }

    fn recognize<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        match_prefix(&CHAR_RE, input)
    }

    fn convert(&self, token: &str, _ctx: &mut ConvertContext) -> Result<Value, ConversionError> {
        token
            .chars()
            .nth(1)
            .map(Value::Char)
            .ok_or_else(|| ConversionError::Malformed {
                token: token.to_string(),
                ty: ValueType::Char,
            })
    }
}

pub struct IntConverter;

impl Converter for IntConverter {
    fn name(&self) -> &'static str {
        "int"
    }

    fn recognize<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        match_prefix(&INT_RE, input)
    }

    fn convert(&self, token: &str, _ctx: &mut ConvertContext) -> Result<Value, ConversionError> {
        token
            .parse::<i32>()
            .map(Value::Int)
            .map_err(|_| ConversionError::OutOfRange {
                token: token.to_string(),
                ty: ValueType::Int,
            })
    }
}

fn parse_component(token: &str, ty: ValueType) -> Result<f32, ConversionError> {
    match token.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(ConversionError::OutOfRange {
            token: token.to_string(),
            ty,
        }),
        Err(_) => Err(ConversionError::Malformed {
            token: token.to_string(),
            ty,
        }),
    }
}

fn components(token: &str, ty: ValueType) -> Result<Vec<f32>, ConversionError> {
    COMPONENT_RE
        .find_iter(token)
        .map(|m| parse_component(m.as_str(), ty))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BracketKind {
    Vec2,
    Vec3,
    Vec4,
    Rgb,
    Rgba,
}

/// Parenthesized numeric tuples: vectors and `rgb(..)`/`rgba(..)` colors.
pub struct BracketConverter {
    kind: BracketKind,
}

impl BracketConverter {
    pub fn vec2() -> Self {
        Self { kind: BracketKind::Vec2 }
    }

    pub fn vec3() -> Self {
        Self { kind: BracketKind::Vec3 }
    }

    pub fn vec4() -> Self {
        Self { kind: BracketKind::Vec4 }
    }

    pub fn rgb() -> Self {
        Self { kind: BracketKind::Rgb }
    }

    pub fn rgba() -> Self {
        Self { kind: BracketKind::Rgba }
    }

    fn regex(&self) -> &'static Regex {
        match self.kind {
            BracketKind::Vec2 => &*VEC2_RE,
            BracketKind::Vec3 => &*VEC3_RE,
            BracketKind::Vec4 => &*VEC4_RE,
            BracketKind::Rgb => &*RGB_RE,
            BracketKind::Rgba => &*RGBA_RE,
        }
    }

    fn value_type(&self) -> ValueType {
        match self.kind {
            BracketKind::Vec2 => ValueType::Vec2,
            BracketKind::Vec3 => ValueType::Vec3,
            BracketKind::Vec4 => ValueType::Vec4,
            BracketKind::Rgb | BracketKind::Rgba => ValueType::Color,
        }
    }
}

impl Converter for BracketConverter {
    fn name(&self) -> &'static str {
        match self.kind {
            BracketKind::Vec2 => "vec2",
            BracketKind::Vec3 => "vec3",
            BracketKind::Vec4 => "vec4",
            BracketKind::Rgb => "rgb",
            BracketKind::Rgba => "rgba",
        }
    }

    fn recognize<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        match_prefix(self.regex(), input)
    }

    fn convert(&self, token: &str, _ctx: &mut ConvertContext) -> Result<Value, ConversionError> {
        let ty = self.value_type();
        let c = components(token, ty)?;
        let malformed = || ConversionError::Malformed {
            token: token.to_string(),
            ty,
        };
        Ok(match (self.kind, c.as_slice()) {
            (BracketKind::Vec2, [x, y]) => Value::Vec2(Vec2::new(*x, *y)),
            (BracketKind::Vec3, [x, y, z]) => Value::Vec3(Vec3::new(*x, *y, *z)),
            (BracketKind::Vec4, [x, y, z, w]) => Value::Vec4(Vec4::new(*x, *y, *z, *w)),
            (BracketKind::Rgb, [r, g, b]) => Value::Color(Srgba::new(*r, *g, *b, 1.0)),
            (BracketKind::Rgba, [r, g, b, a]) => Value::Color(Srgba::new(*r, *g, *b, *a)),
            _ => return Err(malformed()),
        })
    }
}

/// `#RRGGBB`, `#RRGGBBAA` or one of the [`LITERAL_COLORS`].
pub struct HtmlColorConverter;

impl Converter for HtmlColorConverter {
    fn name(&self) -> &'static str {
        "html"
    }

    fn recognize<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        if let Some(m) = HEX_RE.find(input) {
            let digits = m.len() - 1;
            return if digits == 6 || digits == 8 {
                split_at_boundary(input, m.end())
            } else {
                None
            };
        }
        let word_len = input.find(char::is_whitespace).unwrap_or(input.len());
        if is_literal_color(&input[..word_len]) {
            Some(input.split_at(word_len))
        } else {
            None
        }
    }

    fn convert(&self, token: &str, _ctx: &mut ConvertContext) -> Result<Value, ConversionError> {
        let hex = LITERAL_COLORS
            .iter()
            .find(|(name, _)| *name == token)
            .map_or(token, |(_, hex)| *hex);
        Srgba::hex(hex)
            .map(Value::Color)
            .map_err(|_| ConversionError::Malformed {
                token: token.to_string(),
                ty: ValueType::Color,
            })
    }
}

/// `{name}`, looked up through the context's [`ObjectLookup`].
///
/// The token closes at the first `}` that is followed by a boundary, so
/// braces inside the name are kept: `{a{b}c}` names `a{b}c`.
pub struct ObjectConverter;

impl Converter for ObjectConverter {
    fn name(&self) -> &'static str {
        "object"
    }

    fn recognize<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        if !input.starts_with('{') {
            return None;
        }
        input
            .char_indices()
            .skip(2)
            .take_while(|(_, c)| *c != '\n')
            .filter(|(_, c)| *c == '}')
            .find_map(|(i, _)| split_at_boundary(input, i + 1))
    }

    fn convert(&self, token: &str, ctx: &mut ConvertContext) -> Result<Value, ConversionError> {
        let name = &token[1..token.len() - 1];
        match ctx.find_object(name) {
            Some(entity) => Ok(Value::Object(entity)),
            None => {
                ctx.warn(format!("No object named '{name}' could be found"));
                Ok(Value::Null)
            }
        }
    }
}

/// Bare identifiers naming console variables.
pub struct VariableConverter;

impl VariableConverter {
    /// Recognize a whole string as a variable identifier.
    pub fn parse_identifier(input: &str) -> Option<VariableName> {
        match VariableConverter.recognize(input) {
            Some((token, rest)) if rest.is_empty() => Some(VariableName::new(token)),
            _ => None,
        }
    }
}

impl Converter for VariableConverter {
    fn name(&self) -> &'static str {
        "variable"
    }

    fn recognize<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        let (token, rest) = match_prefix(&IDENT_RE, input)?;
        validate_identifier(token).ok()?;
        Some((token, rest))
    }

    fn convert(&self, token: &str, _ctx: &mut ConvertContext) -> Result<Value, ConversionError> {
        Ok(Value::Variable(VariableName::new(token)))
    }
}

/// Ordered list of converters. The first one that recognizes the input wins.
pub struct ConverterChain {
    converters: Vec<Box<dyn Converter>>,
}

impl Default for ConverterChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl ConverterChain {
    /// The built-in chain in its documented precedence order.
    pub fn standard() -> Self {
        Self::from_converters(vec![
            Box::new(NullConverter),
            Box::new(FloatConverter),
            Box::new(StringConverter),
            Box::new(BoolConverter),
            Box::new(CharConverter),
            Box::new(IntConverter),
            Box::new(BracketConverter::vec2()),
            Box::new(BracketConverter::vec3()),
            Box::new(BracketConverter::vec4()),
            Box::new(BracketConverter::rgb()),
            Box::new(BracketConverter::rgba()),
            Box::new(HtmlColorConverter),
            Box::new(ObjectConverter),
            Box::new(VariableConverter),
        ])
    }

    /// Build a chain with a custom order.
    pub fn from_converters(converters: Vec<Box<dyn Converter>>) -> Self {
        Self { converters }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.converters.iter().map(|c| c.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Converter> {
        self.converters.iter().map(|c| c.as_ref())
    }

    pub fn into_converters(self) -> Vec<Box<dyn Converter>> {
        self.converters
    }

    /// Convert a token at the start of `remaining`.
    ///
    /// Returns the value and the number of bytes consumed, `Ok(None)` if no
    /// converter recognized anything.
    pub fn try_convert_prefix(
        &self,
        remaining: &str,
        ctx: &mut ConvertContext,
    ) -> Result<Option<(Value, usize)>, ConversionError> {
        for converter in &self.converters {
            if let Some((token, _rest)) = converter.recognize(remaining) {
                let value = converter.convert(token, ctx)?;
                return Ok(Some((value, token.len())));
            }
        }
        Ok(None)
    }
}
