//! Console command (ConCommand) declarations.
//!
//! A ConCommand is one overload: a name, typed parameters and a handler.
//! Several ConCommands may share a name; the resolver picks one per call
//! from the parsed argument types.

use std::fmt::Write as _;
use std::sync::LazyLock;

use bevy::prelude::*;
use regex::Regex;

use super::{ArgumentError, FromValue, RegistrationError, Value, ValueType};

/// Arguments passed to a command handler, already typed and with variables
/// substituted.
#[derive(Debug, Clone, Copy)]
pub struct CommandArgs<'a> {
    raw: &'a str,
    values: &'a [Value],
}

impl<'a> CommandArgs<'a> {
    pub fn new(raw: &'a str, values: &'a [Value]) -> Self {
        Self { raw, values }
    }

    /// The command line as typed.
    #[inline]
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn value(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index)
    }

    /// Read argument `index` as `T`.
    ///
    /// Handlers are only called with values matching their declared
    /// parameters, so this fails only if a handler reads a type it did not
    /// declare.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T, ArgumentError> {
        let value = self.value(index).ok_or(ArgumentError::Missing { index })?;
        T::from_value(value).ok_or(ArgumentError::TypeMismatch {
            index,
            expected: T::TYPE,
            found: value.type_name(),
        })
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [Value] {
        self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Value> {
        self.values.iter()
    }
}

/// Type alias for command handler functions.
///
/// Handlers receive the resolved arguments and mutable access to the Bevy
/// world. Returning `Err` reports the error (and its first cause) to the
/// console; panics are caught and reported the same way.
pub type CommandHandler = Box<dyn Fn(&CommandArgs, &mut World) -> anyhow::Result<()> + Send + Sync>;

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: Box<str>,
    pub ty: ValueType,
}

/// Metadata for one registered overload.
///
/// The handler is stored separately in `CommandHandlers` under [`id`](Self::id).
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    pub(crate) id: usize,
    pub(crate) full_name: Box<str>,
    pub(crate) help_text: &'static str,
    pub(crate) params: Vec<ParamSpec>,
}

impl CommandDescriptor {
    /// Registry-wide overload id.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[inline]
    pub fn help_text(&self) -> &'static str {
        self.help_text
    }

    #[inline]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn param_types(&self) -> impl Iterator<Item = ValueType> + '_ {
        self.params.iter().map(|p| p.ty)
    }

    /// `name [param: type] ...`
    pub fn signature(&self) -> String {
        let mut out = self.full_name.to_string();
        for param in &self.params {
            let _ = write!(out, " [{}: {}]", param.name, param.ty);
        }
        out
    }

    /// Comma separated parameter type names, used to order diagnostics.
    pub fn type_key(&self) -> String {
        self.params
            .iter()
            .map(|p| p.ty.name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap());

/// Check a full name: dot separated segments of `[A-Za-z][A-Za-z0-9_-]*`.
pub fn is_valid_command_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(|segment| SEGMENT_RE.is_match(segment))
}

/// A console command overload with a handler.
///
/// # Examples
///
/// ```
/// use bevy::math::Vec3;
/// use bevy_console_overloads::core::ConCommand;
///
/// let cmd = ConCommand::new("gravity", |args, _world| {
///     let gravity: Vec3 = args.get(0)?;
///     println!("gravity is now {gravity}");
///     Ok(())
/// })
/// .group("physics")
/// .arg::<Vec3>("value")
/// .description("Set the gravity vector");
///
/// assert_eq!(cmd.full_name(), "physics.gravity");
/// ```
pub struct ConCommand {
    name: Box<str>,
    group: Option<Box<str>>,
    description: &'static str,
    params: Vec<ParamSpec>,
    handler: CommandHandler,
}

impl ConCommand {
    /// Create a new command with the given name and handler.
    pub fn new<F>(name: impl Into<Box<str>>, handler: F) -> Self
    where
        F: Fn(&CommandArgs, &mut World) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            group: None,
            description: "",
            params: Vec::new(),
            handler: Box::new(handler),
        }
    }

    pub fn description(mut self, desc: &'static str) -> Self {
        self.description = desc;
        self
    }

    /// Prefix the name with `group.`.
    pub fn group(mut self, group: impl Into<Box<str>>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Declare the next parameter with the type `T` reads as.
    pub fn arg<T: FromValue>(self, name: impl Into<Box<str>>) -> Self {
        self.param(name, T::TYPE)
    }

    /// Declare the next parameter with an explicit type.
    pub fn param(mut self, name: impl Into<Box<str>>, ty: ValueType) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            ty,
        });
        self
    }

    /// `group.name`, or just `name`.
    pub fn full_name(&self) -> String {
        match &self.group {
            Some(group) => format!("{group}.{}", self.name),
            None => self.name.to_string(),
        }
    }

    #[inline]
    pub fn get_description(&self) -> &'static str {
        self.description
    }

    #[inline]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Split into metadata and handler, validating the name.
    pub(crate) fn split(self, id: usize) -> Result<(CommandDescriptor, CommandHandler), RegistrationError> {
        let full_name = self.full_name();
        if !is_valid_command_name(&full_name) {
            return Err(RegistrationError::InvalidName(full_name));
        }
        Ok((
            CommandDescriptor {
                id,
                full_name: full_name.into(),
                help_text: self.description,
                params: self.params,
            },
            self.handler,
        ))
    }
}

impl std::fmt::Debug for ConCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConCommand")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("description", &self.description)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_args_typed_get() {
        let values = [Value::Float(1.5), Value::Int(2), Value::String("hi".into())];
        let args = CommandArgs::new("cmd 1.5 2 \"hi\"", &values);
        assert_eq!(args.len(), 3);
        assert_eq!(args.get::<f32>(0), Ok(1.5));
        assert_eq!(args.get::<f32>(1), Ok(2.0));
        assert_eq!(args.get::<String>(2), Ok("hi".to_string()));
        assert_eq!(args.get::<i32>(3), Err(ArgumentError::Missing { index: 3 }));
        assert_eq!(
            args.get::<bool>(0),
            Err(ArgumentError::TypeMismatch {
                index: 0,
                expected: ValueType::Bool,
                found: "float",
            })
        );
    }

    #[test]
    fn test_signature() {
        let cmd = ConCommand::new("gravity", |_, _| Ok(()))
            .arg::<f32>("x")
            .arg::<f32>("y")
            .arg::<f32>("z");
        let (desc, _) = cmd.split(0).unwrap();
        assert_eq!(desc.signature(), "gravity [x: float] [y: float] [z: float]");
        assert_eq!(desc.type_key(), "float,float,float");
    }

    #[test]
    fn test_group_prefixes_name() {
        let cmd = ConCommand::new("spawn", |_, _| Ok(())).group("world");
        assert_eq!(cmd.full_name(), "world.spawn");
    }

    #[test]
    fn test_invalid_names_rejected() {
        for name in ["", "1st", "has space", "trailing.", "a..b"] {
            let cmd = ConCommand::new(name, |_, _| Ok(()));
            assert!(
                matches!(cmd.split(0), Err(RegistrationError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(is_valid_command_name("set-fixed-delta-time"));
        assert!(is_valid_command_name("physics.gravity_x"));
    }
}
