//! Error types for parsing, resolving and invoking console commands.
//!
//! Every error is terminal for the command line that produced it only.
//! [`run_command`](crate::core::run_command) logs them and the console keeps going.

use thiserror::Error;

use super::ValueType;

/// A converter recognized a token but could not produce a value from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("'{token}' is out of range for {ty}")]
    OutOfRange { token: String, ty: ValueType },
    #[error("'{token}' is not a valid {ty}")]
    Malformed { token: String, ty: ValueType },
}

/// The parameter string could not be turned into values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No converter recognized the remaining text.
    #[error("'{remainder}' could not be resolved to a value, one of the parameters may be malformed")]
    Unrecognized { remainder: String },
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// No single overload could be picked for the parsed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error(
        "Unable to run '{command}': the parameters may be formatted incorrectly, \
         or their number does not match any overload"
    )]
    NoMatch { command: String },
    #[error("Unable to run '{command}': ambiguous between overloads ({})", .candidates.join("; "))]
    Ambiguous {
        command: String,
        /// Signatures of the tied overloads, sorted by declared parameter types.
        candidates: Vec<String>,
    },
}

/// Failure while binding variables or running the handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    #[error("Variable '{0}' has not been set, variables cannot be used before they are set")]
    UnboundVariable(String),
    #[error("{message}{}", .cause.as_ref().map(|c| format!(" | {c}")).unwrap_or_default())]
    HandlerFault {
        command: String,
        message: String,
        cause: Option<String>,
    },
    #[error("No handler registered for '{0}'")]
    MissingHandler(String),
}

impl InvocationError {
    /// Build a handler fault from an error and the first cause in its chain.
    pub fn fault(command: &str, err: &anyhow::Error) -> Self {
        InvocationError::HandlerFault {
            command: command.to_string(),
            message: err.to_string(),
            cause: err.chain().nth(1).map(ToString::to_string),
        }
    }
}

/// Everything that can end a command line early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("Unable to run command '{0}': no such command exists")]
    UnknownCommand(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}

impl From<ConversionError> for ConsoleError {
    fn from(err: ConversionError) -> Self {
        ConsoleError::Parse(ParseError::Conversion(err))
    }
}

/// Why an identifier can't name a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedKind {
    Null,
    Boolean,
    Color,
}

impl std::fmt::Display for ReservedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ReservedKind::Null => "the null keyword",
            ReservedKind::Boolean => "a boolean constant",
            ReservedKind::Color => "a color literal",
        })
    }
}

/// Variable store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    #[error("'{name}' is not a valid variable name")]
    InvalidName { name: String },
    #[error("'{name}' cannot be used as a variable name, it is {kind}")]
    Reserved { name: String, kind: ReservedKind },
    #[error("'{0}' has not been set")]
    Unbound(String),
}

/// A handler asked for an argument it didn't get.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("missing argument {index}")]
    Missing { index: usize },
    #[error("argument {index} is {found}, expected {expected}")]
    TypeMismatch {
        index: usize,
        expected: ValueType,
        found: &'static str,
    },
}

/// A command declaration was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("'{0}' is not a valid command name")]
    InvalidName(String),
    #[error("cannot register '{0}' after commands have started running")]
    Frozen(String),
}
