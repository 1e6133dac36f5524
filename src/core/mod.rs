//! Core console engine.
//!
//! This module provides the building blocks:
//! - [`ConverterChain`] - ordered literal recognizers turning text into [`Value`]s
//! - [`ArgumentParser`] - consumes a parameter string with the chain
//! - [`CommandRegistry`] - overloads keyed by full command name
//! - [`resolve`] - scores overloads against parsed values
//! - [`VariableStore`] and [`CommandHistory`]
//! - [`run_command`] - the whole pipeline for one line, reporting to [`ConsoleLog`]
//! - [`Console`] - unified system parameter for host systems

mod concommand;
mod console;
mod converters;
mod error;
mod events;
mod executor;
mod history;
mod log;
mod matcher;
mod parser;
mod registry;
mod resolver;
mod value;
mod variables;

pub use concommand::{
    CommandArgs, CommandDescriptor, CommandHandler, ConCommand, ParamSpec, is_valid_command_name,
};
pub use console::{Console, ConsoleRef};
pub use converters::{
    BoolConverter, BracketConverter, CharConverter, ConvertContext, Converter, ConverterChain,
    FloatConverter, HtmlColorConverter, IntConverter, LITERAL_COLORS, NullConverter,
    ObjectConverter, ObjectLookup, StringConverter, VariableConverter, is_literal_color,
};
pub use error::{
    ArgumentError, ConsoleError, ConversionError, InvocationError, ParseError, RegistrationError,
    ReservedKind, ResolutionError, VariableError,
};
pub use events::{ConsoleEventsPlugin, ConsoleInputEvent, ConsoleOutputEvent, ConsoleOutputLevel};
pub use executor::{bind_variables, execute_line, run_command};
pub use history::{CommandHistory, DEFAULT_HISTORY_CAPACITY};
pub use log::ConsoleLog;
pub use matcher::{CommandMatch, MATCH_THRESHOLD, edit_distance, rank_candidates};
pub use parser::{ArgumentParser, ParsedArgs, split_command_line};
pub use registry::{CommandHandlers, CommandRegistry, Suggestions};
pub use resolver::{resolve, score_overload};
pub use value::{FromValue, Value, ValueType, VariableName};
pub use variables::{VariableStore, validate_identifier};
