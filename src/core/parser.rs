//! Command line parsing.
//!
//! A line is a command name followed by a parameter string. The parameter
//! string is consumed left to right by the [`ConverterChain`].

use bevy::prelude::*;

use super::{ConvertContext, ConverterChain, ObjectLookup, ParseError, Value};

/// Split a line into its command name and the raw parameter string.
///
/// # Examples
///
/// ```
/// use bevy_console_overloads::core::split_command_line;
///
/// assert_eq!(split_command_line("gravity 0 -9.8 0"), ("gravity", " 0 -9.8 0"));
/// assert_eq!(split_command_line("  help  "), ("help", "  "));
/// assert_eq!(split_command_line(""), ("", ""));
/// ```
pub fn split_command_line(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    let end = line.find(char::is_whitespace).unwrap_or(line.len());
    line.split_at(end)
}

/// Values parsed from one parameter string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedArgs {
    pub values: Vec<Value>,
    /// Non-fatal problems, such as object references that found nothing.
    pub warnings: Vec<String>,
}

/// Turns parameter strings into typed values.
#[derive(Resource, Default)]
pub struct ArgumentParser {
    chain: ConverterChain,
}

impl ArgumentParser {
    pub fn new(chain: ConverterChain) -> Self {
        Self { chain }
    }

    #[inline]
    pub fn chain(&self) -> &ConverterChain {
        &self.chain
    }

    /// Parse every value in `params`.
    ///
    /// Stops at the first remainder no converter recognizes; nothing parsed
    /// before it is returned.
    pub fn parse(&self, params: &str, lookup: &mut dyn ObjectLookup) -> Result<ParsedArgs, ParseError> {
        let mut ctx = ConvertContext::new(lookup);
        let mut values = Vec::new();
        let mut rest = params;

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }
            match self.chain.try_convert_prefix(rest, &mut ctx)? {
                Some((value, consumed)) => {
                    values.push(value);
                    rest = &rest[consumed..];
                }
                None => {
                    return Err(ParseError::Unrecognized {
                        remainder: rest.to_string(),
                    });
                }
            }
        }

        Ok(ParsedArgs {
            values,
            warnings: ctx.into_warnings(),
        })
    }
}
