//! Console messages.
//!
//! - Host -> Core: command lines to run
//! - Core -> Host: log lines to display

use bevy::prelude::*;

/// A command line submitted to the console.
///
/// Lines are collected each frame and run in order.
///
/// # Examples
///
/// ```ignore
/// fn submit_command(mut input: MessageWriter<ConsoleInputEvent>) {
///     input.write(ConsoleInputEvent::new("gravity 0 -9.8 0"));
/// }
/// ```
#[derive(Message, Debug, Clone)]
pub struct ConsoleInputEvent {
    /// The raw command line.
    pub command: String,
}

impl ConsoleInputEvent {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

/// A line written to the console log.
///
/// # Examples
///
/// ```ignore
/// fn show_output(mut output: MessageReader<ConsoleOutputEvent>) {
///     for line in output.read() {
///         println!("[{:?}] {}", line.level, line.message);
///     }
/// }
/// ```
#[derive(Message, Debug, Clone, PartialEq)]
pub struct ConsoleOutputEvent {
    pub message: String,
    pub level: ConsoleOutputLevel,
}

/// Severity of a console log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsoleOutputLevel {
    #[default]
    Info,
    Warning,
    Error,
    /// A command completed and wants to say so.
    Success,
    /// Echo of the line that was run.
    Command,
}

impl ConsoleOutputLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "success",
            Self::Command => "command",
        }
    }
}

impl ConsoleOutputEvent {
    pub fn new(level: ConsoleOutputLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Success, message)
    }

    pub fn command(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Command, message)
    }
}

/// Registers the console messages.
pub struct ConsoleEventsPlugin;

impl Plugin for ConsoleEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleInputEvent>()
            .add_message::<ConsoleOutputEvent>();
    }
}
