//! An overload-resolving developer console for Bevy.
//!
//! Type a command line, get typed arguments: the console parses each
//! parameter as a literal (numbers, strings, vectors, colors, `{object}`
//! references, variables), picks the registered overload whose declared
//! parameter types fit best and runs it with access to the `World`.
//!
//! - **ConCommand**: command overloads with typed parameters
//! - **Console**: unified system parameter for registration and suggestions
//! - **Variables**: `set`, `unset` and `peek` store values for later lines
//! - **Suggestions**: edit-distance command matching and overload listings
//!
//! # Features
//!
//! - `terminal`: stdin/stdout backend for headless apps
//! - `persist`: RON persistence for [`ConsoleConfig`]
//! - `full`: terminal + persist
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_console_overloads::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ConsolePlugin::default())
//!         .add_systems(Startup, setup_console)
//!         .run();
//! }
//!
//! fn setup_console(mut console: Console) {
//!     let _ = console.register_cmd(
//!         ConCommand::new("gravity", |args, world| {
//!             let (x, y, z): (f32, f32, f32) = (args.get(0)?, args.get(1)?, args.get(2)?);
//!             world.resource_mut::<ConsoleLog>().success(format!("gravity set to ({x}, {y}, {z})"));
//!             Ok(())
//!         })
//!         .arg::<f32>("x")
//!         .arg::<f32>("y")
//!         .arg::<f32>("z")
//!         .description("Sets the gravitational force"),
//!     );
//!
//!     console.run("gravity 0 -9.8 0");
//! }
//! ```

use bevy::prelude::*;

pub mod config;
pub mod core;

// Terminal backend (feature-gated)
#[cfg(feature = "terminal")]
pub mod terminal;

// Persistence module (feature-gated)
#[cfg(feature = "persist")]
pub mod persist;

pub use config::ConsoleConfig;
pub use crate::core::{
    ArgumentParser, CommandArgs, CommandHandler, CommandHandlers, CommandHistory, CommandMatch,
    CommandRegistry, ConCommand, Console, ConsoleError, ConsoleEventsPlugin, ConsoleInputEvent,
    ConsoleLog, ConsoleOutputEvent, ConsoleOutputLevel, ConsoleRef, FromValue, Suggestions, Value,
    ValueType, VariableName, VariableStore, execute_line, run_command,
};

#[cfg(feature = "persist")]
pub use persist::{ConfigError, ConfigPath};

#[cfg(feature = "terminal")]
pub use terminal::{TerminalConfig, TerminalPlugin};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::core::{
        CommandArgs, ConCommand, Console, ConsoleInputEvent, ConsoleLog, ConsoleOutputEvent,
        ConsoleOutputLevel, ConsoleRef, FromValue, Suggestions, Value, ValueType, VariableName,
    };
    pub use crate::{ConsoleConfig, ConsolePlugin};
}

/// Main console plugin.
///
/// # Configuration
///
/// ```ignore
/// ConsolePlugin {
///     config: ConsoleConfig {
///         max_history: 50,
///         ..default()
///     },
/// }
/// ```
#[derive(Default)]
pub struct ConsolePlugin {
    pub config: ConsoleConfig,
}

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(CommandHistory::new(self.config.max_history))
            .init_resource::<CommandRegistry>()
            .init_resource::<CommandHandlers>()
            .init_resource::<VariableStore>()
            .init_resource::<ArgumentParser>()
            .init_resource::<ConsoleLog>()
            .init_resource::<PendingCommands>()
            .add_plugins(ConsoleEventsPlugin);

        app.add_systems(Startup, register_builtin_commands);

        // 1. collect_console_input: queue submitted lines
        // 2. execute_pending_commands: run them with exclusive World access
        // 3. send_pending_outputs: publish the console log
        app.add_systems(
            Update,
            (
                collect_console_input,
                execute_pending_commands,
                send_pending_outputs,
            )
                .chain(),
        );

        #[cfg(feature = "persist")]
        {
            app.init_resource::<persist::ConfigPath>()
                .add_systems(Startup, persist::load_config_on_startup);
        }

        #[cfg(feature = "terminal")]
        {
            app.add_plugins(terminal::TerminalPlugin);
        }
    }
}

/// Register a command in both registry and handlers, logging refusals.
pub(crate) fn register(registry: &mut CommandRegistry, handlers: &mut CommandHandlers, cmd: ConCommand) {
    match registry.register(cmd) {
        Ok((id, handler)) => handlers.register(id, handler),
        Err(err) => warn!("Console: skipping command declaration: {err}"),
    }
}

/// Register `help`, `set`, `unset` and `peek`.
pub fn register_builtins(registry: &mut CommandRegistry, handlers: &mut CommandHandlers) {
    register(
        registry,
        handlers,
        ConCommand::new("help", |_, world| {
            let lines: Vec<String> = world
                .resource::<CommandRegistry>()
                .commands()
                .map(|cmd| {
                    let help = match cmd.help_text() {
                        "" => "No help text provided",
                        text => text,
                    };
                    format!("{} - {}", cmd.full_name(), help)
                })
                .collect();

            let mut log = world.resource_mut::<ConsoleLog>();
            log.success("Displaying a list of available commands");
            for line in lines {
                log.info(line);
            }
            Ok(())
        })
        .description("Displays a list of available commands"),
    );

    register(
        registry,
        handlers,
        ConCommand::new("set", |args, world| {
            let name: VariableName = args.get(0)?;
            let value: Value = args.get(1)?;
            let message = format!("Variable '{name}' has been set to value '{value}'");
            world.resource_mut::<VariableStore>().set(name, value)?;
            world.resource_mut::<ConsoleLog>().success(message);
            Ok(())
        })
        .arg::<VariableName>("name")
        .arg::<Value>("value")
        .description("Set a value that can be used again later"),
    );

    register(
        registry,
        handlers,
        ConCommand::new("unset", |args, world| {
            let name: VariableName = args.get(0)?;
            if world.resource_mut::<VariableStore>().unset(name.as_str()).is_err() {
                anyhow::bail!("Unable to remove variable '{name}', since it was never set");
            }
            world
                .resource_mut::<ConsoleLog>()
                .success(format!("Successfully removed variable '{name}'"));
            Ok(())
        })
        .arg::<VariableName>("name")
        .description("Remove a previously set value"),
    );

    register(
        registry,
        handlers,
        ConCommand::new("peek", |args, world| {
            let name: VariableName = args.get(0)?;
            let value = world.resource::<VariableStore>().get(name.as_str())?.to_string();
            world.resource_mut::<ConsoleLog>().info(value);
            Ok(())
        })
        .arg::<VariableName>("name")
        .description("Logs the contents of a variable to the console"),
    );

    #[cfg(feature = "persist")]
    persist::register_persist_commands(registry, handlers);
}

fn register_builtin_commands(mut registry: ResMut<CommandRegistry>, mut handlers: ResMut<CommandHandlers>) {
    register_builtins(&mut registry, &mut handlers);
}

/// Command lines waiting for the execution system.
#[derive(Resource, Default, Debug)]
pub struct PendingCommands {
    queue: Vec<String>,
}

impl PendingCommands {
    pub fn push(&mut self, line: impl Into<String>) {
        self.queue.push(line.into());
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// System that queues submitted command lines.
fn collect_console_input(mut input_events: MessageReader<ConsoleInputEvent>, mut pending: ResMut<PendingCommands>) {
    for event in input_events.read() {
        pending.push(event.command.clone());
    }
}

/// Exclusive system that runs queued lines, in order, with full World access.
fn execute_pending_commands(world: &mut World) {
    let queue = std::mem::take(&mut world.resource_mut::<PendingCommands>().queue);
    for line in queue {
        run_command(world, &line);
    }
}

/// System that publishes the console log as output messages.
fn send_pending_outputs(mut log: ResMut<ConsoleLog>, mut output_events: MessageWriter<ConsoleOutputEvent>) {
    if log.is_empty() {
        return;
    }
    for output in log.drain() {
        output_events.write(output);
    }
}
