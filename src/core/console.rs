//! Unified console API for systems.
//!
//! The [`Console`] system parameter bundles the registry, handlers, variable
//! store and history behind one interface. Command lines submitted through
//! it run later in the frame, in the exclusive execution system.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::{
    CommandHandlers, CommandHistory, CommandMatch, CommandRegistry, ConCommand, ConsoleInputEvent,
    RegistrationError, Suggestions, Value, VariableError, VariableStore,
};
use crate::config::ConsoleConfig;

/// Unified console system parameter.
///
/// # Examples
///
/// ```ignore
/// fn setup_console(mut console: Console) {
///     console.register_cmd(
///         ConCommand::new("timescale", |args, world| {
///             let scale: f32 = args.get(0)?;
///             world.resource_mut::<Time<Virtual>>().set_relative_speed(scale);
///             Ok(())
///         })
///         .arg::<f32>("scale")
///         .description("Set the time scale"),
///     );
///
///     console.run("timescale 0.5");
/// }
/// ```
#[derive(SystemParam)]
pub struct Console<'w> {
    registry: ResMut<'w, CommandRegistry>,
    handlers: ResMut<'w, CommandHandlers>,
    variables: Res<'w, VariableStore>,
    history: ResMut<'w, CommandHistory>,
    config: Res<'w, ConsoleConfig>,
    input: MessageWriter<'w, ConsoleInputEvent>,
}

impl Console<'_> {
    /// Register a command overload, storing its handler.
    ///
    /// A refused declaration is logged and skipped.
    pub fn register_cmd(&mut self, cmd: ConCommand) -> Result<usize, RegistrationError> {
        match self.registry.register(cmd) {
            Ok((id, handler)) => {
                self.handlers.register(id, handler);
                Ok(id)
            }
            Err(err) => {
                warn!("Console: skipping command declaration: {err}");
                Err(err)
            }
        }
    }

    /// Queue a command line. It runs in this frame's execution pass if that
    /// pass has not happened yet, otherwise next frame.
    pub fn run(&mut self, line: impl Into<String>) {
        self.input.write(ConsoleInputEvent::new(line));
    }

    /// Command names close to `partial`, closest first.
    pub fn suggest_commands(&self, partial: &str) -> Vec<CommandMatch> {
        self.registry.suggest_commands(partial, self.config.match_threshold)
    }

    /// Signatures of every overload of `name`.
    pub fn suggest_overloads(&self, name: &str) -> Vec<String> {
        self.registry.suggest_overloads(name)
    }

    /// Suggestions for a partially typed line.
    pub fn suggestions(&self, input: &str) -> Suggestions {
        self.registry.suggest_for_input(input, self.config.match_threshold)
    }

    /// Best completion for a partial command name.
    pub fn complete(&self, partial: &str) -> Option<String> {
        complete(&self.registry, partial, self.config.match_threshold)
    }

    /// Step through history. Returns an empty string when history is empty.
    pub fn previous_command(&mut self, forward: bool) -> String {
        self.history.navigate(forward).unwrap_or_default().to_string()
    }

    /// Read a stored variable.
    pub fn variable(&self, name: &str) -> Result<&Value, VariableError> {
        self.variables.get(name)
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }
}

/// Read-only console system parameter.
///
/// Use this when you only need suggestions or variable values; it doesn't
/// block other systems from running in parallel.
#[derive(SystemParam)]
pub struct ConsoleRef<'w> {
    registry: Res<'w, CommandRegistry>,
    variables: Res<'w, VariableStore>,
    history: Res<'w, CommandHistory>,
    config: Res<'w, ConsoleConfig>,
}

impl ConsoleRef<'_> {
    pub fn suggest_commands(&self, partial: &str) -> Vec<CommandMatch> {
        self.registry.suggest_commands(partial, self.config.match_threshold)
    }

    pub fn suggest_overloads(&self, name: &str) -> Vec<String> {
        self.registry.suggest_overloads(name)
    }

    pub fn suggestions(&self, input: &str) -> Suggestions {
        self.registry.suggest_for_input(input, self.config.match_threshold)
    }

    pub fn complete(&self, partial: &str) -> Option<String> {
        complete(&self.registry, partial, self.config.match_threshold)
    }

    pub fn variable(&self, name: &str) -> Result<&Value, VariableError> {
        self.variables.get(name)
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }
}

fn complete(registry: &CommandRegistry, partial: &str, threshold: usize) -> Option<String> {
    if partial.is_empty() {
        return None;
    }
    registry
        .suggest_commands(partial, threshold)
        .into_iter()
        .next()
        .map(|m| m.full_name.into_string())
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;
    use bevy::ecs::system::RunSystemOnce;

    use super::*;

    fn world_with_commands() -> World {
        let mut world = World::new();
        world.init_resource::<CommandRegistry>();
        world.init_resource::<CommandHandlers>();
        world.init_resource::<VariableStore>();
        world.init_resource::<CommandHistory>();
        world.init_resource::<ConsoleConfig>();
        world.init_resource::<Messages<ConsoleInputEvent>>();

        world
            .run_system_once(|mut console: Console| {
                for name in ["gravity", "gravity-x", "help"] {
                    console
                        .register_cmd(ConCommand::new(name, |_, _| Ok(())).arg::<f32>("value"))
                        .unwrap();
                }
                assert!(console.register_cmd(ConCommand::new("bad name", |_, _| Ok(()))).is_err());
            })
            .unwrap();
        world
    }

    #[test]
    fn test_console_registers_and_suggests() {
        let mut world = world_with_commands();
        assert_eq!(world.resource::<CommandHandlers>().len(), 3);

        world
            .run_system_once(|console: ConsoleRef| {
                assert_eq!(console.complete("grav").as_deref(), Some("gravity"));
                assert_eq!(console.complete(""), None);
                assert_eq!(console.suggest_overloads("help"), vec!["help [value: float]".to_string()]);
                assert!(matches!(console.suggestions("gravity 1"), Suggestions::Overloads(_)));
            })
            .unwrap();
    }

    #[test]
    fn test_console_run_queues_input() {
        let mut world = world_with_commands();
        world
            .run_system_once(|mut console: Console| console.run("gravity 1"))
            .unwrap();

        let messages = world.resource::<Messages<ConsoleInputEvent>>();
        let mut cursor = messages.get_cursor();
        let lines: Vec<_> = cursor.read(messages).map(|e| e.command.clone()).collect();
        assert_eq!(lines, vec!["gravity 1".to_string()]);
    }

    #[test]
    fn test_previous_command() {
        let mut world = world_with_commands();
        {
            let mut history = world.resource_mut::<CommandHistory>();
            history.record("first");
            history.record("second");
        }
        world
            .run_system_once(|mut console: Console| {
                assert_eq!(console.previous_command(false), "second");
                assert_eq!(console.previous_command(true), "first");
                assert_eq!(console.previous_command(true), "first");
                assert_eq!(console.previous_command(false), "second");
            })
            .unwrap();
    }
}
