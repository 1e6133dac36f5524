//! Running a command line against the world.
//!
//! `line -> name + params -> values -> overload -> bound values -> handler`

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use bevy::prelude::*;

use super::{
    ArgumentParser, CommandArgs, CommandHandlers, CommandHistory, CommandRegistry, ConsoleError,
    ConsoleLog, InvocationError, Value, ValueType, VariableStore, split_command_line,
};
use crate::config::ConsoleConfig;

/// Run one command line and report the outcome to [`ConsoleLog`].
///
/// The line is recorded in [`CommandHistory`] and echoed before it runs.
/// Errors are logged at error level and never escape. Blank lines are
/// ignored.
pub fn run_command(world: &mut World, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    world.resource_mut::<CommandHistory>().record(line);
    let symbol = world
        .get_resource::<ConsoleConfig>()
        .map_or(ConsoleConfig::default().execution_symbol, |c| c.execution_symbol);
    world
        .resource_mut::<ConsoleLog>()
        .command(format!("{symbol} {line}"));

    if let Err(err) = execute_line(world, line) {
        world.resource_mut::<ConsoleLog>().error(err.to_string());
    }
}

/// Parse, resolve and invoke `line`.
///
/// Warnings raised while parsing (unknown object names) are logged even if
/// the line fails later.
pub fn execute_line(world: &mut World, line: &str) -> Result<(), ConsoleError> {
    {
        let mut registry = world.resource_mut::<CommandRegistry>();
        if !registry.is_frozen() {
            registry.freeze();
        }
    }

    let (name, params) = split_command_line(line);
    if !world.resource::<CommandRegistry>().contains(name) {
        return Err(ConsoleError::UnknownCommand(name.to_string()));
    }

    let parsed = world.resource_scope(|world, parser: Mut<ArgumentParser>| parser.parse(params, world))?;
    if !parsed.warnings.is_empty() {
        let mut log = world.resource_mut::<ConsoleLog>();
        for warning in parsed.warnings {
            log.warning(warning);
        }
    }

    let (id, declared) = {
        let registry = world.resource::<CommandRegistry>();
        let variables = world.resource::<VariableStore>();
        let overload = registry.resolve(name, &parsed.values, variables)?;
        (overload.id(), overload.param_types().collect::<Vec<_>>())
    };

    let values = bind_variables(parsed.values, &declared, world.resource::<VariableStore>())?;
    invoke(world, name, line, id, &values)?;
    Ok(())
}

/// Replace variable placeholders with their stored values, except where the
/// parameter asks for the variable itself.
pub fn bind_variables(
    values: Vec<Value>,
    declared: &[ValueType],
    variables: &VariableStore,
) -> Result<Vec<Value>, InvocationError> {
    values
        .into_iter()
        .zip(declared)
        .map(|(value, ty)| match value {
            Value::Variable(name) if *ty != ValueType::Variable => variables
                .get(name.as_str())
                .cloned()
                .map_err(|_| InvocationError::UnboundVariable(name.to_string())),
            other => Ok(other),
        })
        .collect()
}

fn invoke(
    world: &mut World,
    name: &str,
    line: &str,
    id: usize,
    values: &[Value],
) -> Result<(), InvocationError> {
    world.resource_scope(|world, mut handlers: Mut<CommandHandlers>| {
        // Take the handler out so it can borrow the world.
        let handler = handlers
            .take(id)
            .ok_or_else(|| InvocationError::MissingHandler(name.to_string()))?;

        let args = CommandArgs::new(line, values);
        let result = panic::catch_unwind(AssertUnwindSafe(|| handler(&args, world)));

        // Always put the handler back, even after a panic.
        handlers.put(id, handler);

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(InvocationError::fault(name, &err)),
            Err(payload) => Err(InvocationError::HandlerFault {
                command: name.to_string(),
                message: format!("Command '{name}' panicked: {}", panic_message(&*payload)),
                cause: None,
            }),
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
