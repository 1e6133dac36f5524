//! Command registry.
//!
//! Commands are keyed by full name; each name owns one or more overloads.
//! A `BTreeMap` keeps iteration sorted by name so listings and suggestion
//! ties are reproducible.

use std::collections::{BTreeMap, HashMap};

use bevy::prelude::*;

use super::{
    CommandDescriptor, CommandHandler, CommandMatch, ConCommand, RegistrationError,
    ResolutionError, Value, VariableStore, rank_candidates, resolve,
};

/// Stores command handlers separately from metadata.
///
/// This separation allows command handlers to access `World` (including
/// `CommandRegistry`) without borrow conflicts.
#[derive(Resource, Default)]
pub struct CommandHandlers {
    handlers: HashMap<usize, CommandHandler>,
}

impl CommandHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: usize, handler: CommandHandler) {
        self.handlers.insert(id, handler);
    }

    pub fn get(&self, id: usize) -> Option<&CommandHandler> {
        self.handlers.get(&id)
    }

    /// Take a handler temporarily for execution.
    ///
    /// Use `put` to return the handler after execution.
    pub fn take(&mut self, id: usize) -> Option<CommandHandler> {
        self.handlers.remove(&id)
    }

    /// Put a handler back after temporary removal.
    pub fn put(&mut self, id: usize, handler: CommandHandler) {
        self.handlers.insert(id, handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// What to show for the current input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions {
    /// The input names a command and moved on to its arguments.
    Overloads(Vec<String>),
    /// The input is still a (partial) command name.
    Commands(Vec<CommandMatch>),
}

/// Central registry of command overloads.
///
/// Built at startup. The first executed command line freezes it and later
/// registrations are refused.
#[derive(Resource, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<Box<str>, Vec<CommandDescriptor>>,
    next_id: usize,
    frozen: bool,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command overload's metadata.
    ///
    /// Returns the overload id and handler, which should be stored in
    /// [`CommandHandlers`].
    pub fn register(&mut self, cmd: ConCommand) -> Result<(usize, CommandHandler), RegistrationError> {
        if self.frozen {
            return Err(RegistrationError::Frozen(cmd.full_name()));
        }
        let (meta, handler) = cmd.split(self.next_id)?;
        let id = meta.id;
        self.next_id += 1;

        let overloads = self.commands.entry(meta.full_name.clone()).or_default();
        if overloads.iter().any(|o| o.param_types().eq(meta.param_types())) {
            bevy::log::warn!(
                "Console: '{}' already has an overload with parameters ({}), calls will be ambiguous",
                meta.full_name,
                meta.type_key()
            );
        }
        overloads.push(meta);
        Ok((id, handler))
    }

    /// Refuse further registrations.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// All overloads of `name`, in registration order.
    pub fn overloads(&self, name: &str) -> &[CommandDescriptor] {
        self.commands.get(name).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct command names.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// First-registered overload of every command, sorted by name.
    pub fn commands(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values().filter_map(|overloads| overloads.first())
    }

    /// Pick the overload of `name` that best matches `values`.
    pub fn resolve(
        &self,
        name: &str,
        values: &[Value],
        variables: &VariableStore,
    ) -> Result<&CommandDescriptor, ResolutionError> {
        resolve(name, self.overloads(name), values, variables)
    }

    /// Commands whose names are within `threshold` edits of `partial`,
    /// closest first.
    pub fn suggest_commands(&self, partial: &str, threshold: usize) -> Vec<CommandMatch> {
        rank_candidates(
            partial,
            self.commands().map(|c| (c.full_name(), c.help_text())),
            threshold,
        )
    }

    /// Rendered signatures of every overload of `name`.
    pub fn suggest_overloads(&self, name: &str) -> Vec<String> {
        self.overloads(name).iter().map(CommandDescriptor::signature).collect()
    }

    /// Overloads once a command name and a space have been typed,
    /// otherwise name suggestions.
    pub fn suggest_for_input(&self, input: &str, threshold: usize) -> Suggestions {
        match input.split_once(char::is_whitespace) {
            Some((name, _)) if !name.is_empty() => Suggestions::Overloads(self.suggest_overloads(name)),
            _ => Suggestions::Commands(self.suggest_commands(input, threshold)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MATCH_THRESHOLD, VariableName};

    fn noop(name: &str) -> ConCommand {
        ConCommand::new(name.to_string(), |_, _| Ok(()))
    }

    #[test]
    fn test_register_overloads() {
        let mut registry = CommandRegistry::new();
        let (a, _) = registry.register(noop("gravity").arg::<f32>("x")).unwrap();
        let (b, _) = registry.register(noop("gravity").arg::<Vec3>("v")).unwrap();

        assert_ne!(a, b);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.overloads("gravity").len(), 2);
        assert!(registry.overloads("missing").is_empty());
    }

    #[test]
    fn test_frozen_registry_refuses() {
        let mut registry = CommandRegistry::new();
        registry.freeze();
        assert!(matches!(
            registry.register(noop("late")),
            Err(RegistrationError::Frozen(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_name_does_not_consume_entry() {
        let mut registry = CommandRegistry::new();
        assert!(registry.register(noop("bad name")).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_commands_sorted_and_first_registered() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("zeta").description("first")).unwrap();
        registry.register(noop("alpha")).unwrap();
        registry.register(noop("zeta").arg::<i32>("n").description("second")).unwrap();

        let listed: Vec<_> = registry.commands().map(|c| (c.full_name(), c.help_text())).collect();
        assert_eq!(listed, vec![("alpha", ""), ("zeta", "first")]);
    }

    #[test]
    fn test_suggest_commands_one_per_name() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("gravity").arg::<f32>("x")).unwrap();
        registry.register(noop("gravity").arg::<Vec3>("v")).unwrap();
        registry.register(noop("gravity-x").arg::<f32>("x")).unwrap();
        registry.register(noop("help")).unwrap();

        let names: Vec<_> = registry
            .suggest_commands("grvity", MATCH_THRESHOLD)
            .into_iter()
            .map(|m| m.full_name.to_string())
            .collect();
        assert_eq!(names, vec!["gravity", "gravity-x"]);
    }

    #[test]
    fn test_suggest_overloads() {
        let mut registry = CommandRegistry::new();
        registry
            .register(noop("gravity").arg::<f32>("x").arg::<f32>("y").arg::<f32>("z"))
            .unwrap();
        registry.register(noop("gravity").arg::<Vec3>("value")).unwrap();

        assert_eq!(
            registry.suggest_overloads("gravity"),
            vec![
                "gravity [x: float] [y: float] [z: float]".to_string(),
                "gravity [value: Vec3]".to_string(),
            ]
        );
        assert!(registry.suggest_overloads("nothing").is_empty());
    }

    #[test]
    fn test_suggest_for_input() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("peek").arg::<VariableName>("name")).unwrap();

        assert_eq!(
            registry.suggest_for_input("peek ", MATCH_THRESHOLD),
            Suggestions::Overloads(vec!["peek [name: Variable]".into()])
        );
        assert!(matches!(
            registry.suggest_for_input("pek", MATCH_THRESHOLD),
            Suggestions::Commands(matches) if matches.len() == 1
        ));
    }
}
