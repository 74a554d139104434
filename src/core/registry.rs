//! Command registry.
//!
//! Central storage for command specs, keyed by lowercase name.

use std::collections::HashMap;

use bevy::prelude::*;

use super::{CommandSpec, ConCommand, ConsoleError};

/// Central registry for console commands.
///
/// Names are case-insensitive and unique: registering a taken name fails and
/// leaves the existing command untouched.
///
/// # Examples
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
///
/// registry.register(ConCommand::new("spawn", |args, world| {
///     // ...
/// })
/// .help("Spawn an entity")
/// .params("$s $i"))?;
///
/// assert!(registry.contains("SPAWN"));
/// ```
#[derive(Resource, Default)]
pub struct CommandRegistry {
    commands: HashMap<Box<str>, CommandSpec>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command.
    ///
    /// Returns [`ConsoleError::DuplicateCommand`] if the name is taken.
    pub fn register(&mut self, cmd: ConCommand) -> Result<&CommandSpec, ConsoleError> {
        let spec = cmd.into_spec();
        let name: Box<str> = spec.name().into();

        if self.commands.contains_key(&name) {
            warn!("Console: Refusing to overwrite existing command '{}'", name);
            return Err(ConsoleError::DuplicateCommand { name });
        }

        debug!("Console: Registered command '{}' ({})", name, spec.signature());
        Ok(self.commands.entry(name).or_insert(spec))
    }

    /// Remove a command, returning its spec if it was registered.
    pub fn unregister(&mut self, name: &str) -> Option<CommandSpec> {
        let removed = self.commands.remove(name.to_lowercase().as_str());
        if removed.is_some() {
            debug!("Console: Unregistered command '{}'", name);
        }
        removed
    }

    /// Look up a command by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name.to_lowercase().as_str())
    }

    /// Check if a command exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get the number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over all commands in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.values()
    }

    /// All commands sorted by name.
    pub fn sorted(&self) -> Vec<&CommandSpec> {
        let mut specs: Vec<_> = self.commands.values().collect();
        specs.sort_by(|a, b| a.name().cmp(b.name()));
        specs
    }

    /// `(name, help)` pairs sorted by name.
    pub fn help_entries(&self) -> Vec<(&str, &'static str)> {
        self.sorted()
            .into_iter()
            .map(|spec| (spec.name(), spec.help()))
            .collect()
    }

    /// `(name, help)` pairs whose name contains `needle`, sorted by name.
    ///
    /// Matching is plain, case-sensitive substring containment.
    pub fn search(&self, needle: &str) -> Vec<(&str, &'static str)> {
        self.help_entries()
            .into_iter()
            .filter(|(name, _)| name.contains(needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(name: &'static str) -> ConCommand {
        ConCommand::new(name, |_, _| {})
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = CommandRegistry::new();

        registry
            .register(noop("test").help("Test command").params("$s $i"))
            .unwrap();

        assert!(registry.contains("test"));
        let spec = registry.get("test").unwrap();
        assert_eq!(spec.help(), "Test command");
        assert_eq!(spec.params().len(), 2);
    }

    #[test]
    fn test_registry_case_insensitive() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("Spawn")).unwrap();

        assert!(registry.contains("spawn"));
        assert!(registry.contains("SPAWN"));
        assert_eq!(registry.get("sPaWn").unwrap().name(), "spawn");
    }

    #[test]
    fn test_duplicate_detection() {
        let mut registry = CommandRegistry::new();

        registry.register(noop("test").help("original")).unwrap();

        let err = registry.register(noop("TEST").help("replacement")).unwrap_err();
        assert_eq!(err, ConsoleError::DuplicateCommand { name: "test".into() });

        // Original registration is untouched
        assert_eq!(registry.get("test").unwrap().help(), "original");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("temp")).unwrap();

        assert!(registry.unregister("TEMP").is_some());
        assert!(!registry.contains("temp"));
        assert!(registry.unregister("temp").is_none());

        // Name is free again
        assert!(registry.register(noop("temp")).is_ok());
    }

    #[test]
    fn test_help_entries_sorted() {
        let mut registry = CommandRegistry::new();
        for name in ["test", "qqq", "help", "findcmd"] {
            registry.register(noop(name)).unwrap();
        }

        let names: Vec<_> = registry.help_entries().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["findcmd", "help", "qqq", "test"]);
    }

    #[test]
    fn test_registry_search() {
        let mut registry = CommandRegistry::new();
        for name in ["help", "findcmd", "test", "qqq"] {
            registry.register(noop(name)).unwrap();
        }

        let names: Vec<_> = registry.search("e").into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["help", "test"]);

        assert!(registry.search("E").is_empty());
        assert_eq!(registry.search("").len(), 4);
    }
}
