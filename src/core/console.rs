//! Unified console API for systems.
//!
//! The [`Console`] system parameter bundles the registry, bus, history and
//! transcript behind one interface. Running a line needs exclusive world
//! access, so it goes through [`ConsoleInputEvent`](super::ConsoleInputEvent)
//! or [`submit_line`](super::submit_line) instead.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::{
    CommandBus, CommandInvocation, CommandRegistry, CommandSpec, ConCommand, ConsoleError,
    History, Severity, SubscriptionToken, Transcript,
};

/// Unified console system parameter.
///
/// # Examples
///
/// ```ignore
/// fn setup_console(mut console: Console) {
///     console.register(ConCommand::new("noclip", |_, world| {
///         world.resource_mut::<Player>().noclip ^= true;
///     }).help("Toggle noclip mode")).ok();
///
///     console.write("Console ready", Severity::Success);
/// }
/// ```
#[derive(SystemParam)]
pub struct Console<'w> {
    registry: ResMut<'w, CommandRegistry>,
    bus: ResMut<'w, CommandBus>,
    history: ResMut<'w, History>,
    transcript: ResMut<'w, Transcript>,
}

impl Console<'_> {
    /// Register a command.
    ///
    /// Fails with [`ConsoleError::DuplicateCommand`] if the name is taken.
    pub fn register(&mut self, cmd: ConCommand) -> Result<(), ConsoleError> {
        self.registry.register(cmd).map(|_| ())
    }

    /// Remove a command.
    pub fn unregister(&mut self, name: &str) -> Option<CommandSpec> {
        self.registry.unregister(name)
    }

    /// Attach a dispatch listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionToken
    where
        F: Fn(&CommandInvocation, &mut World) + Send + Sync + 'static,
    {
        self.bus.subscribe(listener)
    }

    /// Detach a dispatch listener.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        self.bus.unsubscribe(token)
    }

    /// Append a line to the transcript.
    pub fn write(&mut self, text: impl Into<String>, severity: Severity) {
        self.transcript.append(text, severity);
    }

    /// Recall the previous (older) history entry.
    pub fn previous_command(&mut self) -> String {
        self.history.previous().to_string()
    }

    /// Recall the next (newer) history entry.
    pub fn next_command(&mut self) -> String {
        self.history.next().to_string()
    }

    /// The full transcript text.
    pub fn log_text(&self) -> String {
        self.transcript.text()
    }

    /// Check if a command exists.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Get the number of registered commands.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Check if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Get read-only access to the underlying registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Clear the transcript.
    pub fn clear_log(&mut self) {
        self.transcript.clear();
    }
}

/// Read-only console system parameter.
///
/// Use this when you only need to read console state, not modify it.
#[derive(SystemParam)]
pub struct ConsoleRef<'w> {
    registry: Res<'w, CommandRegistry>,
    history: Res<'w, History>,
    transcript: Res<'w, Transcript>,
}

impl ConsoleRef<'_> {
    /// Look a command up.
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.registry.get(name)
    }

    /// Check if a command exists.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// `(name, help)` pairs sorted by name.
    pub fn help_entries(&self) -> Vec<(&str, &'static str)> {
        self.registry.help_entries()
    }

    /// Submitted lines, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter()
    }

    /// The full transcript text.
    pub fn log_text(&self) -> String {
        self.transcript.text()
    }

    /// Get read-only access to the underlying registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}
