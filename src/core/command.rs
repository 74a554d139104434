//! Console command definitions.
//!
//! A [`ConCommand`] is the builder handed to the registry. Once registered it
//! becomes an immutable [`CommandSpec`].

use std::sync::Arc;

use bevy::prelude::*;

use super::params::{format_signature, parse_format, ParamType};

/// Arguments passed to a command handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    /// The trimmed input line.
    raw: String,
    /// Parsed arguments (excluding command name).
    args: Vec<String>,
}

impl CommandArgs {
    /// Create new command args from a raw line and parsed arguments.
    pub fn new(raw: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            raw: raw.into(),
            args,
        }
    }

    /// Get the raw command line.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Get the number of arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Check if no arguments were supplied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Get an argument by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Try to parse an argument as a specific type.
    pub fn parse<T: std::str::FromStr>(&self, index: usize) -> Option<T> {
        self.get(index).and_then(|s| s.parse().ok())
    }

    /// Parse an argument with a default value.
    pub fn parse_or<T: std::str::FromStr>(&self, index: usize, default: T) -> T {
        self.parse(index).unwrap_or(default)
    }

    /// Get all arguments as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    /// Iterate over arguments.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(String::as_str)
    }

    /// Join all arguments with a separator.
    pub fn join(&self, separator: &str) -> String {
        self.args.join(separator)
    }
}

/// Shared command handler.
///
/// Handlers receive:
/// - `args`: The validated command arguments
/// - `world`: Mutable access to the Bevy world
pub type CommandHandler = Arc<dyn Fn(&CommandArgs, &mut World) + Send + Sync>;

/// A registered console command.
///
/// Created by [`CommandRegistry::register`](super::CommandRegistry::register)
/// and never mutated afterwards.
pub struct CommandSpec {
    name: Box<str>,
    help: &'static str,
    params: Box<[ParamType]>,
    exact_arity: bool,
    handler: Option<CommandHandler>,
}

impl CommandSpec {
    /// Get the command name (always lowercase).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the help text.
    #[inline]
    pub fn help(&self) -> &'static str {
        self.help
    }

    /// Get the declared parameter types.
    #[inline]
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    /// Whether the argument count must equal the declared parameter count.
    #[inline]
    pub fn requires_exact_arity(&self) -> bool {
        self.exact_arity
    }

    /// Get the handler, if one was provided.
    #[inline]
    pub fn handler(&self) -> Option<&CommandHandler> {
        self.handler.as_ref()
    }

    /// The parameter signature in format-string form, e.g. `"$s $i"`.
    pub fn signature(&self) -> String {
        format_signature(&self.params)
    }
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("params", &self.params)
            .field("exact_arity", &self.exact_arity)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// A console command under construction.
///
/// # Examples
///
/// ```ignore
/// let give = ConCommand::new("give", |args, world| {
///     let item = args.get(0).unwrap_or_default();
///     let count: i32 = args.parse_or(1, 1);
///     world.resource_mut::<Inventory>().add(item, count);
/// })
/// .help("Give an item to the player")
/// .params("$s $i")
/// .exact_arity(false);
/// ```
pub struct ConCommand {
    name: Box<str>,
    help: &'static str,
    format: String,
    exact_arity: bool,
    handler: Option<CommandHandler>,
}

impl ConCommand {
    /// Create a new command with the given name and handler.
    ///
    /// By default the command takes no parameters and requires exact arity.
    pub fn new<F>(name: impl Into<Box<str>>, handler: F) -> Self
    where
        F: Fn(&CommandArgs, &mut World) + Send + Sync + 'static,
    {
        let handler: CommandHandler = Arc::new(handler);
        Self {
            handler: Some(handler),
            ..Self::without_handler(name)
        }
    }

    /// Create a command that has no handler attached.
    ///
    /// Running it reports a null handler error instead of dispatching.
    pub fn without_handler(name: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            help: "",
            format: String::new(),
            exact_arity: true,
            handler: None,
        }
    }

    /// Set the help text.
    pub fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    /// Set the parameter format string (`$s`, `$i`, `$f`, `$b`).
    pub fn params(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Set whether the argument count must match the parameter count.
    ///
    /// With `false`, trailing parameters are optional.
    pub fn exact_arity(mut self, exact: bool) -> Self {
        self.exact_arity = exact;
        self
    }

    /// Get the command name as given.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Freeze the command into its registered form.
    ///
    /// The name is case-folded and the format string parsed here, once.
    pub(crate) fn into_spec(self) -> CommandSpec {
        CommandSpec {
            name: self.name.to_lowercase().into_boxed_str(),
            help: self.help,
            params: parse_format(&self.format).into_boxed_slice(),
            exact_arity: self.exact_arity,
            handler: self.handler,
        }
    }
}

impl std::fmt::Debug for ConCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConCommand")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("format", &self.format)
            .field("exact_arity", &self.exact_arity)
            .finish_non_exhaustive()
    }
}
