//! The console's single text entry point.

use bevy::prelude::*;

use crate::config::ConsoleConfig;

use super::{
    tokenize, validate, CommandArgs, CommandBus, CommandInvocation, CommandRegistry,
    ConsoleError, History, Severity, TokenizedCommand, Transcript,
};

/// Prefix for transcript lines that echo submitted input.
pub const COMMAND_ECHO_PREFIX: &str = "$ ";

/// What happened to a submitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The line was blank; nothing was recorded.
    Ignored,
    /// The command was valid and broadcast to this many listeners.
    Dispatched { listeners: usize },
    /// The command was rejected; the error is also in the transcript.
    Rejected(ConsoleError),
}

/// Run one line of console input.
///
/// Blank lines are ignored. Any other line is recorded in [`History`] and
/// echoed to the [`Transcript`], then looked up, validated and broadcast on
/// the [`CommandBus`]. Failures are written to the transcript as errors; this
/// function always returns normally.
///
/// # Examples
///
/// ```ignore
/// fn run_autoexec(world: &mut World) {
///     for line in ["help", "findcmd test"] {
///         submit_line(world, line);
///     }
/// }
/// ```
pub fn submit_line(world: &mut World, line: &str) -> SubmitOutcome {
    let Ok(tokens) = tokenize(line) else {
        return SubmitOutcome::Ignored;
    };

    debug!("Console: Submitted '{}'", tokens.raw);

    if let Some(mut history) = world.get_resource_mut::<History>() {
        history.record(tokens.raw);
    }

    let echo = world
        .get_resource::<ConsoleConfig>()
        .is_none_or(|config| config.echo_input);
    if echo {
        write(world, format!("{}{}", COMMAND_ECHO_PREFIX, tokens.raw), Severity::Info);
    }

    match resolve(world, &tokens) {
        Ok(invocation) => {
            let listeners = CommandBus::broadcast(world, &invocation);
            SubmitOutcome::Dispatched { listeners }
        }
        Err(err) => {
            debug!("Console: Rejected '{}': {}", tokens.raw, err);
            write(world, err.to_string(), Severity::Error);
            SubmitOutcome::Rejected(err)
        }
    }
}

/// Look the command up and check its arguments.
fn resolve(world: &World, tokens: &TokenizedCommand) -> Result<CommandInvocation, ConsoleError> {
    let spec = world
        .get_resource::<CommandRegistry>()
        .and_then(|registry| registry.get(&tokens.command))
        .ok_or_else(|| ConsoleError::UnknownCommand {
            name: tokens.command.as_str().into(),
        })?;

    let handler = spec.handler().cloned().ok_or_else(|| ConsoleError::NullHandler {
        name: spec.name().into(),
    })?;

    validate(spec, &tokens.args)?;

    Ok(CommandInvocation::new(
        spec.name(),
        handler,
        CommandArgs::new(tokens.raw, tokens.args.clone()),
    ))
}

fn write(world: &mut World, text: String, severity: Severity) {
    if let Some(mut transcript) = world.get_resource_mut::<Transcript>() {
        transcript.append(text, severity);
    }
}
