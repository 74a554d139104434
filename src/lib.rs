//! An in-app developer console for Bevy.
//!
//! bevy_command_console turns typed lines into validated command invocations:
//!
//! - **Tokenizer**: Quote-aware splitting of a line into a command and arguments
//! - **ConCommand**: Commands with help text, a typed `$s $i $f $b` signature and a handler
//! - **CommandBus**: Publish/subscribe dispatch of validated commands
//! - **History / Transcript**: Up/down recall and severity-tagged output
//! - **Console**: Unified system parameter for convenient access
//!
//! # Features
//!
//! - `terminal`: stdin/stdout backend for headless apps
//! - `persist`: RON persistence of console settings and history
//! - `log-capture`: Mirror `tracing` events into the transcript
//! - `full`: Enable persist + log-capture
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_command_console::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ConsolePlugin)
//!         .add_systems(Startup, setup_console)
//!         .run();
//! }
//!
//! fn setup_console(mut console: Console) {
//!     console.register(
//!         ConCommand::new("spawn", |args, world| {
//!             let count = args.parse_or::<i32>(1, 1);
//!             world.resource_mut::<Transcript>().success(format!("Spawning {count}"));
//!         })
//!         .help("Spawn an entity, optionally several")
//!         .params("$s $i")
//!         .exact_arity(false),
//!     ).ok();
//! }
//!
//! fn send_line(mut input: MessageWriter<ConsoleInputEvent>) {
//!     input.write(ConsoleInputEvent::new("spawn crate 3"));
//! }
//! ```

use bevy::prelude::*;

pub mod builtins;
pub mod config;
pub mod core;

// Re-export core types at crate root for convenience
pub use crate::core::{
    Console, ConsoleRef,
    ConCommand, CommandSpec, CommandHandler, CommandArgs,
    CommandRegistry, ConsoleError,
    ParamType, parse_format, format_signature,
    validate, validate_params,
    CommandBus, CommandInvocation, CommandListener, SubscriptionToken,
    History, Severity, Transcript, TranscriptLine,
    paginate, Page,
    submit_line, SubmitOutcome,
    tokenize, split_arguments, TokenizedCommand, TokenizeError,
    ConsoleInputEvent, ConsoleOutputEvent, LogUpdatedEvent, ConsoleClearEvent,
    ConsoleEventsPlugin,
};
pub use builtins::BuiltinCommands;
pub use config::ConsoleConfig;

// Log capture (feature-gated)
#[cfg(feature = "log-capture")]
pub mod logging;

// Terminal backend (feature-gated)
#[cfg(feature = "terminal")]
pub mod terminal;

// Persistence module (feature-gated)
#[cfg(feature = "persist")]
pub mod persist;

#[cfg(feature = "persist")]
pub use persist::{ConsoleStateFile, ConfigPath, ConfigError, HostConfig};

#[cfg(feature = "terminal")]
pub use terminal::{TerminalPlugin, TerminalConfig};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::core::{
        Console, ConsoleRef,
        ConCommand, CommandArgs, CommandRegistry,
        CommandBus, SubscriptionToken,
        History, Severity, Transcript,
        ConsoleInputEvent, ConsoleOutputEvent, LogUpdatedEvent,
        submit_line, tokenize,
    };
    pub use crate::config::ConsoleConfig;
    pub use crate::ConsolePlugin;
}

/// Main console plugin.
///
/// Creates the console resources, installs the built-in commands at
/// `Startup` and runs submitted lines each `Update`.
///
/// # Configuration
///
/// A [`ConsoleConfig`] inserted before the plugin is kept as-is. With the
/// `persist` feature it also takes precedence over the saved state file,
/// from which only the history is then restored.
///
/// ```ignore
/// app.insert_resource(ConsoleConfig { page_size: 10, ..default() })
///     .add_plugins(ConsolePlugin);
/// ```
#[derive(Default)]
pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        #[cfg(feature = "persist")]
        let host_config = app.world().contains_resource::<ConsoleConfig>();

        app.init_resource::<CommandRegistry>()
            .init_resource::<CommandBus>()
            .init_resource::<History>()
            .init_resource::<Transcript>()
            .init_resource::<ConsoleConfig>()
            .init_resource::<PendingInput>()
            .add_plugins(ConsoleEventsPlugin);

        app.add_systems(Startup, install_builtin_commands);

        // 1. collect_console_input: Queue lines from input messages
        // 2. execute_pending_input: Submit each line with exclusive World access
        // 3. send_transcript_updates: Announce new transcript lines
        // 4. enforce_transcript_cap: Trim the transcript to the configured size
        app.add_systems(
            Update,
            (
                collect_console_input,
                execute_pending_input,
                send_transcript_updates,
                enforce_transcript_cap,
            )
                .chain(),
        );

        // Persistence (feature-gated)
        #[cfg(feature = "persist")]
        {
            app.insert_resource(persist::HostConfig(host_config))
                .init_resource::<persist::ConfigPath>()
                .add_systems(Startup, persist::load_state_on_startup.after(install_builtin_commands))
                .add_systems(Last, persist::save_state_on_exit);
        }

        // Terminal backend (feature-gated)
        #[cfg(feature = "terminal")]
        {
            app.add_plugins(terminal::TerminalPlugin);
        }
    }
}

/// Lines received through [`ConsoleInputEvent`] awaiting execution.
#[derive(Resource, Default)]
struct PendingInput {
    lines: Vec<String>,
}

/// Install the built-in commands and keep their handle as a resource.
fn install_builtin_commands(world: &mut World) {
    if world.contains_resource::<BuiltinCommands>() {
        return;
    }

    let builtins = BuiltinCommands::install(world);
    debug!("Console: Installed built-ins {:?}", builtins.names());
    world.insert_resource(builtins);
}

/// System that queues submitted lines for execution.
fn collect_console_input(
    mut input_events: MessageReader<ConsoleInputEvent>,
    mut pending: ResMut<PendingInput>,
) {
    pending
        .lines
        .extend(input_events.read().map(|event| event.command.clone()));
}

/// Exclusive system that submits queued lines with full World access.
fn execute_pending_input(world: &mut World) {
    let lines = std::mem::take(&mut world.resource_mut::<PendingInput>().lines);

    for line in lines {
        submit_line(world, &line);
    }
}

/// System that announces transcript changes.
fn send_transcript_updates(
    mut transcript: ResMut<Transcript>,
    mut output_events: MessageWriter<ConsoleOutputEvent>,
    mut log_events: MessageWriter<LogUpdatedEvent>,
    mut clear_events: MessageWriter<ConsoleClearEvent>,
) {
    if transcript.take_cleared() {
        clear_events.write(ConsoleClearEvent);
        log_events.write(LogUpdatedEvent::new(String::new()));
    }

    for (line, text) in transcript.take_updates() {
        output_events.write(line.into());
        log_events.write(LogUpdatedEvent::new(text));
    }
}

/// System that discards the oldest lines beyond `transcript_max_lines`.
fn enforce_transcript_cap(config: Res<ConsoleConfig>, mut transcript: ResMut<Transcript>) {
    let Some(max) = config.transcript_max_lines else {
        return;
    };

    let excess = transcript.len().saturating_sub(max);
    if excess > 0 {
        transcript.discard_oldest(excess);
    }
}
