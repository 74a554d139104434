//! Core console types.
//!
//! This module provides the fundamental building blocks:
//! - [`tokenize`] - Quote-aware input tokenizer
//! - [`ParamType`] - Declared parameter types and the `$s $i $f $b` format
//! - [`CommandRegistry`] - Central registry for all commands
//! - [`validate`] - Argument checks against a command's signature
//! - [`CommandBus`] - Publish/subscribe dispatch of validated commands
//! - [`History`] - Submitted lines with up/down recall
//! - [`Transcript`] - Severity-tagged console output
//! - [`paginate`] - Paging for command listings
//! - [`submit_line`] - The text entry point tying it all together
//! - [`Console`] - Unified system parameter for convenient access

mod tokenizer;
mod params;
mod error;
mod command;
mod registry;
mod validator;
mod bus;
mod history;
mod transcript;
mod pagination;
mod events;
mod submit;
mod console;

pub use tokenizer::{tokenize, split_arguments, TokenizedCommand, TokenizeError};
pub use params::{parse_format, format_signature, ParamType};
pub use error::ConsoleError;
pub use command::{ConCommand, CommandSpec, CommandHandler, CommandArgs};
pub use registry::CommandRegistry;
pub use validator::{validate, validate_params};
pub use bus::{CommandBus, CommandInvocation, CommandListener, SubscriptionToken};
pub use history::History;
pub use transcript::{Severity, Transcript, TranscriptLine};
pub use pagination::{paginate, Page};
pub use events::{
    ConsoleInputEvent, ConsoleOutputEvent, LogUpdatedEvent, ConsoleClearEvent,
    ConsoleEventsPlugin,
};
pub use submit::{submit_line, SubmitOutcome, COMMAND_ECHO_PREFIX};
pub use console::{Console, ConsoleRef};
