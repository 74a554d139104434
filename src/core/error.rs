//! Error types reported by the console.

use std::fmt;

/// Errors raised while registering or running console commands.
///
/// Only [`ConsoleError::DuplicateCommand`] is returned to callers directly.
/// The rest are caught by [`submit_line`](super::submit_line) and written to
/// the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// A command with this name is already registered.
    DuplicateCommand { name: Box<str> },
    /// No command with this name exists.
    UnknownCommand { name: Box<str> },
    /// The command exists but has no handler to run.
    NullHandler { name: Box<str> },
    /// Wrong number of arguments for the command.
    ArityMismatch { expected: usize, supplied: usize },
    /// One or more arguments failed to parse as their declared type.
    ///
    /// Positions are 1-based, in ascending order.
    TypeMismatch { positions: Vec<usize> },
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::DuplicateCommand { name } => {
                write!(f, "Command '{}' is already registered", name)
            }
            ConsoleError::UnknownCommand { name } => {
                write!(f, "Unknown command '{}', type 'help' for list.", name)
            }
            ConsoleError::NullHandler { name } => {
                write!(f, "Unable to process command '{}', handler was null.", name)
            }
            ConsoleError::ArityMismatch { expected, supplied } => write!(
                f,
                "Number of parameters does not match the command (expected {}, got {})",
                expected, supplied
            ),
            ConsoleError::TypeMismatch { positions } => {
                let list = positions
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Parameters {} are incorrect values", list)
            }
        }
    }
}

impl std::error::Error for ConsoleError {}
