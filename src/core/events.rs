//! Console messages for communication between layers.
//!
//! Messages are the primary mechanism for:
//! - UI -> Core: Command input
//! - Core -> UI: New transcript lines and the full log text

use bevy::prelude::*;

use super::{Severity, TranscriptLine};

/// Message sent when a line is submitted to the console.
///
/// The console plugin tokenizes, validates and dispatches it.
///
/// # Examples
///
/// ```ignore
/// fn submit_command(mut input: MessageWriter<ConsoleInputEvent>) {
///     input.write(ConsoleInputEvent::new("help 2"));
/// }
/// ```
#[derive(Message, Debug, Clone)]
pub struct ConsoleInputEvent {
    /// The raw line to run.
    pub command: String,
}

impl ConsoleInputEvent {
    /// Create a new input message.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

/// Message sent for every line appended to the transcript.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ConsoleOutputEvent {
    /// The line text.
    pub message: String,
    /// The line severity.
    pub severity: Severity,
}

impl ConsoleOutputEvent {
    /// Create a new output message.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

impl From<TranscriptLine> for ConsoleOutputEvent {
    fn from(line: TranscriptLine) -> Self {
        Self::new(line.severity, line.text)
    }
}

/// Message carrying the whole transcript after a change.
///
/// Renderers can replace their text wholesale instead of tracking deltas,
/// and apply their own length limits.
///
/// # Examples
///
/// ```ignore
/// fn redraw(mut updates: MessageReader<LogUpdatedEvent>, mut panel: ResMut<LogPanel>) {
///     if let Some(update) = updates.read().last() {
///         panel.text = update.text.clone();
///     }
/// }
/// ```
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct LogUpdatedEvent {
    /// The full rendered transcript.
    pub text: String,
}

impl LogUpdatedEvent {
    /// Create a new update message.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Message sent after the transcript has been cleared.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ConsoleClearEvent;

/// Plugin that registers all console messages.
pub struct ConsoleEventsPlugin;

impl Plugin for ConsoleEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleInputEvent>()
            .add_message::<ConsoleOutputEvent>()
            .add_message::<LogUpdatedEvent>()
            .add_message::<ConsoleClearEvent>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_input_event() {
        let event = ConsoleInputEvent::new("help 2");
        assert_eq!(event.command, "help 2");
    }

    #[test]
    fn test_output_event_from_line() {
        let event = ConsoleOutputEvent::from(TranscriptLine::new("oops", Severity::Error));
        assert_eq!(event.severity, Severity::Error);
        assert_eq!(event.message, "oops");
    }
}
