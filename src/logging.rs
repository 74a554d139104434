//! Custom [LogPlugin](bevy::log::LogPlugin) functionality.
//!
//! Mirrors application log events into the console [`Transcript`].

use bevy::log::{BoxedLayer, Level};
use bevy::prelude::*;
use std::sync::mpsc;
use std::time::SystemTime;
use tracing::Subscriber;
use tracing_subscriber::field::Visit;
use tracing_subscriber::Layer;

use crate::core::{Severity, Transcript};

/// Log targets under this prefix are not mirrored, so the console's own
/// diagnostics stay out of its transcript.
const OWN_TARGET: &str = "bevy_command_console";

/// A function that feeds application logs into the console transcript
/// via [`LogPlugin::custom_layer`](bevy::log::LogPlugin::custom_layer).
///
/// # Examples
///
/// ```ignore
/// App::new().add_plugins(DefaultPlugins.set(LogPlugin {
///     custom_layer: bevy_command_console::logging::custom_log_layer,
///     ..default()
/// }));
/// ```
pub fn custom_log_layer(app: &mut App) -> Option<BoxedLayer> {
    Some(Box::new(create_custom_log_layer(app)))
}

fn create_custom_log_layer(app: &mut App) -> LogCaptureLayer {
    let (sender, receiver) = mpsc::channel();
    app.add_message::<LogMessage>();
    app.insert_non_send_resource(CapturedLogEvents(receiver));
    app.add_systems(
        PostUpdate,
        (transfer_log_events, append_logs_to_transcript).chain(),
    );

    LogCaptureLayer { sender }
}

/// A [`tracing`] log message event.
#[derive(Message, Debug, Clone)]
pub struct LogMessage {
    /// The message contents.
    pub message: String,

    /// The part of the system that the event occurred in.
    pub target: &'static str,

    /// The level of verbosity of the event.
    pub level: Level,

    /// The time the log occurred.
    pub time: SystemTime,
}

impl LogMessage {
    /// Transcript severity for this log level.
    pub fn severity(&self) -> Severity {
        severity_for(self.level)
    }
}

fn severity_for(level: Level) -> Severity {
    if level == Level::ERROR {
        Severity::Error
    } else {
        Severity::Info
    }
}

fn is_own_target(target: &str) -> bool {
    target.starts_with(OWN_TARGET)
}

/// Transfers information from the [`CapturedLogEvents`] resource to [`MessageWriter<LogMessage>`](LogMessage).
fn transfer_log_events(
    receiver: NonSend<CapturedLogEvents>,
    mut log_events: MessageWriter<LogMessage>,
) {
    for msg in receiver.0.try_iter() {
        log_events.write(msg);
    }
}

/// Appends captured log messages to the transcript, when one exists.
fn append_logs_to_transcript(
    mut log_events: MessageReader<LogMessage>,
    transcript: Option<ResMut<Transcript>>,
) {
    let Some(mut transcript) = transcript else {
        return;
    };

    for msg in log_events.read() {
        if is_own_target(msg.target) {
            continue;
        }
        transcript.append(format!("{} {}", msg.level, msg.message), msg.severity());
    }
}

/// This struct temporarily stores [`LogMessage`]s before they are
/// written to [`MessageWriter<LogMessage>`] by [`transfer_log_events`].
struct CapturedLogEvents(mpsc::Receiver<LogMessage>);

/// A [`Layer`] that captures log events and saves them to [`CapturedLogEvents`].
struct LogCaptureLayer {
    sender: mpsc::Sender<LogMessage>,
}

impl<S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>> Layer<S>
    for LogCaptureLayer
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut message = None;
        event.record(&mut LogEventVisitor(&mut message));
        if let Some(message) = message {
            let metadata = event.metadata();
            let _ = self.sender.send(LogMessage {
                message,
                target: metadata.target(),
                level: *metadata.level(),
                time: SystemTime::now(),
            });
        }
    }
}

/// A [`Visit`]or that records log messages that are transferred to [`LogCaptureLayer`].
struct LogEventVisitor<'a>(&'a mut Option<String>);

impl Visit for LogEventVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        // Only log out messages
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}
