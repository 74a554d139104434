//! Terminal backend for headless console use.
//!
//! This module provides stdin/stdout integration for running the console
//! without a graphical front end.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use bevy::prelude::*;

use crate::core::{ConsoleInputEvent, ConsoleOutputEvent, Severity};

/// Plugin that adds terminal (stdin/stdout) console support.
pub struct TerminalPlugin;

impl Plugin for TerminalPlugin {
    fn build(&self, app: &mut App) {
        let (sender, receiver) = mpsc::channel();
        let _handle = spawn_stdin_reader(sender);

        app.insert_resource(StdinReceiver(Mutex::new(receiver)))
            .init_resource::<TerminalConfig>()
            .add_systems(Update, (read_stdin, write_stdout));
    }
}

/// Configuration for terminal behavior.
#[derive(Resource)]
pub struct TerminalConfig {
    /// Whether to use colored output (ANSI escape codes).
    pub colored: bool,
    /// Whether to print severity tags such as `[error]`.
    pub show_severity: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        // Off by default; some terminals render the escapes literally
        Self {
            colored: false,
            show_severity: false,
        }
    }
}

#[derive(Resource)]
struct StdinReceiver(Mutex<Receiver<String>>);

fn spawn_stdin_reader(sender: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        let handle = stdin.lock();

        for line in handle.lines().map_while(Result::ok) {
            let text = line.trim().to_string();
            if !text.is_empty() && sender.send(text).is_err() {
                break;
            }
        }
    })
}

fn read_stdin(receiver: Res<StdinReceiver>, mut events: MessageWriter<ConsoleInputEvent>) {
    let Ok(rx) = receiver.0.lock() else {
        return;
    };
    while let Ok(line) = rx.try_recv() {
        events.write(ConsoleInputEvent::new(line));
    }
}

fn write_stdout(mut events: MessageReader<ConsoleOutputEvent>, config: Res<TerminalConfig>) {
    let mut stdout = io::stdout().lock();
    for event in events.read() {
        let line = format_line(event, &config);
        let _ = writeln!(stdout, "{}", line);
    }
    let _ = stdout.flush();
}

fn format_line(event: &ConsoleOutputEvent, config: &TerminalConfig) -> String {
    let text = if config.show_severity {
        format!("[{}] {}", event.severity, event.message)
    } else {
        event.message.clone()
    };

    if config.colored {
        format!("{}{}\x1b[0m", severity_color(event.severity), text)
    } else {
        text
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "\x1b[0m",
        Severity::Success => "\x1b[32m",
        Severity::Error => "\x1b[31m",
    }
}
