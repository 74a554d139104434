//! The console transcript.
//!
//! An append-only list of severity-tagged lines. Appends are queued for
//! delivery so the plugin can announce each one, together with the full
//! transcript text, to whatever is rendering the console.

use std::fmt;

use bevy::prelude::*;

/// Severity tag attached to each transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Neutral output, including echoed input.
    #[default]
    Info,
    /// Positive command output.
    Success,
    /// Failures reported by the console or a command.
    Error,
}

impl Severity {
    /// Short tag used when rendering.
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    /// The line text.
    pub text: String,
    /// The severity tag.
    pub severity: Severity,
}

impl TranscriptLine {
    /// Create a new line.
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

impl fmt::Display for TranscriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.text)
    }
}

/// The console output log.
///
/// # Examples
///
/// ```
/// use bevy_command_console::core::{Severity, Transcript};
///
/// let mut transcript = Transcript::new();
/// transcript.append("$ help", Severity::Info);
/// transcript.append("Unknown command 'x'", Severity::Error);
///
/// assert_eq!(transcript.text(), "[info] $ help\n[error] Unknown command 'x'");
/// ```
#[derive(Resource, Debug, Default)]
pub struct Transcript {
    lines: Vec<TranscriptLine>,
    /// Index of the first line not yet announced.
    delivered: usize,
    /// Set by `clear` until the plugin announces the reset.
    cleared: bool,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn append(&mut self, text: impl Into<String>, severity: Severity) {
        self.lines.push(TranscriptLine::new(text, severity));
    }

    /// Append an info line.
    pub fn info(&mut self, text: impl Into<String>) {
        self.append(text, Severity::Info);
    }

    /// Append a success line.
    pub fn success(&mut self, text: impl Into<String>) {
        self.append(text, Severity::Success);
    }

    /// Append an error line.
    pub fn error(&mut self, text: impl Into<String>) {
        self.append(text, Severity::Error);
    }

    /// The whole transcript as one string, one rendered line per row.
    pub fn text(&self) -> String {
        render(&self.lines)
    }

    /// All lines, oldest first.
    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    /// Get the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.delivered = 0;
        self.cleared = true;
    }

    /// Drop up to `count` lines from the oldest end.
    ///
    /// Returns how many were removed.
    pub fn discard_oldest(&mut self, count: usize) -> usize {
        let count = count.min(self.lines.len());
        self.lines.drain(..count);
        self.delivered = self.delivered.saturating_sub(count);
        count
    }

    /// Drain lines appended since the last call.
    ///
    /// Each item pairs the new line with the full transcript text as it was
    /// right after that line was appended.
    ///
    /// Every item owns its own copy of the text, so draining `k` lines costs
    /// about `k` times the transcript length. Keep `transcript_max_lines`
    /// bounded when many lines arrive per frame.
    pub(crate) fn take_updates(&mut self) -> Vec<(TranscriptLine, String)> {
        let mut text = render(&self.lines[..self.delivered]);
        let updates = self.lines[self.delivered..]
            .iter()
            .map(|line| {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&line.to_string());
                (line.clone(), text.clone())
            })
            .collect();

        self.delivered = self.lines.len();
        updates
    }

    /// Returns `true` once after each `clear`.
    pub(crate) fn take_cleared(&mut self) -> bool {
        std::mem::take(&mut self.cleared)
    }
}

fn render(lines: &[TranscriptLine]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
