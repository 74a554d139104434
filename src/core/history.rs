//! Command history with up/down recall.

use bevy::prelude::*;

/// Previously submitted command lines.
///
/// Entries are kept oldest first. The recall cursor counts back from the
/// newest entry and is cleared whenever a new line is recorded.
#[derive(Resource, Debug, Default, Clone)]
pub struct History {
    entries: Vec<String>,
    /// Steps back from the newest entry; `None` means nothing is selected.
    cursor: Option<usize>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submitted line and deselect the cursor.
    pub fn record(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = None;
    }

    /// Step toward older entries.
    ///
    /// Stays on the oldest entry once reached. Returns `""` if empty.
    pub fn previous(&mut self) -> &str {
        if self.entries.is_empty() {
            return "";
        }

        let oldest = self.entries.len() - 1;
        let step = match self.cursor {
            None => 0,
            Some(step) => (step + 1).min(oldest),
        };
        self.cursor = Some(step);
        self.selected()
    }

    /// Step toward newer entries.
    ///
    /// Returns `""` once past the newest entry.
    pub fn next(&mut self) -> &str {
        self.cursor = match self.cursor {
            None | Some(0) => None,
            Some(step) => Some(step - 1),
        };
        self.selected()
    }

    /// The entry under the cursor, or `""` if nothing is selected.
    pub fn selected(&self) -> &str {
        self.cursor
            .and_then(|step| self.entries.len().checked_sub(step + 1))
            .and_then(|index| self.entries.get(index))
            .map_or("", String::as_str)
    }

    /// Get the number of recorded lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over recorded lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Forget all recorded lines.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert_eq!(history.previous(), "");
        assert_eq!(history.next(), "");
    }

    #[test]
    fn test_recall_sequence() {
        let mut history = History::new();
        history.record("a");
        history.record("b");

        assert_eq!(history.previous(), "b");
        assert_eq!(history.previous(), "a");
        assert_eq!(history.previous(), "a");
        assert_eq!(history.next(), "b");
        assert_eq!(history.next(), "");
        assert_eq!(history.next(), "");
    }

    #[test]
    fn test_previous_next_returns_to_unselected() {
        let mut history = History::new();
        history.record("one");
        history.record("two");
        history.record("three");

        history.previous();
        history.previous();
        history.next();
        assert_eq!(history.next(), "");
        assert_eq!(history.selected(), "");
    }

    #[test]
    fn test_record_resets_cursor() {
        let mut history = History::new();
        history.record("a");
        history.record("b");
        history.previous();
        history.previous();

        history.record("c");
        assert_eq!(history.selected(), "");
        assert_eq!(history.previous(), "c");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut history = History::new();
        history.record("help");
        history.record("help");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.record("a");
        history.previous();
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.previous(), "");
    }
}
