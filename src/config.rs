//! Console configuration.

use bevy::prelude::*;

/// Tunable console settings.
///
/// Insert your own before adding [`ConsolePlugin`](crate::ConsolePlugin) to
/// override the defaults.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "persist", serde(default))]
pub struct ConsoleConfig {
    /// Entries per page for `help` and `findcmd`.
    pub page_size: usize,
    /// Oldest transcript lines are discarded beyond this many.
    /// `None` keeps everything.
    pub transcript_max_lines: Option<usize>,
    /// Echo each submitted line into the transcript.
    pub echo_input: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            transcript_max_lines: Some(1000),
            echo_input: true,
        }
    }
}
