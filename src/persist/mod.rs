//! Persistence layer for console state.
//!
//! Provides RON-based save/load for [`ConsoleConfig`] and the command
//! [`History`].

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ConsoleConfig;
use crate::core::History;

/// Default state file name.
pub const DEFAULT_STATE_FILE: &str = "console.ron";

/// Serializable console state.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConsoleStateFile {
    /// Console settings.
    #[serde(default)]
    pub config: ConsoleConfig,
    /// Submitted lines, oldest first.
    #[serde(default)]
    pub history: Vec<String>,
}

impl ConsoleStateFile {
    /// Snapshot the live console state.
    pub fn capture(config: &ConsoleConfig, history: &History) -> Self {
        Self {
            config: config.clone(),
            history: history.iter().map(String::from).collect(),
        }
    }

    /// Replace the live console state with this snapshot.
    pub fn apply(self, config: &mut ConsoleConfig, history: &mut History) {
        *config = self.config.clone();
        self.apply_history(history);
    }

    /// Replace only the live history, leaving settings alone.
    pub fn apply_history(self, history: &mut History) {
        history.clear();
        for line in self.history {
            history.record(line);
        }
    }

    /// Load state from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))?;

        ron::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }

    /// Save state to a RON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Io(parent.display().to_string(), e.to_string()))?;
        }

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let contents = ron::ser::to_string_pretty(self, pretty)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))
    }

    /// Load state from file, returning default if the file is missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

/// Errors that can occur while reading or writing the state file.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error (path, message).
    Io(String, String),
    /// Parse error (path, message).
    Parse(String, String),
    /// Serialization error.
    Serialize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, msg) => write!(f, "IO error for '{}': {}", path, msg),
            ConfigError::Parse(path, msg) => write!(f, "Parse error for '{}': {}", path, msg),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resource tracking the state file path.
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub PathBuf);

impl ConfigPath {
    /// Use a custom state file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl Default for ConfigPath {
    fn default() -> Self {
        Self(PathBuf::from(DEFAULT_STATE_FILE))
    }
}

/// Whether the host inserted its own [`ConsoleConfig`] before the plugin.
///
/// When set, the saved settings are ignored on load.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HostConfig(pub bool);

/// System to load state on startup.
pub fn load_state_on_startup(
    mut config: ResMut<ConsoleConfig>,
    mut history: ResMut<History>,
    config_path: Res<ConfigPath>,
    host_config: Option<Res<HostConfig>>,
) {
    let path = &config_path.0;

    if !path.exists() {
        info!("No console state found at '{}', using defaults", path.display());
        return;
    }

    match ConsoleStateFile::load(path) {
        Ok(state) => {
            info!("Loading console state from '{}'", path.display());
            let lines = state.history.len();
            if host_config.is_some_and(|host| host.0) {
                info!("Keeping host-supplied console config over saved settings");
                state.apply_history(&mut history);
            } else {
                state.apply(&mut config, &mut history);
            }
            info!("Loaded {} history entries", lines);
        }
        Err(e) => {
            error!("Failed to load console state: {}", e);
        }
    }
}

/// System to save state once an [`AppExit`] has been requested.
pub fn save_state_on_exit(
    mut exits: MessageReader<AppExit>,
    config: Res<ConsoleConfig>,
    history: Res<History>,
    config_path: Res<ConfigPath>,
) {
    if exits.read().last().is_none() {
        return;
    }

    let path = &config_path.0;
    match ConsoleStateFile::capture(&config, &history).save(path) {
        Ok(()) => info!("Saved console state to '{}'", path.display()),
        Err(e) => error!("Failed to save console state: {}", e),
    }
}
