/// Application configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "TERM_PAD_CONFIG";

const CONFIG_FILE_NAME: &str = "term-pad.json";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Number of spaces inserted by the Tab key.
    pub tab_width: usize,
    /// Characters collected into one typing (or backspacing) run before
    /// the run becomes its own undo step.
    pub undo_cache_size: usize,
    /// Max undo events kept per session. Oldest are dropped first.
    pub max_history_depth: usize,
    /// How long a transient status message (e.g. "Saved") stays visible.
    pub status_message_secs: u64,
    /// Reserve the bottom screen row for the status line.
    pub show_status_line: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            undo_cache_size: 10,
            max_history_depth: 10_000,
            status_message_secs: 5,
            show_status_line: true,
        }
    }
}

impl AppConfig {
    /// Returns the config file path.
    ///
    /// Resolution order:
    /// 1. `TERM_PAD_CONFIG` environment variable
    /// 2. `<config dir>/term-pad/term-pad.json`
    /// 3. `term-pad.json` in the working directory
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("term-pad").join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (unreadable file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Don't overwrite a broken file
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Clamps values to valid ranges.
    pub fn sanitize(&mut self) {
        self.tab_width = self.tab_width.clamp(1, 16);
        self.undo_cache_size = self.undo_cache_size.clamp(1, 1024);
        self.max_history_depth = self.max_history_depth.max(16);
        self.status_message_secs = self.status_message_secs.max(1);
    }
}
