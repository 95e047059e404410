/// Configuration for the history system.
use term_pad_config::AppConfig;

/// Characters collected into one typing run before it is logged.
const DEFAULT_CACHE_SIZE: usize = 10;

/// Maximum number of logged commands per session.
/// Oldest commands are evicted when this limit is exceeded.
const DEFAULT_MAX_HISTORY_DEPTH: usize = 10_000;

/// Configuration for the history system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Size, in characters, at which a pending insert/delete run is flushed.
    pub cache_size: usize,
    /// Max logged commands (undo + redo side).
    pub max_history_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
            max_history_depth: DEFAULT_MAX_HISTORY_DEPTH,
        }
    }
}

impl From<&AppConfig> for HistoryConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            cache_size: config.undo_cache_size.max(1),
            max_history_depth: config.max_history_depth.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HistoryConfig::default();
        assert_eq!(config.cache_size, 10);
        assert_eq!(config.max_history_depth, 10_000);
    }

    #[test]
    fn test_from_app_config() {
        let app = AppConfig {
            undo_cache_size: 3,
            max_history_depth: 64,
            ..AppConfig::default()
        };
        let config = HistoryConfig::from(&app);
        assert_eq!(config.cache_size, 3);
        assert_eq!(config.max_history_depth, 64);
    }

    #[test]
    fn test_from_unsanitized_app_config_never_zero() {
        let app = AppConfig {
            undo_cache_size: 0,
            max_history_depth: 0,
            ..AppConfig::default()
        };
        let config = HistoryConfig::from(&app);
        assert_eq!(config.cache_size, 1);
        assert_eq!(config.max_history_depth, 1);
    }
}
