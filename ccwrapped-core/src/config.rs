//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/ccwrapped/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/ccwrapped/` (~/.config/ccwrapped/)
//! - State/Logs: `$XDG_STATE_HOME/ccwrapped/` (~/.local/state/ccwrapped/)
//!
//! Claude Code's own data lives under `~/.claude/` and can be overridden
//! in the `[sources]` table.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Where to find Claude Code's stats cache and history
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Wrapped generation defaults
    #[serde(default)]
    pub wrapped: WrappedConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Data source locations
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SourcesConfig {
    /// Override for the Claude Code data directory (default `~/.claude`)
    pub claude_dir: Option<PathBuf>,
    /// Override for the stats cache file
    pub stats_path: Option<PathBuf>,
    /// Override for the history log
    pub history_path: Option<PathBuf>,
}

impl SourcesConfig {
    /// Claude Code data directory.
    pub fn claude_dir(&self) -> PathBuf {
        self.claude_dir
            .clone()
            .unwrap_or_else(|| home_dir().join(".claude"))
    }

    /// Resolved path to `stats-cache.json`.
    pub fn stats_path(&self) -> PathBuf {
        self.stats_path
            .clone()
            .unwrap_or_else(|| self.claude_dir().join("stats-cache.json"))
    }

    /// Resolved path to `history.jsonl`.
    pub fn history_path(&self) -> PathBuf {
        self.history_path
            .clone()
            .unwrap_or_else(|| self.claude_dir().join("history.jsonl"))
    }
}

/// Defaults for wrapped generation
#[derive(Debug, Deserialize)]
pub struct WrappedConfig {
    /// Period used when `--period` is not given
    #[serde(default = "default_period")]
    pub default_period: String,
}

impl Default for WrappedConfig {
    fn default() -> Self {
        Self {
            default_period: default_period(),
        }
    }
}

fn default_period() -> String {
    "year".to_string()
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        if config.logging.max_files == 0 {
            return Err(Error::Config(
                "logging.max_files must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/ccwrapped/config.toml` (~/.config/ccwrapped/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("ccwrapped").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/ccwrapped/` (~/.local/state/ccwrapped/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("ccwrapped")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.wrapped.default_period, "year");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.max_files, 5);
        assert!(config.sources.stats_path.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[sources]
claude_dir = "/tmp/claude"
history_path = "/var/data/history.jsonl"

[wrapped]
default_period = "month"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.wrapped.default_period, "month");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.sources.stats_path(),
            PathBuf::from("/tmp/claude/stats-cache.json")
        );
        assert_eq!(
            config.sources.history_path(),
            PathBuf::from("/var/data/history.jsonl")
        );
    }

    #[test]
    fn test_load_from_rejects_zero_log_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nmax_files = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/ccwrapped.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
