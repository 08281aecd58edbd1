//! Configuration file loading with precedence handling.

use crate::view::styles::ThemeName;
use crate::view_state::render::{EstimateDefaults, DEFAULT_HEADER_ESTIMATE, DEFAULT_ITEM_ESTIMATE};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "LIVINGDOC_CONFIG";

/// Environment variable overriding the theme.
pub const THEME_ENV_VAR: &str = "LIVINGDOC_THEME";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/livingdoc/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Theme name: light, dark, sepia or black.
    #[serde(default)]
    pub theme: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Rows assumed for a section header that cannot be measured.
    #[serde(default)]
    pub header_estimate: Option<u16>,

    /// Rows assumed for an event cell that cannot be measured.
    #[serde(default)]
    pub item_estimate: Option<u16>,

    /// Artificial delay before a requested page is delivered.
    #[serde(default)]
    pub fetch_latency_ms: Option<u64>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Active color theme.
    pub theme: ThemeName,
    /// Path to the log file.
    pub log_file_path: PathBuf,
    /// Estimated section header height, in rows.
    pub header_estimate: u16,
    /// Estimated item height, in rows.
    pub item_estimate: u16,
    /// Delay before a requested page is delivered, in milliseconds.
    pub fetch_latency_ms: u64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            theme: ThemeName::default(),
            log_file_path: default_log_path(),
            header_estimate: DEFAULT_HEADER_ESTIMATE,
            item_estimate: DEFAULT_ITEM_ESTIMATE,
            fetch_latency_ms: 0,
        }
    }
}

impl ResolvedConfig {
    /// Fallback heights for the render adapter.
    pub fn estimate_defaults(&self) -> EstimateDefaults {
        EstimateDefaults {
            header: self.header_estimate,
            item: self.item_estimate,
        }
    }

    /// Page delivery delay as a [`Duration`].
    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/livingdoc/livingdoc.log` on Linux, or the platform state
/// directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("livingdoc").join("livingdoc.log"),
        None => PathBuf::from("livingdoc.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path: `~/.config/livingdoc/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("livingdoc").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LIVINGDOC_CONFIG` environment variable
/// 3. Default path `~/.config/livingdoc/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Apply environment variable overrides (`LIVINGDOC_THEME`).
///
/// An unrecognised theme name is logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(theme) = std::env::var(THEME_ENV_VAR) {
        match theme.parse() {
            Ok(theme) => config.theme = theme,
            Err(e) => warn!(error = %e, "Ignoring {}", THEME_ENV_VAR),
        }
    }
    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default. An
/// unrecognised theme name is logged and the default kept.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let theme = match config.theme.as_deref().map(str::parse::<ThemeName>) {
        Some(Ok(theme)) => theme,
        Some(Err(e)) => {
            warn!(error = %e, "Ignoring theme from config file");
            defaults.theme
        }
        None => defaults.theme,
    };

    ResolvedConfig {
        theme,
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        header_estimate: config.header_estimate.unwrap_or(defaults.header_estimate),
        item_estimate: config.item_estimate.unwrap_or(defaults.item_estimate),
        fetch_latency_ms: config.fetch_latency_ms.unwrap_or(defaults.fetch_latency_ms),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    theme_override: Option<ThemeName>,
    latency_override: Option<u64>,
) -> ResolvedConfig {
    if let Some(theme) = theme_override {
        config.theme = theme;
    }
    if let Some(latency) = latency_override {
        config.fetch_latency_ms = latency;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
