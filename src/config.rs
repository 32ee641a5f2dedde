//! Configuration management for launchdeck
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{CONFIG_GENERATED, FILTER_KEY_ALL, SIDEBAR_DEFAULT_WIDTH, SIDEBAR_MAX_WIDTH, SIDEBAR_MIN_WIDTH};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub ui: UiConfig,
    pub filters: FiltersConfig,
    pub logging: LoggingConfig,
}

/// Reporting server connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the reporting server
    pub base_url: String,
    /// Project name all requests are scoped to
    pub project: String,
    /// Environment variable holding the API token
    pub api_token_env: String,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// View shown on startup: "launches" or "widgets"
    pub default_view: String,
    /// Sidebar width in columns
    pub sidebar_width: u16,
    /// Icon theme: "emoji", "unicode" or "ascii"
    pub icons: String,
}

/// Saved-filter behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Filter the launches view falls back to when the one it is on gets
    /// deleted. "all" selects every launch and never needs activation.
    pub fallback: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write log records to a file
    pub enabled: bool,
    /// Log file path, relative paths resolve against the working directory
    pub file: String,
    /// Maximum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            project: "default_personal".to_string(),
            api_token_env: "LAUNCHDECK_API_TOKEN".to_string(),
            request_timeout_seconds: 10,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_view: "launches".to_string(),
            sidebar_width: SIDEBAR_DEFAULT_WIDTH,
            icons: "unicode".to_string(),
        }
    }
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            fallback: FILTER_KEY_ALL.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file: "launchdeck.log".to_string(),
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("launchdeck.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("launchdeck").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.is_empty() {
            anyhow::bail!("server.base_url cannot be empty");
        }
        if !self.server.base_url.starts_with("http://") && !self.server.base_url.starts_with("https://") {
            anyhow::bail!("server.base_url must start with http:// or https://, got '{}'", self.server.base_url);
        }
        if self.server.project.is_empty() {
            anyhow::bail!("server.project cannot be empty");
        }
        if self.server.api_token_env.is_empty() {
            anyhow::bail!("server.api_token_env cannot be empty");
        }
        if self.server.request_timeout_seconds == 0 || self.server.request_timeout_seconds > 300 {
            anyhow::bail!(
                "server.request_timeout_seconds must be between 1 and 300, got {}",
                self.server.request_timeout_seconds
            );
        }

        if self.ui.sidebar_width < SIDEBAR_MIN_WIDTH || self.ui.sidebar_width > SIDEBAR_MAX_WIDTH {
            anyhow::bail!(
                "sidebar_width must be between {} and {} columns, got {}",
                SIDEBAR_MIN_WIDTH,
                SIDEBAR_MAX_WIDTH,
                self.ui.sidebar_width
            );
        }

        let valid_views = ["launches", "widgets"];
        if !valid_views.contains(&self.ui.default_view.as_str()) {
            anyhow::bail!(
                "ui.default_view must be one of {:?}, got '{}'",
                valid_views,
                self.ui.default_view
            );
        }

        if crate::icons::IconTheme::from_name(&self.ui.icons).is_none() {
            anyhow::bail!(
                "ui.icons must be one of [\"emoji\", \"unicode\", \"ascii\"], got '{}'",
                self.ui.icons
            );
        }

        if self.filters.fallback.is_empty() {
            anyhow::bail!("filters.fallback cannot be empty; use '{}' for no filter", FILTER_KEY_ALL);
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "logging.level must be one of {:?}, got '{}'",
                valid_levels,
                self.logging.level
            );
        }
        if self.logging.enabled && self.logging.file.is_empty() {
            anyhow::bail!("logging.file cannot be empty when logging is enabled");
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# launchdeck configuration file\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("launchdeck"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
