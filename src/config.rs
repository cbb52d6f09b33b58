//! Configuration for Routinely.
//!
//! Every section is optional in the TOML file; missing keys take the defaults
//! below. Values are validated once at load time.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DATABASE_FILE_NAME, LOCAL_CONFIG_FILE_NAME, LOG_FILE_NAME,
    PUSH_DEFAULT_API_KEY_ENV, PUSH_DEFAULT_ENDPOINT, REFRESH_INTERVAL_DEFAULT_SECS, REFRESH_INTERVAL_MAX_SECS,
    REFRESH_INTERVAL_MIN_SECS,
};
use crate::entities::Tone;
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub reminders: ReminderConfig,
    pub push: PushConfig,
    pub logging: LoggingConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file. Defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

/// Reminder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Tone used when a reminder is set without one
    /// Options: "gentle", "classic", "digital", "chime", "urgent"
    pub default_tone: String,
    /// Show local notifications (otherwise plain alerts)
    pub local_notifications: bool,
    /// How often the session re-reads storage, in seconds
    pub refresh_interval_seconds: u64,
}

/// Remote push configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Deliver reminders through the push service when available
    pub enabled: bool,
    /// Notification endpoint of the push service
    pub endpoint: String,
    /// Application id at the push service
    pub app_id: String,
    /// Environment variable holding the push API key
    pub api_key_env: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to a file
    pub enabled: bool,
    /// Log level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
    /// Log file. Defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            default_tone: Tone::default().id().to_string(),
            local_notifications: true,
            refresh_interval_seconds: REFRESH_INTERVAL_DEFAULT_SECS,
        }
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: PUSH_DEFAULT_ENDPOINT.to_string(),
            app_id: String::new(),
            api_key_env: PUSH_DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            file: None,
        }
    }
}

impl ReminderConfig {
    /// The configured default tone. Falls back to gentle if invalid.
    pub fn default_tone(&self) -> Tone {
        Tone::from_str(&self.default_tone).unwrap_or_default()
    }
}

impl Config {
    /// Load the first configuration file found, or defaults when there is none
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a specific configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("Invalid config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// `./routinely.toml` wins over the per-user config file
    fn find_config_file() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
        let user = dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME));

        std::iter::once(local).chain(user).find(|candidate| candidate.exists())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate reminder settings
        if Tone::from_str(&self.reminders.default_tone).is_err() {
            anyhow::bail!(
                "default_tone '{}' is not a known tone ({})",
                self.reminders.default_tone,
                Tone::ALL.map(|tone| tone.id()).join(", ")
            );
        }

        let interval = self.reminders.refresh_interval_seconds;
        if !(REFRESH_INTERVAL_MIN_SECS..=REFRESH_INTERVAL_MAX_SECS).contains(&interval) {
            anyhow::bail!(
                "refresh_interval_seconds must be between {} and {}, got {}",
                REFRESH_INTERVAL_MIN_SECS,
                REFRESH_INTERVAL_MAX_SECS,
                interval
            );
        }

        // Validate push settings
        if self.push.enabled {
            if self.push.app_id.trim().is_empty() {
                anyhow::bail!("push.app_id cannot be empty when push is enabled");
            }
            if self.push.api_key_env.trim().is_empty() {
                anyhow::bail!("push.api_key_env cannot be empty when push is enabled");
            }
            if let Err(e) = reqwest::Url::parse(&self.push.endpoint) {
                anyhow::bail!("Invalid push endpoint '{}': {}", self.push.endpoint, e);
            }
        }

        // Validate logging settings
        if let Err(e) = log::LevelFilter::from_str(&self.logging.level) {
            anyhow::bail!("Invalid logging level '{}': {}", self.logging.level, e);
        }

        Ok(())
    }

    /// Database file, from configuration or the platform data directory
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.storage.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::get_data_dir()?.join(DATABASE_FILE_NAME)),
        }
    }

    /// Log file, from configuration or the platform data directory
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.logging.file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::get_data_dir()?.join(LOG_FILE_NAME)),
        }
    }

    /// Write the default configuration, with a generated-on header, to `path`
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let body = toml::to_string_pretty(&Self::default()).context("Failed to serialize default config")?;
        let header = format!(
            "# Routinely Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::DATE_KEY_FORMAT)
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        std::fs::write(path, header + &body)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.display());
        Ok(())
    }

    /// Per-user config file, `<config_dir>/routinely/config.toml`
    pub fn get_default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Where the database and log file live unless configured
    pub fn get_data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
    }
}
