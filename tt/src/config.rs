//! Turnstile configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Priority;
use crate::scheduler::Backend;

/// Main Turnstile configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Round-robin scheduler defaults
    pub scheduler: SchedulerConfig,

    /// Priority queue defaults
    pub priority: PriorityConfig,

    /// Write logs to this file instead of stderr
    #[serde(rename = "log-file", skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .turnstile.yml
        let local_config = PathBuf::from(".turnstile.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/turnstile/turnstile.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("turnstile").join("turnstile.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Round-robin scheduler defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Turns given to participants registered without a count (0 = unlimited)
    #[serde(rename = "default-turns")]
    pub default_turns: i64,

    /// Upper bound on turns served when draining a scheduler
    #[serde(rename = "max-rounds")]
    pub max_rounds: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_turns: 0,
            max_rounds: 100,
        }
    }
}

/// Priority queue defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityConfig {
    /// Storage backend for new queues
    pub backend: Backend,

    /// Priority for items enqueued without one
    #[serde(rename = "default-priority")]
    pub default_priority: Priority,
}
