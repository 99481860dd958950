//! `load_config` module: turns an optional YAML file plus the environment into a [`ReportConfig`].
//!
//! Every key in the file is optional; anything left out falls back to the
//! defaults in [`devsalary_core::config`]. The SuperJob secret key never lives in
//! the file, it is read from `SECRET_KEY_SUPERJOB` (a `.env` file works too).
//!
//! # Errors
//! All errors use `anyhow::Error` and are surfaced at the CLI boundary.

use anyhow::{Context, Result};
use devsalary_core::config::{default_languages, HeadHunterSettings, RetryPolicy, SuperJobSettings};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

pub const SUPERJOB_KEY_VAR: &str = "SECRET_KEY_SUPERJOB";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub languages: Vec<String>,
    pub headhunter: HeadHunterSettings,
    pub superjob: SuperJobSettings,
    pub retry: RetryPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            headhunter: HeadHunterSettings::default(),
            superjob: SuperJobSettings::default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Loads the report configuration, or the defaults when `path` is `None`.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<ReportConfig> {
    let Some(path) = path else {
        info!("No config file given, using built-in defaults");
        return Ok(ReportConfig::default());
    };
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let content = fs::read_to_string(path_ref).map_err(|e| {
        error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
        e
    })
    .with_context(|| format!("Failed to read config file {:?}", path_ref))?;

    // An empty file is a valid "all defaults" config.
    if content.trim().is_empty() {
        warn!(config_path = ?path_ref, "Config file is empty, using defaults");
        return Ok(ReportConfig::default());
    }

    let config: ReportConfig = match serde_yaml::from_str(&content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if config.languages.is_empty() {
        error!(config_path = ?path_ref, "Config lists no languages");
        anyhow::bail!("Config must list at least one language");
    }

    info!(
        languages = config.languages.len(),
        max_attempts = ?config.retry.max_attempts,
        "Config loaded"
    );
    Ok(config)
}

/// SuperJob secret key from the environment; an empty value counts as missing.
pub fn superjob_key_from_env() -> Option<String> {
    match std::env::var(SUPERJOB_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => {
            info!("{SUPERJOB_KEY_VAR} found in env");
            Some(key)
        }
        _ => {
            warn!("{SUPERJOB_KEY_VAR} not set, SuperJob statistics will be skipped");
            None
        }
    }
}
