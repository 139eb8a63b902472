#![allow(clippy::result_large_err)]

use super::PipewrightConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::Directive;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve configuration for a command invocation: the explicit file
    /// when given (missing file is an error), otherwise ./pipewright.toml,
    /// otherwise defaults. Environment overrides apply last.
    pub fn load(explicit: Option<&Path>) -> Result<PipewrightConfig, AppError> {
        match explicit {
            Some(path) => {
                let mut config = Self::load_from_file(path)?.ok_or_else(|| {
                    AppError::new(
                        ErrorCategory::IoError,
                        format!("Config file {} not found", path.display()),
                    )
                })?;
                Self::apply_env_overrides(&mut config);
                Ok(config)
            }
            None => {
                let dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                Self::load_from_dir(&dir)
            }
        }
    }

    /// Load config from a directory (dir/pipewright.toml)
    /// Environment variables override config file values
    /// Falls back to defaults when the file doesn't exist
    pub fn load_from_dir(dir: &Path) -> Result<PipewrightConfig, AppError> {
        let config_path = dir.join("pipewright.toml");
        let config_file = Self::load_from_file(&config_path)?;

        let mut config = config_file.unwrap_or_default();

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut config);

        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<PipewrightConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: PipewrightConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ParseError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut PipewrightConfig) {
        if let Ok(level) = env::var("PIPEWRIGHT_LOG_LEVEL") {
            config.logging.default_level = level;
        }

        if let Ok(format) = env::var("PIPEWRIGHT_LOG_FORMAT") {
            config.logging.format = format;
        }

        if let Ok(format) = env::var("PIPEWRIGHT_OUTPUT_FORMAT") {
            config.output.format = format;
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "PIPEWRIGHT_LOG_LEVEL - Override logging.default_level (default: info)",
            "PIPEWRIGHT_LOG_FORMAT - Override logging.format (text/json, default: text)",
            "PIPEWRIGHT_OUTPUT_FORMAT - Override output.format (yaml/json, default: yaml)",
        ]
    }

    /// Validate configuration values
    pub fn validate_config(config: &PipewrightConfig) -> Result<(), AppError> {
        Directive::from_str(&config.logging.default_level).map_err(|_| {
            AppError::new(
                ErrorCategory::ValidationError,
                "logging.default_level must be a valid tracing directive".to_string(),
            )
        })?;

        if !matches!(config.logging.format.as_str(), "text" | "json") {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                format!(
                    "logging.format must be \"text\" or \"json\", got {:?}",
                    config.logging.format
                ),
            ));
        }

        if !matches!(config.output.format.as_str(), "yaml" | "json") {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                format!(
                    "output.format must be \"yaml\" or \"json\", got {:?}",
                    config.output.format
                ),
            ));
        }

        Ok(())
    }
}
