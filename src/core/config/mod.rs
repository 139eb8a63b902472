use serde::{Deserialize, Serialize};

/// Main pipewright configuration loaded from pipewright.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PipewrightConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing level directive applied when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub default_level: String,

    /// Console output format ("text" or "json")
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Canonical job rendering ("yaml" or "json")
    #[serde(default = "default_output_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_output_format() -> String {
    "yaml".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            default_level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: default_output_format(),
        }
    }
}


pub mod loader;

pub use loader::ConfigLoader;
