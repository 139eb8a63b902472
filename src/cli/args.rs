use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct NormalizeArgs {
    /// Path to the job definitions file (YAML or JSON)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Emit either terminal-friendly YAML or machine-readable JSON
    #[arg(long, value_name = "FORMAT", help_heading = "Output Options")]
    pub format: Option<OutputFormat>,

    /// Write canonical output to a file instead of stdout
    #[arg(long, value_name = "FILE", help_heading = "Output Options")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(long, help_heading = "Output Options")]
    pub verbose: bool,

    /// Path to custom config file (default: ./pipewright.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the job definitions file (YAML or JSON)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Enable verbose logging output
    #[arg(long, help_heading = "Output Options")]
    pub verbose: bool,

    /// Path to custom config file (default: ./pipewright.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable YAML document
    Yaml,
    /// JSON payload suitable for downstream tooling
    Json,
}
