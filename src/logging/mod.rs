use crate::cli::Command;
use crate::core::config::ConfigLoader;
use crate::Result;
use anyhow::{anyhow, Context};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::filter::EnvFilter;

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize the logging framework for the provided CLI command.
///
/// Filter precedence: RUST_LOG, then the configured default level, raised
/// to debug when the command asks for verbose output. Diagnostics go to
/// stderr so stdout stays reserved for canonical job output. Errors when
/// invoked more than once per process unless tests reset the guard.
pub fn init(command: &Command) -> Result<()> {
    if LOGGER_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(anyhow!("logging already initialized"));
    }

    let config = ConfigLoader::load(config_override(command))?;
    ConfigLoader::validate_config(&config)?;

    let default_level = if wants_verbose(command) {
        "debug"
    } else {
        config.logging.default_level.as_str()
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("failed to configure tracing level")?;

    match config.logging.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
    }

    Ok(())
}

fn config_override(command: &Command) -> Option<&Path> {
    match command {
        Command::Normalize(args) => args.config.as_deref(),
        Command::Check(args) => args.config.as_deref(),
    }
}

fn wants_verbose(command: &Command) -> bool {
    match command {
        Command::Normalize(args) => args.verbose,
        Command::Check(args) => args.verbose,
    }
}

#[cfg(test)]
/// Reset the initialization guard so tests can reconfigure logging.
pub fn reset_for_tests() {
    LOGGER_INITIALIZED.store(false, Ordering::SeqCst);
}
