pub mod args;
pub mod commands;

pub use args::{CheckArgs, NormalizeArgs, OutputFormat};
use crate::core::normalize::security;
use crate::core::ConfigLoader;
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
JOB COMMANDS:\n{subcommands}\n\
{after-help}";

#[derive(Parser)]
#[command(name = "pipewright")]
#[command(version = crate::VERSION)]
#[command(about = "Normalizer for container-based CI job definitions")]
#[command(help_template = HELP_TEMPLATE)]
#[command(after_long_help = long_help_footer())]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Footer for `pipewright --help`: the intended workflow plus the
/// environment variables the tool reads.
fn long_help_footer() -> String {
    let mut text = String::from(
        "Typical flow: check job definitions during review, then normalize \
         them to feed the execution engine.\n\nENVIRONMENT:\n",
    );
    for line in ConfigLoader::env_var_documentation() {
        text.push_str("    ");
        text.push_str(line);
        text.push('\n');
    }
    text.push_str(&format!(
        "    {} - Comma-separated image globs treated as secure\n",
        security::SECURE_IMAGES_VAR
    ));
    text
}

#[derive(Subcommand)]
pub enum Command {
    #[command(
        about = "Normalize job definitions to canonical form",
        long_about = "Normalize loads a job definitions file, runs every job through the option normalizer registry, and renders the canonical jobs as YAML or JSON.",
        after_help = "Examples:\n    pipewright normalize jobs.yaml\n    pipewright normalize jobs.yaml --format json --output jobs.canonical.json"
    )]
    Normalize(NormalizeArgs),
    #[command(
        about = "Validate job definitions without emitting output",
        long_about = "Check normalizes every job and reports one status line per job coordinate, failing when any job cannot be normalized.",
        after_help = "Example:\n    pipewright check jobs.yaml"
    )]
    Check(CheckArgs),
}

pub fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Normalize(normalize_args) => commands::normalize(normalize_args),
        Command::Check(check_args) => commands::check(check_args),
    }
}
