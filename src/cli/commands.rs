use crate::{
    cli::args::{CheckArgs, NormalizeArgs, OutputFormat},
    core::{builtin_registry, job, AppError, ConfigLoader, JobThread},
    Result,
};
use anyhow::anyhow;
use clap::ValueEnum;
use std::fs;

pub fn normalize(args: NormalizeArgs) -> Result<()> {
    tracing::info!(file = %args.file.display(), "normalizing job definitions");

    let config = ConfigLoader::load(args.config.as_deref())?;
    let format = resolve_format(args.format, &config.output.format)?;

    let threads = job::load_jobs(&args.file)?;
    let registry = builtin_registry();

    let mut normalized = Vec::with_capacity(threads.len());
    for thread in threads {
        let coordinate = thread.coordinate();
        let thread = registry.normalize(thread).map_err(|e| {
            let mut error = AppError::from(e);
            error.add_context("job", &coordinate);
            error
        })?;
        normalized.push(thread);
    }

    let rendered = render(&normalized, format)?;
    match args.output {
        Some(path) => {
            fs::write(&path, &rendered)
                .map_err(|e| anyhow!("failed to write {}: {}", path.display(), e))?;
            tracing::info!(
                path = %path.display(),
                jobs = normalized.len(),
                "wrote canonical jobs"
            );
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

pub fn check(args: CheckArgs) -> Result<()> {
    tracing::info!(file = %args.file.display(), "checking job definitions");

    let threads = job::load_jobs(&args.file)?;
    let registry = builtin_registry();
    let total = threads.len();

    let mut failures = 0usize;
    for thread in threads {
        let coordinate = thread.coordinate();
        match registry.normalize(thread) {
            Ok(_) => println!("ok    {}", coordinate),
            Err(e) => {
                failures += 1;
                println!("error {}: {}", coordinate, e.message());
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!(
            "{} of {} jobs failed normalization",
            failures,
            total
        ));
    }
    println!("{} jobs normalized cleanly", total);
    Ok(())
}

fn resolve_format(cli: Option<OutputFormat>, configured: &str) -> Result<OutputFormat> {
    match cli {
        Some(format) => Ok(format),
        None => OutputFormat::from_str(configured, true).map_err(|_| {
            anyhow!(
                "output.format must be \"yaml\" or \"json\", got {:?}",
                configured
            )
        }),
    }
}

fn render(threads: &[JobThread], format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(threads)?,
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(threads)?;
            text.push('\n');
            text
        }
    };
    Ok(rendered)
}
