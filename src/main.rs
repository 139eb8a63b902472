use clap::Parser;
use pipewright::cli::{self, Args};

fn main() -> pipewright::Result<()> {
    let args = Args::parse();
    pipewright::logging::init(&args.command)?;
    cli::run(args)
}
