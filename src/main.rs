mod cli;

use anyhow::Result;
use clap::Parser;
use cli::args::{Args, Commands};
use cli::commands::{detect, read, write};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Read {
            path,
            json,
            require_write,
            fallback,
        } => read::execute(path, json, require_write, fallback),
        Commands::Write {
            path,
            encoding,
            input,
        } => write::execute(path, encoding, input),
        Commands::Detect { path } => detect::execute(path),
    }
}
