use clap::{Parser, Subcommand};
use safeio::Encoding;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "safeio")]
#[command(about = "Read and rewrite source files with permission and encoding checks")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the decoded content of a file
    Read {
        /// File to read
        path: PathBuf,

        /// Print a JSON report with encoding and newline style instead of the text
        #[arg(long)]
        json: bool,

        /// Also require write permission on the file
        #[arg(short = 'w', long)]
        require_write: bool,

        /// Encoding assumed when the file has no BOM and no coding declaration
        #[arg(long, default_value = "utf-8")]
        fallback: Encoding,
    },
    /// Replace the content of a file with lines read from INPUT or stdin
    Write {
        /// File to overwrite (must already exist)
        path: PathBuf,

        /// Target encoding
        #[arg(short = 'e', long, default_value = "utf-8")]
        encoding: Encoding,

        /// File holding the new UTF-8 content, '-' or omit to read from stdin
        #[arg(short = 'i', long)]
        input: Option<String>,
    },
    /// Print the encoding a file would be decoded with
    Detect {
        /// File to inspect
        path: PathBuf,
    },
}
