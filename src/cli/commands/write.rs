use anyhow::{Context, Result};
use safeio::{Encoding, safe_write};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;

pub fn execute(path: PathBuf, encoding: Encoding, input: Option<String>) -> Result<()> {
    let content = match input.as_deref() {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
        Some(file_path) => fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read input file: {}", file_path))?,
    };

    let lines: Vec<&str> = content.split_inclusive('\n').collect();

    safe_write(&path, &lines, encoding)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(
        "Wrote {} lines to {} as {}",
        lines.len(),
        path.display(),
        encoding
    );
    Ok(())
}
