use anyhow::{Context, Result};
use safeio::safe_read;
use std::path::PathBuf;

pub fn execute(path: PathBuf) -> Result<()> {
    let source = safe_read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    println!("{}", source.encoding);
    Ok(())
}
