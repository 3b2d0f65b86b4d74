use anyhow::{Context, Result};
use safeio::{Encoding, Newline, ReadOptions, safe_read_with};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Serialize)]
struct ReadReport<'a> {
    path: &'a Path,
    encoding: Encoding,
    newline: Newline,
    text: &'a str,
}

pub fn execute(path: PathBuf, json: bool, require_write: bool, fallback: Encoding) -> Result<()> {
    let mut options = ReadOptions::default().fallback(fallback);
    if require_write {
        options = options.require_write();
    }
    debug!("Reading {} with rights {:?}", path.display(), options.rights);

    let source = safe_read_with(&path, &options)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    info!("Decoded {} as {}", path.display(), source.encoding);

    if json {
        let report = ReadReport {
            path: &path,
            encoding: source.encoding,
            newline: source.newline,
            text: &source.text,
        };
        let rendered =
            serde_json::to_string_pretty(&report).context("Failed to serialize read report")?;
        println!("{}", rendered);
    } else {
        print!("{}", source.text);
    }

    Ok(())
}
