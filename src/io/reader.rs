use crate::config::ReadOptions;
use crate::core::detection::resolve_encoding_or;
use crate::core::encoding::Encoding;
use crate::error::ReadError;
use crate::io::permission;
use crate::utils::newline::Newline;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

/// Full text of a file together with how it was decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSource {
    pub text: String,
    pub encoding: Encoding,
    pub newline: Newline,
}

impl DecodedSource {
    /// Lines with their terminators kept, ready to hand back to
    /// [`crate::io::writer::safe_write`].
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split_inclusive('\n')
    }
}

/// Reads `path` after checking it is readable.
pub fn safe_read(path: &Path) -> Result<DecodedSource, ReadError> {
    safe_read_with(path, &ReadOptions::default())
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn safe_read_with(path: &Path, options: &ReadOptions) -> Result<DecodedSource, ReadError> {
    permission::check(path, &options.rights)?;

    let bytes = fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let encoding =
        resolve_encoding_or(&bytes, options.fallback).map_err(|e| ReadError::unparsable(path, e))?;
    let text = encoding
        .decode(&bytes)
        .map_err(|e| ReadError::unparsable(path, e))?;
    let newline = Newline::detect(&text);

    debug!(%encoding, ?newline, bytes = bytes.len(), "decoded source");
    Ok(DecodedSource {
        text,
        encoding,
        newline,
    })
}
