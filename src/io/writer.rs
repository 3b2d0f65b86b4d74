use crate::config::DEFAULT_WRITE_RIGHTS;
use crate::core::encoding::Encoding;
use crate::error::WriteError;
use crate::io::permission;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, instrument};

/// Replaces the content of `path` with `lines` encoded as `encoding`.
///
/// Lines are written as given, no separator is added. A BOM is emitted first
/// for the signature encodings (`utf-8-sig`, `utf-16`, `utf-32`).
///
/// The file is truncated before encoding starts. If a line cannot be encoded
/// the lines before it stay on disk and the file content is indeterminate.
#[instrument(skip_all, fields(path = %path.display(), %encoding))]
pub fn safe_write<I>(path: &Path, lines: I, encoding: Encoding) -> Result<(), WriteError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    permission::check(path, DEFAULT_WRITE_RIGHTS)?;

    let io_error = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(io_error)?;
    let mut writer = BufWriter::new(file);

    let mut written = 0;
    if let Some(bom) = encoding.bom() {
        writer.write_all(bom).map_err(io_error)?;
        written += bom.len();
    }

    let mut buffer = Vec::new();
    for line in lines {
        let line = line.as_ref();
        buffer.clear();
        encoding
            .encode_into(line, &mut buffer)
            .map_err(|source| WriteError::Encode {
                path: path.to_path_buf(),
                content: line.to_string(),
                source,
            })?;
        writer.write_all(&buffer).map_err(io_error)?;
        written += buffer.len();
    }

    writer.flush().map_err(io_error)?;
    debug!(bytes = written, "wrote source");
    Ok(())
}
