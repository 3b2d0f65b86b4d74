use crate::config::{DECLARATION_SCAN_LINES, DEFAULT_ENCODING};
use crate::core::encoding::{
    ByteOrder, Encoding, UTF8_BOM, UTF16_BE_BOM, UTF16_LE_BOM, UTF32_BE_BOM, UTF32_LE_BOM,
    UnknownEncoding,
};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{instrument, trace};

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[ \t\x0C]*#.*?coding[:=][ \t]*([-\w.]+)")
        .expect("declaration pattern is valid")
});

static BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t\x0C]*(?:[#\r\n]|$)").expect("blank pattern is valid"));

// UTF-32 LE must be tried before UTF-16 LE: it starts with the same two bytes.
const MARKS: [(&[u8], Encoding); 5] = [
    (
        UTF32_LE_BOM,
        Encoding::Utf32 {
            order: ByteOrder::Little,
            bom: true,
        },
    ),
    (
        UTF32_BE_BOM,
        Encoding::Utf32 {
            order: ByteOrder::Big,
            bom: true,
        },
    ),
    (UTF8_BOM, Encoding::UTF_8_SIG),
    (
        UTF16_LE_BOM,
        Encoding::Utf16 {
            order: ByteOrder::Little,
            bom: true,
        },
    ),
    (
        UTF16_BE_BOM,
        Encoding::Utf16 {
            order: ByteOrder::Big,
            bom: true,
        },
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("byte-order mark says '{bom}' but the coding declaration says '{declared}'")]
    Conflict { bom: Encoding, declared: Encoding },
    #[error(transparent)]
    Unknown(#[from] UnknownEncoding),
}

/// Returns the encoding fixed by a leading byte-order mark and the mark's length.
pub fn detect_bom(bytes: &[u8]) -> Option<(Encoding, usize)> {
    MARKS
        .iter()
        .find(|(mark, _)| bytes.starts_with(mark))
        .map(|(mark, encoding)| (*encoding, mark.len()))
}

/// Finds a `coding:` declaration in the first lines of `bytes`.
///
/// Lines are matched as lossy UTF-8; the declaration itself is plain ASCII.
pub fn declared_encoding(bytes: &[u8]) -> Result<Option<Encoding>, EncodingError> {
    scan_declaration(
        bytes
            .split_inclusive(|&b| b == b'\n')
            .map(String::from_utf8_lossy),
    )
}

fn scan_declaration<'a>(
    lines: impl Iterator<Item = Cow<'a, str>>,
) -> Result<Option<Encoding>, EncodingError> {
    for line in lines.take(DECLARATION_SCAN_LINES) {
        if let Some(name) = DECLARATION.captures(&line).and_then(|c| c.get(1)) {
            let encoding = Encoding::from_name(&normalize_declared_name(name.as_str()))?;
            trace!(declared = name.as_str(), %encoding, "found coding declaration");
            return Ok(Some(encoding));
        }
        // A declaration on the second line only counts when the first one is
        // blank or a comment.
        if !BLANK.is_match(&line) {
            break;
        }
    }
    Ok(None)
}

/// Folds the spellings editors put in declarations (`utf-8-unix`,
/// `latin-1-dos`, `UTF_8`) onto a codec name.
fn normalize_declared_name(name: &str) -> String {
    let lowered: String = name
        .chars()
        .take(12)
        .map(|c| if c == '_' { '-' } else { c.to_ascii_lowercase() })
        .collect();

    if lowered == "utf-8" || lowered.starts_with("utf-8-") {
        return "utf-8".to_string();
    }
    for latin in ["latin-1", "iso-8859-1", "iso-latin-1"] {
        if lowered == latin || lowered.starts_with(&format!("{latin}-")) {
            return "iso-8859-1".to_string();
        }
    }
    name.to_string()
}

pub fn resolve_encoding(bytes: &[u8]) -> Result<Encoding, EncodingError> {
    resolve_encoding_or(bytes, DEFAULT_ENCODING)
}

/// Decides which encoding `bytes` are in.
///
/// A byte-order mark wins over everything but must agree with a declaration if
/// both are present; a declaration alone is trusted; otherwise `fallback`.
#[instrument(level = "trace", skip(bytes), fields(len = bytes.len()))]
pub fn resolve_encoding_or(bytes: &[u8], fallback: Encoding) -> Result<Encoding, EncodingError> {
    let Some((bom, len)) = detect_bom(bytes) else {
        return Ok(declared_encoding(bytes)?.unwrap_or(fallback));
    };

    let declared = match bom {
        Encoding::Utf8 { .. } => declared_encoding(&bytes[len..])?,
        // Wide encodings have to be decoded before the lines can be read. If
        // that fails the caller's own decode reports it.
        _ => match bom.decode(bytes) {
            Ok(text) => scan_declaration(text.split_inclusive('\n').map(Cow::Borrowed))?,
            Err(_) => None,
        },
    };

    match declared {
        Some(declared) if !declared.accepts_bom_of(bom) => {
            Err(EncodingError::Conflict { bom, declared })
        }
        _ => Ok(bom),
    }
}
