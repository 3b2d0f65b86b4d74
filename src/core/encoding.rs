use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
pub const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
pub const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];
pub const UTF32_LE_BOM: &[u8] = &[0xFF, 0xFE, 0x00, 0x00];
pub const UTF32_BE_BOM: &[u8] = &[0x00, 0x00, 0xFE, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    fn read_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::Little => u16::from_le_bytes(bytes),
            ByteOrder::Big => u16::from_be_bytes(bytes),
        }
    }

    fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        }
    }

    fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }

    fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }
}

/// A text encoding the reader can decode and the writer can produce.
///
/// The `bom` flag on the UTF variants marks the "signature" flavour: decoding
/// consumes a leading byte-order mark and encoding a whole file emits one. This
/// is what lets a BOM-prefixed file survive a read/write cycle unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Ascii,
    Latin1,
    Utf8 { bom: bool },
    Utf16 { order: ByteOrder, bom: bool },
    Utf32 { order: ByteOrder, bom: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown encoding: {0}")]
pub struct UnknownEncoding(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{encoding}' codec can't decode data at byte {position}: {reason}")]
pub struct DecodeError {
    pub encoding: Encoding,
    pub position: usize,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{encoding}' codec can't encode character {character:?} at position {position}")]
pub struct EncodeError {
    pub encoding: Encoding,
    pub character: char,
    pub position: usize,
}

impl Encoding {
    pub const UTF_8: Encoding = Encoding::Utf8 { bom: false };
    pub const UTF_8_SIG: Encoding = Encoding::Utf8 { bom: true };

    /// Looks an encoding up by name, accepting the usual aliases
    /// (`utf8`, `UTF_16LE`, `latin1`, `us-ascii`, ...).
    pub fn from_name(name: &str) -> Result<Encoding, UnknownEncoding> {
        let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
        let encoding = match normalized.as_str() {
            "utf-8" | "utf8" | "u8" | "utf" | "cp65001" => Encoding::UTF_8,
            "utf-8-sig" | "utf8-sig" => Encoding::UTF_8_SIG,
            "utf-16" | "utf16" | "u16" => Encoding::Utf16 {
                order: ByteOrder::Little,
                bom: true,
            },
            "utf-16-le" | "utf-16le" | "utf16le" => Encoding::Utf16 {
                order: ByteOrder::Little,
                bom: false,
            },
            "utf-16-be" | "utf-16be" | "utf16be" => Encoding::Utf16 {
                order: ByteOrder::Big,
                bom: false,
            },
            "utf-32" | "utf32" | "u32" => Encoding::Utf32 {
                order: ByteOrder::Little,
                bom: true,
            },
            "utf-32-le" | "utf-32le" | "utf32le" => Encoding::Utf32 {
                order: ByteOrder::Little,
                bom: false,
            },
            "utf-32-be" | "utf-32be" | "utf32be" => Encoding::Utf32 {
                order: ByteOrder::Big,
                bom: false,
            },
            "iso-8859-1" | "iso8859-1" | "8859" | "cp819" | "latin" | "latin-1" | "latin1"
            | "l1" | "iso-latin-1" => Encoding::Latin1,
            "ascii" | "us-ascii" | "us" | "646" => Encoding::Ascii,
            _ => return Err(UnknownEncoding(name.to_string())),
        };
        Ok(encoding)
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "iso-8859-1",
            Encoding::Utf8 { bom: false } => "utf-8",
            Encoding::Utf8 { bom: true } => "utf-8-sig",
            Encoding::Utf16 { bom: true, .. } => "utf-16",
            Encoding::Utf16 {
                order: ByteOrder::Little,
                bom: false,
            } => "utf-16-le",
            Encoding::Utf16 {
                order: ByteOrder::Big,
                bom: false,
            } => "utf-16-be",
            Encoding::Utf32 { bom: true, .. } => "utf-32",
            Encoding::Utf32 {
                order: ByteOrder::Little,
                bom: false,
            } => "utf-32-le",
            Encoding::Utf32 {
                order: ByteOrder::Big,
                bom: false,
            } => "utf-32-be",
        }
    }

    /// The byte-order mark written at the start of a file in this encoding.
    pub fn bom(self) -> Option<&'static [u8]> {
        match self {
            Encoding::Utf8 { bom: true } => Some(UTF8_BOM),
            Encoding::Utf16 { order, bom: true } => Some(match order {
                ByteOrder::Little => UTF16_LE_BOM,
                ByteOrder::Big => UTF16_BE_BOM,
            }),
            Encoding::Utf32 { order, bom: true } => Some(match order {
                ByteOrder::Little => UTF32_LE_BOM,
                ByteOrder::Big => UTF32_BE_BOM,
            }),
            _ => None,
        }
    }

    /// Whether a declaration naming `self` agrees with a byte-order mark that
    /// resolved to `found`. Same UTF family is required; a declared byte order
    /// must also match.
    pub fn accepts_bom_of(self, found: Encoding) -> bool {
        match (self, found) {
            (Encoding::Utf8 { .. }, Encoding::Utf8 { .. }) => true,
            (Encoding::Utf16 { order, bom }, Encoding::Utf16 { order: found, .. })
            | (Encoding::Utf32 { order, bom }, Encoding::Utf32 { order: found, .. }) => {
                bom || order == found
            }
            _ => false,
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<String, DecodeError> {
        let result: Result<String, (usize, &'static str)> = match self {
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(position) => Err((position, "ordinal not in range(128)")),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Encoding::Utf8 { bom } => {
                let skip = if bom && bytes.starts_with(UTF8_BOM) {
                    UTF8_BOM.len()
                } else {
                    0
                };
                std::str::from_utf8(&bytes[skip..])
                    .map(str::to_owned)
                    .map_err(|e| (skip + e.valid_up_to(), "invalid utf-8 sequence"))
            }
            Encoding::Utf16 { order, bom } => {
                let (order, skip) = if !bom {
                    (order, 0)
                } else if bytes.starts_with(UTF16_LE_BOM) {
                    (ByteOrder::Little, 2)
                } else if bytes.starts_with(UTF16_BE_BOM) {
                    (ByteOrder::Big, 2)
                } else {
                    (order, 0)
                };
                decode_utf16(&bytes[skip..], order).map_err(|(at, reason)| (skip + at, reason))
            }
            Encoding::Utf32 { order, bom } => {
                let (order, skip) = if !bom {
                    (order, 0)
                } else if bytes.starts_with(UTF32_LE_BOM) {
                    (ByteOrder::Little, 4)
                } else if bytes.starts_with(UTF32_BE_BOM) {
                    (ByteOrder::Big, 4)
                } else {
                    (order, 0)
                };
                decode_utf32(&bytes[skip..], order).map_err(|(at, reason)| (skip + at, reason))
            }
        };

        result.map_err(|(position, reason)| DecodeError {
            encoding: self,
            position,
            reason,
        })
    }

    /// Appends the encoded form of `text` to `out`. Never writes a BOM; see
    /// [`Encoding::bom`]. On error `out` may hold a partial encoding.
    pub fn encode_into(self, text: &str, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        match self {
            Encoding::Ascii => return self.encode_narrow(text, 0x7F, out),
            Encoding::Latin1 => return self.encode_narrow(text, 0xFF, out),
            Encoding::Utf8 { .. } => out.extend_from_slice(text.as_bytes()),
            Encoding::Utf16 { order, .. } => {
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&order.u16_bytes(unit));
                }
            }
            Encoding::Utf32 { order, .. } => {
                for character in text.chars() {
                    out.extend_from_slice(&order.u32_bytes(u32::from(character)));
                }
            }
        }
        Ok(())
    }

    fn encode_narrow(self, text: &str, limit: u32, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        for (position, character) in text.chars().enumerate() {
            let code = u32::from(character);
            if code > limit {
                return Err(EncodeError {
                    encoding: self,
                    character,
                    position,
                });
            }
            out.push(code as u8);
        }
        Ok(())
    }
}

fn decode_utf16(body: &[u8], order: ByteOrder) -> Result<String, (usize, &'static str)> {
    let chunks = body.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return Err((body.len() - 1, "truncated data"));
    }

    let units = chunks.map(|pair| order.read_u16([pair[0], pair[1]]));
    let mut text = String::with_capacity(body.len() / 2);
    let mut position = 0;
    for decoded in char::decode_utf16(units) {
        match decoded {
            Ok(character) => {
                position += character.len_utf16() * 2;
                text.push(character);
            }
            Err(_) => return Err((position, "illegal UTF-16 surrogate")),
        }
    }
    Ok(text)
}

fn decode_utf32(body: &[u8], order: ByteOrder) -> Result<String, (usize, &'static str)> {
    let chunks = body.chunks_exact(4);
    if !chunks.remainder().is_empty() {
        return Err((body.len() - chunks.remainder().len(), "truncated data"));
    }

    let mut text = String::with_capacity(body.len() / 4);
    for (index, quad) in chunks.enumerate() {
        let value = order.read_u32([quad[0], quad[1], quad[2], quad[3]]);
        match char::from_u32(value) {
            Some(character) => text.push(character),
            None => return Err((index * 4, "code point not in range(0x110000)")),
        }
    }
    Ok(text)
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::UTF_8
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::from_name(s)
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
