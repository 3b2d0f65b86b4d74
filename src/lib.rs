//! Permission-checked, encoding-aware reading and writing of single source
//! files.

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod utils;

pub use crate::config::ReadOptions;
pub use crate::core::detection::{EncodingError, resolve_encoding, resolve_encoding_or};
pub use crate::core::encoding::{ByteOrder, Encoding};
pub use crate::error::{PermissionError, ReadError, UnparsableReason, WriteError};
pub use crate::io::permission::{AccessRight, check, has_access};
pub use crate::io::reader::{DecodedSource, safe_read, safe_read_with};
pub use crate::io::writer::safe_write;
pub use crate::utils::newline::Newline;
