pub mod options;

use crate::core::encoding::Encoding;
use crate::io::permission::AccessRight;

pub use options::ReadOptions;

/// Encoding used when a file carries neither a BOM nor a declaration.
pub const DEFAULT_ENCODING: Encoding = Encoding::UTF_8;

/// Number of leading lines searched for a `coding:` declaration (PEP 263).
pub const DECLARATION_SCAN_LINES: usize = 2;

pub const DEFAULT_READ_RIGHTS: &[AccessRight] = &[AccessRight::Read];
pub const DEFAULT_WRITE_RIGHTS: &[AccessRight] = &[AccessRight::Write];
