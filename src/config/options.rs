use super::{DEFAULT_ENCODING, DEFAULT_READ_RIGHTS};
use crate::core::encoding::Encoding;
use crate::io::permission::AccessRight;

/// Knobs for [`crate::io::reader::safe_read_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Rights the gate demands before the file is opened.
    pub rights: Vec<AccessRight>,
    /// Encoding used when the file has no BOM and no declaration.
    pub fallback: Encoding,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            rights: DEFAULT_READ_RIGHTS.to_vec(),
            fallback: DEFAULT_ENCODING,
        }
    }
}

impl ReadOptions {
    /// Also demand write access, for callers that will rewrite what they read.
    pub fn require_write(mut self) -> Self {
        if !self.rights.contains(&AccessRight::Write) {
            self.rights.push(AccessRight::Write);
        }
        self
    }

    pub fn fallback(mut self, encoding: Encoding) -> Self {
        self.fallback = encoding;
        self
    }
}
