//! Block-spec parsing.
//!
//! A block-spec names a remote and, optionally, one block inside it:
//! `acme:button` selects `button` from the `acme` remote, while `acme`
//! alone means "every block this remote offers".

use std::fmt;
use std::str::FromStr;

use crate::error::{BorrowrError, Result};

/// A parsed `remote[:block]` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockSpec {
    /// Name of the configured remote.
    pub remote_id: String,
    /// Block inside the remote; `None` when the spec had no `:`.
    pub block_id: Option<String>,
}

impl BlockSpec {
    /// Parse a block-spec string.
    ///
    /// Splits on the first `:`. Everything after it is the block id, taken
    /// verbatim (an empty block id is kept as `Some("")`).
    pub fn parse(spec: &str) -> Result<Self> {
        let (remote_id, block_id) = match spec.split_once(':') {
            Some((remote, block)) => (remote, Some(block.to_string())),
            None => (spec, None),
        };

        if remote_id.is_empty() {
            return Err(BorrowrError::InvalidBlockSpec {
                spec: spec.to_string(),
                message: "Missing remote id".to_string(),
            });
        }

        Ok(Self {
            remote_id: remote_id.to_string(),
            block_id,
        })
    }

    /// Whether this spec selects every block of its remote.
    pub fn selects_all(&self) -> bool {
        self.block_id.is_none()
    }
}

impl FromStr for BlockSpec {
    type Err = BorrowrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for BlockSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.block_id {
            Some(block) => write!(f, "{}:{}", self.remote_id, block),
            None => write!(f, "{}", self.remote_id),
        }
    }
}
