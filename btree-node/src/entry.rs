//! Entry lookup within a node: trailer resolution and key access.

use core::fmt;

use thiserror::Error;

use crate::node::CorruptionCode;

pub mod key;
pub mod seek;

/// Which end of the entry range a failed lookup ran off.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Bound {
    /// Negative index: before the first entry.
    Low,
    /// Index past the last entry, or the node has no trailer table.
    High,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::High => "high",
        })
    }
}

/// Failure to read an entry. `NotFound` is an expected outcome while probing
/// boundaries; `Corrupt` means the node can no longer be trusted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum EntryError {
    #[error("no entry past the {0} bound")]
    NotFound(Bound),
    #[error("node corrupt: {0}")]
    Corrupt(#[from] CorruptionCode),
}
