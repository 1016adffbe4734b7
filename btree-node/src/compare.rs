//! Ordering of a lookup key against the key stored at one entry of a node.
//!
//! The stored key is `segment0 ++ segment1`; a key with an empty second
//! segment is a plain single-segment key. The result is the lexicographic
//! (unsigned byte) order of the lookup key against the full stored key, so
//! keys longer than the first segment are ordered correctly whether or not a
//! second segment is present.

use core::cmp::Ordering;

use crate::{
    entry::{
        Bound, EntryError,
        key::{Segment, checked_segment},
        seek::resolve_trailer,
    },
    node::{CorruptionCode, Node},
    trailer::EntryTrailer,
};

/// Integer returned by [`CompareOutcome::legacy_code`] for a missing entry
/// before the first one. The missing entry sorts before every key.
pub const NOT_FOUND_LOW: i32 = 999;
/// Integer returned by [`CompareOutcome::legacy_code`] for a missing entry
/// past the last one. The missing entry sorts after every key.
pub const NOT_FOUND_HIGH: i32 = -999;
/// Corruption codes are `CORRUPT_BASE - id`, below every ordering and
/// sentinel value.
pub const CORRUPT_BASE: i32 = -1000;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CompareOutcome {
    /// Lookup key relative to the stored key.
    Ordered(Ordering),
    /// No entry at the index; tells which end was run off.
    NotFound(Bound),
    /// The entry's encoding is invalid. The node is marked.
    Corrupt(CorruptionCode),
}

impl CompareOutcome {
    pub const fn ordering(self) -> Option<Ordering> {
        match self {
            Self::Ordered(o) => Some(o),
            _ => None,
        }
    }

    pub const fn is_corrupt(self) -> bool {
        matches!(self, Self::Corrupt(_))
    }

    /// Single-integer form for callers that use the sign convention:
    /// negative/zero/positive for an ordering, `NOT_FOUND_LOW` or
    /// `NOT_FOUND_HIGH` for a missing entry, and `CORRUPT_BASE - id` for
    /// corruption.
    pub const fn legacy_code(self) -> i32 {
        match self {
            Self::Ordered(o) => o as i32,
            Self::NotFound(Bound::Low) => NOT_FOUND_LOW,
            Self::NotFound(Bound::High) => NOT_FOUND_HIGH,
            Self::Corrupt(code) => CORRUPT_BASE - code.id() as i32,
        }
    }
}

impl From<EntryError> for CompareOutcome {
    fn from(e: EntryError) -> Self {
        match e {
            EntryError::NotFound(b) => Self::NotFound(b),
            EntryError::Corrupt(c) => Self::Corrupt(c),
        }
    }
}

/// Compare `key` with the key of entry `index` in `node`.
///
/// Never panics on malformed bytes. A bounds violation in either key segment
/// marks the node and yields `Corrupt`. The second segment is only examined
/// once `key` has matched all of the first.
pub fn compare<B: AsRef<[u8]>>(key: &[u8], node: &Node<B>, index: isize) -> CompareOutcome {
    let trailer = match resolve_trailer(node, index) {
        Ok(t) => t,
        Err(e) => return e.into(),
    };
    match compare_with_trailer(key, node, &trailer) {
        Ok(o) => CompareOutcome::Ordered(o),
        Err(code) => CompareOutcome::Corrupt(code),
    }
}

fn compare_with_trailer<B: AsRef<[u8]>>(
    key: &[u8],
    node: &Node<B>,
    t: &EntryTrailer,
) -> Result<Ordering, CorruptionCode> {
    let first = checked_segment(node, t, Segment::First)?;
    let n = key.len().min(first.len());
    match key[..n].cmp(&first[..n]) {
        Ordering::Equal => {}
        o => return Ok(o),
    }
    if key.len() < first.len() {
        return Ok(Ordering::Less);
    }

    let second = checked_segment(node, t, Segment::Second)?;
    Ok(key[first.len()..].cmp(second))
}
