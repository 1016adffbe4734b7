use core::fmt;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::warn;

use crate::{
    entry::{
        key::{Segment, segment},
        seek::locate,
    },
    trailer::parse_trailer_table,
};

pub type ByteVec = Vec<u8>;

/// Where a structural inconsistency was first detected.
/// `id()` is stable and safe to persist in integrity reports.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum CorruptionCode {
    #[error("key segment 0 offset past end of node")]
    KeyOffset0,
    #[error("key segment 0 runs past end of node")]
    KeySize0,
    #[error("key segment 1 offset past end of node")]
    KeyOffset1,
    #[error("key segment 1 runs past end of node")]
    KeySize1,
    #[error("trailer index does not match its table position")]
    TrailerIndex,
    #[error("trailer magic byte missing")]
    TrailerMagic,
}

impl CorruptionCode {
    pub const fn id(self) -> u16 {
        match self {
            Self::KeyOffset0 => 1,
            Self::KeySize0 => 2,
            Self::KeyOffset1 => 3,
            Self::KeySize1 => 4,
            Self::TrailerIndex => 5,
            Self::TrailerMagic => 6,
        }
    }
}

/// A serialized B-tree node: an externally built byte buffer plus its
/// corruption marker.
///
/// Reads never mutate the bytes. The marker is set at most once per
/// detection episode; only [`Node::clear_corruption`], which needs exclusive
/// access, resets it.
#[derive(Debug)]
pub struct Node<B = ByteVec> {
    buf: B,
    corrupt: OnceLock<CorruptionCode>,
}

impl<B: AsRef<[u8]>> Node<B> {
    pub fn new(buf: B) -> Self {
        Self {
            buf,
            corrupt: OnceLock::new(),
        }
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        self.buf.as_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    /// Number of entries the trailer table describes; 0 when there is no
    /// resolvable table.
    pub fn entry_count(&self) -> usize {
        parse_trailer_table(self.bytes()).map_or(0, |t| t.entry_count())
    }

    /// The first corruption detected on this node, if any.
    pub fn corruption(&self) -> Option<CorruptionCode> {
        self.corrupt.get().copied()
    }

    pub fn is_corrupt(&self) -> bool {
        self.corrupt.get().is_some()
    }

    /// Record a corruption detection. The first writer wins; later
    /// detections leave the stored code alone. Returns `code` so call sites
    /// can report what they found.
    pub(crate) fn mark_corrupt(&self, code: CorruptionCode) -> CorruptionCode {
        if self.corrupt.set(code).is_ok() {
            warn!(code = code.id(), len = self.len(), "node marked corrupt: {code}");
        }
        code
    }

    /// Reset the marker after an external integrity pass has repaired or
    /// replaced the bytes. Returns the code that was stored.
    pub fn clear_corruption(&mut self) -> Option<CorruptionCode> {
        self.corrupt.take()
    }

    pub fn into_inner(self) -> B {
        self.buf
    }
}

impl<B: AsRef<[u8]>> fmt::Display for Node<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Node {{")?;
        writeln!(f, "  length      : {}", self.len())?;
        match parse_trailer_table(self.bytes()) {
            Ok(table) => {
                writeln!(f, "  entries     : {}", table.entry_count())?;
                writeln!(f, "  entry_size  : {}", table.entry_size)?;
                for i in 0..table.entry_count() {
                    writeln!(f, "  key[{i:>4}]   : {}", KeyDump(self.bytes(), i as isize))?;
                }
            }
            Err(e) => writeln!(f, "  entries     : 0 ({e})")?,
        }
        if let Some(code) = self.corruption() {
            writeln!(f, "  corrupt     : {} ({code})", code.id())?;
        }
        write!(f, "}}")
    }
}

/// Hex dump of one stored key. Reads the bytes without touching the marker.
struct KeyDump<'a>(&'a [u8], isize);

impl fmt::Display for KeyDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = match locate(self.0, self.1) {
            Ok(l) => l.trailer,
            Err(e) => return write!(f, "<{e}>"),
        };
        let parts = segment(self.0, &t, Segment::First)
            .and_then(|a| segment(self.0, &t, Segment::Second).map(|b| (a, b)));
        match parts {
            Ok((a, b)) if b.is_empty() => write!(f, "{}", hex::encode(a)),
            Ok((a, b)) => write!(f, "{} + {}", hex::encode(a), hex::encode(b)),
            Err(code) => write!(f, "<{code}>"),
        }
    }
}
