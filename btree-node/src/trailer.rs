use core::ops::Range;

use anyhow::{Context, Result, ensure};

use crate::{
    constants::{
        ENTDX, ENTRY_MAGIC, ENTSZ, KOFF0, KOFF1, KSIZ0, KSIZ1, MAGIC, SIZE_UNITS, TRAILER_SIZE,
    },
    util::fetch_u32,
};

/// One entry's trailer, decoded. All fields are big-endian on disk.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EntryTrailer {
    pub key_offset_0: u32, // 0..=3
    pub key_size_0: u16,   // 4..=5
    pub key_offset_1: u32, // 6..=9
    pub key_size_1: u16,   // 10..=11  (0 = single-segment key)
    pub index: u16,        // 12..=13
    pub entry_units: u8,   // 14       (entry size / SIZE_UNITS)
    pub magic: u8,         // 15
}

impl EntryTrailer {
    pub fn parse(t: &[u8; TRAILER_SIZE]) -> Self {
        Self {
            key_offset_0: fetch_u32(&t[KOFF0]),
            key_size_0: fetch_u32(&t[KSIZ0]) as u16,
            key_offset_1: fetch_u32(&t[KOFF1]),
            key_size_1: fetch_u32(&t[KSIZ1]) as u16,
            index: fetch_u32(&t[ENTDX]) as u16,
            entry_units: fetch_u32(&t[ENTSZ]) as u8,
            magic: fetch_u32(&t[MAGIC]) as u8,
        }
    }

    #[inline]
    pub const fn has_magic(&self) -> bool {
        self.magic == ENTRY_MAGIC
    }

    /// Full key length across both segments.
    #[inline]
    pub fn key_len(&self) -> usize {
        usize::from(self.key_size_0) + usize::from(self.key_size_1)
    }
}

/// Summary of a node's trailer table, read from the trailer at the very end
/// of the buffer.
///
/// Entries are fixed-size and packed against the end of the buffer:
/// entry `i` occupies `[len - E*(last+1-i), len - E*(last-i))`, and its last
/// `TRAILER_SIZE` bytes are its trailer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TrailerTable {
    pub last: u16,
    pub entry_size: usize,
    pub node_len: usize,
}

impl TrailerTable {
    #[inline]
    pub fn entry_count(&self) -> usize {
        usize::from(self.last) + 1
    }

    /// Byte range of entry `index`, or `None` past the last entry.
    pub fn entry_range(&self, index: usize) -> Option<Range<usize>> {
        if index > usize::from(self.last) {
            return None;
        }
        let start = self.node_len - self.entry_size * (self.entry_count() - index);
        Some(start..start + self.entry_size)
    }

    /// Byte range of the trailer of entry `index`.
    pub fn trailer_range(&self, index: usize) -> Option<Range<usize>> {
        self.entry_range(index)
            .map(|r| r.end - TRAILER_SIZE..r.end)
    }
}

/// Read and validate the trailer table of a node buffer.
/// Failure means the node has no usable table (and so no entries), not that
/// it is corrupt.
pub fn parse_trailer_table(buf: &[u8]) -> Result<TrailerTable> {
    let raw = buf
        .last_chunk::<TRAILER_SIZE>()
        .context("node shorter than one trailer")?;
    let last = EntryTrailer::parse(raw);
    ensure!(
        last.has_magic(),
        "no trailer table: magic 0x{:02x} at end of node",
        last.magic
    );

    let entry_size = usize::from(last.entry_units) * SIZE_UNITS;
    ensure!(
        entry_size >= TRAILER_SIZE,
        "implausible entry size {entry_size}"
    );
    let table_len = entry_size * (usize::from(last.index) + 1);
    ensure!(
        table_len <= buf.len(),
        "trailer table ({table_len} bytes) larger than node ({} bytes)",
        buf.len()
    );

    Ok(TrailerTable {
        last: last.index,
        entry_size,
        node_len: buf.len(),
    })
}
