use core::ops::Range;

use tracing::{debug, trace};

use crate::{
    constants::TRAILER_SIZE,
    entry::{Bound, EntryError},
    node::{CorruptionCode, Node},
    trailer::{EntryTrailer, parse_trailer_table},
};

/// A trailer together with the byte range of the entry that ends with it.
#[derive(Debug, Clone)]
pub(crate) struct Located {
    pub(crate) trailer: EntryTrailer,
    pub(crate) entry: Range<usize>,
}

/// Byte range of entry `index`, or the bound it falls past.
/// Only `NotFound` can come out of here.
fn entry_range(buf: &[u8], index: isize) -> Result<(usize, Range<usize>), EntryError> {
    let Ok(index) = usize::try_from(index) else {
        return Err(EntryError::NotFound(Bound::Low));
    };
    let table = match parse_trailer_table(buf) {
        Ok(t) => t,
        Err(e) => {
            debug!(len = buf.len(), "unresolvable trailer table: {e:#}");
            return Err(EntryError::NotFound(Bound::High));
        }
    };
    let Some(entry) = table.entry_range(index) else {
        trace!(index, count = table.entry_count(), "index past last entry");
        return Err(EntryError::NotFound(Bound::High));
    };
    Ok((index, entry))
}

/// Decode and check the trailer closing `entry`.
fn read_trailer(buf: &[u8], index: usize, entry: Range<usize>) -> Result<Located, EntryError> {
    let Some(raw) = buf[..entry.end].last_chunk::<TRAILER_SIZE>() else {
        return Err(EntryError::NotFound(Bound::High));
    };
    let trailer = EntryTrailer::parse(raw);
    if !trailer.has_magic() {
        return Err(CorruptionCode::TrailerMagic.into());
    }
    if usize::from(trailer.index) != index {
        return Err(CorruptionCode::TrailerIndex.into());
    }
    Ok(Located { trailer, entry })
}

/// Find entry `index` in `buf` without touching any corruption marker.
pub(crate) fn locate(buf: &[u8], index: isize) -> Result<Located, EntryError> {
    let (index, entry) = entry_range(buf, index)?;
    read_trailer(buf, index, entry)
}

/// Resolve the trailer of entry `index`.
///
/// Out-of-range indices are always `NotFound`. For an in-range index, a node
/// that is already marked corrupt is not read again and the stored code is
/// returned instead. A malformed trailer marks the node.
pub fn resolve_trailer<B: AsRef<[u8]>>(
    node: &Node<B>,
    index: isize,
) -> Result<EntryTrailer, EntryError> {
    resolve(node, index).map(|l| l.trailer)
}

pub(crate) fn resolve<B: AsRef<[u8]>>(node: &Node<B>, index: isize) -> Result<Located, EntryError> {
    let (index, entry) = entry_range(node.bytes(), index)?;
    if let Some(code) = node.corruption() {
        return Err(EntryError::Corrupt(code));
    }
    read_trailer(node.bytes(), index, entry).map_err(|e| match e {
        EntryError::Corrupt(code) => EntryError::Corrupt(node.mark_corrupt(code)),
        e => e,
    })
}
