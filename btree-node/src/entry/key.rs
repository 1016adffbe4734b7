use crate::{
    constants::TRAILER_SIZE,
    entry::{EntryError, seek::resolve},
    node::{CorruptionCode, Node},
    trailer::EntryTrailer,
};

/// The two physical pieces of a stored key.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Segment {
    First,
    Second,
}

impl Segment {
    const fn offset_code(self) -> CorruptionCode {
        match self {
            Self::First => CorruptionCode::KeyOffset0,
            Self::Second => CorruptionCode::KeyOffset1,
        }
    }

    const fn size_code(self) -> CorruptionCode {
        match self {
            Self::First => CorruptionCode::KeySize0,
            Self::Second => CorruptionCode::KeySize1,
        }
    }

    const fn fields(self, t: &EntryTrailer) -> (u32, u16) {
        match self {
            Self::First => (t.key_offset_0, t.key_size_0),
            Self::Second => (t.key_offset_1, t.key_size_1),
        }
    }
}

/// Bounds-check one key segment against `buf` and borrow it.
pub(crate) fn segment<'a>(
    buf: &'a [u8],
    t: &EntryTrailer,
    which: Segment,
) -> Result<&'a [u8], CorruptionCode> {
    let (off, size) = which.fields(t);
    let off = off as usize;
    let size = usize::from(size);
    if off > buf.len() {
        return Err(which.offset_code());
    }
    if size > buf.len() - off {
        return Err(which.size_code());
    }
    Ok(&buf[off..off + size])
}

/// Same as [`segment`], recording any failure on the node.
pub(crate) fn checked_segment<'a, B: AsRef<[u8]>>(
    node: &'a Node<B>,
    t: &EntryTrailer,
    which: Segment,
) -> Result<&'a [u8], CorruptionCode> {
    segment(node.bytes(), t, which).map_err(|code| node.mark_corrupt(code))
}

/// Materialize the full stored key of entry `index` (both segments).
pub fn fetch_key<B: AsRef<[u8]>>(node: &Node<B>, index: isize) -> Result<Vec<u8>, EntryError> {
    let t = resolve(node, index)?.trailer;
    let first = checked_segment(node, &t, Segment::First)?;
    let second = checked_segment(node, &t, Segment::Second)?;

    let mut out = Vec::with_capacity(t.key_len());
    out.extend_from_slice(first);
    out.extend_from_slice(second);
    Ok(out)
}

/// Opaque payload bytes of entry `index`: everything in the entry before its
/// trailer, including any padding the writer added.
pub fn entry_payload<B: AsRef<[u8]>>(node: &Node<B>, index: isize) -> Result<&[u8], EntryError> {
    let entry = resolve(node, index)?.entry;
    Ok(&node.bytes()[entry.start..entry.end - TRAILER_SIZE])
}
