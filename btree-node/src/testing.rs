//! Fixture writer for tests. Lays out nodes the way the readers expect:
//! key bytes at the front, fixed-size entries packed against the end.

use core::ops::Range;

use crate::{
    constants::{
        ENTDX, ENTRY_MAGIC, ENTSZ, KOFF0, KOFF1, KSIZ0, KSIZ1, MAGIC, SIZE_UNITS, TRAILER_SIZE,
    },
    trailer::parse_trailer_table,
};

#[derive(Debug, Default)]
struct Pending {
    first: Vec<u8>,
    second: Vec<u8>,
    payload: Vec<u8>,
}

#[derive(Debug, Default)]
pub(crate) struct NodeBuilder {
    lead: usize,
    entries: Vec<Pending>,
}

impl NodeBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Zero bytes written before the first key.
    pub(crate) fn lead(mut self, n: usize) -> Self {
        self.lead = n;
        self
    }

    pub(crate) fn key(self, k: &[u8]) -> Self {
        self.split_key(k, &[])
    }

    pub(crate) fn split_key(mut self, first: &[u8], second: &[u8]) -> Self {
        self.entries.push(Pending {
            first: first.to_vec(),
            second: second.to_vec(),
            payload: Vec::new(),
        });
        self
    }

    /// Payload of the most recently added entry.
    pub(crate) fn payload(mut self, p: &[u8]) -> Self {
        if let Some(e) = self.entries.last_mut() {
            e.payload = p.to_vec();
        }
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let mut buf = vec![0u8; self.lead];
        let mut keys = Vec::with_capacity(self.entries.len());
        for e in &self.entries {
            let off0 = buf.len();
            buf.extend_from_slice(&e.first);
            let off1 = if e.second.is_empty() { 0 } else { buf.len() };
            buf.extend_from_slice(&e.second);
            keys.push((off0, off1));
        }

        let widest = self.entries.iter().map(|e| e.payload.len()).max().unwrap_or(0);
        let entry_size = (widest + TRAILER_SIZE).div_ceil(SIZE_UNITS) * SIZE_UNITS;
        for (i, (e, (off0, off1))) in self.entries.iter().zip(keys).enumerate() {
            let start = buf.len();
            buf.extend_from_slice(&e.payload);
            buf.resize(start + entry_size, 0);

            let t = &mut buf[start + entry_size - TRAILER_SIZE..];
            put(t, KOFF0, off0 as u64);
            put(t, KSIZ0, e.first.len() as u64);
            put(t, KOFF1, off1 as u64);
            put(t, KSIZ1, e.second.len() as u64);
            put(t, ENTDX, i as u64);
            put(t, ENTSZ, (entry_size / SIZE_UNITS) as u64);
            put(t, MAGIC, u64::from(ENTRY_MAGIC));
        }
        buf
    }
}

/// Write `v` big-endian into `t[r]`.
fn put(t: &mut [u8], r: Range<usize>, v: u64) {
    let width = r.len();
    t[r].copy_from_slice(&v.to_be_bytes()[8 - width..]);
}

/// Overwrite one trailer field of entry `index` in a built node.
pub(crate) fn set_field(buf: &mut [u8], index: usize, field: Range<usize>, v: u64) {
    let table = parse_trailer_table(buf).unwrap();
    let r = table.trailer_range(index).unwrap();
    put(&mut buf[r], field, v);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_builder_has_no_table() {
        let buf = NodeBuilder::new().lead(4).build();
        assert_eq!(buf, vec![0u8; 4]);
        assert!(parse_trailer_table(&buf).is_err());
    }

    #[test]
    fn trailer_bytes() {
        let buf = NodeBuilder::new().lead(2).split_key(b"ab", b"c").build();
        assert_eq!(buf.len(), 2 + 3 + 16);
        assert_eq!(
            &buf[5..],
            &[0, 0, 0, 2, 0, 2, 0, 0, 0, 4, 0, 1, 0, 0, 2, 0xcc]
        );
    }
}
