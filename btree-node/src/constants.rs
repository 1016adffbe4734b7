use core::ops::Range;

/// Size of one entry trailer. It is the last thing in every entry.
pub const TRAILER_SIZE: usize = 16;

/// Entry sizes are stored in units of this many bytes.
pub const SIZE_UNITS: usize = 8;

/// Last byte of every trailer.
pub const ENTRY_MAGIC: u8 = 0xcc;

// Trailer field ranges, relative to the start of the trailer.
pub const KOFF0: Range<usize> = 0..4;
pub const KSIZ0: Range<usize> = 4..6;
pub const KOFF1: Range<usize> = 6..10;
pub const KSIZ1: Range<usize> = 10..12;
pub const ENTDX: Range<usize> = 12..14;
pub const ENTSZ: Range<usize> = 14..15;
pub const MAGIC: Range<usize> = 15..16;
