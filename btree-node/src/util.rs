/// Big-endian decode of up to 4 bytes. An empty slice decodes to 0.
#[inline]
pub fn fetch_u32(b: &[u8]) -> u32 {
    debug_assert!(b.len() <= 4, "fetch_u32 given {} bytes", b.len());
    b.iter().fold(0u32, |v, &x| (v << 8) | u32::from(x))
}

/// Big-endian decode of up to 8 bytes, for fields wider than 32 bits.
#[inline]
pub fn fetch_u64(b: &[u8]) -> u64 {
    debug_assert!(b.len() <= 8, "fetch_u64 given {} bytes", b.len());
    b.iter().fold(0u64, |v, &x| (v << 8) | u64::from(x))
}
