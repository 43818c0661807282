//! Checksums for Bitshuffle packets.
//!
//! Both the per-chunk checksum and the file checksum are SHA-256 digests
//! rendered as lowercase hex. The chunk checksum covers the base64 text of
//! a chunk exactly as it appears on the wire; the file checksum covers the
//! uncompressed payload.

use sha2::{Digest, Sha256};

/// Length of a rendered checksum in characters.
pub const CHECKSUM_LEN: usize = 64;

/// Hash a byte slice, returning the lowercase hex SHA-256 digest.
pub fn checksum(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// True if `value` has the shape of a rendered checksum.
pub fn is_well_formed(value: &str) -> bool {
    value.len() == CHECKSUM_LEN && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
