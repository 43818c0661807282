//! Chunking: splitting the compressed stream into bounded pieces.
//!
//! Every chunk is base64-encoded before it is placed in a packet, so chunk
//! text never contains the `|`, `<` or `>` delimiters.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Default chunk size in bytes (of compressed data, before base64).
pub const DEFAULT_CHUNK_SIZE: usize = 2048;

/// Split `data` into ordered slices of at most `chunk_size` bytes.
///
/// An empty buffer yields exactly one empty slice so that a zero-length
/// stream still maps to one packet.
///
/// # Panics
///
/// Panics if `chunk_size` is zero. [`EncodeConfig::validate`] rejects a zero
/// size before encoding starts.
///
/// [`EncodeConfig::validate`]: crate::config::EncodeConfig::validate
pub fn split(data: &[u8], chunk_size: usize) -> Vec<&[u8]> {
    assert!(chunk_size > 0, "chunk size must be positive");
    if data.is_empty() {
        return vec![data];
    }
    data.chunks(chunk_size).collect()
}

/// Split `data` and base64-encode each slice.
pub fn encode_chunks(data: &[u8], chunk_size: usize) -> Vec<String> {
    split(data, chunk_size)
        .into_iter()
        .map(|chunk| STANDARD.encode(chunk))
        .collect()
}

/// Decode one chunk's base64 text back to bytes.
pub fn decode_chunk(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(text)
}
