//! Bitshuffle integration test harness.
//!
//! Tests here drive the public codec API end to end: encode a payload,
//! push the packets through something that resembles a real text channel
//! (line wrapping, chat noise, lost or reordered messages), and decode.
//!
//!   cargo test --test integration

use bitshuffle_core::{encode, Algorithm, EncodeConfig};

// ── Harness ───────────────────────────────────────────────────────────────────

/// Encode with the given algorithm and chunk size, defaults otherwise.
pub fn encode_with(data: &[u8], compression: Algorithm, chunk_size: usize) -> Vec<String> {
    let config = EncodeConfig {
        compression,
        chunk_size,
        ..EncodeConfig::default()
    };
    encode(data, &config).expect("encode should succeed")
}

/// Deterministic, poorly compressible test data.
pub fn noise(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x9E37_79B9;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// Return the fields of a rendered packet.
pub fn fields(packet: &str) -> Vec<String> {
    packet
        .trim_start_matches("((<<")
        .trim_end_matches(">>))")
        .split('|')
        .map(str::to_string)
        .collect()
}

/// Re-render a packet from its fields.
pub fn render(fields: &[String]) -> String {
    format!("((<<{}>>))", fields.join("|"))
}

/// Hard-wrap text at `width` characters, the way mail clients do.
pub fn wrap(text: &str, width: usize) -> String {
    text.chars()
        .collect::<Vec<_>>()
        .chunks(width)
        .map(|line| line.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\r\n")
}

// ── Test modules ──────────────────────────────────────────────────────────────

mod roundtrip;
mod tamper;
mod transport;
