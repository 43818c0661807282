//! Decode packets pasted on stdin, payload to stdout.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use bitshuffle_core::Status;

pub fn cmd_decode() -> Result<Status> {
    let mut raw = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut raw)
        .context("failed to read input")?;
    // Pasted text may carry stray non-UTF-8 bytes around the packets.
    let text = String::from_utf8_lossy(&raw);
    tracing::debug!(bytes = raw.len(), "input read");

    let decoded = bitshuffle_core::decode(&text)?;

    let mut out = std::io::stdout().lock();
    out.write_all(&decoded.payload)
        .and_then(|_| out.flush())
        .context("failed to write payload")?;

    let status = decoded.status();
    if let Some(damage) = decoded.damage() {
        eprintln!(
            "warning {}: {} ({}; {} of {} packets used, {} chunk checksum mismatches)",
            status.code(),
            status.description(),
            damage.description(),
            decoded.report.used,
            decoded.report.extracted,
            decoded.report.chunk_mismatches,
        );
    }
    Ok(status)
}
