//! Encode stdin into packets on stdout.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use bitshuffle_core::{EncodeConfig, Status};

pub fn cmd_encode(config: &EncodeConfig) -> Result<Status> {
    let mut data = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut data)
        .context("failed to read input")?;
    tracing::debug!(bytes = data.len(), "input read");

    let packets = bitshuffle_core::encode(&data, config)?;

    let mut out = std::io::stdout().lock();
    for packet in &packets {
        out.write_all(packet.as_bytes())
            .and_then(|_| out.write_all(b"\n\n"))
            .context("failed to write packets")?;
    }
    out.flush().context("failed to write packets")?;

    Ok(Status::Success)
}
