//! Encoder: payload bytes to an ordered list of packet strings.

use crate::checksum::checksum;
use crate::chunk::encode_chunks;
use crate::config::{ConfigError, EncodeConfig};
use crate::error::CodecError;
use crate::wire::{Packet, COMPAT_LEVEL, ENCODING};

/// Encode `data` into packets.
///
/// The configuration is validated before any compression work. The file
/// checksum is attached to the first and the last packet only (the same
/// packet when there is a single chunk).
pub fn encode(data: &[u8], config: &EncodeConfig) -> Result<Vec<String>, CodecError> {
    config.validate()?;

    let file_checksum = checksum(data);
    let compressed = config.compression.compress(data, config.level)?;
    let chunks = encode_chunks(&compressed, config.chunk_size);
    let seq_max =
        u32::try_from(chunks.len() - 1).map_err(|_| ConfigError::TooManyChunks(chunks.len()))?;

    let packets: Vec<String> = chunks
        .into_iter()
        .zip(0u32..)
        .map(|(chunk_data, seq_num)| {
            let edge = seq_num == 0 || seq_num == seq_max;
            Packet {
                message: config.message.clone(),
                compat_level: COMPAT_LEVEL,
                encoding: ENCODING.to_string(),
                compression: config.compression,
                seq_num,
                seq_max,
                chunk_checksum: checksum(chunk_data.as_bytes()),
                chunk_data,
                file_checksum: edge.then(|| file_checksum.clone()),
            }
            .render()
        })
        .collect();

    tracing::info!(
        algorithm = %config.compression,
        level = config.level,
        raw_bytes = data.len(),
        compressed_bytes = compressed.len(),
        packets = packets.len(),
        file_checksum = %file_checksum,
        "payload encoded"
    );

    Ok(packets)
}
