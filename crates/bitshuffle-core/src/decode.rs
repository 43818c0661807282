//! Decoder: arbitrary text back to the input payload.
//!
//! Decoding runs in fixed stages: scan the text for packet bodies, validate
//! and reassemble each packet in the order it was found, decompress the
//! reassembled stream, then verify the result.
//!
//! Bad individual packets never abort a decode. A packet that cannot be
//! parsed, names an unsupported revision, or sits at the wrong position is
//! logged and dropped. A chunk whose checksum does not match is logged and
//! kept. Only two things are fatal: finding nothing usable at all, and a
//! reassembled stream that does not decompress.
//!
//! The overall verdict trusts the file checksum over everything else: a
//! payload whose hash matches the file checksum is good even if individual
//! chunk checksums disagreed on the way.

use crate::checksum::{checksum, is_well_formed};
use crate::chunk::decode_chunk;
use crate::compress::Algorithm;
use crate::error::{CodecError, FormatError, Status};
use crate::wire::{extract, Packet, COMPAT_LEVEL, ENCODING};

/// Result of a decode that produced a payload.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub payload: Vec<u8>,
    /// Integrity verdict. `false` means the payload is best-effort.
    pub ok: bool,
    pub report: DecodeReport,
}

impl Decoded {
    /// Split into the payload and the integrity verdict.
    pub fn into_parts(self) -> (Vec<u8>, bool) {
        (self.payload, self.ok)
    }

    /// Status code describing the integrity verdict.
    ///
    /// A payload that could not be vouched for is always reported as a bad
    /// file checksum; [`Decoded::report`] says what went wrong on the way.
    pub fn status(&self) -> Status {
        if self.ok {
            Status::Success
        } else {
            Status::BadFileChecksum
        }
    }

    /// The most specific packet-level problem behind a verdict that is not ok.
    pub fn damage(&self) -> Option<Status> {
        if self.ok {
            return None;
        }
        let r = &self.report;
        let status = if r.file_checksum_ok == Some(false) {
            Status::BadFileChecksum
        } else if r.chunk_mismatches > 0 {
            Status::BadPacketChecksum
        } else if r.sequence_mismatches > 0 {
            Status::OutOfOrder
        } else if r.undecodable > 0 {
            Status::InvalidBase64
        } else {
            Status::InvalidPacket
        };
        Some(status)
    }
}

/// What the decoder saw along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Packet bodies found in the input text.
    pub extracted: usize,
    /// Packets whose chunk bytes went into the payload.
    pub used: usize,
    /// Bodies that did not parse as a packet.
    pub malformed: usize,
    /// Well-formed packets for another revision, encoding or algorithm.
    pub rejected: usize,
    /// Packets dropped because their sequence number disagreed with their position.
    pub sequence_mismatches: usize,
    /// Packets whose chunk text did not decode as base64.
    pub undecodable: usize,
    /// Packets whose chunk checksum did not match their chunk text.
    pub chunk_mismatches: usize,
    /// Packets carrying a file checksum that disagreed with the first one seen.
    pub file_checksum_conflicts: usize,
    /// `seq_max + 1` of the first usable packet.
    pub expected: Option<usize>,
    /// The authoritative file checksum, if any packet carried one.
    pub file_checksum: Option<String>,
    /// Whether the payload hash matched `file_checksum`.
    pub file_checksum_ok: Option<bool>,
}

impl DecodeReport {
    /// Packets that were found but contributed nothing.
    pub fn dropped(&self) -> usize {
        self.malformed + self.rejected + self.sequence_mismatches + self.undecodable
    }

    /// True if every chunk of the file was used.
    pub fn complete(&self) -> bool {
        self.expected == Some(self.used)
    }

    /// True if nothing at all went wrong at the packet level.
    pub fn clean(&self) -> bool {
        self.chunk_mismatches == 0 && self.dropped() == 0 && self.complete()
    }
}

/// Decode every packet found in `text`.
///
/// Checksum problems never fail the call; they are reported through
/// [`Decoded::ok`]. Errors are returned only when no packet could be used
/// or when the reassembled stream does not decompress.
pub fn decode(text: &str) -> Result<Decoded, CodecError> {
    // Scanning
    let bodies = extract(text);
    if bodies.is_empty() {
        tracing::warn!("no packets found in input");
        return Err(FormatError::NoPackets.into());
    }
    tracing::debug!(packets = bodies.len(), "packets extracted");

    // Validating + reassembling
    let mut assembly = Reassembly::new(bodies.len());
    for (index, body) in bodies.iter().enumerate() {
        assembly.accept(index, body);
    }

    let Some(algorithm) = assembly.algorithm.filter(|_| assembly.report.used > 0) else {
        tracing::warn!(extracted = bodies.len(), "no usable packets in input");
        return Err(FormatError::NoUsablePackets {
            extracted: bodies.len(),
        }
        .into());
    };

    // Decompressing
    let payload = algorithm.decompress(&assembly.stream).map_err(|e| {
        tracing::warn!(
            algorithm = %algorithm,
            stream_bytes = assembly.stream.len(),
            error = %e,
            "reassembled stream did not decompress"
        );
        e
    })?;

    // Verifying
    let mut report = assembly.report;
    if let Some(expected) = &report.file_checksum {
        report.file_checksum_ok = Some(checksum(&payload) == *expected);
    }
    let ok = report.clean() || report.file_checksum_ok == Some(true);

    if !ok {
        match report.file_checksum_ok {
            Some(false) => tracing::warn!(
                expected = report.file_checksum.as_deref().unwrap_or_default(),
                chunk_mismatches = report.chunk_mismatches,
                dropped = report.dropped(),
                "file checksum does not match and the packet stream was damaged"
            ),
            _ => tracing::warn!(
                chunk_mismatches = report.chunk_mismatches,
                dropped = report.dropped(),
                used = report.used,
                expected = ?report.expected,
                "packet stream damaged and no file checksum to vouch for the payload"
            ),
        }
    }

    tracing::info!(
        algorithm = %algorithm,
        packets = report.used,
        payload_bytes = payload.len(),
        ok,
        "payload decoded"
    );

    Ok(Decoded {
        payload,
        ok,
        report,
    })
}

/// Per-packet validation and the growing compressed stream.
struct Reassembly {
    stream: Vec<u8>,
    /// Taken from the first packet that survives validation.
    algorithm: Option<Algorithm>,
    report: DecodeReport,
}

impl Reassembly {
    fn new(extracted: usize) -> Self {
        Self {
            stream: Vec::new(),
            algorithm: None,
            report: DecodeReport {
                extracted,
                ..DecodeReport::default()
            },
        }
    }

    /// Validate the packet found at position `index` and append its chunk.
    fn accept(&mut self, index: usize, body: &str) {
        let packet = match Packet::parse(body) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(index, error = %e, "invalid packet, skipping");
                self.report.malformed += 1;
                return;
            }
        };

        if packet.compat_level != COMPAT_LEVEL || packet.encoding != ENCODING {
            tracing::warn!(
                index,
                compat_level = packet.compat_level,
                encoding = %packet.encoding,
                "unsupported packet revision, skipping"
            );
            self.report.rejected += 1;
            return;
        }

        if packet.seq_num as usize != index {
            tracing::warn!(
                index,
                seq_num = packet.seq_num,
                "packet sequence number does not match its position, skipping"
            );
            self.report.sequence_mismatches += 1;
            return;
        }

        match self.algorithm {
            None => self.algorithm = Some(packet.compression),
            Some(algorithm) if algorithm != packet.compression => {
                tracing::warn!(
                    index,
                    expected = %algorithm,
                    actual = %packet.compression,
                    "packet names a different compression type, skipping"
                );
                self.report.rejected += 1;
                return;
            }
            Some(_) => {}
        }

        let total = packet.seq_max as usize + 1;
        match self.report.expected {
            None => self.report.expected = Some(total),
            Some(expected) if expected != total => {
                tracing::warn!(index, expected, actual = total, "packet disagrees on packet count");
            }
            Some(_) => {}
        }

        if let Some(sum) = &packet.file_checksum {
            self.capture_file_checksum(index, sum);
        }

        let mut chunk_ok = true;
        if checksum(packet.chunk_data.as_bytes()) != packet.chunk_checksum {
            tracing::warn!(
                index,
                given = %packet.chunk_checksum,
                "chunk checksum does not match chunk data"
            );
            self.report.chunk_mismatches += 1;
            chunk_ok = false;
        }

        match decode_chunk(&packet.chunk_data) {
            Ok(bytes) => {
                tracing::debug!(index, bytes = bytes.len(), "chunk appended");
                self.stream.extend_from_slice(&bytes);
                self.report.used += 1;
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "chunk data is not valid base64, skipping");
                self.report.undecodable += 1;
                if chunk_ok {
                    self.report.chunk_mismatches += 1;
                }
            }
        }
    }

    /// The first file checksum seen is authoritative.
    fn capture_file_checksum(&mut self, index: usize, sum: &str) {
        if !is_well_formed(sum) {
            tracing::warn!(index, value = %sum, "ignoring malformed file checksum");
            return;
        }
        match &self.report.file_checksum {
            None => self.report.file_checksum = Some(sum.to_string()),
            Some(first) if first != sum => {
                tracing::warn!(
                    index,
                    authoritative = %first,
                    given = %sum,
                    "file checksum differs from an earlier packet, keeping the first"
                );
                self.report.file_checksum_conflicts += 1;
            }
            Some(_) => {}
        }
    }
}
