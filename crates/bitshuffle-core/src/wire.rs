//! Bitshuffle wire format: the text record that carries one chunk.
//!
//! A packet is a single line of ASCII:
//!
//! ```text
//! ((<<message|compat|encoding|compression|seq_num|seq_max|chunk_sum|chunk_data[|file_sum]>>))
//! ```
//!
//! These fields ARE the protocol. Their order and meaning are fixed for
//! compat level 1. The transport (chat clients, mail, paste sites) may wrap
//! lines and insert whitespace anywhere in a packet; none of the field
//! values can legitimately contain whitespace, so the parser strips it all.

use crate::compress::Algorithm;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Opening delimiter of a packet.
pub const OPEN: &str = "((<<";

/// Closing delimiter of a packet.
pub const CLOSE: &str = ">>))";

/// Field separator.
pub const SEPARATOR: char = '|';

/// Wire format revision this crate speaks.
pub const COMPAT_LEVEL: u32 = 1;

/// Chunk text encoding tag. The only one defined.
pub const ENCODING: &str = "base64";

/// Field count of an interior packet (no file checksum).
pub const MIN_FIELDS: usize = 8;

/// Field count of a first or last packet (file checksum present).
pub const MAX_FIELDS: usize = 9;

/// Message written into every packet unless the caller overrides it.
pub const DEFAULT_MESSAGE: &str = "This is encoded with BitShuffle, which you can download \
                                   from https://github.com/charlesdaniels/bitshuffle";

// ── Packet ────────────────────────────────────────────────────────────────────

/// One parsed (or to-be-rendered) packet.
///
/// Parsing checks structure only. Whether the compat level, encoding and
/// sequence number are acceptable is the decoder's call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Advisory text. Ignored by the decoder.
    pub message: String,
    pub compat_level: u32,
    pub encoding: String,
    pub compression: Algorithm,
    /// Zero-based position of this chunk in the file.
    pub seq_num: u32,
    /// Index of the last chunk; the file has `seq_max + 1` chunks.
    pub seq_max: u32,
    /// Hex SHA-256 of `chunk_data` as it was sent.
    pub chunk_checksum: String,
    /// Base64 text of one slice of the compressed stream.
    pub chunk_data: String,
    /// Hex SHA-256 of the whole payload. First and last packet only.
    pub file_checksum: Option<String>,
}

impl Packet {
    /// Render this packet into its wire form.
    ///
    /// An absent file checksum is omitted entirely, not written as an
    /// empty trailing field.
    pub fn render(&self) -> String {
        let mut out = format!(
            "{OPEN}{}|{}|{}|{}|{}|{}|{}|{}",
            self.message,
            self.compat_level,
            self.encoding,
            self.compression.tag(),
            self.seq_num,
            self.seq_max,
            self.chunk_checksum,
            self.chunk_data,
        );
        if let Some(sum) = &self.file_checksum {
            out.push(SEPARATOR);
            out.push_str(sum);
        }
        out.push_str(CLOSE);
        out
    }

    /// Parse a whitespace-stripped packet body (the text between the
    /// delimiters) into a packet.
    pub fn parse(body: &str) -> Result<Self, WireError> {
        let fields = parse_fields(body)?;

        let compat_level = parse_number(fields[1], "compat level")?;
        let compression = fields[3]
            .parse::<Algorithm>()
            .map_err(|_| WireError::UnknownCompression(fields[3].to_string()))?;
        let seq_num = parse_number(fields[4], "sequence number")?;
        let seq_max = parse_number(fields[5], "sequence max")?;
        if seq_num > seq_max {
            return Err(WireError::SequenceOutOfRange { seq_num, seq_max });
        }

        Ok(Self {
            message: fields[0].to_string(),
            compat_level,
            encoding: fields[2].to_string(),
            compression,
            seq_num,
            seq_max,
            chunk_checksum: fields[6].to_string(),
            chunk_data: fields[7].to_string(),
            file_checksum: fields.get(8).map(|s| s.to_string()),
        })
    }
}

fn parse_number(field: &str, name: &'static str) -> Result<u32, WireError> {
    field.parse().map_err(|_| WireError::BadNumber {
        field: name,
        value: field.to_string(),
    })
}

// ── Scanner ───────────────────────────────────────────────────────────────────

/// Extract every packet body from arbitrary text, in order of appearance.
///
/// Each body runs from an opener to the first closer after it. Bodies may
/// span lines; all whitespace inside a body is removed. Bodies that are
/// empty after stripping are dropped. An opener without a closer ends the
/// scan.
pub fn extract(text: &str) -> Vec<String> {
    let mut bodies = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            tracing::debug!("unterminated packet at end of input, ignoring");
            break;
        };

        let body: String = after_open[..end]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if !body.is_empty() {
            bodies.push(body);
        }
        rest = &after_open[end + CLOSE.len()..];
    }

    bodies
}

/// Split a packet body into its raw fields.
///
/// Exactly 8 or 9 fields are accepted.
pub fn parse_fields(body: &str) -> Result<Vec<&str>, WireError> {
    let fields: Vec<&str> = body.split(SEPARATOR).collect();
    if fields.len() < MIN_FIELDS || fields.len() > MAX_FIELDS {
        return Err(WireError::FieldCount(fields.len()));
    }
    Ok(fields)
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors that can arise when interpreting one packet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("packet has {0} fields, expected {} or {}", MIN_FIELDS, MAX_FIELDS)]
    FieldCount(usize),

    #[error("{field} is not a number: {value:?}")]
    BadNumber { field: &'static str, value: String },

    #[error("unknown compression type: {0:?}")]
    UnknownCompression(String),

    #[error("sequence number {seq_num} exceeds sequence max {seq_max}")]
    SequenceOutOfRange { seq_num: u32, seq_max: u32 },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
