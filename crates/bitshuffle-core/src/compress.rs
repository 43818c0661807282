//! Whole-buffer compression for the packet stream.
//!
//! The compressed stream is what gets chunked, so the container format of
//! each algorithm is self-describing: decompression needs only the tag.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lowest accepted compression level.
pub const MIN_LEVEL: u32 = 1;

/// Highest accepted compression level.
pub const MAX_LEVEL: u32 = 9;

/// Compression algorithm used for a whole file.
///
/// The wire tag is the lowercase name (`bz2`, `gzip`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bz2,
    Gzip,
}

impl Algorithm {
    /// Tag carried in the `compressionType` field.
    pub fn tag(self) -> &'static str {
        match self {
            Algorithm::Bz2 => "bz2",
            Algorithm::Gzip => "gzip",
        }
    }

    /// Compress `data` at `level` (1..=9).
    pub fn compress(self, data: &[u8], level: u32) -> Result<Vec<u8>, CompressError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(CompressError::BadLevel(level));
        }

        let out = match self {
            Algorithm::Bz2 => {
                let mut enc =
                    bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::new(level));
                enc.write_all(data).map_err(CompressError::Encode)?;
                enc.finish().map_err(CompressError::Encode)?
            }
            Algorithm::Gzip => {
                let mut enc =
                    flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::new(level));
                enc.write_all(data).map_err(CompressError::Encode)?;
                enc.finish().map_err(CompressError::Encode)?
            }
        };

        tracing::trace!(
            algorithm = self.tag(),
            level,
            raw = data.len(),
            compressed = out.len(),
            "buffer compressed"
        );
        Ok(out)
    }

    /// Decompress a complete stream produced by [`Algorithm::compress`].
    ///
    /// Truncated or corrupted input is reported as [`CompressError::CorruptStream`].
    pub fn decompress(self, data: &[u8]) -> Result<Vec<u8>, CompressError> {
        let mut out = Vec::new();
        let result = match self {
            Algorithm::Bz2 => bzip2::read::BzDecoder::new(data).read_to_end(&mut out),
            Algorithm::Gzip => flate2::read::GzDecoder::new(data).read_to_end(&mut out),
        };

        result.map_err(|e| CompressError::CorruptStream {
            algorithm: self,
            reason: e.to_string(),
        })?;
        Ok(out)
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Bz2
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Algorithm {
    type Err = CompressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bz2" => Ok(Algorithm::Bz2),
            "gzip" => Ok(Algorithm::Gzip),
            other => Err(CompressError::UnknownAlgorithm(other.to_string())),
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum CompressError {
    #[error("unknown compression type: {0:?}")]
    UnknownAlgorithm(String),

    #[error("compression level {0} outside {}..={}", MIN_LEVEL, MAX_LEVEL)]
    BadLevel(u32),

    #[error("compression failed: {0}")]
    Encode(std::io::Error),

    #[error("invalid {algorithm} stream: {reason}")]
    CorruptStream { algorithm: Algorithm, reason: String },
}
