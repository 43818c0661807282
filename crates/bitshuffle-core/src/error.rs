//! Codec-level errors and the porcelain status codes.
//!
//! Only unrecoverable conditions become a [`CodecError`]. Bad individual
//! packets and checksum mismatches are absorbed by the decoder and show up
//! in its report instead.

use thiserror::Error;

use crate::compress::CompressError;
use crate::config::ConfigError;

/// Errors surfaced by [`crate::encode`] and [`crate::decode`].
#[derive(Debug, Error)]
pub enum CodecError {
    /// Rejected before any work started.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The input text held nothing that could be decoded.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// The reassembled stream could not be compressed or decompressed.
    #[error("compression error: {0}")]
    Compression(#[from] CompressError),
}

/// Why no payload could be recovered from the input text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("no packets found in input")]
    NoPackets,

    #[error("none of the {extracted} packets found could be used")]
    NoUsablePackets { extracted: usize },
}

/// Numeric status codes, stable across releases of the command-line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Status {
    Success = 0,
    Usage = 1,
    BadCompressionType = 2,
    BadCompressionLevel = 3,
    BadChunkSize = 4,
    InvalidPacket = 201,
    NoPackets = 202,
    InvalidBase64 = 203,
    InvalidCompressed = 204,
    OutOfOrder = 205,
    BadPacketChecksum = 301,
    BadFileChecksum = 302,
}

impl Status {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn description(self) -> &'static str {
        match self {
            Status::Success => "Success",
            Status::Usage => "Bad invocation or configuration",
            Status::BadCompressionType => "Bad compression type",
            Status::BadCompressionLevel => "Bad compression level",
            Status::BadChunkSize => "Bad chunksize",
            Status::InvalidPacket => "Invalid packet",
            Status::NoPackets => "No packets given",
            Status::InvalidBase64 => "Invalid base64-encoded message",
            Status::InvalidCompressed => "Invalid compressed message",
            Status::OutOfOrder => "Packets given out of order",
            Status::BadPacketChecksum => "Bad packet checksum",
            Status::BadFileChecksum => "Bad file checksum",
        }
    }
}

impl CodecError {
    /// Status code a command-line caller should exit with.
    pub fn status(&self) -> Status {
        match self {
            CodecError::Config(e) => match e {
                ConfigError::UnknownAlgorithm(_) => Status::BadCompressionType,
                ConfigError::BadLevel(_) | ConfigError::BadLevelText(_) => {
                    Status::BadCompressionLevel
                }
                ConfigError::BadChunkSize(_) => Status::BadChunkSize,
                _ => Status::Usage,
            },
            CodecError::Format(FormatError::NoPackets) => Status::NoPackets,
            CodecError::Format(FormatError::NoUsablePackets { .. }) => Status::InvalidPacket,
            CodecError::Compression(e) => match e {
                CompressError::UnknownAlgorithm(_) => Status::BadCompressionType,
                CompressError::BadLevel(_) => Status::BadCompressionLevel,
                CompressError::Encode(_) | CompressError::CorruptStream { .. } => {
                    Status::InvalidCompressed
                }
            },
        }
    }
}
