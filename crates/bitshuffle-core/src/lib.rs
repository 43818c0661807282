//! bitshuffle-core: the packet codec.
//!
//! Binary data goes out as a list of self-describing text packets that
//! survive chat clients, mail and paste sites:
//!
//!   encode: compress → chunk → base64 → render packets
//!   decode: extract packets → validate → reassemble → decompress → verify
//!
//! Everything here is synchronous and works on in-memory buffers. Reading
//! files, parsing arguments and talking to editors is the caller's job.

pub mod checksum;
pub mod chunk;
pub mod compress;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod wire;

pub use compress::Algorithm;
pub use config::{BitshuffleConfig, EncodeConfig};
pub use decode::{decode, DecodeReport, Decoded};
pub use encode::encode;
pub use error::{CodecError, FormatError, Status};
