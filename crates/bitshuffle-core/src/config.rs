//! Configuration system for Bitshuffle.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $BITSHUFFLE_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/bitshuffle/config.toml
//!   3. ~/.config/bitshuffle/config.toml
//!
//! The codec itself never reads the environment. Callers resolve a
//! [`BitshuffleConfig`] once and pass its [`EncodeConfig`] into each call.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::chunk::DEFAULT_CHUNK_SIZE;
use crate::compress::{Algorithm, MAX_LEVEL, MIN_LEVEL};
use crate::wire::DEFAULT_MESSAGE;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BitshuffleConfig {
    pub encode: EncodeConfig,
}

/// Everything the encoder needs besides the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Algorithm for the whole file.
    pub compression: Algorithm,
    /// 1 (fastest) to 9 (smallest).
    pub level: u32,
    /// Compressed bytes per packet, before base64.
    pub chunk_size: usize,
    /// Advisory text written into every packet.
    pub message: String,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            compression: Algorithm::default(),
            level: 5,
            chunk_size: DEFAULT_CHUNK_SIZE,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl EncodeConfig {
    /// Check the configuration before any compression work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.level) {
            return Err(ConfigError::BadLevel(self.level));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::BadChunkSize(self.chunk_size.to_string()));
        }
        if !self.message.is_ascii() || self.message.contains(['|', '<', '>']) {
            return Err(ConfigError::BadMessage(self.message.clone()));
        }
        Ok(())
    }

    /// Set the algorithm from its wire tag.
    pub fn set_compression(&mut self, tag: &str) -> Result<(), ConfigError> {
        self.compression = tag
            .parse()
            .map_err(|_| ConfigError::UnknownAlgorithm(tag.to_string()))?;
        Ok(())
    }

    /// Set the level from text.
    pub fn set_level(&mut self, value: &str) -> Result<(), ConfigError> {
        self.level = value
            .parse()
            .map_err(|_| ConfigError::BadLevelText(value.to_string()))?;
        Ok(())
    }

    /// Set the chunk size from text. Zero and negative values are rejected.
    pub fn set_chunk_size(&mut self, value: &str) -> Result<(), ConfigError> {
        match value.parse::<usize>() {
            Ok(size) if size > 0 => {
                self.chunk_size = size;
                Ok(())
            }
            _ => Err(ConfigError::BadChunkSize(value.to_string())),
        }
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("bitshuffle")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown compression type {0:?} (supported: bz2, gzip)")]
    UnknownAlgorithm(String),
    #[error("compression level {0} outside {}..={}", MIN_LEVEL, MAX_LEVEL)]
    BadLevel(u32),
    #[error("compression level is not a number: {0:?}")]
    BadLevelText(String),
    #[error("chunk size must be a positive integer, got {0:?}")]
    BadChunkSize(String),
    #[error("payload needs {0} packets, more than a sequence number can address")]
    TooManyChunks(usize),
    #[error("message must be ASCII without '|', '<' or '>': {0:?}")]
    BadMessage(String),
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to write {0}: {1}")]
    WriteFailed(PathBuf, std::io::Error),
    #[error("failed to serialize: {0}")]
    SerializeFailed(toml::ser::Error),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl BitshuffleConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::file_path(), |key| std::env::var(key).ok())
    }

    /// Load from `path` (defaults if it does not exist), then apply overrides
    /// read through `lookup`.
    pub fn load_from(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
            Self::from_toml(&text).map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))?
        } else {
            BitshuffleConfig::default()
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Parse a config document.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("BITSHUFFLE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Write default config if none exists. Returns the path.
    pub fn write_default_if_missing() -> Result<PathBuf, ConfigError> {
        let path = Self::file_path();
        Self::write_default_at(&path)?;
        Ok(path)
    }

    /// Write the default config to `path` unless a file is already there.
    pub fn write_default_at(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteFailed(path.to_path_buf(), e))?;
        }
        let text = toml::to_string_pretty(&BitshuffleConfig::default())
            .map_err(ConfigError::SerializeFailed)?;
        std::fs::write(path, text).map_err(|e| ConfigError::WriteFailed(path.to_path_buf(), e))
    }

    /// Apply BITSHUFFLE_* overrides, reading variables through `lookup`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(v) = lookup("BITSHUFFLE_ENCODE__COMPRESSION") {
            self.encode.set_compression(&v)?;
        }
        if let Some(v) = lookup("BITSHUFFLE_ENCODE__LEVEL") {
            self.encode.set_level(&v)?;
        }
        if let Some(v) = lookup("BITSHUFFLE_ENCODE__CHUNK_SIZE") {
            self.encode.set_chunk_size(&v)?;
        }
        if let Some(v) = lookup("BITSHUFFLE_ENCODE__MESSAGE") {
            self.encode.message = v;
        }
        Ok(())
    }
}
