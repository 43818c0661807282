//! CLI command modules.

pub mod config;
pub mod decode;
pub mod encode;
