//! Config file commands.

use anyhow::Result;
use bitshuffle_core::{BitshuffleConfig, Status};

pub fn cmd_config_init() -> Result<Status> {
    let path = BitshuffleConfig::write_default_if_missing()?;
    println!("{}", path.display());
    Ok(Status::Success)
}

pub fn cmd_config_show(config: &BitshuffleConfig) -> Result<Status> {
    let encode = &config.encode;
    println!("═══════════════════════════════════════");
    println!("  Bitshuffle Config");
    println!("═══════════════════════════════════════");
    println!("  File        : {}", BitshuffleConfig::file_path().display());
    println!("  Compression : {}", encode.compression);
    println!("  Level       : {}", encode.level);
    println!("  Chunk size  : {}", encode.chunk_size);
    println!("  Message     : {}", encode.message);
    Ok(Status::Success)
}
