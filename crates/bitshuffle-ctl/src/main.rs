//! bitshuffle: command-line front end for the packet codec.
//!
//! Reads stdin and writes stdout, so it composes with pipes and paste
//! buffers. Logs go to stderr; set RUST_LOG=bitshuffle_core=debug to watch
//! individual packets being validated.

use anyhow::{Context, Result};
use bitshuffle_core::{BitshuffleConfig, CodecError, EncodeConfig, Status};

mod cmd;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    println!("Usage: bitshuffle [options] [command]");
    println!();
    println!("Commands:");
    println!("  encode        Encode stdin into packets on stdout (default)");
    println!("  decode        Decode packets from stdin, payload to stdout");
    println!("  config        Show the effective encode settings");
    println!("  config init   Write a default config file if none exists");
    println!();
    println!("Options:");
    println!("  -t, --compression <bz2|gzip>   Compression type (default: bz2)");
    println!("  -l, --level <1-9>              Compression level (default: 5)");
    println!("  -c, --chunk-size <bytes>       Compressed bytes per packet (default: 2048)");
    println!("  -m, --message <text>           Message written into every packet");
    println!("  -v, --version                  Print version");
}

/// Options that take a value and override the encode config.
const VALUE_OPTIONS: &[&str] = &[
    "-t", "--compression", "-l", "--level", "-c", "--chunk-size", "-m", "--message",
];

/// Apply one command-line override on top of the loaded config.
fn apply_option(config: &mut EncodeConfig, flag: &str, value: &str) -> Result<(), CodecError> {
    match flag {
        "-t" | "--compression" => config.set_compression(value)?,
        "-l" | "--level" => config.set_level(value)?,
        "-c" | "--chunk-size" => config.set_chunk_size(value)?,
        _ => config.message = value.to_string(),
    }
    Ok(())
}

fn run() -> Result<Status> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut config = BitshuffleConfig::load().map_err(CodecError::from)?;

    let mut remaining: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if VALUE_OPTIONS.contains(&arg) {
            i += 1;
            let value = args
                .get(i)
                .with_context(|| format!("{arg} requires a value"))?;
            apply_option(&mut config.encode, arg, value)?;
        } else {
            remaining.push(arg);
        }
        i += 1;
    }

    match remaining.as_slice() {
        ["encode"] | ["-e"] | ["--encode"] | [] => cmd::encode::cmd_encode(&config.encode),
        ["decode"] | ["-d"] | ["--decode"] => cmd::decode::cmd_decode(),
        ["config"] => cmd::config::cmd_config_show(&config),
        ["config", "init"] => cmd::config::cmd_config_init(),
        ["version"] | ["-v"] | ["--version"] => {
            println!("{VERSION}");
            Ok(Status::Success)
        }
        ["help"] | ["--help"] | ["-h"] => {
            print_usage();
            Ok(Status::Success)
        }
        other => {
            eprintln!("Unknown command: {}", other.join(" "));
            eprintln!();
            print_usage();
            Ok(Status::Usage)
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let status = match run() {
        Ok(status) => status,
        Err(e) => {
            let status = e
                .downcast_ref::<CodecError>()
                .map(CodecError::status)
                .unwrap_or(Status::Usage);
            eprintln!("error {}: {}: {e:#}", status.code(), status.description());
            status
        }
    };

    std::process::exit(i32::from(status.code()));
}
