//! nas-eps-decode: decode LTE NAS messages from hex captures

mod input;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use epsnas::{decode, DecoderConfig, Direction};
use epsnas_common::{init_logging, LogLevel};
use tracing::debug;

use input::parse_hex_message;

#[derive(Parser, Debug)]
#[command(name = "nas-eps-decode")]
#[command(author, version, about = "Decode LTE NAS (EMM/ESM) messages given as hex", long_about = None)]
pub struct Args {
    /// Messages to decode, one hex string each
    #[arg(value_name = "HEX")]
    pub messages: Vec<String>,

    /// Read messages from a file, one per line
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Decoder configuration (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// EEA2 key as 32 hex characters, overrides the configuration
    #[arg(short = 'k', long = "key", value_name = "HEX")]
    pub key: Option<String>,

    /// Link direction of the messages: ul, dl or unknown
    #[arg(short = 'd', long = "direction", value_name = "DIR", default_value = "unknown")]
    pub direction: Direction,

    /// Skip the security header and decode every message as plain
    #[arg(long = "plain")]
    pub plain: bool,

    /// Assume EEA0 when no key is given
    #[arg(long = "null-decipher")]
    pub null_decipher: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level);

    let config = build_config(&args)?;
    let failures = if !args.messages.is_empty() {
        decode_lines(args.messages.iter().map(|m| Ok(m.clone())), args.direction, &config)
    } else if let Some(path) = &args.file {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        decode_lines(BufReader::new(file).lines(), args.direction, &config)
    } else {
        decode_lines(io::stdin().lock().lines(), args.direction, &config)
    }?;

    if failures > 0 {
        bail!("{failures} input line(s) could not be parsed");
    }
    Ok(())
}

/// Loads the configuration file, if any, and applies the command line
/// overrides.
fn build_config(args: &Args) -> Result<DecoderConfig> {
    let mut config = match &args.config {
        Some(path) => DecoderConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => DecoderConfig::default(),
    };

    if let Some(key) = &args.key {
        config.decipher_key = Some(key.clone());
    }
    config.dissect_plain |= args.plain;
    config.null_decipher |= args.null_decipher;

    config.validate().context("Invalid decoder configuration")?;
    debug!(?config, "decoder configuration");
    Ok(config)
}

/// Decodes and prints every message line; returns the number of lines that
/// were not valid hex.
fn decode_lines<I>(lines: I, direction: Direction, config: &DecoderConfig) -> Result<usize>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut failures = 0;
    let mut first = true;

    for (index, line) in lines.enumerate() {
        let line = line.context("Failed to read input")?;
        let data = match parse_hex_message(&line) {
            Ok(Some(data)) => data,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("ERROR: line {}: {:#}", index + 1, e);
                failures += 1;
                continue;
            }
        };

        if !first {
            println!();
        }
        first = false;
        println!("{}", decode(&data, direction, config));
    }
    Ok(failures)
}
