//! Logging infrastructure for the NAS-EPS decoder
//!
//! Sets up `tracing` output for the command line front end and provides
//! message logging helpers plus hex dump formatting for captures.

use std::fmt;
use tracing::Level;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::types::Direction;

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Trace level - per information element output
    Trace,
    /// Debug level - one event per decoded message
    Debug,
    /// Info level
    Info,
    /// Warn level (default)
    #[default]
    Warn,
    /// Error level
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("unknown log level: {s}")),
        }
    }
}

/// Initialize the tracing subscriber with the specified log level.
///
/// Call once at startup. `RUST_LOG` overrides the level when set.
/// Output goes to stderr so decoded trees on stdout stay clean.
pub fn init_logging(level: LogLevel) {
    init_logging_with_filter(&level.to_string());
}

/// Initialize logging with a custom filter string.
///
/// # Example
///
/// ```no_run
/// use epsnas_common::logging::init_logging_with_filter;
///
/// // Warnings everywhere, per-IE tracing for the decoder
/// init_logging_with_filter("warn,epsnas=trace");
/// ```
pub fn init_logging_with_filter(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .init();
}

/// Log a NAS message at debug level with a hex dump at trace level.
///
/// # Example
///
/// ```
/// use epsnas_common::logging::log_nas_message;
/// use epsnas_common::Direction;
///
/// log_nas_message(Direction::Uplink, "Attach request", &[0x07, 0x41, 0x71]);
/// ```
pub fn log_nas_message(direction: Direction, msg_type: &str, data: &[u8]) {
    tracing::debug!(
        direction = %direction,
        msg_type = msg_type,
        len = data.len(),
        "{} NAS-EPS message",
        direction
    );
    tracing::trace!(hex = %HexDump(data), "NAS-EPS payload\n{}", format_hex_dump(data));
}

/// Wrapper for hex dump formatting
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Format bytes as a hex dump with offset, hex, and ASCII columns.
///
/// # Example
///
/// ```
/// use epsnas_common::logging::format_hex_dump;
///
/// let dump = format_hex_dump(&[0x07, 0x41]);
/// assert!(dump.starts_with("00000000  07 41"));
/// ```
pub fn format_hex_dump(data: &[u8]) -> String {
    if data.is_empty() {
        return String::from("(empty)");
    }

    let mut lines = Vec::with_capacity(data.len().div_ceil(16));

    for (row, chunk) in data.chunks(16).enumerate() {
        let mut line = format!("{:08x}  ", row * 16);

        for i in 0..16 {
            if i == 8 {
                line.push(' ');
            }
            match chunk.get(i) {
                Some(byte) => line.push_str(&format!("{byte:02x} ")),
                None => line.push_str("   "),
            }
        }

        line.push_str(" |");
        line.extend(chunk.iter().map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        }));
        line.push('|');
        lines.push(line);
    }

    lines.join("\n")
}

/// Format bytes as a compact hex string, optionally grouped.
///
/// A `group_size` of 0 disables grouping.
///
/// ```
/// use epsnas_common::logging::format_hex_compact;
///
/// let data = [0x12, 0x34, 0x56, 0x78];
/// assert_eq!(format_hex_compact(&data, 0), "12345678");
/// assert_eq!(format_hex_compact(&data, 2), "1234 5678");
/// ```
pub fn format_hex_compact(data: &[u8], group_size: usize) -> String {
    if group_size == 0 {
        return hex::encode(data);
    }

    data.chunks(group_size)
        .map(hex::encode)
        .collect::<Vec<_>>()
        .join(" ")
}
