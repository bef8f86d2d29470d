//! Test fixtures
//!
//! Hex captures of common NAS-EPS messages and configuration helpers.

use epsnas_common::{DecoderConfig, Direction};

/// EEA2 key used by the security tests.
pub const TEST_KEY: [u8; 16] = [
    0xd3, 0xc5, 0xd5, 0x92, 0x32, 0x7f, 0xb1, 0x1c, 0x40, 0x35, 0xc6, 0x68, 0x0a, 0xf8, 0xc6, 0xd1,
];

/// A captured message and what it should decode to.
#[derive(Debug, Clone, Copy)]
pub struct Capture {
    pub name: &'static str,
    pub direction: Direction,
    pub hex: &'static str,
}

/// Plain captures that decode without diagnostics.
pub const CAPTURES: &[Capture] = &[
    Capture {
        name: "Attach request",
        direction: Direction::Uplink,
        hex: "07417108298039000000001002e0e000040201d011",
    },
    Capture {
        name: "Attach complete",
        direction: Direction::Uplink,
        hex: "0743000352 00c2",
    },
    Capture {
        name: "Detach request",
        direction: Direction::Downlink,
        hex: "07450253 02",
    },
    Capture {
        name: "Tracking area update complete",
        direction: Direction::Uplink,
        hex: "074a",
    },
    Capture {
        name: "EMM status",
        direction: Direction::Downlink,
        hex: "07606f",
    },
    Capture {
        name: "ESM data transport",
        direction: Direction::Uplink,
        hex: "5200eb000445000014",
    },
];

/// Parses a hex fixture, ignoring whitespace.
pub fn hex_bytes(hex: &str) -> Vec<u8> {
    let cleaned: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(cleaned).expect("fixture is valid hex")
}

/// Parses a YAML decoder configuration fixture.
pub fn yaml_config(yaml: &str) -> DecoderConfig {
    DecoderConfig::from_yaml(yaml).expect("fixture is a valid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_parse() {
        for capture in CAPTURES {
            assert!(!hex_bytes(capture.hex).is_empty(), "{}", capture.name);
        }
    }

    #[test]
    fn test_yaml_config_defaults() {
        let config = yaml_config("null_decipher: true\n");
        assert!(config.null_decipher);
        assert_eq!(config.max_nesting_depth, 4);
    }
}
