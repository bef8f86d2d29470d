//! Test utility functions for integration tests
//!
//! Provides logging setup and a builder for security protected messages.

use epsnas_common::Direction;
use epsnas_crypto::eea2_encrypt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging for tests
///
/// Uses RUST_LOG environment variable if set, otherwise defaults to "warn"
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}

/// Parameters of a security protected EMM message
#[derive(Debug, Clone, Copy)]
pub struct ProtectedMessage {
    /// Security header type (1 to 5)
    pub header_type: u8,
    pub mac: u32,
    pub sequence_number: u8,
    pub direction: Direction,
    /// EEA2 key; `None` leaves the payload in clear (EEA0)
    pub key: Option<[u8; 16]>,
}

/// Wraps a plain NAS message in a security protected header.
///
/// The payload is ciphered with EEA2 (count = sequence number, bearer 0)
/// when a key is given and the header type is a ciphered one.
pub fn protect(params: &ProtectedMessage, plain: &[u8]) -> Vec<u8> {
    let mut payload = plain.to_vec();
    let ciphered = matches!(params.header_type, 2 | 4);
    if let (true, Some(key)) = (ciphered, params.key.as_ref()) {
        eea2_encrypt(
            u32::from(params.sequence_number),
            0,
            params.direction.bit(),
            key,
            &mut payload,
        );
    }

    let mut data = Vec::with_capacity(payload.len() + 6);
    data.push((params.header_type << 4) | 0x07);
    data.extend_from_slice(&params.mac.to_be_bytes());
    data.push(params.sequence_number);
    data.extend_from_slice(&payload);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protect_header_layout() {
        let params = ProtectedMessage {
            header_type: 1,
            mac: 0x0102_0304,
            sequence_number: 9,
            direction: Direction::Uplink,
            key: None,
        };
        assert_eq!(protect(&params, &[0x07, 0x4A]), vec![0x17, 1, 2, 3, 4, 9, 0x07, 0x4A]);
    }

    #[test]
    fn test_protect_ciphers_payload() {
        let params = ProtectedMessage {
            header_type: 2,
            mac: 0,
            sequence_number: 1,
            direction: Direction::Downlink,
            key: Some([0x11; 16]),
        };
        let data = protect(&params, &[0x07, 0x60, 0x6F]);
        assert_eq!(data.len(), 9);
        assert_ne!(&data[6..], &[0x07, 0x60, 0x6F]);
    }
}
