//! Deciphering of ciphered NAS-EPS payloads
//!
//! 128-EEA2 counter block used here (TS 33.401 B.1.3, NAS bearer 0):
//!
//! ```text
//! | 0x00 0x00 0x00 | SQN | 0x04 if downlink | 0x00 ... 0x00 |
//! ```
//!
//! Only the 8 bit sequence number from the security header is known to the
//! decoder, so the overflow counter (the upper 24 bits of NAS COUNT) is always
//! taken as zero. Captures made after the first 256 messages of a security
//! context therefore do not decipher.

use epsnas_common::{Direction, CIPHER_KEY_LEN};
use epsnas_crypto::{eea0, eea2_decrypt};
use tracing::{debug, warn};

use crate::enums::ProtocolDiscriminator;

/// NAS signalling always uses bearer 0.
pub const NAS_BEARER: u8 = 0;

/// How a payload was deciphered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherAlgorithm {
    /// 128-EEA0
    Null,
    /// 128-EEA2
    Aes,
}

/// Transient deciphering parameters for one message.
#[derive(Debug, Clone, Copy)]
pub struct CipherContext<'k> {
    pub key: Option<&'k [u8; CIPHER_KEY_LEN]>,
    pub null_decipher: bool,
    pub direction: Direction,
    pub sequence_number: u8,
}

impl CipherContext<'_> {
    /// 32-bit NAS COUNT with the overflow counter taken as zero.
    pub fn count(&self) -> u32 {
        u32::from(self.sequence_number)
    }

    /// Algorithm that will be applied, if any.
    pub fn algorithm(&self) -> Option<CipherAlgorithm> {
        match (self.key, self.null_decipher) {
            (Some(_), _) => Some(CipherAlgorithm::Aes),
            (None, true) => Some(CipherAlgorithm::Null),
            (None, false) => None,
        }
    }
}

/// Deciphers `ciphertext`.
///
/// Returns `None` when deciphering is not possible (no key, null
/// deciphering disabled) or when the first plaintext octet does not start
/// with a known protocol discriminator.
pub fn decipher(cipher: &CipherContext<'_>, ciphertext: &[u8]) -> Option<Vec<u8>> {
    let algorithm = cipher.algorithm()?;
    let mut plain = ciphertext.to_vec();

    match (algorithm, cipher.key) {
        (CipherAlgorithm::Aes, Some(key)) => eea2_decrypt(
            cipher.count(),
            NAS_BEARER,
            cipher.direction.bit(),
            key,
            &mut plain,
        ),
        _ => eea0(&mut plain),
    }

    match plain.first() {
        Some(&first) if ProtocolDiscriminator::is_known(first) => {
            debug!(?algorithm, count = cipher.count(), "payload deciphered");
            Some(plain)
        }
        first => {
            warn!(
                ?algorithm,
                first = ?first,
                "deciphered payload does not start with a known protocol discriminator"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epsnas_crypto::eea2_encrypt;

    const KEY: [u8; 16] = [0x11; 16];

    fn ctx(key: Option<&[u8; 16]>, null_decipher: bool, direction: Direction) -> CipherContext<'_> {
        CipherContext {
            key,
            null_decipher,
            direction,
            sequence_number: 3,
        }
    }

    #[test]
    fn test_decipher_without_key_fails() {
        assert!(decipher(&ctx(None, false, Direction::Uplink), &[0x07, 0x5E]).is_none());
    }

    #[test]
    fn test_null_decipher() {
        let c = ctx(None, true, Direction::Uplink);
        assert_eq!(c.algorithm(), Some(CipherAlgorithm::Null));
        assert_eq!(decipher(&c, &[0x07, 0x5E]), Some(vec![0x07, 0x5E]));
        // Not a NAS message in the clear
        assert!(decipher(&c, &[0x31, 0x5E]).is_none());
    }

    #[test]
    fn test_eea2_roundtrip_downlink() {
        let plain = [0x07, 0x61, 0x43, 0x03, 0x80, 0x31, 0x32];
        let mut cipher_text = plain.to_vec();
        eea2_encrypt(3, 0, 1, &KEY, &mut cipher_text);

        let c = ctx(Some(&KEY), false, Direction::Downlink);
        assert_eq!(decipher(&c, &cipher_text), Some(plain.to_vec()));

        // Wrong direction gives a different keystream
        let wrong = ctx(Some(&KEY), false, Direction::Uplink);
        let result = decipher(&wrong, &cipher_text);
        assert_ne!(result, Some(plain.to_vec()));
    }

    #[test]
    fn test_empty_payload() {
        assert!(decipher(&ctx(None, true, Direction::Unknown), &[]).is_none());
    }
}
