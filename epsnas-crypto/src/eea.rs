//! EEA (EPS encryption algorithms)
//!
//! - 128-EEA0: null ciphering
//! - 128-EEA2: AES-128 in counter mode
//!
//! Reference: 3GPP TS 33.401 Annex B

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};

/// AES-128 key size in bytes
pub const KEY_SIZE: usize = 16;

/// Counter block size for AES-CTR
pub const IV_SIZE: usize = 16;

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// Direction bit value for uplink (UE to network)
pub const DIRECTION_UPLINK: u8 = 0;

/// Direction bit value for downlink (network to UE)
pub const DIRECTION_DOWNLINK: u8 = 1;

/// 128-EEA0: the keystream is all zeros, data is left untouched.
#[inline]
pub fn eea0(_data: &mut [u8]) {}

/// 128-EEA2 ciphering of `data` in place.
///
/// # Parameters
/// - `count`: 32-bit NAS COUNT
/// - `bearer`: 5-bit bearer identity (always 0 for NAS)
/// - `direction`: 1-bit direction (0 = uplink, 1 = downlink)
/// - `key`: 128-bit K_NASenc
///
/// Encryption and decryption are the same operation.
pub fn eea2_encrypt(count: u32, bearer: u8, direction: u8, key: &[u8; KEY_SIZE], data: &mut [u8]) {
    let iv = build_eea2_iv(count, bearer, direction);
    let mut cipher = Aes128Ctr::new(key.into(), &iv.into());
    cipher.apply_keystream(data);
}

/// 128-EEA2 deciphering, see [`eea2_encrypt`].
#[inline]
pub fn eea2_decrypt(count: u32, bearer: u8, direction: u8, key: &[u8; KEY_SIZE], data: &mut [u8]) {
    eea2_encrypt(count, bearer, direction, key, data);
}

/// Builds the initial counter block for 128-EEA2.
///
/// ```text
/// | COUNT (32 bits) | BEARER (5 bits) | DIRECTION (1 bit) | 0...0 (90 bits) |
/// ```
pub fn build_eea2_iv(count: u32, bearer: u8, direction: u8) -> [u8; IV_SIZE] {
    let mut iv = [0u8; IV_SIZE];
    iv[..4].copy_from_slice(&count.to_be_bytes());
    iv[4] = ((bearer & 0x1F) << 3) | ((direction & 0x01) << 2);
    iv
}
