//! Ciphering algorithms for EPS NAS
//!
//! Implements the EPS encryption algorithms needed to read protected NAS
//! messages:
//! - 128-EEA0 (null)
//! - 128-EEA2 (AES-128-CTR)

pub mod eea;

pub use eea::{build_eea2_iv, eea0, eea2_decrypt, eea2_encrypt, KEY_SIZE};
