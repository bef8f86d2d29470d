//! Integration test support for the NAS-EPS decoder
#![allow(missing_docs)]
//!
//! Shared captures and helpers used by the cross-crate tests.
//!
//! # Components
//!
//! - [`test_fixtures`] - Hex captures and decoder configurations
//! - [`test_utils`] - Logging setup and builders for protected messages
//!
//! # Test Categories
//!
//! 1. **Capture Tests** - Decode real captures end to end and check the rendered tree
//! 2. **Security Tests** - EEA2 ciphered messages built with `epsnas-crypto`
//! 3. **Configuration Tests** - YAML configurations driving the decoder

pub mod test_fixtures;
pub mod test_utils;

pub use test_fixtures::{hex_bytes, yaml_config, Capture, CAPTURES, TEST_KEY};
pub use test_utils::{init_test_logging, protect, ProtectedMessage};
