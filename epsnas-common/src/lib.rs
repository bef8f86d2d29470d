//! Common types and utilities for the NAS-EPS decoder
//!
//! This crate provides the shared error type, logging setup, decoder
//! configuration and the bounds-checked byte cursor used by the decoder
//! crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod octet_view;
pub mod types;

pub use config::{DecoderConfig, UserDataContainerAs, CIPHER_KEY_LEN};
pub use error::Error;
pub use logging::{
    format_hex_compact, format_hex_dump, init_logging, init_logging_with_filter, log_nas_message,
    HexDump, LogLevel,
};
pub use octet_view::{OctetView, OctetViewError};
pub use types::{Direction, Plmn, Tai};
