//! NAS-EPS (Non-Access Stratum) message decoder
//!
//! Decodes LTE NAS messages exchanged between a UE and the MME as defined
//! in 3GPP TS 24.301:
//! - EMM (EPS Mobility Management)
//! - ESM (EPS Session Management)
//!
//! # Overview
//!
//! [`decode`] takes the bytes of one message and a direction hint and
//! always returns a [`DecodedMessage`]. Problems are recorded as
//! [`Diagnostic`]s on the (possibly partial) result instead of failing the
//! call.
//!
//! # Message Structure
//!
//! - A security header: plain, integrity protected (MAC and sequence number,
//!   possibly ciphered) or the short service request form
//! - The plain header: protocol discriminator and message type, plus the EPS
//!   bearer identity and procedure transaction identity for ESM
//! - Information elements, decoded from a static catalogue per message type
//!   (see [`codec`] and [`messages`])
//!
//! # Example
//!
//! ```rust
//! use epsnas::{decode, DecoderConfig, Direction};
//!
//! // Detach request from the network, EMM cause #2
//! let message = decode(&[0x07, 0x45, 0x02, 0x53, 0x02], Direction::Downlink, &DecoderConfig::default());
//! assert_eq!(message.name, Some("Detach request"));
//! assert_eq!(
//!     message.value("EMM cause").and_then(|v| v.meaning()),
//!     Some("IMSI unknown in HSS")
//! );
//! ```

pub mod bitrate;
pub mod codec;
pub mod decoder;
pub mod enums;
pub mod header;
pub mod ies;
pub mod messages;
pub mod render;
pub mod security;
pub mod value;

#[cfg(test)]
mod property_tests;

pub use bitrate::{BitRate, RateUnit};
pub use codec::{DecodeContext, ElementSpec, Flow, IeError};
pub use decoder::decode;
pub use enums::{
    EmmCause, EmmMessageType, EsmCause, EsmMessageType, ProtocolDiscriminator, SecurityHeaderType,
};
pub use epsnas_common::{DecoderConfig, Direction, UserDataContainerAs};
pub use header::{parse_envelope, EnvelopeError, SecurityEnvelope, SecurityHeaderKind};
pub use value::{
    DecodedElement, DecodedMessage, DecodedValue, Diagnostic, DiagnosticKind, Field, TimerValue,
};
