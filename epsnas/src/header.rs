//! NAS-EPS security envelope
//!
//! The first octet of every NAS-EPS message carries the protocol
//! discriminator in bits 1-4. For EMM the upper nibble is the security header
//! type; for ESM it is the EPS bearer identity.
//!
//! ## Security protected EMM message (6 octet header)
//! ```text
//! +-----------------+-----------------+-----------------------------------+
//! | SHT (4) | PD(4) |  Message authentication code (4 octets)             |
//! +-----------------+-----------------+-----------------------------------+
//! | Sequence number |             Plain NAS message (variable)            |
//! +-----------------+-----------------------------------------------------+
//! ```
//!
//! ## Service request (4 octets)
//! ```text
//! +-----------------+---------------------------+-----------------------+
//! | SHT>=12 | PD(4) | KSI (3) | Seq number (5)  |   Short MAC (2)       |
//! +-----------------+---------------------------+-----------------------+
//! ```

use std::fmt;

use epsnas_common::{OctetView, OctetViewError};
use thiserror::Error;

use crate::enums::{ProtocolDiscriminator, SecurityHeaderType};

/// Messages shorter than this are always decoded as plain.
pub const MIN_PROTECTED_LEN: usize = 8;

/// Security header types from this value up denote a service request.
pub const SERVICE_REQUEST_HEADER: u8 = 12;

/// Length of the security protected header.
pub const PROTECTED_HEADER_LEN: usize = 6;

/// Classification of the outer header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityHeaderKind {
    Plain,
    IntegrityProtected,
    IntegrityProtectedCiphered,
    IntegrityProtectedNewContext,
    IntegrityProtectedCipheredNewContext,
    IntegrityProtectedPartiallyCiphered,
    ServiceRequest,
    /// Header types 6 to 11
    Reserved(u8),
}

impl SecurityHeaderKind {
    /// Classifies a security header type nibble.
    pub fn from_nibble(nibble: u8) -> Self {
        match SecurityHeaderType::try_from(nibble) {
            Ok(sht) => sht.into(),
            Err(_) if nibble >= SERVICE_REQUEST_HEADER => SecurityHeaderKind::ServiceRequest,
            Err(_) => SecurityHeaderKind::Reserved(nibble),
        }
    }

    /// True for the kinds whose payload is fully ciphered.
    pub fn is_ciphered(&self) -> bool {
        matches!(
            self,
            SecurityHeaderKind::IntegrityProtectedCiphered
                | SecurityHeaderKind::IntegrityProtectedCipheredNewContext
        )
    }

    /// True when a MAC and sequence number precede the message.
    pub fn has_protected_header(&self) -> bool {
        !matches!(
            self,
            SecurityHeaderKind::Plain | SecurityHeaderKind::ServiceRequest
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            SecurityHeaderKind::Plain => "Plain NAS message, not security protected",
            SecurityHeaderKind::IntegrityProtected => "Integrity protected",
            SecurityHeaderKind::IntegrityProtectedCiphered => "Integrity protected and ciphered",
            SecurityHeaderKind::IntegrityProtectedNewContext => {
                "Integrity protected with new EPS security context"
            }
            SecurityHeaderKind::IntegrityProtectedCipheredNewContext => {
                "Integrity protected and ciphered with new EPS security context"
            }
            SecurityHeaderKind::IntegrityProtectedPartiallyCiphered => {
                "Integrity protected and partially ciphered"
            }
            SecurityHeaderKind::ServiceRequest => "Security header for the SERVICE REQUEST message",
            SecurityHeaderKind::Reserved(_) => "Reserved",
        }
    }
}

impl From<SecurityHeaderType> for SecurityHeaderKind {
    fn from(sht: SecurityHeaderType) -> Self {
        match sht {
            SecurityHeaderType::Plain => SecurityHeaderKind::Plain,
            SecurityHeaderType::IntegrityProtected => SecurityHeaderKind::IntegrityProtected,
            SecurityHeaderType::IntegrityProtectedCiphered => {
                SecurityHeaderKind::IntegrityProtectedCiphered
            }
            SecurityHeaderType::IntegrityProtectedNewContext => {
                SecurityHeaderKind::IntegrityProtectedNewContext
            }
            SecurityHeaderType::IntegrityProtectedCipheredNewContext => {
                SecurityHeaderKind::IntegrityProtectedCipheredNewContext
            }
            SecurityHeaderType::IntegrityProtectedPartiallyCiphered => {
                SecurityHeaderKind::IntegrityProtectedPartiallyCiphered
            }
        }
    }
}

impl fmt::Display for SecurityHeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityHeaderKind::Reserved(n) => write!(f, "Reserved ({n})"),
            other => f.write_str(other.name()),
        }
    }
}

/// The parsed outer header of a NAS-EPS message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityEnvelope {
    pub kind: SecurityHeaderKind,
    pub protocol_discriminator: u8,
    /// 4 octet MAC, or the 2 octet short MAC of a service request
    pub mac: Option<u32>,
    /// 8 bit NAS sequence number, or the 5 bit short one of a service request
    pub sequence_number: Option<u8>,
    /// Key set identifier of a service request
    pub ksi: Option<u8>,
}

impl SecurityEnvelope {
    fn plain(protocol_discriminator: u8) -> Self {
        Self {
            kind: SecurityHeaderKind::Plain,
            protocol_discriminator,
            mac: None,
            sequence_number: None,
            ksi: None,
        }
    }
}

/// Errors that end decoding at the outer header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("Wrong protocol discriminator {pd} for security header type {header}")]
    WrongProtocolDiscriminator { pd: u8, header: u8 },

    #[error("Truncated security header: {0}")]
    Truncated(#[from] OctetViewError),
}

/// Parses the outer header of a message.
///
/// For plain messages nothing is consumed. For protected messages the view
/// is left at the first octet of the inner message; for a service request it
/// is left after the short MAC.
pub fn parse_envelope(
    view: &OctetView<'_>,
    dissect_plain: bool,
) -> Result<SecurityEnvelope, EnvelopeError> {
    let first = view.peek().ok_or(OctetViewError::BufferTooShort {
        expected: 1,
        actual: 0,
    })?;
    let header = first >> 4;
    let pd = first & 0x0F;
    let is_emm = pd == u8::from(ProtocolDiscriminator::EpsMobilityManagement);

    if is_emm && header >= SERVICE_REQUEST_HEADER {
        let [_, ksi_seq, mac_hi, mac_lo] = view.read_array::<4>()?;
        return Ok(SecurityEnvelope {
            kind: SecurityHeaderKind::ServiceRequest,
            protocol_discriminator: pd,
            mac: Some(u32::from(u16::from_be_bytes([mac_hi, mac_lo]))),
            sequence_number: Some(ksi_seq & 0x1F),
            ksi: Some(ksi_seq >> 5),
        });
    }

    // For ESM the upper nibble is the bearer identity, not a header type.
    let is_esm = pd == u8::from(ProtocolDiscriminator::EpsSessionManagement);
    if view.remaining() < MIN_PROTECTED_LEN || dissect_plain || header == 0 || is_esm {
        return Ok(SecurityEnvelope::plain(pd));
    }

    if !is_emm {
        return Err(EnvelopeError::WrongProtocolDiscriminator { pd, header });
    }

    view.skip(1)?;
    let mac = view.read_u32()?;
    let sequence_number = view.read()?;
    Ok(SecurityEnvelope {
        kind: SecurityHeaderKind::from_nibble(header),
        protocol_discriminator: pd,
        mac: Some(mac),
        sequence_number: Some(sequence_number),
        ksi: None,
    })
}
