//! Decoded message model
//!
//! Everything the decoder produces: messages, their elements, element values
//! and the diagnostics recorded while walking the bytes. Byte ranges are
//! always absolute offsets into the buffer passed to [`crate::decode`].

use std::ops::Range;

use bytes::Bytes;
use epsnas_common::{Plmn, Tai};
use thiserror::Error;

use crate::bitrate::BitRate;
use crate::header::SecurityEnvelope;

/// Value of a GPRS timer IE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerValue {
    Seconds(u64),
    Deactivated,
}

/// A named sub-field of a decoded element
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub value: DecodedValue,
}

/// Shorthand for building a [`Field`].
pub fn field(name: &'static str, value: DecodedValue) -> Field {
    Field { name, value }
}

/// The decoded body of an information element.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// Plain integer
    Uint(u64),
    /// Single bit
    Flag(bool),
    /// Coded value with its meaning
    Enumerated { value: u32, meaning: &'static str },
    /// BCD digit string (IMSI, IMEI, emergency numbers)
    Digits(String),
    /// Character string (APN, network name, addresses)
    Text(String),
    Plmn(Plmn),
    Tai(Tai),
    BitRate(BitRate),
    Timer(TimerValue),
    /// Undecoded octets
    Bytes(Bytes),
    /// Byte range handed off to another protocol decoder
    Handoff { protocol: String, data: Bytes },
    /// Payload that could not be deciphered
    Ciphered(Bytes),
    /// Nested NAS message
    Message(Box<DecodedMessage>),
    Fields(Vec<Field>),
    List(Vec<DecodedValue>),
}

impl DecodedValue {
    /// Builds an [`DecodedValue::Enumerated`].
    pub fn enumerated(value: impl Into<u32>, meaning: &'static str) -> Self {
        DecodedValue::Enumerated {
            value: value.into(),
            meaning,
        }
    }

    /// Builds a [`DecodedValue::Bytes`] by copying `data`.
    pub fn bytes(data: &[u8]) -> Self {
        DecodedValue::Bytes(Bytes::copy_from_slice(data))
    }

    /// Builds a [`DecodedValue::Handoff`] by copying `data`.
    pub fn handoff(protocol: impl Into<String>, data: &[u8]) -> Self {
        DecodedValue::Handoff {
            protocol: protocol.into(),
            data: Bytes::copy_from_slice(data),
        }
    }

    /// Looks up a sub-field by name.
    pub fn field(&self, name: &str) -> Option<&DecodedValue> {
        match self {
            DecodedValue::Fields(fields) => {
                fields.iter().find(|f| f.name == name).map(|f| &f.value)
            }
            _ => None,
        }
    }

    /// Numeric view of integer-like values.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            DecodedValue::Uint(v) => Some(*v),
            DecodedValue::Enumerated { value, .. } => Some(u64::from(*value)),
            DecodedValue::Flag(b) => Some(u64::from(*b)),
            _ => None,
        }
    }

    /// Meaning of an enumerated value.
    pub fn meaning(&self) -> Option<&'static str> {
        match self {
            DecodedValue::Enumerated { meaning, .. } => Some(meaning),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::Digits(s) | DecodedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Raw octets of byte-like values.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            DecodedValue::Bytes(b) | DecodedValue::Ciphered(b) => Some(b),
            DecodedValue::Handoff { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&DecodedMessage> {
        match self {
            DecodedValue::Message(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[DecodedValue]> {
        match self {
            DecodedValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// One decoded information element
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedElement {
    /// IEI for optional elements (the high nibble for TV-short elements)
    pub tag: Option<u8>,
    pub label: &'static str,
    /// Range covering tag, length and value
    pub range: Range<usize>,
    pub value: DecodedValue,
}

/// Problems found while decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("Missing mandatory element: {0}")]
    MissingMandatory(&'static str),

    #[error("Unknown message type 0x{0:02x}")]
    UnknownMessageType(u8),

    #[error("Unknown type of identity {0}")]
    UnknownIdentity(u8),

    #[error("Unknown type of list {0}")]
    UnknownTypeOfList(u8),

    #[error("Wrong number of elements: {declared} declared, {found} found")]
    WrongNumberOfElements { declared: usize, found: usize },

    #[error("Extraneous data")]
    ExtraneousData,

    #[error("Wrong protocol discriminator {0}")]
    WrongProtocolDiscriminator(u8),

    #[error("Length exceeds buffer in {0}")]
    BoundsError(&'static str),

    #[error("Deciphering failed, payload left ciphered")]
    DecipherFailed,

    #[error("Malformed {element}: {reason}")]
    MalformedElement { element: &'static str, reason: String },

    #[error("Nesting depth limit of {0} reached")]
    RecursionLimit(usize),
}

/// A diagnostic and the bytes it applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub range: Range<usize>,
}

/// A decoded NAS-EPS message, possibly partial.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedMessage {
    /// Outer security header, when one was parsed
    pub envelope: Option<SecurityEnvelope>,
    pub protocol_discriminator: Option<u8>,
    /// ESM only
    pub eps_bearer_identity: Option<u8>,
    /// ESM only
    pub procedure_transaction_identity: Option<u8>,
    pub message_type: Option<u8>,
    pub name: Option<&'static str>,
    pub elements: Vec<DecodedElement>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DecodedMessage {
    /// First element with the given label.
    pub fn element(&self, label: &str) -> Option<&DecodedElement> {
        self.elements.iter().find(|e| e.label == label)
    }

    /// Value of the first element with the given label.
    pub fn value(&self, label: &str) -> Option<&DecodedValue> {
        self.element(label).map(|e| &e.value)
    }

    /// True if a diagnostic of this message (not nested ones) matches.
    pub fn has_diagnostic(&self, pred: impl Fn(&DiagnosticKind) -> bool) -> bool {
        self.diagnostics.iter().any(|d| pred(&d.kind))
    }

    /// Diagnostics of this message followed by those of nested messages.
    pub fn all_diagnostics(&self) -> Vec<&Diagnostic> {
        let mut out: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        for element in &self.elements {
            collect_nested(&element.value, &mut out);
        }
        out
    }
}

fn collect_nested<'m>(value: &'m DecodedValue, out: &mut Vec<&'m Diagnostic>) {
    match value {
        DecodedValue::Message(m) => out.extend(m.all_diagnostics()),
        DecodedValue::Fields(fields) => {
            for f in fields {
                collect_nested(&f.value, out);
            }
        }
        DecodedValue::List(items) => {
            for item in items {
                collect_nested(item, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let value = DecodedValue::Fields(vec![
            field("Type", DecodedValue::enumerated(1u8, "IMSI")),
            field("Odd/even indication", DecodedValue::Flag(true)),
        ]);
        assert_eq!(value.field("Type").and_then(|v| v.meaning()), Some("IMSI"));
        assert_eq!(value.field("Odd/even indication").and_then(|v| v.as_uint()), Some(1));
        assert!(value.field("Missing").is_none());
    }

    #[test]
    fn test_all_diagnostics_walks_nested_messages() {
        let inner = DecodedMessage {
            diagnostics: vec![Diagnostic {
                kind: DiagnosticKind::ExtraneousData,
                range: 10..12,
            }],
            ..Default::default()
        };
        let outer = DecodedMessage {
            elements: vec![DecodedElement {
                tag: None,
                label: "ESM message container",
                range: 4..12,
                value: DecodedValue::Message(Box::new(inner)),
            }],
            diagnostics: vec![Diagnostic {
                kind: DiagnosticKind::BoundsError("X"),
                range: 12..13,
            }],
            ..Default::default()
        };
        let all = outer.all_diagnostics();
        assert_eq!(all.len(), 2);
        assert!(!outer.has_diagnostic(|k| *k == DiagnosticKind::ExtraneousData));
        assert_eq!(all[1].range, 10..12);
    }

    #[test]
    fn test_diagnostic_display() {
        assert_eq!(
            DiagnosticKind::UnknownMessageType(0x47).to_string(),
            "Unknown message type 0x47"
        );
        assert_eq!(
            DiagnosticKind::WrongNumberOfElements { declared: 3, found: 2 }.to_string(),
            "Wrong number of elements: 3 declared, 2 found"
        );
    }
}
