//! Information element decoding framework
//!
//! A message body is described by a static, ordered catalogue of
//! [`ElementSpec`] entries. [`decode_elements`] walks the catalogue once,
//! consuming one element per entry:
//!
//! - Mandatory entries are always read; an exhausted buffer yields
//!   `MissingMandatory` and a length running past the buffer yields
//!   `BoundsError`, both ending the message.
//! - Optional entries are read only when the next octet carries their tag
//!   (the high nibble for TV-short entries). Tags are never searched for out
//!   of order.
//! - Bytes left over once the catalogue is exhausted are reported as
//!   `ExtraneousData`.
//!
//! NAS IE formats (TS 24.007 11.2.1.1):
//! - V: value only, fixed length (half octets are paired low nibble first)
//! - LV / LV-E: 1 or 2 octet length, then value
//! - TV / TV-short: tag, then fixed length value (TV-short: tag in the high
//!   nibble, value in the low nibble of the same octet)
//! - TLV / TLV-E: tag, 1 or 2 octet length, then value

use std::fmt;
use std::ops::Range;

use epsnas_common::{DecoderConfig, Direction, OctetView, OctetViewError, CIPHER_KEY_LEN};
use thiserror::Error;
use tracing::trace;

use crate::value::{DecodedElement, DecodedValue, Diagnostic, DiagnosticKind};

/// Errors an IE body decoder can return
///
/// The framework turns them into diagnostics and keeps the raw value bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IeError {
    /// Body shorter than its structure requires
    #[error("Buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Expected minimum bytes
        expected: usize,
        /// Actual bytes available
        actual: usize,
    },

    /// Invalid value encountered during decoding
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Body length does not fit the element's structure
    #[error("Length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },
}

impl From<OctetViewError> for IeError {
    fn from(err: OctetViewError) -> Self {
        match err {
            OctetViewError::BufferTooShort { expected, actual } => {
                IeError::BufferTooShort { expected, actual }
            }
        }
    }
}

/// Result type for IE body decoders
pub type IeResult = Result<DecodedValue, IeError>;

/// Decoder for a half-octet value
pub type NibbleFn = fn(u8) -> DecodedValue;

/// Decoder for a value of one or more octets
pub type OctetsFn = fn(&mut DecodeContext<'_>, &OctetView<'_>) -> IeResult;

/// Reference to an IE body decoder
#[derive(Clone, Copy)]
pub enum IeDecoder {
    Nibble(NibbleFn),
    Octets(OctetsFn),
}

impl fmt::Debug for IeDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IeDecoder::Nibble(_) => f.write_str("Nibble"),
            IeDecoder::Octets(_) => f.write_str("Octets"),
        }
    }
}

/// Presence requirement of a catalogue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Mandatory,
    /// Present when the next octet equals the tag
    Optional(u8),
    /// Present when the high nibble of the next octet equals the tag
    OptionalShort(u8),
}

/// Wire encoding of a catalogue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Low nibble of the current octet; the cursor does not move
    HalfLow,
    /// High nibble of the current octet; the octet is consumed
    HalfHigh,
    V(usize),
    Lv,
    LvExtended,
    /// Tag plus a value of the given length
    Tv(usize),
    TvShort,
    Tlv,
    TlvExtended,
}

/// One entry of a message's element catalogue
#[derive(Debug, Clone, Copy)]
pub struct ElementSpec {
    pub label: &'static str,
    pub presence: Presence,
    pub encoding: Encoding,
    pub decoder: IeDecoder,
}

impl ElementSpec {
    /// Mandatory half octet in bits 1-4.
    pub const fn half_low(label: &'static str, decoder: NibbleFn) -> Self {
        Self::new(label, Presence::Mandatory, Encoding::HalfLow, IeDecoder::Nibble(decoder))
    }

    /// Mandatory half octet in bits 5-8.
    pub const fn half_high(label: &'static str, decoder: NibbleFn) -> Self {
        Self::new(label, Presence::Mandatory, Encoding::HalfHigh, IeDecoder::Nibble(decoder))
    }

    pub const fn v(label: &'static str, len: usize, decoder: OctetsFn) -> Self {
        Self::new(label, Presence::Mandatory, Encoding::V(len), IeDecoder::Octets(decoder))
    }

    pub const fn lv(label: &'static str, decoder: OctetsFn) -> Self {
        Self::new(label, Presence::Mandatory, Encoding::Lv, IeDecoder::Octets(decoder))
    }

    pub const fn lve(label: &'static str, decoder: OctetsFn) -> Self {
        Self::new(label, Presence::Mandatory, Encoding::LvExtended, IeDecoder::Octets(decoder))
    }

    /// Optional TV element; `len` excludes the tag.
    pub const fn tv(tag: u8, label: &'static str, len: usize, decoder: OctetsFn) -> Self {
        Self::new(label, Presence::Optional(tag), Encoding::Tv(len), IeDecoder::Octets(decoder))
    }

    /// Optional TV-short element; `tag` is the high nibble.
    pub const fn tv_short(tag: u8, label: &'static str, decoder: NibbleFn) -> Self {
        Self::new(label, Presence::OptionalShort(tag), Encoding::TvShort, IeDecoder::Nibble(decoder))
    }

    pub const fn tlv(tag: u8, label: &'static str, decoder: OctetsFn) -> Self {
        Self::new(label, Presence::Optional(tag), Encoding::Tlv, IeDecoder::Octets(decoder))
    }

    pub const fn tlve(tag: u8, label: &'static str, decoder: OctetsFn) -> Self {
        Self::new(label, Presence::Optional(tag), Encoding::TlvExtended, IeDecoder::Octets(decoder))
    }

    const fn new(
        label: &'static str,
        presence: Presence,
        encoding: Encoding,
        decoder: IeDecoder,
    ) -> Self {
        Self {
            label,
            presence,
            encoding,
            decoder,
        }
    }

    fn decode_nibble(&self, nibble: u8) -> DecodedValue {
        match self.decoder {
            IeDecoder::Nibble(f) => f(nibble),
            IeDecoder::Octets(_) => DecodedValue::Uint(u64::from(nibble)),
        }
    }
}

/// State shared by all decoders working on one message.
///
/// Holds the resolved configuration, the link direction, the nesting depth
/// and the per-message scratch slot used by generic NAS transport.
#[derive(Debug)]
pub struct DecodeContext<'c> {
    config: &'c DecoderConfig,
    key: Option<[u8; CIPHER_KEY_LEN]>,
    direction: Direction,
    depth: usize,
    partially_ciphered: bool,
    generic_container_type: Option<u8>,
    diagnostics: Vec<Diagnostic>,
}

impl<'c> DecodeContext<'c> {
    pub fn new(
        config: &'c DecoderConfig,
        key: Option<[u8; CIPHER_KEY_LEN]>,
        direction: Direction,
    ) -> Self {
        Self {
            config,
            key,
            direction,
            depth: 0,
            partially_ciphered: false,
            generic_container_type: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn config(&self) -> &'c DecoderConfig {
        self.config
    }

    pub fn key(&self) -> Option<&[u8; CIPHER_KEY_LEN]> {
        self.key.as_ref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Context for a message nested in a container of this one, or `None`
    /// when the nesting limit is reached.
    pub fn nested(&self) -> Option<DecodeContext<'c>> {
        if self.depth >= self.config.max_nesting_depth {
            return None;
        }
        Some(Self {
            config: self.config,
            key: self.key,
            direction: self.direction,
            depth: self.depth + 1,
            partially_ciphered: false,
            generic_container_type: None,
            diagnostics: Vec::new(),
        })
    }

    /// True while decoding the body of an integrity protected and partially
    /// ciphered message.
    pub fn partially_ciphered(&self) -> bool {
        self.partially_ciphered
    }

    pub fn set_partially_ciphered(&mut self, value: bool) {
        self.partially_ciphered = value;
    }

    pub fn generic_container_type(&self) -> Option<u8> {
        self.generic_container_type
    }

    pub fn set_generic_container_type(&mut self, value: u8) {
        self.generic_container_type = Some(value);
    }

    /// Records a diagnostic.
    pub fn report(&mut self, kind: DiagnosticKind, range: Range<usize>) {
        trace!(%kind, ?range, "diagnostic");
        self.diagnostics.push(Diagnostic { kind, range });
    }

    /// Moves the recorded diagnostics out of the context.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

/// Outcome of walking a catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// All entries processed
    Done,
    /// A fatal problem ended the message early
    Stopped,
}

enum Step {
    Decoded(DecodedElement),
    Absent,
    Stop,
}

/// Decodes the elements of `catalogue` from `view` in order.
pub fn decode_elements(
    ctx: &mut DecodeContext<'_>,
    view: &OctetView<'_>,
    catalogue: &[ElementSpec],
    out: &mut Vec<DecodedElement>,
) -> Flow {
    for spec in catalogue {
        match decode_element(ctx, view, spec) {
            Step::Decoded(element) => out.push(element),
            Step::Absent => {}
            Step::Stop => return Flow::Stopped,
        }
    }

    if view.has_next() {
        ctx.report(DiagnosticKind::ExtraneousData, view.remaining_range());
        view.read_remaining();
    }
    Flow::Done
}

fn decode_element(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>, spec: &ElementSpec) -> Step {
    let start = view.position();

    let tag = match spec.presence {
        Presence::Mandatory => {
            if !view.has_next() {
                ctx.report(DiagnosticKind::MissingMandatory(spec.label), start..start);
                return Step::Stop;
            }
            None
        }
        Presence::Optional(tag) => {
            if view.peek() != Some(tag) {
                return Step::Absent;
            }
            Some(tag)
        }
        Presence::OptionalShort(tag) => {
            if view.peek().map(|b| b >> 4) != Some(tag) {
                return Step::Absent;
            }
            Some(tag)
        }
    };

    let element = |range: Range<usize>, value: DecodedValue| {
        trace!(label = spec.label, ?range, "IE");
        Step::Decoded(DecodedElement {
            tag,
            label: spec.label,
            range,
            value,
        })
    };

    // Half octet encodings never fail: presence already checked one octet.
    match spec.encoding {
        Encoding::HalfLow => {
            let octet = view.peek().unwrap_or_default();
            return element(start..start + 1, spec.decode_nibble(octet & 0x0F));
        }
        Encoding::HalfHigh => {
            let octet = view.read().unwrap_or_default();
            return element(start..start + 1, spec.decode_nibble(octet >> 4));
        }
        Encoding::TvShort => {
            let octet = view.read().unwrap_or_default();
            return element(start..start + 1, spec.decode_nibble(octet & 0x0F));
        }
        _ => {}
    }

    let body = match read_body(view, spec.encoding) {
        Ok(body) => body,
        Err(_) => {
            ctx.report(DiagnosticKind::BoundsError(spec.label), start..view.end());
            view.read_remaining();
            return Step::Stop;
        }
    };

    let value = match spec.decoder {
        IeDecoder::Octets(f) => f(ctx, &body),
        IeDecoder::Nibble(f) => body
            .read()
            .map(|b| f(b & 0x0F))
            .map_err(IeError::from),
    };
    let value = value.unwrap_or_else(|err| {
        let kind = match err {
            IeError::InvalidValue(reason) => DiagnosticKind::MalformedElement {
                element: spec.label,
                reason,
            },
            IeError::BufferTooShort { .. } | IeError::LengthMismatch { .. } => {
                DiagnosticKind::BoundsError(spec.label)
            }
        };
        ctx.report(kind, body.base()..body.end());
        DecodedValue::bytes(body.data())
    });

    element(start..view.position(), value)
}

/// Consumes the tag and length octets of an element and returns a view over
/// its value.
fn read_body<'a>(view: &OctetView<'a>, encoding: Encoding) -> Result<OctetView<'a>, OctetViewError> {
    match encoding {
        Encoding::V(len) => view.sub_view(len),
        Encoding::Lv => {
            let len = view.read()?;
            view.sub_view(usize::from(len))
        }
        Encoding::LvExtended => {
            let len = view.read_u16()?;
            view.sub_view(usize::from(len))
        }
        Encoding::Tv(len) => {
            view.skip(1)?;
            view.sub_view(len)
        }
        Encoding::Tlv => {
            view.skip(1)?;
            let len = view.read()?;
            view.sub_view(usize::from(len))
        }
        Encoding::TlvExtended => {
            view.skip(1)?;
            let len = view.read_u16()?;
            view.sub_view(usize::from(len))
        }
        Encoding::HalfLow | Encoding::HalfHigh | Encoding::TvShort => view.sub_view(1),
    }
}
