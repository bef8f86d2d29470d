//! Information element body decoders
//!
//! Every decoder has one of the two shapes of [`crate::codec::IeDecoder`]:
//! a half-octet decoder `fn(u8) -> DecodedValue`, or an octet decoder that
//! receives a view bounded by the element's length.
//!
//! - [`common`]: IEs shared with TS 24.008 (identities, timers, PCO, ...)
//! - [`emm`]: EMM IEs, TS 24.301 9.9.3
//! - [`esm`]: ESM IEs, TS 24.301 9.9.4
//! - [`qos`]: EPS QoS and AMBR IEs built on [`crate::bitrate`]
//! - [`container`]: IEs carrying other messages or hand-off payloads

pub mod common;
pub mod container;
pub mod emm;
pub mod esm;
pub mod qos;

use epsnas_common::OctetView;

use crate::codec::{DecodeContext, IeError, IeResult};
use crate::value::{field, DecodedValue, DiagnosticKind, Field};

/// Value of bit `n` (1 = least significant, as numbered in 3GPP figures).
pub(crate) fn bit(octet: u8, n: u8) -> bool {
    octet & (1 << (n - 1)) != 0
}

/// A named single-bit field.
pub(crate) fn flag(name: &'static str, octet: u8, n: u8) -> Field {
    field(name, DecodedValue::Flag(bit(octet, n)))
}

/// Looks `value` up in a meaning table.
pub(crate) fn lookup(value: u8, table: &[(u8, &'static str)], default: &'static str) -> DecodedValue {
    let meaning = table
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, m)| *m)
        .unwrap_or(default);
    DecodedValue::enumerated(value, meaning)
}

/// BCD digits, low nibble first, up to the first 0xF filler.
pub(crate) fn bcd_digits(bytes: &[u8]) -> String {
    let mut digits = String::with_capacity(bytes.len() * 2);
    for nibble in bytes.iter().flat_map(|b| [b & 0x0F, b >> 4]) {
        if nibble == 0x0F {
            break;
        }
        digits.push(bcd_char(nibble));
    }
    digits
}

/// Digit for a BCD nibble, including the extended dialling digits.
pub(crate) fn bcd_char(nibble: u8) -> char {
    match nibble {
        0..=9 => char::from(b'0' + nibble),
        0x0A => '*',
        0x0B => '#',
        0x0C => 'a',
        0x0D => 'b',
        0x0E => 'c',
        _ => '?',
    }
}

/// Fails unless the view holds exactly `len` octets.
pub(crate) fn expect_len(view: &OctetView<'_>, len: usize) -> Result<(), IeError> {
    if view.remaining() != len {
        return Err(IeError::LengthMismatch {
            expected: len,
            actual: view.remaining(),
        });
    }
    Ok(())
}

/// Fails unless the view holds at least `len` octets.
pub(crate) fn expect_min_len(view: &OctetView<'_>, len: usize) -> Result<(), IeError> {
    if view.remaining() < len {
        return Err(IeError::BufferTooShort {
            expected: len,
            actual: view.remaining(),
        });
    }
    Ok(())
}

/// Ends a list decoder early: reports the record starting at `start` as
/// running past the list and consumes the rest of the view.
pub(crate) fn truncated_record(
    ctx: &mut DecodeContext<'_>,
    view: &OctetView<'_>,
    label: &'static str,
    start: usize,
) {
    ctx.report(DiagnosticKind::BoundsError(label), start..view.end());
    let _ = view.read_remaining();
}

/// Value of a spare half octet.
pub fn spare_half_octet(nibble: u8) -> DecodedValue {
    DecodedValue::Uint(u64::from(nibble))
}

/// Generic octet decoder keeping the value undecoded.
pub fn raw(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    Ok(DecodedValue::bytes(view.read_remaining()))
}

/// Generic octet decoder for an unsigned big-endian integer of up to 8 octets.
pub fn uint(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    if view.remaining() > 8 {
        return Err(IeError::LengthMismatch {
            expected: 8,
            actual: view.remaining(),
        });
    }
    let value = view
        .read_remaining()
        .iter()
        .fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    Ok(DecodedValue::Uint(value))
}
