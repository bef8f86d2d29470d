//! Text rendering of decoded messages
//!
//! `Display` for [`DecodedMessage`] writes an indented tree, one element per
//! line with its byte range, composite values expanded below it and the
//! diagnostics last. `Display` for [`DecodedValue`] is the single line form.

use std::fmt::{self, Write};

use epsnas_common::{format_hex_compact, HexDump};

use crate::enums::ProtocolDiscriminator;
use crate::value::{DecodedMessage, DecodedValue, Diagnostic, TimerValue};

const INDENT: &str = "    ";

impl fmt::Display for TimerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerValue::Seconds(s) => write!(f, "{s} s"),
            TimerValue::Deactivated => f.write_str("deactivated"),
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Uint(v) => write!(f, "{v}"),
            DecodedValue::Flag(b) => f.write_str(if *b { "1" } else { "0" }),
            DecodedValue::Enumerated { value, meaning } => write!(f, "{meaning} ({value})"),
            DecodedValue::Digits(s) | DecodedValue::Text(s) => f.write_str(s),
            DecodedValue::Plmn(plmn) => write!(f, "{plmn}"),
            DecodedValue::Tai(tai) => write!(f, "{tai}"),
            DecodedValue::BitRate(rate) => write!(f, "{rate}"),
            DecodedValue::Timer(timer) => write!(f, "{timer}"),
            DecodedValue::Bytes(data) if data.is_empty() => f.write_str("(empty)"),
            DecodedValue::Bytes(data) => write!(f, "{}", format_hex_compact(data, 0)),
            DecodedValue::Handoff { protocol, data } => {
                write!(f, "[{protocol}] {}", HexDump(data))
            }
            DecodedValue::Ciphered(data) => write!(f, "ciphered, {} octets", data.len()),
            DecodedValue::Message(message) => f.write_str(message.name.unwrap_or("Unknown message")),
            DecodedValue::Fields(fields) => {
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.value)?;
                }
                Ok(())
            }
            DecodedValue::List(items) => write!(f, "{} items", items.len()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}..{}]", self.kind, self.range.start, self.range.end)
    }
}

impl fmt::Display for DecodedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_message(&mut out, self, 0)?;
        f.write_str(out.trim_end())
    }
}

fn pad(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_message(out: &mut String, message: &DecodedMessage, depth: usize) -> fmt::Result {
    pad(out, depth);
    out.push_str(message.name.unwrap_or("Unknown message"));
    let protocol = message
        .protocol_discriminator
        .and_then(|pd| ProtocolDiscriminator::try_from(pd).ok())
        .map(ProtocolDiscriminator::name);
    match (protocol, message.message_type) {
        (Some(protocol), Some(t)) => write!(out, " ({protocol}, 0x{t:02x})")?,
        (Some(protocol), None) => write!(out, " ({protocol})")?,
        (None, Some(t)) => write!(out, " (0x{t:02x})")?,
        (None, None) => {}
    }
    out.push('\n');

    if let Some(envelope) = message.envelope.filter(|e| e.kind.has_protected_header()) {
        pad(out, depth + 1);
        writeln!(out, "Security header type: {}", envelope.kind)?;
        if let Some(mac) = envelope.mac {
            pad(out, depth + 1);
            writeln!(out, "Message authentication code: 0x{mac:08x}")?;
        }
        if let Some(sqn) = envelope.sequence_number {
            pad(out, depth + 1);
            writeln!(out, "Sequence number: {sqn}")?;
        }
    }
    if let Some(ebi) = message.eps_bearer_identity {
        pad(out, depth + 1);
        writeln!(out, "EPS bearer identity: {ebi}")?;
    }
    if let Some(pti) = message.procedure_transaction_identity {
        pad(out, depth + 1);
        writeln!(out, "Procedure transaction identity: {pti}")?;
    }

    for element in &message.elements {
        pad(out, depth + 1);
        write!(out, "{} [{}..{}]", element.label, element.range.start, element.range.end)?;
        write_value(out, &element.value, depth + 1)?;
    }

    for diagnostic in &message.diagnostics {
        pad(out, depth + 1);
        writeln!(out, "! {diagnostic}")?;
    }
    Ok(())
}

/// Writes `value` after a label already on the line.
fn write_value(out: &mut String, value: &DecodedValue, depth: usize) -> fmt::Result {
    match value {
        DecodedValue::Fields(fields) => {
            out.push('\n');
            for field in fields {
                pad(out, depth + 1);
                out.push_str(field.name);
                write_value(out, &field.value, depth + 1)?;
            }
        }
        DecodedValue::List(items) => {
            writeln!(out, ": {} items", items.len())?;
            for (i, item) in items.iter().enumerate() {
                pad(out, depth + 1);
                write!(out, "[{i}]")?;
                write_value(out, item, depth + 1)?;
            }
        }
        DecodedValue::Message(message) => {
            out.push('\n');
            write_message(out, message, depth + 1)?;
        }
        scalar => writeln!(out, ": {scalar}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitrate::BitRate;
    use crate::value::{field, DecodedElement, DiagnosticKind};

    #[test]
    fn test_scalar_values() {
        assert_eq!(DecodedValue::enumerated(2u8, "IMSI unknown in HSS").to_string(), "IMSI unknown in HSS (2)");
        assert_eq!(DecodedValue::BitRate(BitRate::kbps(64)).to_string(), "64 kbps");
        assert_eq!(DecodedValue::Timer(TimerValue::Seconds(54)).to_string(), "54 s");
        assert_eq!(DecodedValue::bytes(&[0xDE, 0xAD]).to_string(), "dead");
        assert_eq!(DecodedValue::handoff("lpp", &[0x01]).to_string(), "[lpp] 01");
        assert_eq!(
            DecodedValue::Fields(vec![
                field("a", DecodedValue::Uint(1)),
                field("b", DecodedValue::Flag(true)),
            ])
            .to_string(),
            "a: 1, b: 1"
        );
    }

    #[test]
    fn test_message_tree() {
        let nested = DecodedMessage {
            protocol_discriminator: Some(2),
            eps_bearer_identity: Some(0),
            procedure_transaction_identity: Some(1),
            message_type: Some(0xD9),
            name: Some("ESM information request"),
            ..Default::default()
        };
        let message = DecodedMessage {
            protocol_discriminator: Some(7),
            message_type: Some(0x42),
            name: Some("Attach accept"),
            elements: vec![
                DecodedElement {
                    tag: None,
                    label: "T3412 value",
                    range: 3..4,
                    value: DecodedValue::Timer(TimerValue::Seconds(3240)),
                },
                DecodedElement {
                    tag: None,
                    label: "ESM message container",
                    range: 4..9,
                    value: DecodedValue::Message(Box::new(nested)),
                },
            ],
            diagnostics: vec![Diagnostic {
                kind: DiagnosticKind::ExtraneousData,
                range: 9..10,
            }],
            ..Default::default()
        };

        let text = message.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Attach accept (EMM, 0x42)");
        assert_eq!(lines[1], "    T3412 value [3..4]: 3240 s");
        assert_eq!(lines[2], "    ESM message container [4..9]");
        assert_eq!(lines[3], "        ESM information request (ESM, 0xd9)");
        assert_eq!(lines[4], "            EPS bearer identity: 0");
        assert_eq!(lines[5], "            Procedure transaction identity: 1");
        assert_eq!(lines[6], "    ! Extraneous data [9..10]");
    }
}
