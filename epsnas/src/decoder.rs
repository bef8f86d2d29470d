//! Top level NAS-EPS decoding
//!
//! [`decode`] resolves the configuration, parses the security envelope,
//! deciphers when asked to, and dispatches the plain message to the EMM or
//! ESM catalogues. It never fails: everything that goes wrong is recorded as
//! a [`Diagnostic`](crate::value::Diagnostic) on the returned message.

use bytes::Bytes;
use epsnas_common::{log_nas_message, DecoderConfig, Direction, OctetView};
use tracing::{debug, warn};

use crate::codec::DecodeContext;
use crate::enums::{EmmMessageType, EsmMessageType, ProtocolDiscriminator};
use crate::header::{parse_envelope, EnvelopeError, SecurityEnvelope, SecurityHeaderKind};
use crate::messages::{emm, esm, MessageBody};
use crate::security::{decipher, CipherContext};
use crate::value::{field, DecodedElement, DecodedMessage, DecodedValue, DiagnosticKind};

/// Hand-off tag for conformance test messages (TS 36.509).
pub const TEST_PROCEDURES: &str = "gsm_a.tc";

const SERVICE_REQUEST: &str = "Service request";

/// Decodes one NAS-EPS message.
///
/// `direction` selects the deciphering counter and the Detach request shape.
/// The configuration is read once; an invalid `decipher_key` is ignored with
/// a warning.
pub fn decode(data: &[u8], direction: Direction, config: &DecoderConfig) -> DecodedMessage {
    let key = match config.cipher_key() {
        Ok(key) => key,
        Err(err) => {
            warn!(%err, "ignoring configured decipher key");
            None
        }
    };

    let mut ctx = DecodeContext::new(config, key, direction);
    let view = OctetView::new(data);
    let message = decode_message(&mut ctx, &view);
    log_nas_message(direction, message.name.unwrap_or("Unknown"), data);
    message
}

/// Decodes a message starting with its security header.
fn decode_message(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> DecodedMessage {
    let start = view.position();
    let mut message = DecodedMessage::default();

    match parse_envelope(view, ctx.config().dissect_plain) {
        Ok(envelope) => {
            message.envelope = Some(envelope);
            message.protocol_discriminator = Some(envelope.protocol_discriminator);
            decode_protected(ctx, view, envelope, &mut message);
        }
        Err(EnvelopeError::WrongProtocolDiscriminator { pd, header }) => {
            debug!(pd, header, "protected header on a non-EMM message");
            message.protocol_discriminator = Some(pd);
            ctx.report(DiagnosticKind::WrongProtocolDiscriminator(pd), start..start + 1);
        }
        Err(EnvelopeError::Truncated(_)) => {
            let kind = if view.has_next() {
                DiagnosticKind::BoundsError("Security header")
            } else {
                DiagnosticKind::MissingMandatory("Protocol discriminator")
            };
            ctx.report(kind, start..view.end());
            view.read_remaining();
        }
    }

    message.diagnostics.append(&mut ctx.take_diagnostics());
    message
}

fn decode_protected(
    ctx: &mut DecodeContext<'_>,
    view: &OctetView<'_>,
    envelope: SecurityEnvelope,
    message: &mut DecodedMessage,
) {
    match envelope.kind {
        SecurityHeaderKind::ServiceRequest => decode_service_request(ctx, view, envelope, message),
        kind if kind.is_ciphered() => {
            let plain = {
                let cipher = CipherContext {
                    key: ctx.key(),
                    null_decipher: ctx.config().null_decipher,
                    direction: ctx.direction(),
                    sequence_number: envelope.sequence_number.unwrap_or_default(),
                };
                decipher(&cipher, view.remaining_data())
            };
            let range = view.remaining_range();
            match plain {
                Some(plain) => {
                    view.read_remaining();
                    let inner = OctetView::with_base(&plain, range.start);
                    decode_plain(ctx, &inner, message);
                }
                None => {
                    ctx.report(DiagnosticKind::DecipherFailed, range.clone());
                    message.elements.push(DecodedElement {
                        tag: None,
                        label: "Ciphered message",
                        range,
                        value: DecodedValue::Ciphered(Bytes::copy_from_slice(view.read_remaining())),
                    });
                }
            }
        }
        SecurityHeaderKind::IntegrityProtectedPartiallyCiphered => {
            ctx.set_partially_ciphered(true);
            decode_plain(ctx, view, message);
        }
        _ => decode_plain(ctx, view, message),
    }
}

/// The service request short form: KSI and sequence number, short MAC.
fn decode_service_request(
    ctx: &mut DecodeContext<'_>,
    view: &OctetView<'_>,
    envelope: SecurityEnvelope,
    message: &mut DecodedMessage,
) {
    // parse_envelope has consumed the four octets
    let start = view.position().saturating_sub(4);
    message.name = Some(SERVICE_REQUEST);
    debug!(name = SERVICE_REQUEST, "dispatching");

    message.elements.push(DecodedElement {
        tag: None,
        label: "KSI and sequence number",
        range: start + 1..start + 2,
        value: DecodedValue::Fields(vec![
            field(
                "KSI",
                DecodedValue::Uint(u64::from(envelope.ksi.unwrap_or_default())),
            ),
            field(
                "Sequence number (short)",
                DecodedValue::Uint(u64::from(envelope.sequence_number.unwrap_or_default())),
            ),
        ]),
    });
    message.elements.push(DecodedElement {
        tag: None,
        label: "Message authentication code (short)",
        range: start + 2..start + 4,
        value: DecodedValue::Uint(u64::from(envelope.mac.unwrap_or_default())),
    });

    if view.has_next() {
        ctx.report(DiagnosticKind::ExtraneousData, view.remaining_range());
        view.read_remaining();
    }
}

/// Decodes a plain message (header without MAC) and its body.
///
/// Diagnostics stay in `ctx`; the caller collects them.
fn decode_plain(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>, message: &mut DecodedMessage) {
    let start = view.position();
    let Some(first) = view.peek() else {
        ctx.report(DiagnosticKind::MissingMandatory("Protocol discriminator"), start..start);
        return;
    };
    let pd = first & 0x0F;
    message.protocol_discriminator = Some(pd);

    match ProtocolDiscriminator::try_from(pd) {
        Ok(ProtocolDiscriminator::EpsSessionManagement) => decode_esm(ctx, view, first, message),
        Ok(ProtocolDiscriminator::EpsMobilityManagement) => decode_emm(ctx, view, message),
        Ok(ProtocolDiscriminator::TestProcedures) => {
            message.name = Some(ProtocolDiscriminator::TestProcedures.name());
            let range = view.remaining_range();
            message.elements.push(DecodedElement {
                tag: None,
                label: "Test procedures message",
                range,
                value: DecodedValue::handoff(TEST_PROCEDURES, view.read_remaining()),
            });
        }
        Err(_) => {
            ctx.report(DiagnosticKind::WrongProtocolDiscriminator(pd), start..start + 1);
            view.read_remaining();
        }
    }
}

fn decode_esm(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>, first: u8, message: &mut DecodedMessage) {
    message.eps_bearer_identity = Some(first >> 4);
    let _ = view.skip(1);

    let pos = view.position();
    let Ok(pti) = view.read() else {
        ctx.report(DiagnosticKind::MissingMandatory("Procedure transaction identity"), pos..pos);
        return;
    };
    message.procedure_transaction_identity = Some(pti);

    let pos = view.position();
    let Ok(raw_type) = view.read() else {
        ctx.report(DiagnosticKind::MissingMandatory("Message type"), pos..pos);
        return;
    };
    message.message_type = Some(raw_type);

    match EsmMessageType::try_from(raw_type) {
        Ok(message_type) => {
            message.name = Some(message_type.name());
            debug!(protocol = "ESM", message_type = raw_type, name = message_type.name(), "dispatching");
            dispatch(ctx, view, esm::body(message_type), message);
        }
        Err(_) => unknown_message_type(ctx, view, raw_type, pos),
    }
}

fn decode_emm(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>, message: &mut DecodedMessage) {
    let _ = view.skip(1);

    let pos = view.position();
    let Ok(raw_type) = view.read() else {
        ctx.report(DiagnosticKind::MissingMandatory("Message type"), pos..pos);
        return;
    };
    message.message_type = Some(raw_type);

    match EmmMessageType::try_from(raw_type) {
        Ok(message_type) => {
            message.name = Some(message_type.name());
            debug!(protocol = "EMM", message_type = raw_type, name = message_type.name(), "dispatching");
            dispatch(ctx, view, emm::body(message_type), message);
        }
        Err(_) => unknown_message_type(ctx, view, raw_type, pos),
    }
}

fn dispatch(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>, body: MessageBody, message: &mut DecodedMessage) {
    body.decode(ctx, view, &mut message.elements);
}

fn unknown_message_type(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>, raw_type: u8, pos: usize) {
    debug!(message_type = raw_type, "unknown message type");
    ctx.report(DiagnosticKind::UnknownMessageType(raw_type), pos..pos + 1);
    view.read_remaining();
}

/// Decodes a message carried in a container IE of the message `ctx`
/// belongs to.
///
/// With `full` the nested message starts with its own security header
/// (replayed NAS message container); otherwise it is a plain ESM message.
pub(crate) fn decode_nested(
    ctx: &DecodeContext<'_>,
    view: &OctetView<'_>,
    full: bool,
) -> Result<DecodedMessage, DiagnosticKind> {
    let mut child = ctx
        .nested()
        .ok_or(DiagnosticKind::RecursionLimit(ctx.config().max_nesting_depth))?;

    if full {
        return Ok(decode_message(&mut child, view));
    }
    let mut message = DecodedMessage::default();
    decode_plain(&mut child, view, &mut message);
    message.diagnostics.append(&mut child.take_diagnostics());
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Diagnostic;
    use epsnas_crypto::eea2_encrypt;

    fn plain(data: &[u8]) -> DecodedMessage {
        decode(data, Direction::Unknown, &DecoderConfig::default())
    }

    #[test]
    fn test_plain_emm_attach_request() {
        // Attach request: EPS attach type 1, KSI 7, IMSI 208930000000001
        let data = hex::decode("07417108298039000000001002e0e000040201d011").unwrap();
        let message = plain(&data);
        assert_eq!(message.name, Some("Attach request"));
        assert_eq!(message.protocol_discriminator, Some(7));
        assert_eq!(message.elements[0].label, "EPS attach type");
        assert_eq!(message.elements[0].range, 2..3);
        assert_eq!(message.elements[1].label, "NAS key set identifier");
        assert_eq!(message.elements[1].range, 2..3);
        assert_eq!(
            message.value("EPS mobile identity").and_then(|v| v.field("IMSI")),
            Some(&DecodedValue::Digits("208930000000001".to_string()))
        );
        let esm = message.value("ESM message container").unwrap().as_message().unwrap();
        assert_eq!(esm.name, Some("PDN connectivity request"));
        assert!(message.all_diagnostics().is_empty());
    }

    #[test]
    fn test_unknown_message_type_stops() {
        let message = plain(&[0x07, 0x99, 0x01, 0x02]);
        assert_eq!(message.name, None);
        assert_eq!(message.message_type, Some(0x99));
        assert!(message.elements.is_empty());
        assert_eq!(
            message.diagnostics,
            vec![Diagnostic {
                kind: DiagnosticKind::UnknownMessageType(0x99),
                range: 1..2
            }]
        );
    }

    #[test]
    fn test_unknown_protocol_discriminator() {
        let message = plain(&[0x03, 0x41]);
        assert_eq!(message.diagnostics[0].kind, DiagnosticKind::WrongProtocolDiscriminator(3));
        assert_eq!(message.diagnostics[0].range, 0..1);
    }

    #[test]
    fn test_protected_header_on_non_emm_is_fatal() {
        let message = plain(&[0x23, 0x11, 0x22, 0x33, 0x44, 0x05, 0x07, 0x5D]);
        assert_eq!(message.envelope, None);
        assert!(message.elements.is_empty());
        assert_eq!(message.diagnostics[0].kind, DiagnosticKind::WrongProtocolDiscriminator(3));
    }

    #[test]
    fn test_empty_buffer() {
        let message = plain(&[]);
        assert_eq!(
            message.diagnostics[0].kind,
            DiagnosticKind::MissingMandatory("Protocol discriminator")
        );
    }

    #[test]
    fn test_short_protected_message_takes_plain_path() {
        // Header type 1, fewer than 8 octets: read as a plain EMM status
        let message = plain(&[0x17, 0x60, 0x6F]);
        assert_eq!(message.envelope.map(|e| e.kind), Some(SecurityHeaderKind::Plain));
        assert_eq!(message.name, Some("EMM status"));
        assert_eq!(
            message.value("EMM cause").and_then(|v| v.meaning()),
            Some("Protocol error, unspecified")
        );
    }

    #[test]
    fn test_integrity_protected_message() {
        // Security mode complete inside an integrity protected header
        let data = [0x37, 0xAA, 0xBB, 0xCC, 0xDD, 0x00, 0x07, 0x5E];
        let message = plain(&data);
        let envelope = message.envelope.unwrap();
        assert_eq!(envelope.kind, SecurityHeaderKind::IntegrityProtectedNewContext);
        assert_eq!(envelope.mac, Some(0xAABBCCDD));
        assert_eq!(message.name, Some("Security mode complete"));
        assert!(message.diagnostics.is_empty());
    }

    #[test]
    fn test_ciphered_without_key() {
        let data = [0x27, 0x01, 0x02, 0x03, 0x04, 0x09, 0x5A, 0x3C, 0x11];
        let message = plain(&data);
        assert_eq!(message.diagnostics[0].kind, DiagnosticKind::DecipherFailed);
        assert_eq!(message.diagnostics[0].range, 6..9);
        assert_eq!(
            message.value("Ciphered message"),
            Some(&DecodedValue::Ciphered(Bytes::from_static(&[0x5A, 0x3C, 0x11])))
        );
    }

    #[test]
    fn test_null_decipher() {
        let config = DecoderConfig {
            null_decipher: true,
            ..Default::default()
        };
        // Ciphered kind carrying a plain EMM status
        let data = [0x27, 0x01, 0x02, 0x03, 0x04, 0x09, 0x07, 0x60, 0x6F];
        let message = decode(&data, Direction::Uplink, &config);
        assert_eq!(message.name, Some("EMM status"));
        assert_eq!(message.element("EMM cause").unwrap().range, 8..9);
        assert!(message.diagnostics.is_empty());
    }

    #[test]
    fn test_eea2_decipher_downlink() {
        let key = [0x2B; 16];
        let config = DecoderConfig {
            decipher_key: Some(hex::encode(key)),
            ..Default::default()
        };
        // Downlink EMM information with a local time zone
        let mut payload = vec![0x07, 0x61, 0x46, 0x40];
        eea2_encrypt(0x2A, 0, Direction::Downlink.bit(), &key, &mut payload);

        let mut data = vec![0x27, 0x01, 0x02, 0x03, 0x04, 0x2A];
        data.extend_from_slice(&payload);
        let message = decode(&data, Direction::Downlink, &config);
        assert_eq!(message.name, Some("EMM information"));
        assert_eq!(message.element("Local time zone").unwrap().range, 8..10);
        assert!(message.diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_key_is_ignored() {
        let config = DecoderConfig {
            decipher_key: Some("not hex".to_string()),
            ..Default::default()
        };
        let message = decode(&[0x07, 0x4A], Direction::Uplink, &config);
        assert_eq!(message.name, Some("Tracking area update complete"));
    }

    #[test]
    fn test_service_request() {
        let message = plain(&[0xC7, 0x45, 0x12, 0x34]);
        assert_eq!(message.name, Some("Service request"));
        let envelope = message.envelope.unwrap();
        assert_eq!(envelope.ksi, Some(2));
        assert_eq!(envelope.sequence_number, Some(5));
        assert_eq!(
            message.value("Message authentication code (short)"),
            Some(&DecodedValue::Uint(0x1234))
        );
        assert!(message.diagnostics.is_empty());

        let message = plain(&[0xC7, 0x45, 0x12, 0x34, 0xFF]);
        assert_eq!(message.diagnostics[0].kind, DiagnosticKind::ExtraneousData);
        assert_eq!(message.diagnostics[0].range, 4..5);
    }

    #[test]
    fn test_esm_header_fields() {
        // PDN disconnect request, EBI 6, PTI 3, linked EBI 5
        let message = plain(&[0x62, 0x03, 0xD2, 0x05]);
        assert_eq!(message.name, Some("PDN disconnect request"));
        assert_eq!(message.eps_bearer_identity, Some(6));
        assert_eq!(message.procedure_transaction_identity, Some(3));
        assert_eq!(message.envelope.map(|e| e.kind), Some(SecurityHeaderKind::Plain));
    }

    #[test]
    fn test_esm_truncated_header() {
        let message = plain(&[0x02, 0x01]);
        assert_eq!(message.diagnostics[0].kind, DiagnosticKind::MissingMandatory("Message type"));
        assert_eq!(message.diagnostics[0].range, 2..2);
    }

    #[test]
    fn test_test_procedures_handoff() {
        let message = plain(&[0x0F, 0x80, 0x01]);
        assert_eq!(message.name, Some("Test procedures"));
        assert_eq!(
            message.value("Test procedures message"),
            Some(&DecodedValue::handoff(TEST_PROCEDURES, &[0x0F, 0x80, 0x01]))
        );
    }

    #[test]
    fn test_nested_depth_limit_in_replayed_container() {
        let config = DecoderConfig {
            max_nesting_depth: 1,
            ..Default::default()
        };
        // Security mode complete replaying a security mode complete replaying another
        let data = [
            0x07, 0x5E, 0x79, 0x00, 0x07, 0x07, 0x5E, 0x79, 0x00, 0x02, 0x07, 0x5E,
        ];
        let message = decode(&data, Direction::Uplink, &config);
        let inner = message.value("Replayed NAS message container").unwrap().as_message().unwrap();
        assert_eq!(inner.name, Some("Security mode complete"));
        assert_eq!(
            inner.value("Replayed NAS message container"),
            Some(&DecodedValue::bytes(&[0x07, 0x5E]))
        );
        assert_eq!(inner.diagnostics[0].kind, DiagnosticKind::RecursionLimit(1));
        assert_eq!(inner.diagnostics[0].range, 10..12);
    }
}
