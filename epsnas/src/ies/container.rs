//! Container IEs: nested NAS messages and hand-off payloads
//!
//! Nested messages are decoded through [`crate::decoder::decode_nested`]
//! with a child context one level deeper. Hand-off payloads are returned as
//! [`DecodedValue::Handoff`] with the tag of the protocol that owns them.

use bytes::Bytes;
use epsnas_common::{OctetView, UserDataContainerAs};

use super::{expect_len, lookup};
use crate::codec::{DecodeContext, IeResult};
use crate::decoder::decode_nested;
use crate::enums::ProtocolDiscriminator;
use crate::value::{DecodedValue, DiagnosticKind};

/// Hand-off tag for LTE positioning protocol payloads.
pub const LPP: &str = "lpp";
/// Hand-off tag for location services payloads.
pub const LCS: &str = "lcs";
/// Hand-off tag for SMS CP-layer payloads.
pub const SMS_CP: &str = "gsm_sms_cp";
/// Hand-off tag for IP payloads.
pub const IP: &str = "ip";
/// Hand-off tag for Ethernet frames without FCS.
pub const ETHERNET: &str = "eth_withoutfcs";
/// Hand-off tag for NBIFOM containers.
pub const NBIFOM: &str = "nbifom";

fn nested_message(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>, full: bool) -> IeResult {
    let range = view.remaining_range();
    match decode_nested(ctx, view, full) {
        Ok(message) => Ok(DecodedValue::Message(Box::new(message))),
        Err(kind) => {
            ctx.report(kind, range);
            Ok(DecodedValue::bytes(view.read_remaining()))
        }
    }
}

/// ESM message container (9.9.3.15)
///
/// Inside an integrity protected and partially ciphered message the
/// container may still be ciphered; it is only decoded when its first octet
/// carries a known protocol discriminator.
pub fn esm_message_container(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    if ctx.partially_ciphered() {
        let readable = view.peek().is_some_and(looks_like_plain_esm);
        if !readable {
            let range = view.remaining_range();
            ctx.report(DiagnosticKind::DecipherFailed, range);
            return Ok(DecodedValue::Ciphered(Bytes::copy_from_slice(view.read_remaining())));
        }
    }
    nested_message(ctx, view, false)
}

/// First octet of a clear ESM message: a known protocol discriminator and,
/// for ESM, an EPS bearer identity outside the reserved values 1 to 4.
fn looks_like_plain_esm(octet: u8) -> bool {
    let pd = octet & 0x0F;
    let ebi = octet >> 4;
    let esm = u8::from(ProtocolDiscriminator::EpsSessionManagement);
    ProtocolDiscriminator::is_known(pd) && !(pd == esm && (1..=4).contains(&ebi))
}

/// Replayed NAS message container (9.9.3.51): a complete NAS message,
/// security header included.
pub fn replayed_nas_message_container(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    nested_message(ctx, view, true)
}

/// NAS message container (9.9.3.22): an SMS CP-layer message.
pub fn nas_message_container(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    Ok(DecodedValue::handoff(SMS_CP, view.read_remaining()))
}

/// Generic message container type (9.9.3.42)
///
/// Records the type in the decode context so the generic message container
/// that follows can pick its hand-off protocol.
pub fn generic_message_container_type(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    let container_type = view.read()?;
    ctx.set_generic_container_type(container_type);
    Ok(lookup(
        container_type,
        &[
            (1, "LTE Positioning Protocol (LPP) message container"),
            (2, "Location services message container"),
        ],
        "Reserved",
    ))
}

/// Generic message container (9.9.3.43)
pub fn generic_message_container(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let data = view.read_remaining();
    Ok(match ctx.generic_container_type() {
        Some(1) => DecodedValue::handoff(LPP, data),
        Some(2) => DecodedValue::handoff(LCS, data),
        _ => DecodedValue::bytes(data),
    })
}

/// User data container (9.9.4.24)
///
/// The payload type is not signalled on the wire; the configuration says
/// how to hand it off.
pub fn user_data_container(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let data = view.read_remaining();
    let config = ctx.config();
    Ok(match config.decode_user_data_container_as {
        UserDataContainerAs::None => DecodedValue::bytes(data),
        UserDataContainerAs::Ip => DecodedValue::handoff(IP, data),
        UserDataContainerAs::NonIp if !config.non_ip_data_dissector.is_empty() => {
            DecodedValue::handoff(config.non_ip_data_dissector.as_str(), data)
        }
        UserDataContainerAs::NonIp => DecodedValue::bytes(data),
        UserDataContainerAs::Ethernet => DecodedValue::handoff(ETHERNET, data),
    })
}

/// NBIFOM container (9.9.4.19)
pub fn nbifom_container(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    Ok(DecodedValue::handoff(NBIFOM, view.read_remaining()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use epsnas_common::{DecoderConfig, Direction};

    #[test]
    fn test_generic_container_uses_scratch_slot() {
        let config = DecoderConfig::default();
        let mut ctx = DecodeContext::new(&config, None, Direction::Downlink);

        let value = generic_message_container(&mut ctx, &OctetView::new(&[0xAA])).unwrap();
        assert_eq!(value, DecodedValue::bytes(&[0xAA]));

        generic_message_container_type(&mut ctx, &OctetView::new(&[0x01])).unwrap();
        let value = generic_message_container(&mut ctx, &OctetView::new(&[0xAA])).unwrap();
        assert_eq!(value, DecodedValue::handoff(LPP, &[0xAA]));

        generic_message_container_type(&mut ctx, &OctetView::new(&[0x02])).unwrap();
        let value = generic_message_container(&mut ctx, &OctetView::new(&[0xBB])).unwrap();
        assert_eq!(value, DecodedValue::handoff(LCS, &[0xBB]));
    }

    #[test]
    fn test_user_data_container_modes() {
        let data = [0x45, 0x00];
        let mut config = DecoderConfig::default();
        let cases = [
            (UserDataContainerAs::None, "", DecodedValue::bytes(&data)),
            (UserDataContainerAs::Ip, "", DecodedValue::handoff(IP, &data)),
            (UserDataContainerAs::NonIp, "", DecodedValue::bytes(&data)),
            (UserDataContainerAs::NonIp, "coap", DecodedValue::handoff("coap", &data)),
            (UserDataContainerAs::Ethernet, "", DecodedValue::handoff(ETHERNET, &data)),
        ];
        for (mode, dissector, expected) in cases {
            config.decode_user_data_container_as = mode;
            config.non_ip_data_dissector = dissector.to_string();
            let mut ctx = DecodeContext::new(&config, None, Direction::Uplink);
            let value = user_data_container(&mut ctx, &OctetView::new(&data)).unwrap();
            assert_eq!(value, expected, "mode {mode}");
        }
    }

    #[test]
    fn test_esm_container_ciphered_under_partial_ciphering() {
        let config = DecoderConfig::default();
        let mut ctx = DecodeContext::new(&config, None, Direction::Uplink);
        ctx.set_partially_ciphered(true);

        let data = [0x00, 0x00, 0x9C, 0x11, 0x22];
        let outer = OctetView::new(&data);
        outer.skip(2).unwrap();
        let body = outer.sub_view(3).unwrap();

        let value = esm_message_container(&mut ctx, &body).unwrap();
        assert_eq!(value, DecodedValue::Ciphered(Bytes::from_static(&[0x9C, 0x11, 0x22])));
        let diags = ctx.take_diagnostics();
        assert_eq!(diags[0].kind, DiagnosticKind::DecipherFailed);
        assert_eq!(diags[0].range, 2..5);
    }

    #[test]
    fn test_esm_container_reserved_bearer_identity_is_ciphered() {
        let config = DecoderConfig::default();
        let mut ctx = DecodeContext::new(&config, None, Direction::Uplink);
        ctx.set_partially_ciphered(true);

        // ESM discriminator with EBI 3
        let data: &'static [u8] = &[0x32, 0x01, 0xD9];
        let value = esm_message_container(&mut ctx, &OctetView::new(data)).unwrap();
        assert_eq!(value, DecodedValue::Ciphered(Bytes::from_static(data)));
        assert_eq!(ctx.take_diagnostics()[0].kind, DiagnosticKind::DecipherFailed);

        assert!(looks_like_plain_esm(0x02));
        assert!(looks_like_plain_esm(0x52));
        assert!(!looks_like_plain_esm(0x12));
        assert!(!looks_like_plain_esm(0x42));
        assert!(!looks_like_plain_esm(0x9C));
    }

    #[test]
    fn test_esm_container_nesting_limit() {
        let config = DecoderConfig {
            max_nesting_depth: 0,
            ..Default::default()
        };
        let mut ctx = DecodeContext::new(&config, None, Direction::Uplink);
        let data = [0x52, 0x01, 0xD9];
        let value = esm_message_container(&mut ctx, &OctetView::new(&data)).unwrap();
        assert_eq!(value, DecodedValue::bytes(&data));
        let diags = ctx.take_diagnostics();
        assert_eq!(diags[0].kind, DiagnosticKind::RecursionLimit(0));
        assert_eq!(diags[0].range, 0..3);
    }

    #[test]
    fn test_esm_container_decodes_nested_message() {
        let config = DecoderConfig::default();
        let mut ctx = DecodeContext::new(&config, None, Direction::Uplink);
        // ESM information request, EBI 0, PTI 1
        let data = [0x02, 0x01, 0xD9];
        let value = esm_message_container(&mut ctx, &OctetView::new(&data)).unwrap();
        let message = value.as_message().unwrap();
        assert_eq!(message.name, Some("ESM information request"));
        assert_eq!(message.procedure_transaction_identity, Some(1));
        assert!(message.diagnostics.is_empty());
    }
}
