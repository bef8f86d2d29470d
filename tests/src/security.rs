//! Security header integration tests
//!
//! Messages are protected with `epsnas-crypto` and deciphered by the decoder.

use epsnas::{decode, DecodedValue, DecoderConfig, DiagnosticKind, Direction, SecurityHeaderKind};
use integration_tests::{init_test_logging, protect, ProtectedMessage, TEST_KEY};

/// EMM status, cause #111 (protocol error, unspecified)
const EMM_STATUS: [u8; 3] = [0x07, 0x60, 0x6F];

fn keyed_config() -> DecoderConfig {
    DecoderConfig {
        decipher_key: Some(hex::encode(TEST_KEY)),
        ..Default::default()
    }
}

fn ciphered(header_type: u8, sequence_number: u8, direction: Direction) -> ProtectedMessage {
    ProtectedMessage {
        header_type,
        mac: 0xDEAD_BEEF,
        sequence_number,
        direction,
        key: Some(TEST_KEY),
    }
}

#[test]
fn test_eea2_uplink_round_trip() {
    init_test_logging();
    let data = protect(&ciphered(2, 17, Direction::Uplink), &EMM_STATUS);
    let message = decode(&data, Direction::Uplink, &keyed_config());

    let envelope = message.envelope.unwrap();
    assert_eq!(envelope.kind, SecurityHeaderKind::IntegrityProtectedCiphered);
    assert_eq!(envelope.mac, Some(0xDEAD_BEEF));
    assert_eq!(envelope.sequence_number, Some(17));

    assert_eq!(message.name, Some("EMM status"));
    assert_eq!(message.element("EMM cause").unwrap().range, 8..9);
    assert!(message.all_diagnostics().is_empty());
}

#[test]
fn test_eea2_new_context_downlink() {
    // Security mode complete without optional elements
    let plain = [0x07, 0x5E];
    let data = protect(&ciphered(4, 0, Direction::Downlink), &plain);
    let message = decode(&data, Direction::Downlink, &keyed_config());

    assert_eq!(
        message.envelope.map(|e| e.kind),
        Some(SecurityHeaderKind::IntegrityProtectedCipheredNewContext)
    );
    assert_eq!(message.name, Some("Security mode complete"));
}

#[test]
fn test_ciphered_esm_inside_emm() {
    // Attach complete with an activate default EPS bearer context accept
    let plain = [0x07, 0x43, 0x00, 0x03, 0x52, 0x00, 0xC2];
    let data = protect(&ciphered(2, 3, Direction::Uplink), &plain);
    let message = decode(&data, Direction::Uplink, &keyed_config());

    let container = message.element("ESM message container").unwrap();
    assert_eq!(container.range, 8..13);
    let esm = container.value.as_message().unwrap();
    assert_eq!(esm.name, Some("Activate default EPS bearer context accept"));
}

#[test]
fn test_key_with_separators_from_yaml() {
    let key = TEST_KEY
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":");
    let config = DecoderConfig::from_yaml(&format!("decipher_key: \"{key}\"\n")).unwrap();

    let data = protect(&ciphered(2, 200, Direction::Downlink), &EMM_STATUS);
    let message = decode(&data, Direction::Downlink, &config);
    assert_eq!(message.name, Some("EMM status"));
}

#[test]
fn test_missing_key_leaves_payload_ciphered() {
    let data = protect(&ciphered(2, 1, Direction::Uplink), &EMM_STATUS);
    let message = decode(&data, Direction::Uplink, &DecoderConfig::default());

    assert_eq!(message.name, None);
    assert_eq!(message.diagnostics.len(), 1);
    assert_eq!(message.diagnostics[0].kind, DiagnosticKind::DecipherFailed);
    assert_eq!(message.diagnostics[0].range, 6..9);
    assert!(matches!(
        message.value("Ciphered message"),
        Some(DecodedValue::Ciphered(bytes)) if bytes.len() == 3
    ));
}

#[test]
fn test_null_decipher_reads_clear_payload() {
    let params = ProtectedMessage {
        key: None,
        ..ciphered(2, 1, Direction::Uplink)
    };
    let data = protect(&params, &EMM_STATUS);
    let config = DecoderConfig {
        null_decipher: true,
        ..Default::default()
    };
    let message = decode(&data, Direction::Uplink, &config);
    assert_eq!(message.name, Some("EMM status"));
}

#[test]
fn test_integrity_only_is_never_deciphered() {
    let data = protect(&ciphered(1, 9, Direction::Uplink), &EMM_STATUS);
    let message = decode(&data, Direction::Uplink, &keyed_config());

    assert_eq!(message.envelope.map(|e| e.kind), Some(SecurityHeaderKind::IntegrityProtected));
    assert_eq!(message.name, Some("EMM status"));
}

#[test]
fn test_dissect_plain_ignores_security_header() {
    let data = protect(&ciphered(1, 9, Direction::Uplink), &EMM_STATUS);
    let config = DecoderConfig {
        dissect_plain: true,
        ..Default::default()
    };
    let message = decode(&data, Direction::Uplink, &config);

    // The header octet 0x17 is read as a plain EMM header with message type 0xDE
    assert!(message.has_diagnostic(|k| matches!(k, DiagnosticKind::UnknownMessageType(0xDE))));
}

#[test]
fn test_service_request() {
    let message = decode(&[0xC7, 0x45, 0x12, 0x34], Direction::Uplink, &keyed_config());
    assert_eq!(message.name, Some("Service request"));
    assert_eq!(message.envelope.and_then(|e| e.mac), Some(0x1234));
    assert_eq!(message.envelope.and_then(|e| e.ksi), Some(2));
    assert_eq!(message.envelope.and_then(|e| e.sequence_number), Some(5));
}
