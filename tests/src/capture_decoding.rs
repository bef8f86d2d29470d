//! Capture decoding integration tests
//!
//! Decodes the shared captures end to end and checks the rendered output.

use epsnas::{decode, DecodedMessage, DecodedValue, DecoderConfig, Direction};
use integration_tests::{hex_bytes, init_test_logging, CAPTURES};

fn assert_ranges_within(message: &DecodedMessage, len: usize) {
    for element in &message.elements {
        assert!(element.range.start <= element.range.end && element.range.end <= len, "{element:?}");
        if let DecodedValue::Message(nested) = &element.value {
            assert_ranges_within(nested, len);
        }
    }
    for diagnostic in message.all_diagnostics() {
        assert!(diagnostic.range.end <= len, "{diagnostic:?}");
    }
}

#[test]
fn test_captures_decode_cleanly() {
    init_test_logging();
    let config = DecoderConfig::default();

    for capture in CAPTURES {
        let data = hex_bytes(capture.hex);
        let message = decode(&data, capture.direction, &config);
        assert_eq!(message.name, Some(capture.name), "{}", capture.hex);
        assert!(
            message.all_diagnostics().is_empty(),
            "{}: {:?}",
            capture.name,
            message.all_diagnostics()
        );
        assert_ranges_within(&message, data.len());
    }
}

#[test]
fn test_every_prefix_stays_in_bounds() {
    let config = DecoderConfig::default();

    for capture in CAPTURES {
        let data = hex_bytes(capture.hex);
        for cut in 0..data.len() {
            let message = decode(&data[..cut], capture.direction, &config);
            assert_ranges_within(&message, cut);
        }
    }
}

#[test]
fn test_attach_complete_carries_default_bearer_accept() {
    let data = hex_bytes("0743000352 00c2");
    let message = decode(&data, Direction::Uplink, &DecoderConfig::default());

    let container = message.element("ESM message container").unwrap();
    assert_eq!(container.range, 2..7);
    let esm = container.value.as_message().unwrap();
    assert_eq!(esm.name, Some("Activate default EPS bearer context accept"));
    assert_eq!(esm.eps_bearer_identity, Some(5));
    assert_eq!(esm.procedure_transaction_identity, Some(0));
}

#[test]
fn test_attach_request_identity() {
    let data = hex_bytes("07417108298039000000001002e0e000040201d011");
    let message = decode(&data, Direction::Uplink, &DecoderConfig::default());

    let identity = message.value("EPS mobile identity").unwrap();
    assert_eq!(identity.field("IMSI").and_then(|v| v.as_str()), Some("208930000000001"));
}

#[test]
fn test_rendered_tree() {
    let data = hex_bytes("0743000352 00c2");
    let message = decode(&data, Direction::Uplink, &DecoderConfig::default());
    let text = message.to_string();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Attach complete (EMM, 0x43)"));
    assert!(text.contains("    ESM message container [2..7]"));
    assert!(text.contains("        Activate default EPS bearer context accept (ESM, 0xc2)"));
    assert!(text.contains("            EPS bearer identity: 5"));
    assert!(!text.contains("! "));
}

#[test]
fn test_rendered_diagnostics() {
    // Attach reject with the mandatory EMM cause missing
    let message = decode(&[0x07, 0x44], Direction::Downlink, &DecoderConfig::default());
    let text = message.to_string();
    assert!(text.starts_with("Attach reject (EMM, 0x44)"));
    assert!(text.contains("! Missing mandatory element: EMM cause"));
}
