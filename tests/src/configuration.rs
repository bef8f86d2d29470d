//! Configuration integration tests
//!
//! YAML configurations loaded from disk drive the decoder hand-offs and
//! limits.

use std::fs;

use epsnas::{decode, DecodedValue, DecoderConfig, DiagnosticKind, Direction, UserDataContainerAs};
use integration_tests::{hex_bytes, yaml_config};

/// ESM data transport on bearer 5 carrying the start of an IPv4 header
const ESM_DATA_TRANSPORT: &str = "5200eb000445000014";

fn user_data(config: &DecoderConfig) -> DecodedValue {
    let data = hex_bytes(ESM_DATA_TRANSPORT);
    let message = decode(&data, Direction::Uplink, config);
    assert_eq!(message.name, Some("ESM data transport"));
    message.value("User data container").cloned().unwrap()
}

#[test]
fn test_config_file_drives_user_data_handoff() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decoder.yaml");
    fs::write(&path, "decode_user_data_container_as: ip\n").unwrap();

    let config = DecoderConfig::from_yaml_file(&path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(
        user_data(&config),
        DecodedValue::handoff("ip", &[0x45, 0x00, 0x00, 0x14])
    );
}

#[test]
fn test_user_data_container_modes() {
    assert_eq!(
        user_data(&DecoderConfig::default()),
        DecodedValue::bytes(&[0x45, 0x00, 0x00, 0x14])
    );

    let non_ip = yaml_config("decode_user_data_container_as: non_ip\nnon_ip_data_dissector: coap\n");
    assert!(non_ip.validate().is_ok());
    assert_eq!(
        user_data(&non_ip),
        DecodedValue::handoff("coap", &[0x45, 0x00, 0x00, 0x14])
    );

    let ethernet = yaml_config("decode_user_data_container_as: ethernet\n");
    assert!(matches!(
        user_data(&ethernet),
        DecodedValue::Handoff { protocol, .. } if protocol == "eth_withoutfcs"
    ));
}

#[test]
fn test_non_ip_without_dissector_is_invalid() {
    let config = yaml_config("decode_user_data_container_as: non_ip\n");
    assert!(config.validate().is_err());
}

#[test]
fn test_yaml_round_trip() {
    let config = DecoderConfig {
        null_decipher: true,
        decode_user_data_container_as: UserDataContainerAs::Ethernet,
        max_nesting_depth: 2,
        ..Default::default()
    };
    let yaml = config.to_yaml().unwrap();
    assert_eq!(yaml_config(&yaml), config);
}

#[test]
fn test_nesting_limit_from_config() {
    // Security mode complete replaying an attach complete whose ESM
    // container holds a default bearer accept: three levels.
    let data = [
        0x07, 0x5E, 0x79, 0x00, 0x07, 0x07, 0x43, 0x00, 0x03, 0x52, 0x00, 0xC2,
    ];

    let deep = decode(&data, Direction::Uplink, &DecoderConfig::default());
    assert!(deep.all_diagnostics().is_empty(), "{:?}", deep.all_diagnostics());

    let shallow = yaml_config("max_nesting_depth: 1\n");
    let message = decode(&data, Direction::Uplink, &shallow);
    let replayed = message.value("Replayed NAS message container").and_then(|v| v.as_message());
    let replayed = replayed.unwrap();
    assert_eq!(replayed.name, Some("Attach complete"));
    assert!(replayed.has_diagnostic(|k| *k == DiagnosticKind::RecursionLimit(1)));
}
