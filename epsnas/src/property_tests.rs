//! Property-based tests for the NAS-EPS decoder
//!
//! Arbitrary and truncated buffers must never panic and every byte range the
//! decoder reports must lie inside the input. Attach requests built from
//! generated values must decode back to those values.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::decoder::decode;
    use crate::value::{DecodedMessage, DecodedValue, DiagnosticKind};
    use epsnas_common::{DecoderConfig, Direction, Plmn};

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(vec![Direction::Uplink, Direction::Downlink, Direction::Unknown])
    }

    fn arb_plmn() -> impl Strategy<Value = Plmn> {
        (0u16..1000, 0u16..1000, any::<bool>())
            .prop_map(|(mcc, mnc, long_mnc)| Plmn::new(mcc, if long_mnc { mnc } else { mnc % 100 }, long_mnc))
    }

    fn assert_ranges_within(message: &DecodedMessage, len: usize) {
        for element in &message.elements {
            assert!(element.range.start <= element.range.end, "{element:?}");
            assert!(element.range.end <= len, "{element:?} past {len}");
            if let DecodedValue::Message(nested) = &element.value {
                assert_ranges_within(nested, len);
            }
        }
        for diagnostic in message.all_diagnostics() {
            assert!(diagnostic.range.start <= diagnostic.range.end, "{diagnostic:?}");
            assert!(diagnostic.range.end <= len, "{diagnostic:?} past {len}");
        }
    }

    /// Attach request with a GUTI, a two octet UE network capability and a
    /// PDN connectivity request in the ESM container.
    fn attach_request(ksi: u8, attach_type: u8, plmn: Plmn, group_id: u16, code: u8, m_tmsi: u32) -> Vec<u8> {
        let mut data = vec![0x07, 0x41, (ksi << 4) | attach_type, 0x0B, 0xF6];
        data.extend_from_slice(&plmn.encode());
        data.extend_from_slice(&group_id.to_be_bytes());
        data.push(code);
        data.extend_from_slice(&m_tmsi.to_be_bytes());
        data.extend_from_slice(&[0x02, 0xE0, 0xE0]);
        data.extend_from_slice(&[0x00, 0x04, 0x02, 0x01, 0xD0, 0x11]);
        data
    }

    proptest! {
        #[test]
        fn prop_arbitrary_bytes_never_panic(
            data in prop::collection::vec(any::<u8>(), 0..128),
            direction in arb_direction(),
        ) {
            let message = decode(&data, direction, &DecoderConfig::default());
            assert_ranges_within(&message, data.len());
        }

        #[test]
        fn prop_known_emm_type_with_random_body(
            message_type in prop::sample::select(vec![
                0x41u8, 0x42, 0x44, 0x45, 0x48, 0x49, 0x4C, 0x4D, 0x4E, 0x50, 0x52, 0x55,
                0x5D, 0x5E, 0x61, 0x62, 0x63, 0x64, 0x68, 0x69,
            ]),
            body in prop::collection::vec(any::<u8>(), 0..96),
            direction in arb_direction(),
        ) {
            let mut data = vec![0x07, message_type];
            data.extend_from_slice(&body);
            let config = DecoderConfig { dissect_plain: true, ..Default::default() };
            let message = decode(&data, direction, &config);
            prop_assert_eq!(message.message_type, Some(message_type));
            prop_assert!(message.name.is_some());
            assert_ranges_within(&message, data.len());
        }

        #[test]
        fn prop_known_esm_type_with_random_body(
            message_type in prop::sample::select(vec![
                0xC1u8, 0xC5, 0xC9, 0xCD, 0xD0, 0xD1, 0xD4, 0xD6, 0xDA, 0xDB, 0xE9, 0xEB,
            ]),
            ebi in 0u8..16,
            pti in any::<u8>(),
            body in prop::collection::vec(any::<u8>(), 0..96),
        ) {
            let mut data = vec![(ebi << 4) | 0x02, pti, message_type];
            data.extend_from_slice(&body);
            let message = decode(&data, Direction::Unknown, &DecoderConfig::default());
            prop_assert_eq!(message.eps_bearer_identity, Some(ebi));
            prop_assert_eq!(message.procedure_transaction_identity, Some(pti));
            assert_ranges_within(&message, data.len());
        }

        #[test]
        fn prop_attach_request_values_recovered(
            ksi in 0u8..8,
            attach_type in prop::sample::select(vec![1u8, 2, 6]),
            plmn in arb_plmn(),
            group_id in any::<u16>(),
            code in any::<u8>(),
            m_tmsi in any::<u32>(),
        ) {
            let data = attach_request(ksi, attach_type, plmn, group_id, code, m_tmsi);
            let message = decode(&data, Direction::Uplink, &DecoderConfig::default());

            prop_assert_eq!(message.name, Some("Attach request"));
            prop_assert!(message.all_diagnostics().is_empty(), "{:?}", message.all_diagnostics());
            prop_assert_eq!(
                message.value("EPS attach type").and_then(|v| v.as_uint()),
                Some(u64::from(attach_type))
            );
            let ksi_value = message
                .value("NAS key set identifier")
                .and_then(|v| v.field("NAS key set identifier"))
                .and_then(|v| v.as_uint());
            prop_assert_eq!(ksi_value, Some(u64::from(ksi & 0x07)));

            let identity = message.value("EPS mobile identity").unwrap();
            prop_assert_eq!(identity.field("PLMN"), Some(&DecodedValue::Plmn(plmn)));
            prop_assert_eq!(identity.field("MME Group ID"), Some(&DecodedValue::Uint(u64::from(group_id))));
            prop_assert_eq!(identity.field("MME Code"), Some(&DecodedValue::Uint(u64::from(code))));
            prop_assert_eq!(identity.field("M-TMSI"), Some(&DecodedValue::Uint(u64::from(m_tmsi))));
        }

        #[test]
        fn prop_truncated_attach_request_stops_cleanly(
            plmn in arb_plmn(),
            m_tmsi in any::<u32>(),
            cut in 2usize..23,
        ) {
            let data = attach_request(7, 1, plmn, 0x8001, 0x01, m_tmsi);
            let truncated = &data[..cut];
            let message = decode(truncated, Direction::Uplink, &DecoderConfig::default());
            prop_assert_eq!(message.name, Some("Attach request"));
            assert_ranges_within(&message, truncated.len());
            let stopped = message.has_diagnostic(|k| {
                matches!(k, DiagnosticKind::BoundsError(_) | DiagnosticKind::MissingMandatory(_))
            });
            prop_assert!(stopped, "{:?}", message.diagnostics);
        }
    }
}
