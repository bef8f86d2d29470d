//! QoS and aggregate bit rate IEs (TS 24.301 9.9.4.2, 9.9.4.3, 9.9.4.29,
//! 9.9.4.30)

use epsnas_common::OctetView;

use super::expect_len;
use crate::bitrate::{apn_ambr_rate, eps_qos_rate, get_ext_ambr_unit, get_ext_eps_qos_unit, BitRate};
use crate::codec::{DecodeContext, IeError, IeResult};
use crate::value::{field, DecodedValue};

fn qci(value: u8) -> DecodedValue {
    let meaning = match value {
        0 => "Reserved",
        1 => "QCI 1",
        2 => "QCI 2",
        3 => "QCI 3",
        4 => "QCI 4",
        5 => "QCI 5",
        6 => "QCI 6",
        7 => "QCI 7",
        8 => "QCI 8",
        9 => "QCI 9",
        65 => "QCI 65",
        66 => "QCI 66",
        69 => "QCI 69",
        70 => "QCI 70",
        128..=254 => "Operator-specific QCI",
        _ => "Reserved",
    };
    DecodedValue::enumerated(value, meaning)
}

/// EPS quality of service (9.9.4.3)
///
/// The four rates are each taken from the most extended non-zero octet
/// present.
pub fn eps_quality_of_service(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let len = view.remaining();
    if !matches!(len, 1 | 5 | 9 | 13) {
        return Err(IeError::InvalidValue(format!(
            "EPS QoS of {len} octets, expected 1, 5, 9 or 13"
        )));
    }

    let mut fields = vec![field("Quality of Service Class Identifier (QCI)", qci(view.read()?))];
    if !view.has_next() {
        return Ok(DecodedValue::Fields(fields));
    }

    let base = view.read_array::<4>()?;
    let ext = if view.has_next() { Some(view.read_array::<4>()?) } else { None };
    let ext2 = if view.has_next() { Some(view.read_array::<4>()?) } else { None };

    const NAMES: [&str; 4] = [
        "Maximum bit rate for uplink",
        "Maximum bit rate for downlink",
        "Guaranteed bit rate for uplink",
        "Guaranteed bit rate for downlink",
    ];
    for (i, name) in NAMES.iter().enumerate() {
        let rate = eps_qos_rate(base[i], ext.map(|e| e[i]), ext2.map(|e| e[i]));
        fields.push(field(name, DecodedValue::BitRate(rate)));
    }
    Ok(DecodedValue::Fields(fields))
}

/// APN aggregate maximum bit rate (9.9.4.2)
pub fn apn_aggregate_maximum_bit_rate(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let len = view.remaining();
    if !(2..=6).contains(&len) || len % 2 != 0 {
        return Err(IeError::InvalidValue(format!(
            "APN-AMBR of {len} octets, expected 2, 4 or 6"
        )));
    }

    let [dl, ul] = view.read_array::<2>()?;
    let ext = if view.has_next() { Some(view.read_array::<2>()?) } else { None };
    let ext2 = if view.has_next() { Some(view.read_array::<2>()?) } else { None };

    let downlink = apn_ambr_rate(dl, ext.map(|e| e[0]), ext2.map(|e| e[0]));
    let uplink = apn_ambr_rate(ul, ext.map(|e| e[1]), ext2.map(|e| e[1]));
    Ok(DecodedValue::Fields(vec![
        field("APN-AMBR for downlink", DecodedValue::BitRate(downlink)),
        field("APN-AMBR for uplink", DecodedValue::BitRate(uplink)),
    ]))
}

/// Extended APN aggregate maximum bit rate (9.9.4.29)
pub fn extended_apn_aggregate_maximum_bit_rate(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 6)?;
    let dl_unit = view.read()?;
    let dl = view.read_u16()?;
    let ul_unit = view.read()?;
    let ul = view.read_u16()?;
    Ok(DecodedValue::Fields(vec![
        field(
            "APN-AMBR for downlink",
            DecodedValue::BitRate(BitRate::scaled(u64::from(dl), get_ext_ambr_unit(dl_unit))),
        ),
        field(
            "APN-AMBR for uplink",
            DecodedValue::BitRate(BitRate::scaled(u64::from(ul), get_ext_ambr_unit(ul_unit))),
        ),
    ]))
}

/// Extended quality of service (9.9.4.30)
pub fn extended_quality_of_service(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 10)?;
    let mbr_unit = get_ext_eps_qos_unit(view.read()?);
    let mbr_ul = view.read_u16()?;
    let mbr_dl = view.read_u16()?;
    let gbr_unit = get_ext_eps_qos_unit(view.read()?);
    let gbr_ul = view.read_u16()?;
    let gbr_dl = view.read_u16()?;

    let rate = |value: u16, unit| DecodedValue::BitRate(BitRate::scaled(u64::from(value), unit));
    Ok(DecodedValue::Fields(vec![
        field("Maximum bit rate for uplink", rate(mbr_ul, mbr_unit)),
        field("Maximum bit rate for downlink", rate(mbr_dl, mbr_unit)),
        field("Guaranteed bit rate for uplink", rate(gbr_ul, gbr_unit)),
        field("Guaranteed bit rate for downlink", rate(gbr_dl, gbr_unit)),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitrate::RateUnit;
    use epsnas_common::{DecoderConfig, Direction};

    fn run(f: crate::codec::OctetsFn, data: &[u8]) -> IeResult {
        let config = DecoderConfig::default();
        let mut ctx = DecodeContext::new(&config, None, Direction::Unknown);
        f(&mut ctx, &OctetView::new(data))
    }

    fn rate(value: &DecodedValue, name: &str) -> BitRate {
        match value.field(name) {
            Some(DecodedValue::BitRate(rate)) => *rate,
            other => panic!("no rate {name}: {other:?}"),
        }
    }

    #[test]
    fn test_eps_qos_qci_only() {
        let value = run(eps_quality_of_service, &[0x09]).unwrap();
        assert_eq!(
            value.field("Quality of Service Class Identifier (QCI)").and_then(|v| v.meaning()),
            Some("QCI 9")
        );
        assert!(value.field("Maximum bit rate for uplink").is_none());
    }

    #[test]
    fn test_eps_qos_base_rates() {
        let value = run(eps_quality_of_service, &[0x01, 0x40, 0x80, 0x3F, 0xFF]).unwrap();
        assert_eq!(rate(&value, "Maximum bit rate for uplink"), BitRate::kbps(64));
        assert_eq!(rate(&value, "Maximum bit rate for downlink"), BitRate::kbps(576));
        assert_eq!(rate(&value, "Guaranteed bit rate for uplink"), BitRate::kbps(63));
        assert_eq!(rate(&value, "Guaranteed bit rate for downlink"), BitRate::ZERO);
    }

    #[test]
    fn test_eps_qos_extended_override() {
        // Extended octets override the base ones only when non-zero
        let value = run(
            eps_quality_of_service,
            &[0x01, 0xFE, 0xFE, 0x10, 0x10, 0x4B, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00],
        )
        .unwrap();
        assert_eq!(rate(&value, "Maximum bit rate for uplink"), BitRate::mbps(17));
        assert_eq!(rate(&value, "Maximum bit rate for downlink"), BitRate::mbps(260));
        assert_eq!(rate(&value, "Guaranteed bit rate for uplink"), BitRate::kbps(16));
    }

    #[test]
    fn test_eps_qos_bad_length() {
        assert!(matches!(
            run(eps_quality_of_service, &[0x01, 0x02, 0x03]),
            Err(IeError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_apn_ambr() {
        let value = run(apn_aggregate_maximum_bit_rate, &[0xFE, 0xFE, 0xFA, 0xFA, 0x02, 0x02]).unwrap();
        // 2 * 256 Mbps + 256 Mbps from the extended octet
        assert_eq!(rate(&value, "APN-AMBR for downlink"), BitRate::mbps(768));

        let value = run(apn_aggregate_maximum_bit_rate, &[0x40, 0x80]).unwrap();
        assert_eq!(rate(&value, "APN-AMBR for downlink"), BitRate::kbps(64));
        assert_eq!(rate(&value, "APN-AMBR for uplink"), BitRate::kbps(576));

        assert!(run(apn_aggregate_maximum_bit_rate, &[0x40, 0x80, 0x01]).is_err());
    }

    #[test]
    fn test_extended_apn_ambr() {
        let value = run(
            extended_apn_aggregate_maximum_bit_rate,
            &[0x03, 0x00, 0x0A, 0x08, 0x00, 0x02],
        )
        .unwrap();
        assert_eq!(
            rate(&value, "APN-AMBR for downlink"),
            BitRate {
                value: 40,
                unit: RateUnit::Mbps
            }
        );
        assert_eq!(
            rate(&value, "APN-AMBR for uplink"),
            BitRate {
                value: 8,
                unit: RateUnit::Gbps
            }
        );
    }

    #[test]
    fn test_extended_qos() {
        let value = run(
            extended_quality_of_service,
            &[0x01, 0x00, 0x05, 0x00, 0x0A, 0x00, 0x00, 0x01, 0x00, 0x01],
        )
        .unwrap();
        assert_eq!(rate(&value, "Maximum bit rate for uplink"), BitRate::kbps(1000));
        assert_eq!(rate(&value, "Maximum bit rate for downlink"), BitRate::kbps(2000));
        // Unit code 0: value not used
        assert!(rate(&value, "Guaranteed bit rate for uplink").is_zero());
    }
}
