//! IEs shared with TS 24.008 and used by both EMM and ESM messages

use epsnas_common::{OctetView, Plmn};

use super::{bcd_char, bcd_digits, bit, expect_len, expect_min_len, flag, lookup, truncated_record};
use crate::codec::{DecodeContext, IeError, IeResult};
use crate::value::{field, DecodedValue, DiagnosticKind, Field, TimerValue};

// --- Half-octet IEs ---

/// NAS key set identifier (TS 24.301 9.9.3.21)
pub fn nas_key_set_identifier(nibble: u8) -> DecodedValue {
    let ksi = nibble & 0x07;
    DecodedValue::Fields(vec![
        field(
            "Type of security context flag",
            DecodedValue::enumerated(
                u8::from(bit(nibble, 4)),
                if bit(nibble, 4) {
                    "Mapped security context"
                } else {
                    "Native security context"
                },
            ),
        ),
        field(
            "NAS key set identifier",
            DecodedValue::enumerated(
                ksi,
                if ksi == 7 {
                    "No key is available"
                } else {
                    "Key set identifier"
                },
            ),
        ),
    ])
}

/// TMSI status (TS 24.008 10.5.5.4)
pub fn tmsi_status(nibble: u8) -> DecodedValue {
    DecodedValue::enumerated(
        nibble & 0x01,
        if bit(nibble, 1) {
            "Valid TMSI available"
        } else {
            "No valid TMSI available"
        },
    )
}

/// Radio priority (TS 24.008 10.5.7.2)
pub fn radio_priority(nibble: u8) -> DecodedValue {
    let level = nibble & 0x07;
    let meaning = match level {
        1 => "priority level 1 (highest)",
        2 => "priority level 2",
        3 => "priority level 3",
        _ => "priority level 4 (lowest)",
    };
    DecodedValue::enumerated(level, meaning)
}

/// GPRS ciphering key sequence number (TS 24.008 10.5.1.2)
pub fn ciphering_key_sequence_number(nibble: u8) -> DecodedValue {
    let cksn = nibble & 0x07;
    DecodedValue::enumerated(
        cksn,
        if cksn == 7 {
            "No key is available"
        } else {
            "Key sequence number"
        },
    )
}

// --- Timers ---

/// Seconds per unit for GPRS timer and GPRS timer 2; `None` = deactivated.
const GPRS_TIMER_UNITS: [Option<u64>; 8] = [
    Some(2),
    Some(60),
    Some(360),
    Some(60),
    Some(60),
    Some(60),
    Some(60),
    None,
];

/// Seconds per unit for GPRS timer 3.
const GPRS_TIMER3_UNITS: [Option<u64>; 8] = [
    Some(600),
    Some(3600),
    Some(36000),
    Some(2),
    Some(30),
    Some(60),
    Some(1_152_000),
    None,
];

fn timer_value(octet: u8, units: &[Option<u64>; 8]) -> DecodedValue {
    let value = u64::from(octet & 0x1F);
    match units[usize::from(octet >> 5)] {
        Some(unit) => DecodedValue::Timer(TimerValue::Seconds(value * unit)),
        None => DecodedValue::Timer(TimerValue::Deactivated),
    }
}

/// GPRS timer (TS 24.008 10.5.7.3) and GPRS timer 2 (10.5.7.4)
pub fn gprs_timer(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    Ok(timer_value(view.read()?, &GPRS_TIMER_UNITS))
}

/// GPRS timer 3 (TS 24.008 10.5.7.4a)
pub fn gprs_timer3(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    Ok(timer_value(view.read()?, &GPRS_TIMER3_UNITS))
}

// --- Identities ---

const IDENTITY_TYPES: [(u8, &str); 6] = [
    (0, "No identity"),
    (1, "IMSI"),
    (2, "IMEI"),
    (3, "IMEISV"),
    (4, "TMSI/P-TMSI/M-TMSI"),
    (5, "TMGI and optional MBMS Session Identity"),
];

/// Mobile identity (TS 24.008 10.5.1.4)
pub fn mobile_identity(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let start = view.position();
    let first = view.read()?;
    let identity_type = first & 0x07;
    let mut fields = vec![
        field("Type of identity", lookup(identity_type, &IDENTITY_TYPES, "Reserved")),
        flag("Odd/even indication", first, 4),
    ];

    match identity_type {
        1..=3 => {
            let mut digits = String::new();
            if first >> 4 != 0x0F {
                digits.push(bcd_char(first >> 4));
            }
            digits.push_str(&bcd_digits(view.read_remaining()));
            let name = match identity_type {
                1 => "IMSI",
                2 => "IMEI",
                _ => "IMEISV",
            };
            fields.push(field(name, DecodedValue::Digits(digits)));
        }
        4 => {
            expect_len(view, 4)?;
            fields.push(field("TMSI/P-TMSI/M-TMSI", DecodedValue::Uint(u64::from(view.read_u32()?))));
        }
        0 => {
            let _ = view.read_remaining();
        }
        5 => {
            fields.push(field("TMGI", DecodedValue::bytes(view.read_remaining())));
        }
        other => {
            ctx.report(DiagnosticKind::UnknownIdentity(other), start..view.end());
            fields.push(field("Identity", DecodedValue::bytes(view.read_remaining())));
        }
    }
    Ok(DecodedValue::Fields(fields))
}

/// P-TMSI signature (TS 24.008 10.5.5.8)
pub fn p_tmsi_signature(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 3)?;
    Ok(DecodedValue::Uint(u64::from(view.read_u24()?)))
}

// --- Areas and PLMNs ---

pub(crate) fn read_plmn(view: &OctetView<'_>) -> Result<Plmn, IeError> {
    Ok(Plmn::decode(view.read_array::<3>()?))
}

/// Location area identification (TS 24.008 10.5.1.3)
pub fn location_area_identification(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 5)?;
    let plmn = read_plmn(view)?;
    let lac = view.read_u16()?;
    Ok(DecodedValue::Fields(vec![
        field("PLMN", DecodedValue::Plmn(plmn)),
        field("LAC", DecodedValue::Uint(u64::from(lac))),
    ]))
}

/// PLMN list (TS 24.008 10.5.1.13)
pub fn plmn_list(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    if view.remaining() % 3 != 0 {
        return Err(IeError::LengthMismatch {
            expected: view.remaining() / 3 * 3,
            actual: view.remaining(),
        });
    }
    let mut plmns = Vec::with_capacity(view.remaining() / 3);
    while view.has_next() {
        plmns.push(DecodedValue::Plmn(read_plmn(view)?));
    }
    Ok(DecodedValue::List(plmns))
}

// --- Capabilities and parameters ---

/// DRX parameter (TS 24.008 10.5.5.6)
pub fn drx_parameter(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 2)?;
    let split_pg = view.read()?;
    let octet = view.read()?;
    let cycle = octet >> 4;
    let cycle_meaning = match cycle {
        6 => "CN Specific DRX cycle length coefficient 6 and T = 32",
        7 => "CN Specific DRX cycle length coefficient 7 and T = 64",
        8 => "CN Specific DRX cycle length coefficient 8 and T = 128",
        9 => "CN Specific DRX cycle length coefficient 9 and T = 256",
        _ => "DRX value not specified by the MS",
    };
    Ok(DecodedValue::Fields(vec![
        field("SPLIT PG CYCLE CODE", DecodedValue::Uint(u64::from(split_pg))),
        field(
            "CN Specific S1 mode DRX cycle length coefficient",
            DecodedValue::enumerated(cycle, cycle_meaning),
        ),
        flag("SPLIT on CCCH", octet, 4),
        field("Non-DRX timer", DecodedValue::Uint(u64::from(octet & 0x07))),
    ]))
}

/// MS network capability (TS 24.008 10.5.5.12); only the first octet is
/// broken down.
pub fn ms_network_capability(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let octet = view.read()?;
    let mut fields = vec![
        flag("GEA1", octet, 8),
        flag("SM capabilities via dedicated channels", octet, 7),
        flag("SM capabilities via GPRS channels", octet, 6),
        flag("UCS2 support", octet, 5),
        field("SS Screening Indicator", DecodedValue::Uint(u64::from((octet >> 2) & 0x03))),
        flag("SoLSA Capability", octet, 2),
        flag("Revision level indicator", octet, 1),
    ];
    if view.has_next() {
        fields.push(field("Further capabilities", DecodedValue::bytes(view.read_remaining())));
    }
    Ok(DecodedValue::Fields(fields))
}

/// Mobile station classmark 2 and 3 (TS 24.008 10.5.1.6, 10.5.1.7)
pub fn ms_classmark(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    Ok(DecodedValue::handoff("gsm_a.classmark", view.read_remaining()))
}

/// Supported codec list (TS 24.008 10.5.4.32)
pub fn supported_codecs(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    Ok(DecodedValue::handoff("gsm_a.codecs", view.read_remaining()))
}

/// Quality of service (TS 24.008 10.5.6.5)
pub fn negotiated_qos(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    Ok(DecodedValue::handoff("gsm_a.qos", view.read_remaining()))
}

/// LLC service access point identifier (TS 24.008 10.5.6.9)
pub fn llc_sapi(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    let sapi = view.read()? & 0x0F;
    Ok(lookup(
        sapi,
        &[
            (0, "LLC SAPI not assigned"),
            (3, "SAPI 3"),
            (5, "SAPI 5"),
            (9, "SAPI 9"),
            (11, "SAPI 11"),
        ],
        "Reserved",
    ))
}

/// Packet flow identifier (TS 24.008 10.5.6.11)
pub fn packet_flow_identifier(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    let pfi = view.read()? & 0x7F;
    let meaning = match pfi {
        0 => "Best Effort",
        1 => "Signalling",
        2 => "SMS",
        3 => "TOM8",
        4..=7 => "Reserved",
        _ => "Dynamically assigned",
    };
    Ok(DecodedValue::enumerated(pfi, meaning))
}

/// Linked TI / transaction identifier (TS 24.008 10.5.6.7)
pub fn transaction_identifier(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let octet = view.read()?;
    let mut fields = vec![
        field(
            "TI flag",
            DecodedValue::enumerated(
                u8::from(bit(octet, 8)),
                if bit(octet, 8) {
                    "The message is sent to the side that originates the TI"
                } else {
                    "The message is sent from the side that originates the TI"
                },
            ),
        ),
        field("TIO", DecodedValue::Uint(u64::from((octet >> 4) & 0x07))),
    ];
    if view.has_next() {
        let ext = view.read()?;
        fields.push(field("TIE", DecodedValue::Uint(u64::from(ext & 0x7F))));
    }
    Ok(DecodedValue::Fields(fields))
}

/// Voice domain preference and UE's usage setting (TS 24.008 10.5.5.28)
pub fn voice_domain_preference(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    let octet = view.read()?;
    Ok(DecodedValue::Fields(vec![
        field(
            "UE's usage setting",
            DecodedValue::enumerated(
                u8::from(bit(octet, 3)),
                if bit(octet, 3) { "Data centric" } else { "Voice centric" },
            ),
        ),
        field(
            "Voice domain preference for E-UTRAN",
            lookup(
                octet & 0x03,
                &[
                    (0, "CS Voice only"),
                    (1, "IMS PS Voice only"),
                    (2, "CS voice preferred, IMS PS Voice as secondary"),
                    (3, "IMS PS voice preferred, CS Voice as secondary"),
                ],
                "Reserved",
            ),
        ),
    ]))
}

// --- Protocol configuration options ---

fn pco_identifier_name(id: u16) -> &'static str {
    match id {
        0x0001 => "P-CSCF IPv6 Address Request",
        0x0002 => "IM CN Subsystem Signaling Flag",
        0x0003 => "DNS Server IPv6 Address Request",
        0x0005 => "MS Support of Network Requested Bearer Control indicator",
        0x000A => "IP address allocation via NAS signalling",
        0x000C => "P-CSCF IPv4 Address Request",
        0x000D => "DNS Server IPv4 Address Request",
        0x0010 => "IPv4 Link MTU Request",
        0x0016 => "APN rate control support indicator",
        0x8021 => "Internet Protocol Control Protocol",
        0xC021 => "Link Control Protocol",
        0xC023 => "Password Authentication Protocol",
        0xC223 => "Challenge Handshake Authentication Protocol",
        _ => "Unknown",
    }
}

/// Protocol configuration options (TS 24.008 10.5.6.3) and extended
/// protocol configuration options (TS 24.301 9.9.4.26)
pub fn protocol_configuration_options(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let octet = view.read()?;
    let mut containers = Vec::new();
    while view.has_next() {
        let id = view.read_u16()?;
        let len = view.read()?;
        let contents = view.read_slice(usize::from(len))?;
        containers.push(DecodedValue::Fields(vec![
            field(
                "Protocol or Container ID",
                DecodedValue::enumerated(id, pco_identifier_name(id)),
            ),
            field("Contents", DecodedValue::bytes(contents)),
        ]));
    }
    Ok(DecodedValue::Fields(vec![
        flag("Extension", octet, 8),
        field(
            "Configuration Protocol",
            DecodedValue::enumerated(octet & 0x07, if octet & 0x07 == 0 { "PPP" } else { "Reserved" }),
        ),
        field("Containers", DecodedValue::List(containers)),
    ]))
}

// --- Numbers and names ---

/// Emergency number list (TS 24.008 10.5.3.13)
///
/// A zero length or a record running past the list ends the list; the
/// records decoded so far are kept.
pub fn emergency_number_list(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let mut entries = Vec::new();
    while view.has_next() {
        let entry_start = view.position();
        let len = usize::from(view.read()?);
        if len == 0 {
            ctx.report(
                DiagnosticKind::MalformedElement {
                    element: "Emergency number information",
                    reason: "zero length".to_string(),
                },
                entry_start..view.end(),
            );
            let _ = view.read_remaining();
            break;
        }
        let Ok(entry) = view.read_slice(len) else {
            truncated_record(ctx, view, "Emergency number information", entry_start);
            break;
        };
        let category = entry[0] & 0x1F;
        let digits = bcd_digits(&entry[1..]);
        entries.push(DecodedValue::Fields(vec![
            field("Emergency Service Category", emergency_service_category(category)),
            field("Emergency Number", DecodedValue::Digits(digits)),
        ]));
    }
    Ok(DecodedValue::List(entries))
}

/// Extended emergency number list (TS 24.301 9.9.3.37A)
///
/// Each entry is a BCD emergency number followed by an IA5 sub-services
/// field, both length prefixed.
pub fn extended_emergency_number_list(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let octet = view.read()?;
    let mut entries = Vec::new();
    while view.has_next() {
        let entry_start = view.position();
        match extended_emergency_number(view) {
            Ok(entry) => entries.push(entry),
            Err(_) => {
                truncated_record(ctx, view, "Extended emergency number information", entry_start);
                break;
            }
        }
    }
    Ok(DecodedValue::Fields(vec![
        field(
            "Extended Emergency Number List Validity",
            lookup(
                octet & 0x01,
                &[
                    (0, "Valid in the country of the PLMN from which this IE is received"),
                    (1, "Valid only in the PLMN from which this IE is received"),
                ],
                "Reserved",
            ),
        ),
        field("Emergency numbers", DecodedValue::List(entries)),
    ]))
}

fn extended_emergency_number(view: &OctetView<'_>) -> IeResult {
    let number_len = usize::from(view.read()?);
    let digits = bcd_digits(view.read_slice(number_len)?);
    let sub_services_len = usize::from(view.read()?);
    let sub_services: String = view
        .read_slice(sub_services_len)?
        .iter()
        .map(|&b| char::from(b & 0x7F))
        .collect();
    Ok(DecodedValue::Fields(vec![
        field("Emergency Number", DecodedValue::Digits(digits)),
        field("Sub-services", DecodedValue::Text(sub_services)),
    ]))
}

fn emergency_service_category(bits: u8) -> DecodedValue {
    DecodedValue::Fields(vec![
        flag("Police", bits, 1),
        flag("Ambulance", bits, 2),
        flag("Fire Brigade", bits, 3),
        flag("Marine Guard", bits, 4),
        flag("Mountain Rescue", bits, 5),
    ])
}

/// GSM 7-bit default alphabet (TS 23.038 6.2.1)
const GSM7_BASIC: &str = "@£$¥èéùìòÇ\nØø\rÅåΔ_ΦΓΛΩΠΨΣΘΞ\u{1b}ÆæßÉ !\"#¤%&'()*+,-./0123456789:;<=>?\
¡ABCDEFGHIJKLMNOPQRSTUVWXYZÄÖÑÜ§¿abcdefghijklmnopqrstuvwxyzäöñüà";

/// Unpacks `count` septets of GSM 7-bit text.
pub(crate) fn unpack_gsm7(bytes: &[u8], count: usize) -> String {
    let alphabet: Vec<char> = GSM7_BASIC.chars().collect();
    (0..count)
        .filter_map(|i| {
            let bit_offset = i * 7;
            let idx = bit_offset / 8;
            let shift = bit_offset % 8;
            let low = u16::from(*bytes.get(idx)?);
            let high = u16::from(bytes.get(idx + 1).copied().unwrap_or(0));
            let septet = (((high << 8) | low) >> shift) & 0x7F;
            alphabet.get(usize::from(septet)).copied()
        })
        .collect()
}

/// Network name (TS 24.008 10.5.3.5a)
pub fn network_name(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let octet = view.read()?;
    let coding = (octet >> 4) & 0x07;
    let spare_bits = usize::from(octet & 0x07);
    let text = view.read_remaining();

    let name = match coding {
        0 => {
            let septets = (text.len() * 8).saturating_sub(spare_bits) / 7;
            unpack_gsm7(text, septets)
        }
        1 => {
            let units: Vec<u16> = text
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        other => {
            return Err(IeError::InvalidValue(format!("reserved coding scheme {other}")));
        }
    };

    Ok(DecodedValue::Fields(vec![
        field(
            "Coding Scheme",
            DecodedValue::enumerated(coding, if coding == 0 { "GSM 7 bit default alphabet" } else { "UCS2 (16 bit)" }),
        ),
        flag("Add CI", octet, 4),
        field("Text String", DecodedValue::Text(name)),
    ]))
}

/// Calling line identification: a calling party BCD number (TS 24.008 10.5.4.9)
pub fn calling_line_identity(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let octet = view.read()?;
    let mut fields = vec![
        field("Type of number", DecodedValue::Uint(u64::from((octet >> 4) & 0x07))),
        field("Numbering plan identification", DecodedValue::Uint(u64::from(octet & 0x0F))),
    ];
    if !bit(octet, 8) {
        let ext = view.read()?;
        fields.push(field("Presentation indicator", DecodedValue::Uint(u64::from((ext >> 5) & 0x03))));
        fields.push(field("Screening indicator", DecodedValue::Uint(u64::from(ext & 0x03))));
    }
    fields.push(field("Calling party BCD number", DecodedValue::Digits(bcd_digits(view.read_remaining()))));
    Ok(DecodedValue::Fields(fields))
}

/// LCS indicator (TS 24.301 9.9.3.40)
pub fn lcs_indicator(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    let value = view.read()?;
    Ok(lookup(value, &[(1, "Mobile-terminated location request (MT-LR)")], "Unspecified"))
}

/// LCS client identity (TS 29.002)
pub fn lcs_client_identity(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    Ok(DecodedValue::handoff("gsm_map.lcs_client", view.read_remaining()))
}

// --- Time ---

fn swapped_bcd(octet: u8) -> u8 {
    (octet & 0x0F) * 10 + (octet >> 4)
}

fn format_time_zone(octet: u8) -> String {
    let quarters = (octet & 0x07) * 10 + (octet >> 4);
    let sign = if bit(octet, 4) { '-' } else { '+' };
    format!("GMT {sign}{}:{:02}", quarters / 4, (quarters % 4) * 15)
}

/// Time zone (TS 24.008 10.5.3.8)
pub fn time_zone(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    Ok(DecodedValue::Text(format_time_zone(view.read()?)))
}

/// Time zone and time (TS 24.008 10.5.3.9)
pub fn time_zone_and_time(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 7)?;
    let [year, month, day, hour, minute, second, tz] = view.read_array::<7>()?;
    Ok(DecodedValue::Text(format!(
        "20{:02}-{:02}-{:02} {:02}:{:02}:{:02} {}",
        swapped_bcd(year),
        swapped_bcd(month),
        swapped_bcd(day),
        swapped_bcd(hour),
        swapped_bcd(minute),
        swapped_bcd(second),
        format_time_zone(tz)
    )))
}

/// Network daylight saving time (TS 24.008 10.5.3.12)
pub fn daylight_saving_time(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    Ok(lookup(
        view.read()? & 0x03,
        &[
            (0, "No adjustment for Daylight Saving Time"),
            (1, "+1 hour adjustment for Daylight Saving Time"),
            (2, "+2 hours adjustment for Daylight Saving Time"),
        ],
        "Reserved",
    ))
}

// --- Header compression ---

/// Header compression configuration (TS 24.301 9.9.4.27)
pub fn header_compression_configuration(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_min_len(view, 3)?;
    let profiles = view.read()?;
    let max_cid = view.read_u16()?;
    let mut fields = vec![
        flag("RoHC profile 0x0002 (UDP/IP)", profiles, 1),
        flag("RoHC profile 0x0003 (ESP/IP)", profiles, 2),
        flag("RoHC profile 0x0004 (IP)", profiles, 3),
        flag("RoHC profile 0x0006 (TCP/IP)", profiles, 4),
        flag("RoHC profile 0x0102 (UDP/IP)", profiles, 5),
        flag("RoHC profile 0x0103 (ESP/IP)", profiles, 6),
        flag("RoHC profile 0x0104 (IP)", profiles, 7),
        field("MAX_CID", DecodedValue::Uint(u64::from(max_cid))),
    ];
    if view.has_next() {
        let setup_type = view.read()?;
        fields.push(field(
            "Additional header compression context setup parameters type",
            DecodedValue::Uint(u64::from(setup_type)),
        ));
        fields.push(field(
            "Additional header compression context setup parameters container",
            DecodedValue::bytes(view.read_remaining()),
        ));
    }
    Ok(DecodedValue::Fields(fields))
}

/// Header compression configuration status (TS 24.301 9.9.4.27A)
pub fn header_compression_configuration_status(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 2)?;
    Ok(ebi_flags(view.read_u16()?))
}

/// One flag per EPS bearer identity 0-15, EBI(n) at bit n of the 16 bit value.
pub(crate) fn ebi_flags(value: u16) -> DecodedValue {
    const NAMES: [&str; 16] = [
        "EBI(0)", "EBI(1)", "EBI(2)", "EBI(3)", "EBI(4)", "EBI(5)", "EBI(6)", "EBI(7)",
        "EBI(8)", "EBI(9)", "EBI(10)", "EBI(11)", "EBI(12)", "EBI(13)", "EBI(14)", "EBI(15)",
    ];
    // First octet carries EBI(7)..EBI(0), the second EBI(15)..EBI(8)
    let [first, second] = value.to_be_bytes();
    let fields: Vec<Field> = NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let set = if i < 8 {
                first & (1 << i) != 0
            } else {
                second & (1 << (i - 8)) != 0
            };
            field(name, DecodedValue::Flag(set))
        })
        .collect();
    DecodedValue::Fields(fields)
}
