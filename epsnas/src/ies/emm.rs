//! EMM information elements (TS 24.301 9.9.3)

use epsnas_common::{OctetView, Tai};

use super::common::read_plmn;
use super::{bcd_char, bcd_digits, bit, expect_len, expect_min_len, flag, lookup, truncated_record};
use crate::codec::{DecodeContext, IeError, IeResult};
use crate::enums::EmmCause;
use crate::value::{field, DecodedValue, DiagnosticKind, Field};

// --- Half-octet IEs ---

/// Additional update result (9.9.3.0A)
pub fn additional_update_result(nibble: u8) -> DecodedValue {
    lookup(
        nibble & 0x03,
        &[
            (0, "No additional information"),
            (1, "CS Fallback not preferred"),
            (2, "SMS only"),
        ],
        "Reserved",
    )
}

/// Additional update type (9.9.3.0B)
pub fn additional_update_type(nibble: u8) -> DecodedValue {
    DecodedValue::Fields(vec![
        flag("Signalling active flag (SAF)", nibble, 4),
        field(
            "Preferred CIoT network behaviour",
            lookup(
                (nibble >> 1) & 0x03,
                &[
                    (0, "No additional information"),
                    (1, "Control plane CIoT EPS optimization"),
                    (2, "User plane CIoT EPS optimization"),
                ],
                "Reserved",
            ),
        ),
        field(
            "Additional update type value (AUTV)",
            DecodedValue::enumerated(
                nibble & 0x01,
                if bit(nibble, 1) { "SMS only" } else { "No additional information" },
            ),
        ),
    ])
}

/// CSFB response (9.9.3.5)
pub fn csfb_response(nibble: u8) -> DecodedValue {
    lookup(
        nibble & 0x07,
        &[(0, "CS fallback rejected by the UE"), (1, "CS fallback accepted by the UE")],
        "Reserved",
    )
}

fn detach_type(nibble: u8, types: &[(u8, &'static str)]) -> DecodedValue {
    DecodedValue::Fields(vec![
        field(
            "Switch off",
            DecodedValue::enumerated(
                u8::from(bit(nibble, 4)),
                if bit(nibble, 4) { "Switch off" } else { "Normal detach" },
            ),
        ),
        field("Type of detach", lookup(nibble & 0x07, types, "Combined EPS/IMSI detach")),
    ])
}

/// Detach type sent by the UE (9.9.3.7)
pub fn detach_type_uplink(nibble: u8) -> DecodedValue {
    detach_type(
        nibble,
        &[
            (1, "EPS detach"),
            (2, "IMSI detach"),
            (3, "Combined EPS/IMSI detach"),
        ],
    )
}

/// Detach type sent by the network (9.9.3.7)
pub fn detach_type_downlink(nibble: u8) -> DecodedValue {
    detach_type(
        nibble,
        &[
            (1, "Re-attach required"),
            (2, "Re-attach not required"),
            (3, "IMSI detach"),
            (6, "Reserved"),
            (7, "Reserved"),
        ],
    )
}

/// EPS attach result (9.9.3.10)
pub fn eps_attach_result(nibble: u8) -> DecodedValue {
    lookup(
        nibble & 0x07,
        &[(1, "EPS only"), (2, "Combined EPS/IMSI attach")],
        "Reserved",
    )
}

/// EPS attach type (9.9.3.11)
pub fn eps_attach_type(nibble: u8) -> DecodedValue {
    lookup(
        nibble & 0x07,
        &[
            (1, "EPS attach"),
            (2, "Combined EPS/IMSI attach"),
            (6, "EPS emergency attach"),
            (7, "Reserved"),
        ],
        "EPS attach",
    )
}

/// EPS update result (9.9.3.13)
pub fn eps_update_result(nibble: u8) -> DecodedValue {
    lookup(
        nibble & 0x07,
        &[
            (0, "TA updated"),
            (1, "Combined TA/LA updated"),
            (4, "TA updated and ISR activated"),
            (5, "Combined TA/LA updated and ISR activated"),
        ],
        "Reserved",
    )
}

/// EPS update type (9.9.3.14)
pub fn eps_update_type(nibble: u8) -> DecodedValue {
    DecodedValue::Fields(vec![
        field(
            "Active flag",
            DecodedValue::enumerated(
                u8::from(bit(nibble, 4)),
                if bit(nibble, 4) {
                    "Bearer establishment requested"
                } else {
                    "No bearer establishment requested"
                },
            ),
        ),
        field(
            "EPS update type value",
            lookup(
                nibble & 0x07,
                &[
                    (0, "TA updating"),
                    (1, "Combined TA/LA updating"),
                    (2, "Combined TA/LA updating with IMSI attach"),
                    (3, "Periodic updating"),
                ],
                "Reserved",
            ),
        ),
    ])
}

/// Identity type 2 (9.9.3.17)
pub fn identity_type_2(nibble: u8) -> DecodedValue {
    lookup(
        nibble & 0x07,
        &[(1, "IMSI"), (2, "IMEI"), (3, "IMEISV"), (4, "TMSI")],
        "IMSI",
    )
}

/// IMEISV request (9.9.3.18)
pub fn imeisv_request(nibble: u8) -> DecodedValue {
    lookup(
        nibble & 0x07,
        &[(0, "IMEISV not requested"), (1, "IMEISV requested")],
        "IMEISV not requested",
    )
}

/// MS network feature support (9.9.3.20A)
pub fn ms_network_feature_support(nibble: u8) -> DecodedValue {
    DecodedValue::Fields(vec![flag("Extended periodic timers", nibble, 1)])
}

/// Service type (9.9.3.27)
pub fn service_type(nibble: u8) -> DecodedValue {
    lookup(
        nibble,
        &[
            (0, "Mobile originating CS fallback or 1xCS fallback"),
            (1, "Mobile terminating CS fallback or 1xCS fallback"),
            (2, "Mobile originating CS fallback emergency call or 1xCS fallback emergency call"),
            (3, "Mobile originating CS fallback or 1xCS fallback"),
            (4, "Mobile originating CS fallback or 1xCS fallback"),
            (8, "Packet services via S1"),
            (9, "Packet services via S1"),
            (10, "Packet services via S1"),
            (11, "Packet services via S1"),
        ],
        "Unused",
    )
}

/// Control plane service type (9.9.3.47)
pub fn control_plane_service_type(nibble: u8) -> DecodedValue {
    DecodedValue::Fields(vec![
        flag("Active flag", nibble, 4),
        field(
            "Control plane service type value",
            lookup(
                nibble & 0x07,
                &[(0, "Mobile originating request"), (1, "Mobile terminating request")],
                "Unused",
            ),
        ),
    ])
}

/// UE radio capability information update needed (9.9.3.35)
pub fn ue_radio_capability_update_needed(nibble: u8) -> DecodedValue {
    DecodedValue::enumerated(
        nibble & 0x01,
        if bit(nibble, 1) {
            "UE radio capability information update needed"
        } else {
            "UE radio capability information update not needed"
        },
    )
}

/// GUTI type (9.9.3.45)
pub fn guti_type(nibble: u8) -> DecodedValue {
    DecodedValue::enumerated(
        nibble & 0x01,
        if bit(nibble, 1) { "Mapped GUTI" } else { "Native GUTI" },
    )
}

/// Extended EMM cause (9.9.3.26A)
pub fn extended_emm_cause(nibble: u8) -> DecodedValue {
    DecodedValue::Fields(vec![
        field(
            "NB-IoT allowed",
            DecodedValue::Flag(!bit(nibble, 3)),
        ),
        flag("EPS optimization info", nibble, 2),
        field(
            "E-UTRAN allowed",
            DecodedValue::Flag(!bit(nibble, 1)),
        ),
    ])
}

/// Device properties (9.9.2.0A)
pub fn device_properties(nibble: u8) -> DecodedValue {
    DecodedValue::enumerated(
        nibble & 0x01,
        if bit(nibble, 1) {
            "MS is configured for NAS signalling low priority"
        } else {
            "MS is not configured for NAS signalling low priority"
        },
    )
}

/// SMS services status (9.9.3.4B)
pub fn sms_services_status(nibble: u8) -> DecodedValue {
    lookup(
        nibble & 0x07,
        &[
            (0, "SMS services not available"),
            (1, "SMS services not available in this PLMN"),
            (2, "Network failure"),
            (3, "Congestion"),
        ],
        "Reserved",
    )
}

/// Network policy (9.9.3.52)
pub fn network_policy(nibble: u8) -> DecodedValue {
    DecodedValue::enumerated(
        nibble & 0x01,
        if bit(nibble, 1) {
            "Unsecured redirection to GERAN or UTRAN not allowed"
        } else {
            "Unsecured redirection to GERAN or UTRAN allowed"
        },
    )
}

// --- Octet IEs ---

/// EMM cause (9.9.3.9)
pub fn emm_cause(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    let cause = view.read()?;
    Ok(DecodedValue::enumerated(cause, EmmCause::name_of(cause)))
}

/// EPS mobile identity (9.9.3.12)
pub fn eps_mobile_identity(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let start = view.position();
    let first = view.read()?;
    let identity_type = first & 0x07;
    let odd = bit(first, 4);
    let mut fields = vec![
        field(
            "Type of identity",
            lookup(identity_type, &[(1, "IMSI"), (3, "IMEI"), (6, "GUTI")], "Reserved"),
        ),
        field("Odd/even indication", DecodedValue::Flag(odd)),
    ];

    match identity_type {
        1 | 3 => {
            let mut digits = String::new();
            digits.push(bcd_char(first >> 4));
            digits.push_str(&bcd_digits(view.read_remaining()));
            let name = if identity_type == 1 { "IMSI" } else { "IMEI" };
            fields.push(field(name, DecodedValue::Digits(digits)));
        }
        6 => {
            expect_len(view, 10)?;
            let plmn = read_plmn(view)?;
            let group_id = view.read_u16()?;
            let code = view.read()?;
            let m_tmsi = view.read_u32()?;
            fields.push(field("PLMN", DecodedValue::Plmn(plmn)));
            fields.push(field("MME Group ID", DecodedValue::Uint(u64::from(group_id))));
            fields.push(field("MME Code", DecodedValue::Uint(u64::from(code))));
            fields.push(field("M-TMSI", DecodedValue::Uint(u64::from(m_tmsi))));
        }
        other => {
            ctx.report(DiagnosticKind::UnknownIdentity(other), start..view.end());
            fields.push(field("Identity", DecodedValue::bytes(view.read_remaining())));
        }
    }
    Ok(DecodedValue::Fields(fields))
}

/// EPS network feature support (9.9.3.12A)
pub fn eps_network_feature_support(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let octet = view.read()?;
    let mut fields = vec![
        flag("Control plane CIoT EPS optimization", octet, 8),
        flag("EMM-REGISTERED w/o PDN connectivity", octet, 7),
        flag("Extended service request for packet services", octet, 6),
        field("Location services indicator in CS (CS-LCS)", DecodedValue::Uint(u64::from((octet >> 3) & 0x03))),
        flag("Location services via EPC", octet, 3),
        flag("Emergency bearer services in S1 mode", octet, 2),
        flag("IMS voice over PS session in S1 mode", octet, 1),
    ];
    if view.has_next() {
        let octet = view.read()?;
        fields.extend([
            flag("Signalling for a maximum number of 15 EPS bearer contexts", octet, 8),
            flag("Interworking without N26", octet, 7),
            flag("Restriction on the use of dual connectivity with NR", octet, 6),
            flag("Restriction on enhanced coverage", octet, 5),
            flag("Extended protocol configuration options", octet, 4),
            flag("Header compression for control plane CIoT EPS optimization", octet, 3),
            flag("S1-u data transfer", octet, 2),
            flag("User plane CIoT EPS optimization", octet, 1),
        ]);
    }
    Ok(DecodedValue::Fields(fields))
}

const EEA_NAMES: [&str; 8] = [
    "EEA0", "128-EEA1", "128-EEA2", "128-EEA3", "EEA4", "EEA5", "EEA6", "EEA7",
];
const EIA_NAMES: [&str; 8] = [
    "EIA0", "128-EIA1", "128-EIA2", "128-EIA3", "EIA4", "EIA5", "EIA6", "EIA7",
];
const UEA_NAMES: [&str; 8] = ["UEA0", "UEA1", "UEA2", "UEA3", "UEA4", "UEA5", "UEA6", "UEA7"];
const UIA_NAMES: [&str; 8] = ["UCS2", "UIA1", "UIA2", "UIA3", "UIA4", "UIA5", "UIA6", "UIA7"];
const GEA_NAMES: [&str; 8] = ["Spare", "GEA1", "GEA2", "GEA3", "GEA4", "GEA5", "GEA6", "GEA7"];

/// One flag per bit, `names[0]` naming bit 8.
fn bitmap(names: &[&'static str; 8], octet: u8) -> Vec<Field> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| field(name, DecodedValue::Flag(octet & (0x80 >> i) != 0)))
        .collect()
}

/// UE network capability (9.9.3.34)
pub fn ue_network_capability(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_min_len(view, 2)?;
    let mut fields = Vec::new();
    fields.push(field("EPS encryption algorithms", DecodedValue::Fields(bitmap(&EEA_NAMES, view.read()?))));
    fields.push(field("EPS integrity algorithms", DecodedValue::Fields(bitmap(&EIA_NAMES, view.read()?))));
    if view.has_next() {
        fields.push(field("UMTS encryption algorithms", DecodedValue::Fields(bitmap(&UEA_NAMES, view.read()?))));
    }
    if view.has_next() {
        fields.push(field("UMTS integrity algorithms", DecodedValue::Fields(bitmap(&UIA_NAMES, view.read()?))));
    }
    if view.has_next() {
        let octet = view.read()?;
        fields.push(field(
            "Features",
            DecodedValue::Fields(vec![
                flag("ProSe direct discovery", octet, 8),
                flag("ProSe", octet, 7),
                flag("H.245 after SRVCC handover", octet, 6),
                flag("Access class control for CSFB", octet, 5),
                flag("LTE Positioning Protocol", octet, 4),
                flag("Location services notification mechanisms", octet, 3),
                flag("SRVCC from E-UTRAN to cdma2000 1xCS", octet, 2),
                flag("Notification procedure", octet, 1),
            ]),
        ));
    }
    if view.has_next() {
        let octet = view.read()?;
        fields.push(field(
            "CIoT features",
            DecodedValue::Fields(vec![
                flag("Extended protocol configuration options", octet, 8),
                flag("Header compression for control plane CIoT EPS optimization", octet, 7),
                flag("EMM-REGISTERED w/o PDN connection", octet, 6),
                flag("S1-U data transfer", octet, 5),
                flag("User plane CIoT EPS optimization", octet, 4),
                flag("Control plane CIoT EPS optimization", octet, 3),
                flag("ProSe UE-to-network relay", octet, 2),
                flag("ProSe direct communication", octet, 1),
            ]),
        ));
    }
    if view.has_next() {
        fields.push(field("Further capabilities", DecodedValue::bytes(view.read_remaining())));
    }
    Ok(DecodedValue::Fields(fields))
}

/// UE security capability (9.9.3.36)
pub fn ue_security_capability(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_min_len(view, 2)?;
    let mut fields = vec![
        field("EPS encryption algorithms", DecodedValue::Fields(bitmap(&EEA_NAMES, view.read()?))),
        field("EPS integrity algorithms", DecodedValue::Fields(bitmap(&EIA_NAMES, view.read()?))),
    ];
    if view.has_next() {
        fields.push(field("UMTS encryption algorithms", DecodedValue::Fields(bitmap(&UEA_NAMES, view.read()?))));
    }
    if view.has_next() {
        // Bit 8 is spare here
        let mut uia = bitmap(&UIA_NAMES, view.read()?);
        uia.remove(0);
        fields.push(field("UMTS integrity algorithms", DecodedValue::Fields(uia)));
    }
    if view.has_next() {
        let mut gea = bitmap(&GEA_NAMES, view.read()?);
        gea.remove(0);
        fields.push(field("GPRS encryption algorithms", DecodedValue::Fields(gea)));
    }
    if view.has_next() {
        return Err(IeError::LengthMismatch {
            expected: 5,
            actual: view.len(),
        });
    }
    Ok(DecodedValue::Fields(fields))
}

/// NAS security algorithms (9.9.3.23)
pub fn nas_security_algorithms(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    let octet = view.read()?;
    let ciphering = (octet >> 4) & 0x07;
    let integrity = octet & 0x07;
    Ok(DecodedValue::Fields(vec![
        field(
            "Type of ciphering algorithm",
            DecodedValue::enumerated(ciphering, EEA_NAMES[usize::from(ciphering)]),
        ),
        field(
            "Type of integrity protection algorithm",
            DecodedValue::enumerated(integrity, EIA_NAMES[usize::from(integrity)]),
        ),
    ]))
}

/// Tracking area identity (9.9.3.32)
pub fn tracking_area_identity(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 5)?;
    let plmn = read_plmn(view)?;
    let tac = view.read_u16()?;
    Ok(DecodedValue::Tai(Tai::new(plmn, tac)))
}

/// Tracking area identity list (9.9.3.33)
///
/// A sequence of partial lists. Type 0 is one PLMN with n TACs, type 1 one
/// PLMN with a first TAC and n-1 consecutive ones, type 2 n full TAIs.
pub fn tracking_area_identity_list(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let mut partial_lists = Vec::new();

    while view.has_next() {
        let header_pos = view.position();
        let octet = view.read()?;
        let list_type = (octet >> 5) & 0x03;
        let declared = usize::from(octet & 0x1F) + 1;

        let fixed_len = match list_type {
            0 => 3,
            1 => 5,
            _ => 0,
        };
        if view.remaining() < fixed_len {
            truncated_record(ctx, view, "Partial tracking area identity list", header_pos);
            break;
        }

        let mut tais = Vec::with_capacity(declared);
        match list_type {
            0 => {
                let plmn = read_plmn(view)?;
                while tais.len() < declared && view.remaining() >= 2 {
                    tais.push(DecodedValue::Tai(Tai::new(plmn, view.read_u16()?)));
                }
            }
            1 => {
                let plmn = read_plmn(view)?;
                let first = view.read_u16()?;
                for i in 0..declared {
                    // i < 32, so the cast cannot truncate
                    let tac = first.wrapping_add(i as u16);
                    tais.push(DecodedValue::Tai(Tai::new(plmn, tac)));
                }
            }
            2 => {
                while tais.len() < declared && view.remaining() >= 5 {
                    let plmn = read_plmn(view)?;
                    tais.push(DecodedValue::Tai(Tai::new(plmn, view.read_u16()?)));
                }
            }
            other => {
                ctx.report(DiagnosticKind::UnknownTypeOfList(other), header_pos..view.end());
                partial_lists.push(DecodedValue::bytes(view.read_remaining()));
                break;
            }
        }

        if tais.len() < declared {
            ctx.report(
                DiagnosticKind::WrongNumberOfElements {
                    declared,
                    found: tais.len(),
                },
                header_pos..view.end(),
            );
            let _ = view.read_remaining();
        }

        partial_lists.push(DecodedValue::Fields(vec![
            field(
                "Type of list",
                lookup(
                    list_type,
                    &[
                        (0, "list of TACs belonging to one PLMN, with non-consecutive TAC values"),
                        (1, "list of TACs belonging to one PLMN, with consecutive TAC values"),
                        (2, "list of TAIs belonging to different PLMNs"),
                    ],
                    "Reserved",
                ),
            ),
            field("Number of elements", DecodedValue::Uint(declared as u64)),
            field("TAIs", DecodedValue::List(tais)),
        ]));
    }

    Ok(DecodedValue::List(partial_lists))
}

/// EPS bearer context status (9.9.2.1)
pub fn eps_bearer_context_status(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 2)?;
    Ok(super::common::ebi_flags(view.read_u16()?))
}

/// Nonce (9.9.3.25)
pub fn nonce(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 4)?;
    Ok(DecodedValue::Uint(u64::from(view.read_u32()?)))
}

/// Paging identity (9.9.3.25A)
pub fn paging_identity(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    let octet = view.read()?;
    Ok(DecodedValue::enumerated(
        octet & 0x01,
        if bit(octet, 1) { "TMSI" } else { "IMSI" },
    ))
}

/// Paging restriction (9.9.3.60)
///
/// Types 3 and 4 carry the EPS bearer contexts that may still be paged.
pub fn paging_restriction(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_min_len(view, 1)?;
    let restriction = view.read()? & 0x0F;
    let mut fields = vec![field(
        "Paging restriction type",
        lookup(
            restriction,
            &[
                (1, "All paging is restricted"),
                (2, "All paging is restricted except for voice service"),
                (3, "All paging is restricted except for specified PDN connection(s)"),
                (
                    4,
                    "All paging is restricted except for voice service and specified PDN connection(s)",
                ),
            ],
            "Reserved",
        ),
    )];
    if matches!(restriction, 3 | 4) {
        expect_len(view, 2)?;
        fields.push(field(
            "EPS bearer context(s) allowed to be paged",
            super::common::ebi_flags(view.read_u16()?),
        ));
    }
    Ok(DecodedValue::Fields(fields))
}

/// Authentication response parameter (9.9.3.4)
pub fn authentication_response_parameter(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    if !(4..=16).contains(&view.remaining()) {
        return Err(IeError::InvalidValue(format!(
            "RES of {} octets, expected 4 to 16",
            view.remaining()
        )));
    }
    Ok(DecodedValue::bytes(view.read_remaining()))
}

/// Authentication parameter RAND (9.9.3.3) and AUTN (9.9.3.2)
pub fn authentication_parameter(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 16)?;
    Ok(DecodedValue::bytes(view.read_remaining()))
}

/// Extended DRX parameters (9.9.3.46)
pub fn extended_drx_parameters(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_min_len(view, 1)?;
    let octet = view.read()?;
    let mut fields = vec![
        field("Paging Time Window", DecodedValue::Uint(u64::from(octet >> 4))),
        field("eDRX value", DecodedValue::Uint(u64::from(octet & 0x0F))),
    ];
    if view.has_next() {
        fields.push(field("Further parameters", DecodedValue::bytes(view.read_remaining())));
    }
    Ok(DecodedValue::Fields(fields))
}

/// Ciphering key data (9.9.3.56)
///
/// Each ciphering data set carries its ID, the key, the c0 counter, the
/// E-UTRA posSIB type bitmap, a validity window and the TAIs it applies to.
pub fn ciphering_key_data(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let start = view.position();
    let declared = usize::from(view.read()? & 0x1F);
    let mut sets = Vec::with_capacity(declared);

    while view.has_next() {
        let set_start = view.position();
        match ciphering_data_set(ctx, view) {
            Ok(set) => sets.push(set),
            Err(err) => {
                ctx.report(
                    DiagnosticKind::MalformedElement {
                        element: "Ciphering data set",
                        reason: err.to_string(),
                    },
                    set_start..view.end(),
                );
                let _ = view.read_remaining();
            }
        }
    }

    if sets.len() != declared {
        ctx.report(
            DiagnosticKind::WrongNumberOfElements {
                declared,
                found: sets.len(),
            },
            start..view.end(),
        );
    }
    Ok(DecodedValue::List(sets))
}

fn ciphering_data_set(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let set_id = view.read_u16()?;
    let key = view.read_slice(16)?;
    let c0_len = usize::from(view.read()? & 0x1F);
    let c0 = view.read_slice(c0_len)?;
    let pos_sib = view.read_u32()?;
    let [year, month, day, hour, minute] = view.read_array::<5>()?;
    let duration = view.read_u16()?;
    let tai_len = usize::from(view.read()?);
    let tai_view = view.sub_view(tai_len)?;
    let tais = tracking_area_identity_list(ctx, &tai_view)?;

    let swapped = |octet: u8| (octet & 0x0F) * 10 + (octet >> 4);
    Ok(DecodedValue::Fields(vec![
        field("Ciphering set ID", DecodedValue::Uint(u64::from(set_id))),
        field("Ciphering key", DecodedValue::bytes(key)),
        field("c0", DecodedValue::bytes(c0)),
        field("E-UTRA posSIB types", DecodedValue::Uint(u64::from(pos_sib))),
        field(
            "Validity start time",
            DecodedValue::Text(format!(
                "20{:02}-{:02}-{:02} {:02}:{:02} UTC",
                swapped(year),
                swapped(month),
                swapped(day),
                swapped(hour),
                swapped(minute)
            )),
        ),
        field("Validity duration (minutes)", DecodedValue::Uint(u64::from(duration))),
        field("Tracking area identity list", tais),
    ]))
}
