//! ESM information elements (TS 24.301 9.9.4)

use std::net::{Ipv4Addr, Ipv6Addr};

use epsnas_common::OctetView;

use super::{bcd_char, bcd_digits, bit, expect_len, expect_min_len, flag, lookup, truncated_record};
use crate::codec::{DecodeContext, IeError, IeResult};
use crate::enums::EsmCause;
use crate::value::{field, DecodedValue, DiagnosticKind};

// --- Half-octet IEs ---

/// EPS bearer identity values, as in the linked EPS bearer identity (9.9.4.6)
pub fn linked_eps_bearer_identity(nibble: u8) -> DecodedValue {
    DecodedValue::enumerated(
        nibble,
        if nibble < 5 { "Reserved" } else { "EPS bearer identity value" },
    )
}

/// Connectivity type (9.9.4.2A)
pub fn connectivity_type(nibble: u8) -> DecodedValue {
    DecodedValue::enumerated(
        nibble & 0x01,
        if bit(nibble, 1) {
            "The PDN connection is considered a LIPA PDN connection"
        } else {
            "The PDN connection is not considered a LIPA PDN connection"
        },
    )
}

/// ESM information transfer flag (9.9.4.5)
pub fn esm_information_transfer_flag(nibble: u8) -> DecodedValue {
    DecodedValue::enumerated(
        nibble & 0x01,
        if bit(nibble, 1) {
            "Security protected ESM information transfer required"
        } else {
            "Security protected ESM information transfer not required"
        },
    )
}

const PDN_TYPES: [(u8, &str); 6] = [
    (1, "IPv4"),
    (2, "IPv6"),
    (3, "IPv4v6"),
    (4, "Unused"),
    (5, "Non IP"),
    (6, "Ethernet"),
];

/// PDN type (9.9.4.10)
pub fn pdn_type(nibble: u8) -> DecodedValue {
    lookup(nibble & 0x07, &PDN_TYPES, "Reserved")
}

/// Request type (9.9.4.14)
pub fn request_type(nibble: u8) -> DecodedValue {
    lookup(
        nibble & 0x07,
        &[
            (1, "Initial request"),
            (2, "Handover"),
            (3, "Unused"),
            (4, "Emergency"),
            (6, "Handover of emergency bearer services"),
        ],
        "Reserved",
    )
}

/// WLAN offload acceptability (9.9.4.18)
pub fn wlan_offload_acceptability(nibble: u8) -> DecodedValue {
    DecodedValue::Fields(vec![
        flag("UTRAN offload acceptability", nibble, 2),
        flag("E-UTRAN offload acceptability", nibble, 1),
    ])
}

/// Control plane only indication (9.9.4.23)
pub fn control_plane_only_indication(nibble: u8) -> DecodedValue {
    DecodedValue::enumerated(
        nibble & 0x01,
        if bit(nibble, 1) {
            "PDN connection can be used for control plane CIoT EPS optimization only"
        } else {
            "Reserved"
        },
    )
}

/// Release assistance indication (9.9.4.25)
pub fn release_assistance_indication(nibble: u8) -> DecodedValue {
    lookup(
        nibble & 0x03,
        &[
            (0, "No information available"),
            (1, "No further uplink or downlink data transmission expected"),
            (2, "Only a single downlink data transmission and no further uplink data expected"),
        ],
        "Reserved",
    )
}

// --- Octet IEs ---

/// ESM cause (9.9.4.4)
pub fn esm_cause(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    let cause = view.read()?;
    Ok(DecodedValue::enumerated(cause, EsmCause::name_of(cause)))
}

/// Access point name (TS 24.008 10.5.6.1): length-prefixed labels.
pub fn access_point_name(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let mut labels = Vec::new();
    while view.has_next() {
        let len = usize::from(view.read()?);
        let label = view.read_slice(len).map_err(|_| {
            IeError::InvalidValue(format!("APN label of {len} octets overruns the element"))
        })?;
        labels.push(String::from_utf8_lossy(label).into_owned());
    }
    Ok(DecodedValue::Text(labels.join(".")))
}

fn ipv6_interface_identifier(iid: [u8; 8]) -> Ipv6Addr {
    let mut octets = [0u8; 16];
    octets[8..].copy_from_slice(&iid);
    Ipv6Addr::from(octets)
}

/// PDN address (9.9.4.9)
pub fn pdn_address(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let octet = view.read()?;
    let kind = octet & 0x07;
    let mut fields = vec![field("PDN type", lookup(kind, &PDN_TYPES, "Reserved"))];

    match kind {
        1 => {
            expect_len(view, 4)?;
            let addr = Ipv4Addr::from(view.read_array::<4>()?);
            fields.push(field("PDN IPv4", DecodedValue::Text(addr.to_string())));
        }
        2 => {
            expect_len(view, 8)?;
            let iid = ipv6_interface_identifier(view.read_array::<8>()?);
            fields.push(field("PDN IPv6 if id", DecodedValue::Text(iid.to_string())));
        }
        3 => {
            expect_len(view, 12)?;
            let iid = ipv6_interface_identifier(view.read_array::<8>()?);
            let addr = Ipv4Addr::from(view.read_array::<4>()?);
            fields.push(field("PDN IPv6 if id", DecodedValue::Text(iid.to_string())));
            fields.push(field("PDN IPv4", DecodedValue::Text(addr.to_string())));
        }
        _ => {
            if view.has_next() {
                fields.push(field("Address information", DecodedValue::bytes(view.read_remaining())));
            }
        }
    }
    Ok(DecodedValue::Fields(fields))
}

/// Notification indicator (9.9.4.7A)
pub fn notification_indicator(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    Ok(lookup(
        view.read()?,
        &[(1, "SRVCC handover cancelled, IMS session re-establishment required")],
        "Reserved",
    ))
}

/// Re-attempt indicator (9.9.4.13A)
pub fn re_attempt_indicator(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 1)?;
    let octet = view.read()?;
    Ok(DecodedValue::Fields(vec![
        flag("EPLMNC", octet, 2),
        flag("RATC", octet, 1),
    ]))
}

/// Serving PLMN rate control (9.9.4.28)
pub fn serving_plmn_rate_control(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    expect_len(view, 2)?;
    let value = view.read_u16()?;
    Ok(if value == 0xFFFF {
        DecodedValue::enumerated(value, "Not restricted")
    } else {
        DecodedValue::Uint(u64::from(value))
    })
}

// --- Traffic flow template ---

const TFT_OPERATIONS: [(u8, &str); 7] = [
    (0, "Ignore this IE"),
    (1, "Create new TFT"),
    (2, "Delete existing TFT"),
    (3, "Add packet filters to existing TFT"),
    (4, "Replace packet filters in existing TFT"),
    (5, "Delete packet filters from existing TFT"),
    (6, "No TFT operation"),
];

/// Traffic flow template (TS 24.008 10.5.6.12), also used for the traffic
/// flow aggregate description (9.9.4.15).
pub fn traffic_flow_template(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let start = view.position();
    let octet = view.read()?;
    let operation = octet >> 5;
    let has_parameters = bit(octet, 5);
    let declared = usize::from(octet & 0x0F);

    let mut filters = Vec::with_capacity(declared);
    let mut truncated = false;
    while filters.len() < declared && view.has_next() {
        let filter_start = view.position();
        let filter = match operation {
            5 => view.read().map_err(IeError::from).map(|id| {
                DecodedValue::Fields(vec![field(
                    "Packet filter identifier",
                    DecodedValue::Uint(u64::from(id & 0x0F)),
                )])
            }),
            _ => packet_filter(view),
        };
        match filter {
            Ok(filter) => filters.push(filter),
            Err(_) => {
                truncated_record(ctx, view, "Packet filter", filter_start);
                truncated = true;
                break;
            }
        }
    }

    if !truncated && filters.len() != declared {
        ctx.report(
            DiagnosticKind::WrongNumberOfElements {
                declared,
                found: filters.len(),
            },
            start..view.end(),
        );
    }

    let mut fields = vec![
        field("TFT operation code", lookup(operation, &TFT_OPERATIONS, "Reserved")),
        flag("E bit", octet, 5),
        field("Number of packet filters", DecodedValue::Uint(declared as u64)),
        field("Packet filters", DecodedValue::List(filters)),
    ];

    if has_parameters {
        let mut parameters = Vec::new();
        while view.has_next() {
            let parameter_start = view.position();
            let id = view.read()?;
            let Ok(contents) = view.read().and_then(|len| view.read_slice(usize::from(len))) else {
                truncated_record(ctx, view, "Parameters list", parameter_start);
                break;
            };
            parameters.push(DecodedValue::Fields(vec![
                field(
                    "Parameter identifier",
                    lookup(
                        id,
                        &[
                            (1, "Authorization Token"),
                            (2, "Flow Identifier"),
                            (3, "Packet Filter Identifier"),
                        ],
                        "Reserved",
                    ),
                ),
                field("Contents", DecodedValue::bytes(contents)),
            ]));
        }
        fields.push(field("Parameters list", DecodedValue::List(parameters)));
    } else if view.has_next() {
        return Err(IeError::LengthMismatch {
            expected: view.current_index(),
            actual: view.len(),
        });
    }

    Ok(DecodedValue::Fields(fields))
}

fn packet_filter(view: &OctetView<'_>) -> IeResult {
    let id_octet = view.read()?;
    let precedence = view.read()?;
    let len = usize::from(view.read()?);
    let contents = view.sub_view(len)?;

    let mut components = Vec::new();
    while contents.has_next() {
        let component_type = contents.read()?;
        let value = match component_type {
            0x10 | 0x11 => {
                let addr = Ipv4Addr::from(contents.read_array::<4>()?);
                let mask = Ipv4Addr::from(contents.read_array::<4>()?);
                DecodedValue::Text(format!("{addr}/{mask}"))
            }
            0x20 | 0x22 => {
                let addr = Ipv6Addr::from(contents.read_array::<16>()?);
                let mask = Ipv6Addr::from(contents.read_array::<16>()?);
                DecodedValue::Text(format!("{addr}/{mask}"))
            }
            0x21 | 0x23 => {
                let addr = Ipv6Addr::from(contents.read_array::<16>()?);
                let prefix = contents.read()?;
                DecodedValue::Text(format!("{addr}/{prefix}"))
            }
            0x30 | 0x40 | 0x50 => {
                let width = if component_type == 0x30 { 1 } else { 2 };
                DecodedValue::Uint(
                    contents
                        .read_slice(width)?
                        .iter()
                        .fold(0u64, |acc, b| (acc << 8) | u64::from(*b)),
                )
            }
            0x41 | 0x51 => {
                let low = contents.read_u16()?;
                let high = contents.read_u16()?;
                DecodedValue::Text(format!("{low}-{high}"))
            }
            0x60 => DecodedValue::Uint(u64::from(contents.read_u32()?)),
            0x70 => {
                let tos = contents.read()?;
                let mask = contents.read()?;
                DecodedValue::Text(format!("0x{tos:02x}/0x{mask:02x}"))
            }
            0x80 => DecodedValue::Uint(u64::from(contents.read_u24()? & 0x000F_FFFF)),
            _ => {
                // Component lengths are type specific, nothing after an
                // unknown one can be located.
                components.push(DecodedValue::Fields(vec![
                    field("Component type", DecodedValue::enumerated(component_type, "Unknown")),
                    field("Value", DecodedValue::bytes(contents.read_remaining())),
                ]));
                break;
            }
        };
        components.push(DecodedValue::Fields(vec![
            field(
                "Component type",
                DecodedValue::enumerated(component_type, packet_filter_component_name(component_type)),
            ),
            field("Value", value),
        ]));
    }

    Ok(DecodedValue::Fields(vec![
        field(
            "Packet filter direction",
            lookup(
                (id_octet >> 4) & 0x03,
                &[
                    (0, "Pre Rel-7 TFT filter"),
                    (1, "Downlink only"),
                    (2, "Uplink only"),
                    (3, "Bidirectional"),
                ],
                "Reserved",
            ),
        ),
        field("Packet filter identifier", DecodedValue::Uint(u64::from(id_octet & 0x0F))),
        field("Packet filter evaluation precedence", DecodedValue::Uint(u64::from(precedence))),
        field("Components", DecodedValue::List(components)),
    ]))
}

fn packet_filter_component_name(component_type: u8) -> &'static str {
    match component_type {
        0x10 => "IPv4 remote address type",
        0x11 => "IPv4 local address type",
        0x20 => "IPv6 remote address type",
        0x21 => "IPv6 remote address/prefix length type",
        0x22 => "IPv6 local address type",
        0x23 => "IPv6 local address/prefix length type",
        0x30 => "Protocol identifier/Next header type",
        0x40 => "Single local port type",
        0x41 => "Local port range type",
        0x50 => "Single remote port type",
        0x51 => "Remote port range type",
        0x60 => "Security parameter index type",
        0x70 => "Type of service/Traffic class type",
        0x80 => "Flow label type",
        _ => "Unknown",
    }
}

// --- Relay IEs ---

/// Remote UE context list (9.9.4.20)
pub fn remote_ue_context_list(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let start = view.position();
    let declared = usize::from(view.read()?);
    let mut contexts = Vec::with_capacity(declared);

    while contexts.len() < declared && view.has_next() {
        let context_start = view.position();
        let Ok(context) = view.read().and_then(|len| view.sub_view(usize::from(len))) else {
            truncated_record(ctx, view, "Remote UE context", context_start);
            return Ok(DecodedValue::List(contexts));
        };
        match remote_ue_context(&context) {
            Ok(decoded) => contexts.push(decoded),
            Err(err) => {
                ctx.report(
                    DiagnosticKind::MalformedElement {
                        element: "Remote UE context",
                        reason: err.to_string(),
                    },
                    context.base()..context.end(),
                );
                contexts.push(DecodedValue::bytes(context.data()));
            }
        }
    }

    if contexts.len() != declared || view.has_next() {
        ctx.report(
            DiagnosticKind::WrongNumberOfElements {
                declared,
                found: contexts.len(),
            },
            start..view.end(),
        );
        let _ = view.read_remaining();
    }
    Ok(DecodedValue::List(contexts))
}

fn remote_ue_context(view: &OctetView<'_>) -> IeResult {
    let identity_count = usize::from(view.read()?);
    let mut identities = Vec::with_capacity(identity_count);
    for _ in 0..identity_count {
        let len = usize::from(view.read()?);
        expect_min_len(view, len.max(1))?;
        let identity = view.sub_view(len)?;
        let first = identity.read()?;
        let mut digits = String::new();
        if first >> 4 != 0x0F {
            digits.push(bcd_char(first >> 4));
        }
        digits.push_str(&bcd_digits(identity.read_remaining()));
        identities.push(DecodedValue::Fields(vec![
            field(
                "Type of user identity",
                lookup(
                    first & 0x07,
                    &[
                        (1, "Encrypted IMSI"),
                        (2, "IMSI"),
                        (3, "MSISDN"),
                        (4, "IMEI"),
                        (5, "IMEISV"),
                    ],
                    "Reserved",
                ),
            ),
            flag("Odd/even indication", first, 4),
            field("Identity digits", DecodedValue::Digits(digits)),
        ]));
    }

    let mut fields = vec![field("User identities", DecodedValue::List(identities))];
    if view.has_next() {
        let address_type = view.read()? & 0x07;
        let address = match address_type {
            0 => None,
            1 => Some(Ipv4Addr::from(view.read_array::<4>()?).to_string()),
            2 => Some(ipv6_interface_identifier(view.read_array::<8>()?).to_string()),
            other => {
                return Err(IeError::InvalidValue(format!("remote UE address type {other}")));
            }
        };
        fields.push(field(
            "Address type",
            lookup(
                address_type,
                &[(0, "No IP Info"), (1, "IPv4"), (2, "IPv6")],
                "Reserved",
            ),
        ));
        if let Some(address) = address {
            fields.push(field("Remote UE IP information", DecodedValue::Text(address)));
        }
    }
    Ok(DecodedValue::Fields(fields))
}

/// PKMF address (9.9.4.21)
pub fn pkmf_address(_ctx: &mut DecodeContext<'_>, view: &OctetView<'_>) -> IeResult {
    let address_type = view.read()? & 0x07;
    let address = match address_type {
        1 => {
            expect_len(view, 4)?;
            Ipv4Addr::from(view.read_array::<4>()?).to_string()
        }
        2 => {
            expect_len(view, 16)?;
            Ipv6Addr::from(view.read_array::<16>()?).to_string()
        }
        other => return Err(IeError::InvalidValue(format!("PKMF address type {other}"))),
    };
    Ok(DecodedValue::Fields(vec![
        field("Address type", lookup(address_type, &[(1, "IPv4"), (2, "IPv6")], "Reserved")),
        field("PKMF address", DecodedValue::Text(address)),
    ]))
}
