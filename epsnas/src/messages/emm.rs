//! EMM message catalogues (TS 24.301 8.2)

use epsnas_common::{Direction, OctetView};

use super::{MessageBody, EMPTY};
use crate::codec::{decode_elements, DecodeContext, ElementSpec as E, Flow};
use crate::enums::EmmMessageType;
use crate::ies::{common, container, emm, raw, spare_half_octet, uint};
use crate::value::DecodedElement;

/// Body decoder for an EMM message type.
pub fn body(message_type: EmmMessageType) -> MessageBody {
    use EmmMessageType::*;
    match message_type {
        AttachRequest => MessageBody::Catalogue(ATTACH_REQUEST),
        AttachAccept => MessageBody::Catalogue(ATTACH_ACCEPT),
        AttachComplete => MessageBody::Catalogue(ATTACH_COMPLETE),
        AttachReject => MessageBody::Catalogue(ATTACH_REJECT),
        DetachRequest => MessageBody::Custom(detach_request),
        DetachAccept => MessageBody::Catalogue(EMPTY),
        TrackingAreaUpdateRequest => MessageBody::Catalogue(TRACKING_AREA_UPDATE_REQUEST),
        TrackingAreaUpdateAccept => MessageBody::Catalogue(TRACKING_AREA_UPDATE_ACCEPT),
        TrackingAreaUpdateComplete => MessageBody::Catalogue(EMPTY),
        TrackingAreaUpdateReject => MessageBody::Catalogue(TRACKING_AREA_UPDATE_REJECT),
        ExtendedServiceRequest => MessageBody::Catalogue(EXTENDED_SERVICE_REQUEST),
        ControlPlaneServiceRequest => MessageBody::Catalogue(CONTROL_PLANE_SERVICE_REQUEST),
        ServiceReject => MessageBody::Catalogue(SERVICE_REJECT),
        ServiceAccept => MessageBody::Catalogue(SERVICE_ACCEPT),
        GutiReallocationCommand => MessageBody::Catalogue(GUTI_REALLOCATION_COMMAND),
        GutiReallocationComplete => MessageBody::Catalogue(EMPTY),
        AuthenticationRequest => MessageBody::Catalogue(AUTHENTICATION_REQUEST),
        AuthenticationResponse => MessageBody::Catalogue(AUTHENTICATION_RESPONSE),
        AuthenticationReject => MessageBody::Catalogue(EMPTY),
        IdentityRequest => MessageBody::Catalogue(IDENTITY_REQUEST),
        IdentityResponse => MessageBody::Catalogue(IDENTITY_RESPONSE),
        AuthenticationFailure => MessageBody::Catalogue(AUTHENTICATION_FAILURE),
        SecurityModeCommand => MessageBody::Catalogue(SECURITY_MODE_COMMAND),
        SecurityModeComplete => MessageBody::Catalogue(SECURITY_MODE_COMPLETE),
        SecurityModeReject => MessageBody::Catalogue(CAUSE_ONLY),
        EmmStatus => MessageBody::Catalogue(CAUSE_ONLY),
        EmmInformation => MessageBody::Catalogue(EMM_INFORMATION),
        DownlinkNasTransport | UplinkNasTransport => MessageBody::Catalogue(NAS_TRANSPORT),
        CsServiceNotification => MessageBody::Catalogue(CS_SERVICE_NOTIFICATION),
        DownlinkGenericNasTransport | UplinkGenericNasTransport => {
            MessageBody::Catalogue(GENERIC_NAS_TRANSPORT)
        }
    }
}

const ATTACH_REQUEST: &[E] = &[
    E::half_low("EPS attach type", emm::eps_attach_type),
    E::half_high("NAS key set identifier", common::nas_key_set_identifier),
    E::lv("EPS mobile identity", emm::eps_mobile_identity),
    E::lv("UE network capability", emm::ue_network_capability),
    E::lve("ESM message container", container::esm_message_container),
    E::tv(0x19, "Old P-TMSI signature", 3, common::p_tmsi_signature),
    E::tlv(0x50, "Additional GUTI", emm::eps_mobile_identity),
    E::tv(0x52, "Last visited registered TAI", 5, emm::tracking_area_identity),
    E::tv(0x5C, "DRX parameter", 2, common::drx_parameter),
    E::tlv(0x31, "MS network capability", common::ms_network_capability),
    E::tv(0x13, "Old location area identification", 5, common::location_area_identification),
    E::tv_short(0x9, "TMSI status", common::tmsi_status),
    E::tlv(0x11, "Mobile station classmark 2", common::ms_classmark),
    E::tlv(0x20, "Mobile station classmark 3", common::ms_classmark),
    E::tlv(0x40, "Supported Codecs", common::supported_codecs),
    E::tv_short(0xF, "Additional update type", emm::additional_update_type),
    E::tlv(0x5D, "Voice domain preference and UE's usage setting", common::voice_domain_preference),
    E::tv_short(0xD, "Device properties", emm::device_properties),
    E::tv_short(0xE, "Old GUTI type", emm::guti_type),
    E::tv_short(0xC, "MS network feature support", emm::ms_network_feature_support),
    E::tlv(0x10, "TMSI based NRI container", raw),
    E::tlv(0x6A, "T3324 value", common::gprs_timer),
    E::tlv(0x5E, "T3412 extended value", common::gprs_timer3),
    E::tlv(0x6E, "Extended DRX parameters", emm::extended_drx_parameters),
    E::tlv(0x28, "Paging restriction", emm::paging_restriction),
];

const ATTACH_ACCEPT: &[E] = &[
    E::half_low("EPS attach result", emm::eps_attach_result),
    E::half_high("Spare half octet", spare_half_octet),
    E::v("T3412 value", 1, common::gprs_timer),
    E::lv("TAI list", emm::tracking_area_identity_list),
    E::lve("ESM message container", container::esm_message_container),
    E::tlv(0x50, "GUTI", emm::eps_mobile_identity),
    E::tv(0x13, "Location area identification", 5, common::location_area_identification),
    E::tlv(0x23, "MS identity", common::mobile_identity),
    E::tv(0x53, "EMM cause", 1, emm::emm_cause),
    E::tv(0x17, "T3402 value", 1, common::gprs_timer),
    E::tv(0x59, "T3423 value", 1, common::gprs_timer),
    E::tlv(0x4A, "Equivalent PLMNs", common::plmn_list),
    E::tlv(0x34, "Emergency number list", common::emergency_number_list),
    E::tlv(0x64, "EPS network feature support", emm::eps_network_feature_support),
    E::tv_short(0xF, "Additional update result", emm::additional_update_result),
    E::tlv(0x5E, "T3412 extended value", common::gprs_timer3),
    E::tlv(0x6A, "T3324 value", common::gprs_timer),
    E::tlv(0x6E, "Extended DRX parameters", emm::extended_drx_parameters),
    E::tlv(0x65, "DCN-ID", uint),
    E::tv_short(0xE, "SMS services status", emm::sms_services_status),
    E::tv_short(0xD, "Non-3GPP NW provided policies", emm::network_policy),
    E::tlv(0x6B, "T3448 value", common::gprs_timer),
    E::tv_short(0xC, "Network policy", emm::network_policy),
    E::tlv(0x6C, "T3447 value", common::gprs_timer3),
    E::tlve(0x7A, "Extended emergency number list", common::extended_emergency_number_list),
    E::tlve(0x7C, "Ciphering key data", emm::ciphering_key_data),
];

const ATTACH_COMPLETE: &[E] = &[E::lve("ESM message container", container::esm_message_container)];

const ATTACH_REJECT: &[E] = &[
    E::v("EMM cause", 1, emm::emm_cause),
    E::tlve(0x78, "ESM message container", container::esm_message_container),
    E::tlv(0x5F, "T3346 value", common::gprs_timer),
    E::tlv(0x16, "T3402 value", common::gprs_timer),
    E::tv_short(0xA, "Extended EMM cause", emm::extended_emm_cause),
];

const DETACH_REQUEST_UPLINK: &[E] = &[
    E::half_low("Detach type", emm::detach_type_uplink),
    E::half_high("NAS key set identifier", common::nas_key_set_identifier),
    E::lv("EPS mobile identity", emm::eps_mobile_identity),
];

const DETACH_REQUEST_DOWNLINK: &[E] = &[
    E::half_low("Detach type", emm::detach_type_downlink),
    E::half_high("Spare half octet", spare_half_octet),
    E::tv(0x53, "EMM cause", 1, emm::emm_cause),
];

/// Detach request has a UE-originated and a network-originated shape.
///
/// Without a direction hint the uplink shape is assumed when the length of
/// its EPS mobile identity accounts for exactly the rest of the message.
fn detach_request(ctx: &mut DecodeContext<'_>, view: &OctetView<'_>, out: &mut Vec<DecodedElement>) -> Flow {
    let uplink = match ctx.direction() {
        Direction::Uplink => true,
        Direction::Downlink => false,
        Direction::Unknown => view
            .peek_at(1)
            .is_some_and(|len| usize::from(len) + 2 == view.remaining()),
    };
    let catalogue = if uplink {
        DETACH_REQUEST_UPLINK
    } else {
        DETACH_REQUEST_DOWNLINK
    };
    decode_elements(ctx, view, catalogue, out)
}

const TRACKING_AREA_UPDATE_REQUEST: &[E] = &[
    E::half_low("EPS update type", emm::eps_update_type),
    E::half_high("NAS key set identifier", common::nas_key_set_identifier),
    E::lv("Old GUTI", emm::eps_mobile_identity),
    E::tv_short(0xB, "Non-current native NAS key set identifier", common::nas_key_set_identifier),
    E::tv_short(0x8, "GPRS ciphering key sequence number", common::ciphering_key_sequence_number),
    E::tv(0x19, "Old P-TMSI signature", 3, common::p_tmsi_signature),
    E::tlv(0x50, "Additional GUTI", emm::eps_mobile_identity),
    E::tv(0x55, "NonceUE", 4, emm::nonce),
    E::tlv(0x58, "UE network capability", emm::ue_network_capability),
    E::tv(0x52, "Last visited registered TAI", 5, emm::tracking_area_identity),
    E::tv(0x5C, "DRX parameter", 2, common::drx_parameter),
    E::tv_short(0xA, "UE radio capability information update needed", emm::ue_radio_capability_update_needed),
    E::tlv(0x57, "EPS bearer context status", emm::eps_bearer_context_status),
    E::tlv(0x31, "MS network capability", common::ms_network_capability),
    E::tv(0x13, "Old location area identification", 5, common::location_area_identification),
    E::tv_short(0x9, "TMSI status", common::tmsi_status),
    E::tlv(0x11, "Mobile station classmark 2", common::ms_classmark),
    E::tlv(0x20, "Mobile station classmark 3", common::ms_classmark),
    E::tlv(0x40, "Supported Codecs", common::supported_codecs),
    E::tv_short(0xF, "Additional update type", emm::additional_update_type),
    E::tlv(0x5D, "Voice domain preference and UE's usage setting", common::voice_domain_preference),
    E::tv_short(0xE, "Old GUTI type", emm::guti_type),
    E::tv_short(0xD, "Device properties", emm::device_properties),
    E::tv_short(0xC, "MS network feature support", emm::ms_network_feature_support),
    E::tlv(0x10, "TMSI based NRI container", raw),
    E::tlv(0x6A, "T3324 value", common::gprs_timer),
    E::tlv(0x5E, "T3412 extended value", common::gprs_timer3),
    E::tlv(0x6E, "Extended DRX parameters", emm::extended_drx_parameters),
    E::tlv(0x28, "Paging restriction", emm::paging_restriction),
];

const TRACKING_AREA_UPDATE_ACCEPT: &[E] = &[
    E::half_low("EPS update result", emm::eps_update_result),
    E::half_high("Spare half octet", spare_half_octet),
    E::tv(0x5A, "T3412 value", 1, common::gprs_timer),
    E::tlv(0x50, "GUTI", emm::eps_mobile_identity),
    E::tlv(0x54, "TAI list", emm::tracking_area_identity_list),
    E::tlv(0x57, "EPS bearer context status", emm::eps_bearer_context_status),
    E::tv(0x13, "Location area identification", 5, common::location_area_identification),
    E::tlv(0x23, "MS identity", common::mobile_identity),
    E::tv(0x53, "EMM cause", 1, emm::emm_cause),
    E::tv(0x17, "T3402 value", 1, common::gprs_timer),
    E::tv(0x59, "T3423 value", 1, common::gprs_timer),
    E::tlv(0x4A, "Equivalent PLMNs", common::plmn_list),
    E::tlv(0x34, "Emergency number list", common::emergency_number_list),
    E::tlv(0x64, "EPS network feature support", emm::eps_network_feature_support),
    E::tv_short(0xF, "Additional update result", emm::additional_update_result),
    E::tlv(0x5E, "T3412 extended value", common::gprs_timer3),
    E::tlv(0x6A, "T3324 value", common::gprs_timer),
    E::tlv(0x6E, "Extended DRX parameters", emm::extended_drx_parameters),
    E::tlv(0x68, "Header compression configuration status", common::header_compression_configuration_status),
    E::tlv(0x65, "DCN-ID", uint),
    E::tv_short(0xE, "SMS services status", emm::sms_services_status),
    E::tv_short(0xD, "Non-3GPP NW provided policies", emm::network_policy),
    E::tlv(0x6B, "T3448 value", common::gprs_timer),
    E::tv_short(0xC, "Network policy", emm::network_policy),
    E::tlv(0x6C, "T3447 value", common::gprs_timer3),
    E::tlve(0x7A, "Extended emergency number list", common::extended_emergency_number_list),
    E::tlve(0x7C, "Ciphering key data", emm::ciphering_key_data),
];

const TRACKING_AREA_UPDATE_REJECT: &[E] = &[
    E::v("EMM cause", 1, emm::emm_cause),
    E::tlv(0x5F, "T3346 value", common::gprs_timer),
    E::tv_short(0xA, "Extended EMM cause", emm::extended_emm_cause),
];

const EXTENDED_SERVICE_REQUEST: &[E] = &[
    E::half_low("Service type", emm::service_type),
    E::half_high("NAS key set identifier", common::nas_key_set_identifier),
    E::lv("M-TMSI", common::mobile_identity),
    E::tv_short(0xB, "CSFB response", emm::csfb_response),
    E::tlv(0x57, "EPS bearer context status", emm::eps_bearer_context_status),
    E::tv_short(0xD, "Device properties", emm::device_properties),
    E::tlv(0x28, "Paging restriction", emm::paging_restriction),
];

const CONTROL_PLANE_SERVICE_REQUEST: &[E] = &[
    E::half_low("Control plane service type", emm::control_plane_service_type),
    E::half_high("NAS key set identifier", common::nas_key_set_identifier),
    E::tlve(0x78, "ESM message container", container::esm_message_container),
    E::tlve(0x67, "NAS message container", container::nas_message_container),
    E::tlv(0x57, "EPS bearer context status", emm::eps_bearer_context_status),
    E::tv_short(0xD, "Device properties", emm::device_properties),
    E::tlv(0x28, "Paging restriction", emm::paging_restriction),
];

const SERVICE_REJECT: &[E] = &[
    E::v("EMM cause", 1, emm::emm_cause),
    E::tv(0x5B, "T3442 value", 1, common::gprs_timer),
    E::tlv(0x5F, "T3346 value", common::gprs_timer),
    E::tlv(0x6B, "T3448 value", common::gprs_timer),
];

const SERVICE_ACCEPT: &[E] = &[
    E::tlv(0x57, "EPS bearer context status", emm::eps_bearer_context_status),
    E::tlv(0x6B, "T3448 value", common::gprs_timer),
];

const GUTI_REALLOCATION_COMMAND: &[E] = &[
    E::lv("GUTI", emm::eps_mobile_identity),
    E::tlv(0x54, "TAI list", emm::tracking_area_identity_list),
    E::tlv(0x65, "DCN-ID", uint),
];

const AUTHENTICATION_REQUEST: &[E] = &[
    E::half_low("NAS key set identifierASME", common::nas_key_set_identifier),
    E::half_high("Spare half octet", spare_half_octet),
    E::v("Authentication parameter RAND", 16, emm::authentication_parameter),
    E::lv("Authentication parameter AUTN", emm::authentication_parameter),
];

const AUTHENTICATION_RESPONSE: &[E] = &[E::lv(
    "Authentication response parameter",
    emm::authentication_response_parameter,
)];

const AUTHENTICATION_FAILURE: &[E] = &[
    E::v("EMM cause", 1, emm::emm_cause),
    E::tlv(0x30, "Authentication failure parameter", raw),
];

const IDENTITY_REQUEST: &[E] = &[
    E::half_low("Identity type", emm::identity_type_2),
    E::half_high("Spare half octet", spare_half_octet),
];

const IDENTITY_RESPONSE: &[E] = &[E::lv("Mobile identity", common::mobile_identity)];

const SECURITY_MODE_COMMAND: &[E] = &[
    E::v("Selected NAS security algorithms", 1, emm::nas_security_algorithms),
    E::half_low("NAS key set identifier", common::nas_key_set_identifier),
    E::half_high("Spare half octet", spare_half_octet),
    E::lv("Replayed UE security capabilities", emm::ue_security_capability),
    E::tv_short(0xC, "IMEISV request", emm::imeisv_request),
    E::tv(0x55, "Replayed nonceUE", 4, emm::nonce),
    E::tv(0x56, "NonceMME", 4, emm::nonce),
    E::tlv(0x4F, "HashMME", raw),
    E::tlv(0x6F, "Replayed UE additional security capability", raw),
];

const SECURITY_MODE_COMPLETE: &[E] = &[
    E::tlv(0x23, "IMEISV", common::mobile_identity),
    E::tlve(0x79, "Replayed NAS message container", container::replayed_nas_message_container),
];

const CAUSE_ONLY: &[E] = &[E::v("EMM cause", 1, emm::emm_cause)];

const EMM_INFORMATION: &[E] = &[
    E::tlv(0x43, "Full name for network", common::network_name),
    E::tlv(0x45, "Short name for network", common::network_name),
    E::tv(0x46, "Local time zone", 1, common::time_zone),
    E::tv(0x47, "Universal time and local time zone", 7, common::time_zone_and_time),
    E::tlv(0x49, "Network daylight saving time", common::daylight_saving_time),
];

const NAS_TRANSPORT: &[E] = &[E::lv("NAS message container", container::nas_message_container)];

const CS_SERVICE_NOTIFICATION: &[E] = &[
    E::v("Paging identity", 1, emm::paging_identity),
    E::tlv(0x60, "CLI", common::calling_line_identity),
    E::tv(0x61, "SS Code", 1, uint),
    E::tv(0x62, "LCS indicator", 1, common::lcs_indicator),
    E::tlv(0x63, "LCS client identity", common::lcs_client_identity),
];

const GENERIC_NAS_TRANSPORT: &[E] = &[
    E::v("Generic message container type", 1, container::generic_message_container_type),
    E::lve("Generic message container", container::generic_message_container),
    E::tlv(0x65, "Additional information", raw),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Presence;
    use crate::value::DecodedValue;
    use epsnas_common::DecoderConfig;

    fn decode_body(message_type: EmmMessageType, direction: Direction, data: &[u8]) -> (Vec<DecodedElement>, Flow) {
        let config = DecoderConfig::default();
        let mut ctx = DecodeContext::new(&config, None, direction);
        let view = OctetView::new(data);
        let mut out = Vec::new();
        let flow = body(message_type).decode(&mut ctx, &view, &mut out);
        (out, flow)
    }

    #[test]
    fn test_catalogue_tags_are_unique() {
        let catalogues = [
            ATTACH_REQUEST,
            ATTACH_ACCEPT,
            TRACKING_AREA_UPDATE_REQUEST,
            TRACKING_AREA_UPDATE_ACCEPT,
            EXTENDED_SERVICE_REQUEST,
            CONTROL_PLANE_SERVICE_REQUEST,
            SECURITY_MODE_COMMAND,
            EMM_INFORMATION,
            CS_SERVICE_NOTIFICATION,
        ];
        for catalogue in catalogues {
            let mut seen = Vec::new();
            for spec in catalogue {
                let tag = match spec.presence {
                    Presence::Optional(tag) => Some(tag),
                    Presence::OptionalShort(nibble) => Some(nibble << 4),
                    Presence::Mandatory => None,
                };
                if let Some(tag) = tag {
                    assert!(!seen.contains(&tag), "duplicate tag 0x{tag:02x} ({})", spec.label);
                    seen.push(tag);
                }
            }
        }
    }

    #[test]
    fn test_detach_request_direction() {
        let (dl, _) = decode_body(EmmMessageType::DetachRequest, Direction::Downlink, &[0x02, 0x53, 0x02]);
        assert_eq!(dl[2].value.meaning(), Some("IMSI unknown in HSS"));

        let identity = [0x09, 0xF6, 0x02, 0xF8, 0x39, 0x80, 0x01, 0x01, 0xC0, 0x00, 0x0A, 0x2D];
        let mut ul_body = vec![0x0B, 0x0B];
        ul_body.extend_from_slice(&identity[1..]);
        let (ul, flow) = decode_body(EmmMessageType::DetachRequest, Direction::Uplink, &ul_body);
        assert_eq!(flow, Flow::Done);
        assert_eq!(ul[2].label, "EPS mobile identity");
    }

    #[test]
    fn test_detach_request_unknown_direction_heuristic() {
        // Uplink shape: identity length 0x0B covers the rest
        let mut data = vec![0x01, 0x0B, 0xF6, 0x02, 0xF8, 0x39, 0x80, 0x01, 0x01, 0xC0, 0x00, 0x0A, 0x2D];
        let (elements, _) = decode_body(EmmMessageType::DetachRequest, Direction::Unknown, &data);
        assert_eq!(elements[2].label, "EPS mobile identity");
        assert_eq!(
            elements[0].value.field("Type of detach").and_then(|v| v.meaning()),
            Some("EPS detach")
        );

        // Downlink shape
        data = vec![0x01, 0x53, 0x07];
        let (elements, _) = decode_body(EmmMessageType::DetachRequest, Direction::Unknown, &data);
        assert_eq!(elements[2].label, "EMM cause");
        assert_eq!(
            elements[0].value.field("Type of detach").and_then(|v| v.meaning()),
            Some("Re-attach required")
        );
    }

    #[test]
    fn test_extended_service_request_paging_restriction() {
        // Mobile terminating CS fallback, M-TMSI, then paging restricted
        // except for the PDN connection on bearer 6
        let data = [0x01, 0x05, 0xF4, 0x12, 0x34, 0x56, 0x78, 0x28, 0x03, 0x03, 0x40, 0x00];
        let (elements, flow) = decode_body(EmmMessageType::ExtendedServiceRequest, Direction::Uplink, &data);
        assert_eq!(flow, Flow::Done);
        let restriction = elements.iter().find(|e| e.label == "Paging restriction").unwrap();
        assert_eq!(restriction.range, 7..12);
        assert_eq!(
            restriction.value.field("Paging restriction type").and_then(|v| v.meaning()),
            Some("All paging is restricted except for specified PDN connection(s)")
        );
        let bearers = restriction.value.field("EPS bearer context(s) allowed to be paged").unwrap();
        assert_eq!(bearers.field("EBI(6)"), Some(&DecodedValue::Flag(true)));
    }

    #[test]
    fn test_generic_nas_transport_lpp() {
        let (elements, flow) = decode_body(
            EmmMessageType::DownlinkGenericNasTransport,
            Direction::Downlink,
            &[0x01, 0x00, 0x02, 0x92, 0x2B, 0x65, 0x01, 0x07],
        );
        assert_eq!(flow, Flow::Done);
        assert_eq!(elements[1].value, DecodedValue::handoff("lpp", &[0x92, 0x2B]));
        assert_eq!(elements[2].value, DecodedValue::bytes(&[0x07]));
    }
}
