//! ESM message catalogues (TS 24.301 8.3)

use super::{MessageBody, EMPTY};
use crate::codec::ElementSpec as E;
use crate::enums::EsmMessageType;
use crate::ies::{common, container, emm, esm, qos, spare_half_octet};

/// Body decoder for an ESM message type.
pub fn body(message_type: EsmMessageType) -> MessageBody {
    use EsmMessageType::*;
    MessageBody::Catalogue(match message_type {
        ActivateDefaultEpsBearerContextRequest => ACTIVATE_DEFAULT_EPS_BEARER_CONTEXT_REQUEST,
        ActivateDefaultEpsBearerContextAccept => PCO_ONLY,
        ActivateDefaultEpsBearerContextReject => CAUSE_AND_PCO,
        ActivateDedicatedEpsBearerContextRequest => ACTIVATE_DEDICATED_EPS_BEARER_CONTEXT_REQUEST,
        ActivateDedicatedEpsBearerContextAccept => PCO_AND_NBIFOM,
        ActivateDedicatedEpsBearerContextReject => CAUSE_PCO_AND_NBIFOM,
        ModifyEpsBearerContextRequest => MODIFY_EPS_BEARER_CONTEXT_REQUEST,
        ModifyEpsBearerContextAccept => PCO_AND_NBIFOM,
        ModifyEpsBearerContextReject => CAUSE_PCO_AND_NBIFOM,
        DeactivateEpsBearerContextRequest => DEACTIVATE_EPS_BEARER_CONTEXT_REQUEST,
        DeactivateEpsBearerContextAccept => PCO_ONLY,
        PdnConnectivityRequest => PDN_CONNECTIVITY_REQUEST,
        PdnConnectivityReject | BearerResourceAllocationReject | BearerResourceModificationReject => {
            REJECT_WITH_BACK_OFF
        }
        PdnDisconnectRequest => PDN_DISCONNECT_REQUEST,
        PdnDisconnectReject => CAUSE_AND_PCO,
        BearerResourceAllocationRequest => BEARER_RESOURCE_ALLOCATION_REQUEST,
        BearerResourceModificationRequest => BEARER_RESOURCE_MODIFICATION_REQUEST,
        EsmInformationRequest | EsmDummyMessage | RemoteUeReportResponse => EMPTY,
        EsmInformationResponse => ESM_INFORMATION_RESPONSE,
        Notification => NOTIFICATION,
        EsmStatus => CAUSE_ONLY,
        RemoteUeReport => REMOTE_UE_REPORT,
        EsmDataTransport => ESM_DATA_TRANSPORT,
    })
}

const ACTIVATE_DEFAULT_EPS_BEARER_CONTEXT_REQUEST: &[E] = &[
    E::lv("EPS quality of service", qos::eps_quality_of_service),
    E::lv("Access point name", esm::access_point_name),
    E::lv("PDN address", esm::pdn_address),
    E::tlv(0x5D, "Transaction identifier", common::transaction_identifier),
    E::tlv(0x30, "Negotiated QoS", common::negotiated_qos),
    E::tv(0x32, "Negotiated LLC SAPI", 1, common::llc_sapi),
    E::tv_short(0x8, "Radio priority", common::radio_priority),
    E::tlv(0x34, "Packet flow Identifier", common::packet_flow_identifier),
    E::tlv(0x5E, "APN-AMBR", qos::apn_aggregate_maximum_bit_rate),
    E::tv(0x58, "ESM cause", 1, esm::esm_cause),
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tv_short(0xB, "Connectivity type", esm::connectivity_type),
    E::tv_short(0xC, "WLAN offload indication", esm::wlan_offload_acceptability),
    E::tlv(0x33, "NBIFOM container", container::nbifom_container),
    E::tlv(0x66, "Header compression configuration", common::header_compression_configuration),
    E::tv_short(0x9, "Control plane only indication", esm::control_plane_only_indication),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
    E::tlv(0x6E, "Serving PLMN rate control", esm::serving_plmn_rate_control),
    E::tlv(0x5F, "Extended APN-AMBR", qos::extended_apn_aggregate_maximum_bit_rate),
];

const PCO_ONLY: &[E] = &[
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
];

const CAUSE_AND_PCO: &[E] = &[
    E::v("ESM cause", 1, esm::esm_cause),
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
];

const PCO_AND_NBIFOM: &[E] = &[
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tlv(0x33, "NBIFOM container", container::nbifom_container),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
];

const CAUSE_PCO_AND_NBIFOM: &[E] = &[
    E::v("ESM cause", 1, esm::esm_cause),
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tlv(0x33, "NBIFOM container", container::nbifom_container),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
];

const ACTIVATE_DEDICATED_EPS_BEARER_CONTEXT_REQUEST: &[E] = &[
    E::half_low("Linked EPS bearer identity", esm::linked_eps_bearer_identity),
    E::half_high("Spare half octet", spare_half_octet),
    E::lv("EPS QoS", qos::eps_quality_of_service),
    E::lv("TFT", esm::traffic_flow_template),
    E::tlv(0x5D, "Transaction identifier", common::transaction_identifier),
    E::tlv(0x30, "Negotiated QoS", common::negotiated_qos),
    E::tv(0x32, "Negotiated LLC SAPI", 1, common::llc_sapi),
    E::tv_short(0x8, "Radio priority", common::radio_priority),
    E::tlv(0x34, "Packet flow Identifier", common::packet_flow_identifier),
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tv_short(0xC, "WLAN offload indication", esm::wlan_offload_acceptability),
    E::tlv(0x33, "NBIFOM container", container::nbifom_container),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
    E::tlv(0x5C, "Extended EPS QoS", qos::extended_quality_of_service),
];

const MODIFY_EPS_BEARER_CONTEXT_REQUEST: &[E] = &[
    E::tlv(0x5B, "New EPS QoS", qos::eps_quality_of_service),
    E::tlv(0x36, "TFT", esm::traffic_flow_template),
    E::tlv(0x30, "New QoS", common::negotiated_qos),
    E::tv(0x32, "Negotiated LLC SAPI", 1, common::llc_sapi),
    E::tv_short(0x8, "Radio priority", common::radio_priority),
    E::tlv(0x34, "Packet flow Identifier", common::packet_flow_identifier),
    E::tlv(0x5E, "APN-AMBR", qos::apn_aggregate_maximum_bit_rate),
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tv_short(0xC, "WLAN offload indication", esm::wlan_offload_acceptability),
    E::tlv(0x66, "Header compression configuration", common::header_compression_configuration),
    E::tlv(0x33, "NBIFOM container", container::nbifom_container),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
    E::tlv(0x5F, "Extended APN-AMBR", qos::extended_apn_aggregate_maximum_bit_rate),
    E::tlv(0x5C, "Extended EPS QoS", qos::extended_quality_of_service),
];

const DEACTIVATE_EPS_BEARER_CONTEXT_REQUEST: &[E] = &[
    E::v("ESM cause", 1, esm::esm_cause),
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tlv(0x37, "T3396 value", common::gprs_timer3),
    E::tv_short(0xC, "WLAN offload indication", esm::wlan_offload_acceptability),
    E::tlv(0x33, "NBIFOM container", container::nbifom_container),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
];

const PDN_CONNECTIVITY_REQUEST: &[E] = &[
    E::half_low("Request type", esm::request_type),
    E::half_high("PDN type", esm::pdn_type),
    E::tv_short(0xD, "ESM information transfer flag", esm::esm_information_transfer_flag),
    E::tlv(0x28, "Access point name", esm::access_point_name),
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tv_short(0xC, "Device properties", emm::device_properties),
    E::tlv(0x33, "NBIFOM container", container::nbifom_container),
    E::tlv(0x66, "Header compression configuration", common::header_compression_configuration),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
];

const REJECT_WITH_BACK_OFF: &[E] = &[
    E::v("ESM cause", 1, esm::esm_cause),
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tlv(0x37, "Back-off timer value", common::gprs_timer3),
    E::tlv(0x6B, "Re-attempt indicator", esm::re_attempt_indicator),
    E::tlv(0x33, "NBIFOM container", container::nbifom_container),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
];

const PDN_DISCONNECT_REQUEST: &[E] = &[
    E::half_low("Linked EPS bearer identity", esm::linked_eps_bearer_identity),
    E::half_high("Spare half octet", spare_half_octet),
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
];

const BEARER_RESOURCE_ALLOCATION_REQUEST: &[E] = &[
    E::half_low("Linked EPS bearer identity", esm::linked_eps_bearer_identity),
    E::half_high("Spare half octet", spare_half_octet),
    E::lv("Traffic aggregate description", esm::traffic_flow_template),
    E::lv("Required traffic flow QoS", qos::eps_quality_of_service),
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tv_short(0xC, "Device properties", emm::device_properties),
    E::tlv(0x33, "NBIFOM container", container::nbifom_container),
    E::tlv(0x5C, "Extended EPS QoS", qos::extended_quality_of_service),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
];

const BEARER_RESOURCE_MODIFICATION_REQUEST: &[E] = &[
    E::half_low("EPS bearer identity for packet filter", esm::linked_eps_bearer_identity),
    E::half_high("Spare half octet", spare_half_octet),
    E::lv("Traffic aggregate description", esm::traffic_flow_template),
    E::tlv(0x5B, "Required traffic flow QoS", qos::eps_quality_of_service),
    E::tv(0x58, "ESM cause", 1, esm::esm_cause),
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tv_short(0xC, "Device properties", emm::device_properties),
    E::tlv(0x33, "NBIFOM container", container::nbifom_container),
    E::tlv(0x66, "Header compression configuration", common::header_compression_configuration),
    E::tlv(0x5C, "Extended EPS QoS", qos::extended_quality_of_service),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
];

const ESM_INFORMATION_RESPONSE: &[E] = &[
    E::tlv(0x28, "Access point name", esm::access_point_name),
    E::tlv(0x27, "Protocol configuration options", common::protocol_configuration_options),
    E::tlve(0x7B, "Extended protocol configuration options", common::protocol_configuration_options),
];

const NOTIFICATION: &[E] = &[E::lv("Notification indicator", esm::notification_indicator)];

const CAUSE_ONLY: &[E] = &[E::v("ESM cause", 1, esm::esm_cause)];

const REMOTE_UE_REPORT: &[E] = &[
    E::tlve(0x79, "Remote UE context connected", esm::remote_ue_context_list),
    E::tlve(0x7A, "Remote UE context disconnected", esm::remote_ue_context_list),
    E::tlv(0x6F, "ProSe key management function address", esm::pkmf_address),
];

const ESM_DATA_TRANSPORT: &[E] = &[
    E::lve("User data container", container::user_data_container),
    E::tv_short(0xF, "Release assistance indication", esm::release_assistance_indication),
];
