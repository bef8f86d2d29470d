//! NAS-EPS protocol enumerations
//!
//! Based on 3GPP TS 24.301 (sections 9.2, 9.3.1, 9.8, Annex A and Annex B)
//! and TS 24.007 section 11.2.3.1.1.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Protocol discriminator (low nibble of the first octet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ProtocolDiscriminator {
    /// EPS session management messages
    EpsSessionManagement = 0x02,
    /// EPS mobility management messages
    EpsMobilityManagement = 0x07,
    /// Tests procedures (TS 36.509)
    TestProcedures = 0x0F,
}

impl ProtocolDiscriminator {
    /// Returns true if `nibble` is a protocol discriminator this decoder knows.
    pub fn is_known(nibble: u8) -> bool {
        Self::try_from(nibble & 0x0F).is_ok()
    }

    /// Short protocol label.
    pub fn name(self) -> &'static str {
        match self {
            ProtocolDiscriminator::EpsSessionManagement => "ESM",
            ProtocolDiscriminator::EpsMobilityManagement => "EMM",
            ProtocolDiscriminator::TestProcedures => "Test procedures",
        }
    }
}

/// Security header type (high nibble of the first octet of an EMM message)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Default)]
#[repr(u8)]
pub enum SecurityHeaderType {
    /// Plain NAS message, not security protected
    #[default]
    Plain = 0x00,
    /// Integrity protected
    IntegrityProtected = 0x01,
    /// Integrity protected and ciphered
    IntegrityProtectedCiphered = 0x02,
    /// Integrity protected with new EPS security context
    IntegrityProtectedNewContext = 0x03,
    /// Integrity protected and ciphered with new EPS security context
    IntegrityProtectedCipheredNewContext = 0x04,
    /// Integrity protected and partially ciphered
    IntegrityProtectedPartiallyCiphered = 0x05,
}

/// EMM message types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum EmmMessageType {
    AttachRequest = 0x41,
    AttachAccept = 0x42,
    AttachComplete = 0x43,
    AttachReject = 0x44,
    DetachRequest = 0x45,
    DetachAccept = 0x46,
    TrackingAreaUpdateRequest = 0x48,
    TrackingAreaUpdateAccept = 0x49,
    TrackingAreaUpdateComplete = 0x4A,
    TrackingAreaUpdateReject = 0x4B,
    ExtendedServiceRequest = 0x4C,
    ControlPlaneServiceRequest = 0x4D,
    ServiceReject = 0x4E,
    ServiceAccept = 0x4F,
    GutiReallocationCommand = 0x50,
    GutiReallocationComplete = 0x51,
    AuthenticationRequest = 0x52,
    AuthenticationResponse = 0x53,
    AuthenticationReject = 0x54,
    IdentityRequest = 0x55,
    IdentityResponse = 0x56,
    AuthenticationFailure = 0x5C,
    SecurityModeCommand = 0x5D,
    SecurityModeComplete = 0x5E,
    SecurityModeReject = 0x5F,
    EmmStatus = 0x60,
    EmmInformation = 0x61,
    DownlinkNasTransport = 0x62,
    UplinkNasTransport = 0x63,
    CsServiceNotification = 0x64,
    DownlinkGenericNasTransport = 0x68,
    UplinkGenericNasTransport = 0x69,
}

impl EmmMessageType {
    /// Message name as used in TS 24.301 section 8.2.
    pub fn name(self) -> &'static str {
        use EmmMessageType::*;
        match self {
            AttachRequest => "Attach request",
            AttachAccept => "Attach accept",
            AttachComplete => "Attach complete",
            AttachReject => "Attach reject",
            DetachRequest => "Detach request",
            DetachAccept => "Detach accept",
            TrackingAreaUpdateRequest => "Tracking area update request",
            TrackingAreaUpdateAccept => "Tracking area update accept",
            TrackingAreaUpdateComplete => "Tracking area update complete",
            TrackingAreaUpdateReject => "Tracking area update reject",
            ExtendedServiceRequest => "Extended service request",
            ControlPlaneServiceRequest => "Control plane service request",
            ServiceReject => "Service reject",
            ServiceAccept => "Service accept",
            GutiReallocationCommand => "GUTI reallocation command",
            GutiReallocationComplete => "GUTI reallocation complete",
            AuthenticationRequest => "Authentication request",
            AuthenticationResponse => "Authentication response",
            AuthenticationReject => "Authentication reject",
            IdentityRequest => "Identity request",
            IdentityResponse => "Identity response",
            AuthenticationFailure => "Authentication failure",
            SecurityModeCommand => "Security mode command",
            SecurityModeComplete => "Security mode complete",
            SecurityModeReject => "Security mode reject",
            EmmStatus => "EMM status",
            EmmInformation => "EMM information",
            DownlinkNasTransport => "Downlink NAS transport",
            UplinkNasTransport => "Uplink NAS transport",
            CsServiceNotification => "CS service notification",
            DownlinkGenericNasTransport => "Downlink generic NAS transport",
            UplinkGenericNasTransport => "Uplink generic NAS transport",
        }
    }
}

/// ESM message types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum EsmMessageType {
    ActivateDefaultEpsBearerContextRequest = 0xC1,
    ActivateDefaultEpsBearerContextAccept = 0xC2,
    ActivateDefaultEpsBearerContextReject = 0xC3,
    ActivateDedicatedEpsBearerContextRequest = 0xC5,
    ActivateDedicatedEpsBearerContextAccept = 0xC6,
    ActivateDedicatedEpsBearerContextReject = 0xC7,
    ModifyEpsBearerContextRequest = 0xC9,
    ModifyEpsBearerContextAccept = 0xCA,
    ModifyEpsBearerContextReject = 0xCB,
    DeactivateEpsBearerContextRequest = 0xCD,
    DeactivateEpsBearerContextAccept = 0xCE,
    PdnConnectivityRequest = 0xD0,
    PdnConnectivityReject = 0xD1,
    PdnDisconnectRequest = 0xD2,
    PdnDisconnectReject = 0xD3,
    BearerResourceAllocationRequest = 0xD4,
    BearerResourceAllocationReject = 0xD5,
    BearerResourceModificationRequest = 0xD6,
    BearerResourceModificationReject = 0xD7,
    EsmInformationRequest = 0xD9,
    EsmInformationResponse = 0xDA,
    Notification = 0xDB,
    EsmDummyMessage = 0xDC,
    EsmStatus = 0xE8,
    RemoteUeReport = 0xE9,
    RemoteUeReportResponse = 0xEA,
    EsmDataTransport = 0xEB,
}

impl EsmMessageType {
    /// Message name as used in TS 24.301 section 8.3.
    pub fn name(self) -> &'static str {
        use EsmMessageType::*;
        match self {
            ActivateDefaultEpsBearerContextRequest => "Activate default EPS bearer context request",
            ActivateDefaultEpsBearerContextAccept => "Activate default EPS bearer context accept",
            ActivateDefaultEpsBearerContextReject => "Activate default EPS bearer context reject",
            ActivateDedicatedEpsBearerContextRequest => {
                "Activate dedicated EPS bearer context request"
            }
            ActivateDedicatedEpsBearerContextAccept => "Activate dedicated EPS bearer context accept",
            ActivateDedicatedEpsBearerContextReject => "Activate dedicated EPS bearer context reject",
            ModifyEpsBearerContextRequest => "Modify EPS bearer context request",
            ModifyEpsBearerContextAccept => "Modify EPS bearer context accept",
            ModifyEpsBearerContextReject => "Modify EPS bearer context reject",
            DeactivateEpsBearerContextRequest => "Deactivate EPS bearer context request",
            DeactivateEpsBearerContextAccept => "Deactivate EPS bearer context accept",
            PdnConnectivityRequest => "PDN connectivity request",
            PdnConnectivityReject => "PDN connectivity reject",
            PdnDisconnectRequest => "PDN disconnect request",
            PdnDisconnectReject => "PDN disconnect reject",
            BearerResourceAllocationRequest => "Bearer resource allocation request",
            BearerResourceAllocationReject => "Bearer resource allocation reject",
            BearerResourceModificationRequest => "Bearer resource modification request",
            BearerResourceModificationReject => "Bearer resource modification reject",
            EsmInformationRequest => "ESM information request",
            EsmInformationResponse => "ESM information response",
            Notification => "Notification",
            EsmDummyMessage => "ESM dummy message",
            EsmStatus => "ESM status",
            RemoteUeReport => "Remote UE report",
            RemoteUeReportResponse => "Remote UE report response",
            EsmDataTransport => "ESM data transport",
        }
    }
}

/// EMM cause values, TS 24.301 Annex A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum EmmCause {
    ImsiUnknownInHss = 2,
    IllegalUe = 3,
    ImeiNotAccepted = 5,
    IllegalMe = 6,
    EpsServicesNotAllowed = 7,
    EpsAndNonEpsServicesNotAllowed = 8,
    UeIdentityCannotBeDerived = 9,
    ImplicitlyDetached = 10,
    PlmnNotAllowed = 11,
    TrackingAreaNotAllowed = 12,
    RoamingNotAllowedInTrackingArea = 13,
    EpsServicesNotAllowedInPlmn = 14,
    NoSuitableCellsInTrackingArea = 15,
    MscTemporarilyNotReachable = 16,
    NetworkFailure = 17,
    CsDomainNotAvailable = 18,
    EsmFailure = 19,
    MacFailure = 20,
    SynchFailure = 21,
    Congestion = 22,
    UeSecurityCapabilitiesMismatch = 23,
    SecurityModeRejectedUnspecified = 24,
    NotAuthorizedForThisCsg = 25,
    NonEpsAuthenticationUnacceptable = 26,
    RedirectionTo5gcnRequired = 31,
    RequestedServiceOptionNotAuthorized = 35,
    CsServiceTemporarilyNotAvailable = 39,
    NoEpsBearerContextActivated = 40,
    SevereNetworkFailure = 42,
    PlmnNotAllowedAtPresentLocation = 78,
    SemanticallyIncorrectMessage = 95,
    InvalidMandatoryInformation = 96,
    MessageTypeNonExistent = 97,
    MessageTypeNotCompatible = 98,
    IeNonExistent = 99,
    ConditionalIeError = 100,
    MessageNotCompatible = 101,
    ProtocolErrorUnspecified = 111,
}

impl EmmCause {
    /// Cause text from TS 24.301 Annex A.
    pub fn name(self) -> &'static str {
        use EmmCause::*;
        match self {
            ImsiUnknownInHss => "IMSI unknown in HSS",
            IllegalUe => "Illegal UE",
            ImeiNotAccepted => "IMEI not accepted",
            IllegalMe => "Illegal ME",
            EpsServicesNotAllowed => "EPS services not allowed",
            EpsAndNonEpsServicesNotAllowed => "EPS services and non-EPS services not allowed",
            UeIdentityCannotBeDerived => "UE identity cannot be derived by the network",
            ImplicitlyDetached => "Implicitly detached",
            PlmnNotAllowed => "PLMN not allowed",
            TrackingAreaNotAllowed => "Tracking Area not allowed",
            RoamingNotAllowedInTrackingArea => "Roaming not allowed in this tracking area",
            EpsServicesNotAllowedInPlmn => "EPS services not allowed in this PLMN",
            NoSuitableCellsInTrackingArea => "No Suitable Cells In tracking area",
            MscTemporarilyNotReachable => "MSC temporarily not reachable",
            NetworkFailure => "Network failure",
            CsDomainNotAvailable => "CS domain not available",
            EsmFailure => "ESM failure",
            MacFailure => "MAC failure",
            SynchFailure => "Synch failure",
            Congestion => "Congestion",
            UeSecurityCapabilitiesMismatch => "UE security capabilities mismatch",
            SecurityModeRejectedUnspecified => "Security mode rejected, unspecified",
            NotAuthorizedForThisCsg => "Not authorized for this CSG",
            NonEpsAuthenticationUnacceptable => "Non-EPS authentication unacceptable",
            RedirectionTo5gcnRequired => "Redirection to 5GCN required",
            RequestedServiceOptionNotAuthorized => {
                "Requested service option not authorized in this PLMN"
            }
            CsServiceTemporarilyNotAvailable => "CS service temporarily not available",
            NoEpsBearerContextActivated => "No EPS bearer context activated",
            SevereNetworkFailure => "Severe network failure",
            PlmnNotAllowedAtPresentLocation => {
                "PLMN not allowed to operate at the present UE location"
            }
            SemanticallyIncorrectMessage => "Semantically incorrect message",
            InvalidMandatoryInformation => "Invalid mandatory information",
            MessageTypeNonExistent => "Message type non-existent or not implemented",
            MessageTypeNotCompatible => "Message type not compatible with the protocol state",
            IeNonExistent => "Information element non-existent or not implemented",
            ConditionalIeError => "Conditional IE error",
            MessageNotCompatible => "Message not compatible with the protocol state",
            ProtocolErrorUnspecified => "Protocol error, unspecified",
        }
    }

    /// Name for a raw cause value, "Unknown" when not listed.
    pub fn name_of(value: u8) -> &'static str {
        Self::try_from(value).map(Self::name).unwrap_or("Unknown")
    }
}

/// ESM cause values, TS 24.301 Annex B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum EsmCause {
    OperatorDeterminedBarring = 8,
    InsufficientResources = 26,
    MissingOrUnknownApn = 27,
    UnknownPdnType = 28,
    UserAuthenticationFailed = 29,
    RejectedByGateway = 30,
    RequestRejectedUnspecified = 31,
    ServiceOptionNotSupported = 32,
    ServiceOptionNotSubscribed = 33,
    ServiceOptionTemporarilyOutOfOrder = 34,
    PtiAlreadyInUse = 35,
    RegularDeactivation = 36,
    EpsQosNotAccepted = 37,
    NetworkFailure = 38,
    ReactivationRequested = 39,
    SemanticErrorInTftOperation = 41,
    SyntacticalErrorInTftOperation = 42,
    InvalidEpsBearerIdentity = 43,
    SemanticErrorsInPacketFilters = 44,
    SyntacticalErrorsInPacketFilters = 45,
    PtiMismatch = 47,
    LastPdnDisconnectionNotAllowed = 49,
    PdnTypeIpv4OnlyAllowed = 50,
    PdnTypeIpv6OnlyAllowed = 51,
    SingleAddressBearersOnlyAllowed = 52,
    EsmInformationNotReceived = 53,
    PdnConnectionDoesNotExist = 54,
    MultiplePdnConnectionsNotAllowed = 55,
    CollisionWithNetworkInitiatedRequest = 56,
    PdnTypeIpv4v6OnlyAllowed = 57,
    PdnTypeNonIpOnlyAllowed = 58,
    UnsupportedQciValue = 59,
    BearerHandlingNotSupported = 60,
    PdnTypeEthernetOnlyAllowed = 61,
    MaximumNumberOfEpsBearersReached = 65,
    RequestedApnNotSupported = 66,
    InvalidPtiValue = 81,
    SemanticallyIncorrectMessage = 95,
    InvalidMandatoryInformation = 96,
    MessageTypeNonExistent = 97,
    MessageTypeNotCompatible = 98,
    IeNonExistent = 99,
    ConditionalIeError = 100,
    MessageNotCompatible = 101,
    ProtocolErrorUnspecified = 111,
    ApnRestrictionIncompatible = 112,
    MultipleAccessesNotAllowed = 113,
}

impl EsmCause {
    /// Cause text from TS 24.301 Annex B.
    pub fn name(self) -> &'static str {
        use EsmCause::*;
        match self {
            OperatorDeterminedBarring => "Operator Determined Barring",
            InsufficientResources => "Insufficient resources",
            MissingOrUnknownApn => "Missing or unknown APN",
            UnknownPdnType => "Unknown PDN type",
            UserAuthenticationFailed => "User authentication failed",
            RejectedByGateway => "Request rejected by Serving GW or PDN GW",
            RequestRejectedUnspecified => "Request rejected, unspecified",
            ServiceOptionNotSupported => "Service option not supported",
            ServiceOptionNotSubscribed => "Requested service option not subscribed",
            ServiceOptionTemporarilyOutOfOrder => "Service option temporarily out of order",
            PtiAlreadyInUse => "PTI already in use",
            RegularDeactivation => "Regular deactivation",
            EpsQosNotAccepted => "EPS QoS not accepted",
            NetworkFailure => "Network failure",
            ReactivationRequested => "Reactivation requested",
            SemanticErrorInTftOperation => "Semantic error in the TFT operation",
            SyntacticalErrorInTftOperation => "Syntactical error in the TFT operation",
            InvalidEpsBearerIdentity => "Invalid EPS bearer identity",
            SemanticErrorsInPacketFilters => "Semantic errors in packet filter(s)",
            SyntacticalErrorsInPacketFilters => "Syntactical errors in packet filter(s)",
            PtiMismatch => "PTI mismatch",
            LastPdnDisconnectionNotAllowed => "Last PDN disconnection not allowed",
            PdnTypeIpv4OnlyAllowed => "PDN type IPv4 only allowed",
            PdnTypeIpv6OnlyAllowed => "PDN type IPv6 only allowed",
            SingleAddressBearersOnlyAllowed => "Single address bearers only allowed",
            EsmInformationNotReceived => "ESM information not received",
            PdnConnectionDoesNotExist => "PDN connection does not exist",
            MultiplePdnConnectionsNotAllowed => {
                "Multiple PDN connections for a given APN not allowed"
            }
            CollisionWithNetworkInitiatedRequest => "Collision with network initiated request",
            PdnTypeIpv4v6OnlyAllowed => "PDN type IPv4v6 only allowed",
            PdnTypeNonIpOnlyAllowed => "PDN type non IP only allowed",
            UnsupportedQciValue => "Unsupported QCI value",
            BearerHandlingNotSupported => "Bearer handling not supported",
            PdnTypeEthernetOnlyAllowed => "PDN type Ethernet only allowed",
            MaximumNumberOfEpsBearersReached => "Maximum number of EPS bearers reached",
            RequestedApnNotSupported => {
                "Requested APN not supported in current RAT and PLMN combination"
            }
            InvalidPtiValue => "Invalid PTI value",
            SemanticallyIncorrectMessage => "Semantically incorrect message",
            InvalidMandatoryInformation => "Invalid mandatory information",
            MessageTypeNonExistent => "Message type non-existent or not implemented",
            MessageTypeNotCompatible => "Message type not compatible with the protocol state",
            IeNonExistent => "Information element non-existent or not implemented",
            ConditionalIeError => "Conditional IE error",
            MessageNotCompatible => "Message not compatible with the protocol state",
            ProtocolErrorUnspecified => "Protocol error, unspecified",
            ApnRestrictionIncompatible => {
                "APN restriction value incompatible with active EPS bearer context"
            }
            MultipleAccessesNotAllowed => "Multiple accesses to a PDN connection not allowed",
        }
    }

    /// Name for a raw cause value, "Unknown" when not listed.
    pub fn name_of(value: u8) -> &'static str {
        Self::try_from(value).map(Self::name).unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_discriminator() {
        assert_eq!(
            ProtocolDiscriminator::try_from(0x07).unwrap(),
            ProtocolDiscriminator::EpsMobilityManagement
        );
        assert!(ProtocolDiscriminator::is_known(0x27));
        assert!(ProtocolDiscriminator::is_known(0x0F));
        assert!(!ProtocolDiscriminator::is_known(0x05));
        assert_eq!(ProtocolDiscriminator::EpsSessionManagement.name(), "ESM");
    }

    #[test]
    fn test_security_header_type() {
        assert_eq!(
            SecurityHeaderType::try_from(2).unwrap(),
            SecurityHeaderType::IntegrityProtectedCiphered
        );
        assert!(SecurityHeaderType::try_from(6).is_err());
        assert_eq!(u8::from(SecurityHeaderType::IntegrityProtectedPartiallyCiphered), 5);
    }

    #[test]
    fn test_message_type_names() {
        assert_eq!(EmmMessageType::try_from(0x41).unwrap().name(), "Attach request");
        assert_eq!(EmmMessageType::try_from(0x5C).unwrap(), EmmMessageType::AuthenticationFailure);
        assert!(EmmMessageType::try_from(0x47).is_err());
        assert_eq!(EsmMessageType::try_from(0xD0).unwrap().name(), "PDN connectivity request");
        assert!(EsmMessageType::try_from(0xC4).is_err());
    }

    #[test]
    fn test_cause_names() {
        assert_eq!(EmmCause::name_of(2), "IMSI unknown in HSS");
        assert_eq!(EmmCause::name_of(111), "Protocol error, unspecified");
        assert_eq!(EmmCause::name_of(1), "Unknown");
        assert_eq!(EsmCause::name_of(27), "Missing or unknown APN");
        assert_eq!(EsmCause::name_of(200), "Unknown");
    }
}
