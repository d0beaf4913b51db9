//! ICMPv6 messages.
//!
//! Only the basic header (type, code, checksum) is modelled. The type-specific
//! fields and the message body are left to an opaque payload layer.

use core::fmt;

mod packet;
pub use packet::{Icmpv6Packet, ICMPV6_HEADER_LEN, ICMPV6_HEADER_TEMPLATE};

/// The named ICMPv6 message kinds.
///
/// See https://www.iana.org/assignments/icmpv6-parameters/icmpv6-parameters.xhtml
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icmpv6MsgKind {
    /// Destination unreachable (1).
    DestUnreachable,
    /// Packet too big (2).
    PacketTooBig,
    /// Time exceeded (3).
    TimeExceeded,
    /// Parameter problem (4).
    ParamProblem,
    /// Echo request (128).
    EchoRequest,
    /// Echo reply (129).
    EchoReply,
    /// Multicast listener query (130).
    MulticastListenerQuery,
    /// Multicast listener report (131).
    MulticastListenerReport,
    /// Multicast listener done (132).
    MulticastListenerDone,
    /// Router solicitation (133).
    RouterSolicitation,
    /// Router advertisement (134).
    RouterAdvertisement,
    /// Neighbor solicitation (135).
    NeighborSolicitation,
    /// Neighbor advertisement (136).
    NeighborAdvertisement,
    /// Redirect (137).
    Redirect,
    /// Router renumbering (138).
    RouterRenumbering,
    /// Node information query (139).
    NodeInfoQuery,
    /// Node information response (140).
    NodeInfoResponse,
    /// Inverse neighbor discovery solicitation (141).
    InverseNdSolicitation,
    /// Inverse neighbor discovery advertisement (142).
    InverseNdAdvertisement,
    /// Version 2 multicast listener report (143).
    MulticastListenerReportV2,
    /// Home agent address discovery request (144).
    HomeAgentAddrDiscoveryRequest,
    /// Home agent address discovery reply (145).
    HomeAgentAddrDiscoveryReply,
    /// Mobile prefix solicitation (146).
    MobilePrefixSolicitation,
    /// Mobile prefix advertisement (147).
    MobilePrefixAdvertisement,
    /// Certification path solicitation (148).
    CertPathSolicitation,
    /// Certification path advertisement (149).
    CertPathAdvertisement,
    /// Multicast router advertisement (151).
    MulticastRouterAdvertisement,
    /// Multicast router solicitation (152).
    MulticastRouterSolicitation,
    /// Multicast router termination (153).
    MulticastRouterTermination,
    /// FMIPv6 messages (154).
    Fmipv6,
    /// RPL control message (155).
    RplControl,
    /// ILNPv6 locator update (156).
    Ilnpv6LocatorUpdate,
    /// Duplicate address request (157).
    DuplicateAddrRequest,
    /// Duplicate address confirmation (158).
    DuplicateAddrConfirm,
    /// MPL control message (159).
    MplControl,
    /// Any type value without a name, including 0, 150 and everything above 159.
    Unsupported,
}

impl Icmpv6MsgKind {
    /// Map a raw type byte to its kind. Total over all 256 values.
    pub const fn from_type(msg_type: u8) -> Self {
        match msg_type {
            1 => Self::DestUnreachable,
            2 => Self::PacketTooBig,
            3 => Self::TimeExceeded,
            4 => Self::ParamProblem,
            128 => Self::EchoRequest,
            129 => Self::EchoReply,
            130 => Self::MulticastListenerQuery,
            131 => Self::MulticastListenerReport,
            132 => Self::MulticastListenerDone,
            133 => Self::RouterSolicitation,
            134 => Self::RouterAdvertisement,
            135 => Self::NeighborSolicitation,
            136 => Self::NeighborAdvertisement,
            137 => Self::Redirect,
            138 => Self::RouterRenumbering,
            139 => Self::NodeInfoQuery,
            140 => Self::NodeInfoResponse,
            141 => Self::InverseNdSolicitation,
            142 => Self::InverseNdAdvertisement,
            143 => Self::MulticastListenerReportV2,
            144 => Self::HomeAgentAddrDiscoveryRequest,
            145 => Self::HomeAgentAddrDiscoveryReply,
            146 => Self::MobilePrefixSolicitation,
            147 => Self::MobilePrefixAdvertisement,
            148 => Self::CertPathSolicitation,
            149 => Self::CertPathAdvertisement,
            151 => Self::MulticastRouterAdvertisement,
            152 => Self::MulticastRouterSolicitation,
            153 => Self::MulticastRouterTermination,
            154 => Self::Fmipv6,
            155 => Self::RplControl,
            156 => Self::Ilnpv6LocatorUpdate,
            157 => Self::DuplicateAddrRequest,
            158 => Self::DuplicateAddrConfirm,
            159 => Self::MplControl,
            _ => Self::Unsupported,
        }
    }

    /// The type byte of a named kind, `None` for [`Icmpv6MsgKind::Unsupported`].
    pub const fn msg_type(self) -> Option<u8> {
        let raw = match self {
            Self::DestUnreachable => 1,
            Self::PacketTooBig => 2,
            Self::TimeExceeded => 3,
            Self::ParamProblem => 4,
            Self::EchoRequest => 128,
            Self::EchoReply => 129,
            Self::MulticastListenerQuery => 130,
            Self::MulticastListenerReport => 131,
            Self::MulticastListenerDone => 132,
            Self::RouterSolicitation => 133,
            Self::RouterAdvertisement => 134,
            Self::NeighborSolicitation => 135,
            Self::NeighborAdvertisement => 136,
            Self::Redirect => 137,
            Self::RouterRenumbering => 138,
            Self::NodeInfoQuery => 139,
            Self::NodeInfoResponse => 140,
            Self::InverseNdSolicitation => 141,
            Self::InverseNdAdvertisement => 142,
            Self::MulticastListenerReportV2 => 143,
            Self::HomeAgentAddrDiscoveryRequest => 144,
            Self::HomeAgentAddrDiscoveryReply => 145,
            Self::MobilePrefixSolicitation => 146,
            Self::MobilePrefixAdvertisement => 147,
            Self::CertPathSolicitation => 148,
            Self::CertPathAdvertisement => 149,
            Self::MulticastRouterAdvertisement => 151,
            Self::MulticastRouterSolicitation => 152,
            Self::MulticastRouterTermination => 153,
            Self::Fmipv6 => 154,
            Self::RplControl => 155,
            Self::Ilnpv6LocatorUpdate => 156,
            Self::DuplicateAddrRequest => 157,
            Self::DuplicateAddrConfirm => 158,
            Self::MplControl => 159,
            Self::Unsupported => return None,
        };
        Some(raw)
    }

    /// Whether the kind belongs to the error messages (types below 128).
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            Self::DestUnreachable | Self::PacketTooBig | Self::TimeExceeded | Self::ParamProblem
        )
    }

    /// Byte length of the header this crate models for the kind.
    ///
    /// Every kind reports the 4-byte basic header. Type-specific fields such
    /// as the echo identifier or a neighbor-discovery target address belong to
    /// the payload layer that follows.
    pub const fn header_len(self) -> usize {
        ICMPV6_HEADER_LEN
    }

    /// Human-readable name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DestUnreachable => "Destination unreachable",
            Self::PacketTooBig => "Packet too big",
            Self::TimeExceeded => "Time exceeded",
            Self::ParamProblem => "Parameter problem",
            Self::EchoRequest => "Echo (ping) request",
            Self::EchoReply => "Echo (ping) reply",
            Self::MulticastListenerQuery => "Multicast listener query",
            Self::MulticastListenerReport => "Multicast listener report",
            Self::MulticastListenerDone => "Multicast listener done",
            Self::RouterSolicitation => "Router solicitation",
            Self::RouterAdvertisement => "Router advertisement",
            Self::NeighborSolicitation => "Neighbor solicitation",
            Self::NeighborAdvertisement => "Neighbor advertisement",
            Self::Redirect => "Redirect",
            Self::RouterRenumbering => "Router renumbering",
            Self::NodeInfoQuery => "ICMP node information query",
            Self::NodeInfoResponse => "ICMP node information response",
            Self::InverseNdSolicitation => "Inverse neighbor discovery solicitation message",
            Self::InverseNdAdvertisement => "Inverse neighbor discovery advertisement message",
            Self::MulticastListenerReportV2 => "Version 2 multicast listener report",
            Self::HomeAgentAddrDiscoveryRequest => "Home agent address discovery request",
            Self::HomeAgentAddrDiscoveryReply => "Home agent address discovery reply",
            Self::MobilePrefixSolicitation => "Mobile prefix solicitation",
            Self::MobilePrefixAdvertisement => "Mobile prefix advertisement",
            Self::CertPathSolicitation => "Certification path solicitation message",
            Self::CertPathAdvertisement => "Certification path advertisement message",
            Self::MulticastRouterAdvertisement => "Multicast Router Advertisement",
            Self::MulticastRouterSolicitation => "Multicast Router Solicitation",
            Self::MulticastRouterTermination => "Multicast Router Termination",
            Self::Fmipv6 => "FMIPv6 Messages",
            Self::RplControl => "RPL Control Message",
            Self::Ilnpv6LocatorUpdate => "ILNPv6 Locator Update Message",
            Self::DuplicateAddrRequest => "Duplicate Address Request",
            Self::DuplicateAddrConfirm => "Duplicate Address Confirmation",
            Self::MplControl => "MPL Control Message",
            Self::Unsupported => "Unknown",
        }
    }
}

impl From<u8> for Icmpv6MsgKind {
    #[inline]
    fn from(value: u8) -> Self {
        Self::from_type(value)
    }
}

impl fmt::Display for Icmpv6MsgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

enum_sim! {
    /// Codes of the destination unreachable message.
    pub struct Icmpv6DestUnreachableCode (u8) {
        /// No route to destination.
        NO_ROUTE = 0,
        /// Communication with destination administratively prohibited.
        COMM_PROHIBITED = 1,
        /// Beyond scope of source address.
        BEYOND_SCOPE = 2,
        /// Address unreachable.
        ADDR_UNREACHABLE = 3,
        /// Port unreachable.
        PORT_UNREACHABLE = 4,
        /// Source address failed ingress/egress policy.
        SRC_ADDR_FAILED_POLICY = 5,
        /// Reject route to destination.
        REJECT_ROUTE = 6,
        /// Error in source routing header.
        SRC_ROUTING_HEADER_ERR = 7,
    }
}
