//! IP protocol numbers and version probing.

enum_sim! {
    /// An enum-like type for the protocol ids carried in the IPv4 protocol
    /// field and the IPv6 next-header field.
    ///
    /// See https://www.iana.org/assignments/protocol-numbers/protocol-numbers.xhtml
    pub struct IpProtocol (u8) {
        /// IPv6 Hop-by-Hop Option.
        HOPOPT = 0,

        /// IPv4 encapsulation (IP-in-IP).
        IPIP = 4,

        /// Transmission Control Protocol.
        TCP = 6,

        /// User Datagram Protocol.
        UDP = 17,

        /// IPv6 encapsulation.
        IPV6 = 41,

        /// Routing Header for IPv6.
        IPV6_ROUTE = 43,

        /// Fragment Header for IPv6.
        IPV6_FRAG = 44,

        /// Generic Routing Encapsulation.
        GRE = 47,

        /// Encapsulating Security Payload.
        ESP = 50,

        /// Authentication Header.
        AH = 51,

        /// ICMP for IPv6.
        ICMPV6 = 58,

        /// No Next Header for IPv6.
        IPV6_NO_NXT = 59,

        /// Destination Options for IPv6.
        IPV6_OPTS = 60,
    }
}

impl IpProtocol {
    /// Whether the id names one of the IPv6 extension headers that share the
    /// generic `next header / length / data` layout.
    #[inline]
    pub fn is_ipv6_ext_header(&self) -> bool {
        matches!(
            *self,
            Self::HOPOPT | Self::IPV6_ROUTE | Self::IPV6_FRAG | Self::AH | Self::IPV6_OPTS
        )
    }
}

/// The IP version read from the high nibble of the first header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    /// Version nibble is 4.
    V4,
    /// Version nibble is 6.
    V6,
    /// Any other version nibble.
    Other(u8),
}

impl IpVersion {
    /// Probe the version nibble of `buf`.
    ///
    /// Returns `None` if `buf` is empty.
    #[inline]
    pub fn probe(buf: &[u8]) -> Option<Self> {
        let version = buf.first()? >> 4;
        Some(match version {
            4 => Self::V4,
            6 => Self::V6,
            other => Self::Other(other),
        })
    }
}
