use core::fmt;

use byteorder::{ByteOrder, NetworkEndian};

use crate::gre::{gre_header_len, gre_pptp_header_len, GREV1_HEADER_LEN, GRE_BASIC_HEADER_LEN};
use crate::icmpv6::{Icmpv6MsgKind, Icmpv6Packet, ICMPV6_HEADER_LEN};
use crate::ipv6::{Ipv6ExtPacket, IPV6_EXT_HEADER_LEN};
use crate::{Buf, Cursor};

const UDP_HEADER_LEN: usize = 8;
const TCP_HEADER_LEN: usize = 20;
const IPV4_HEADER_LEN: usize = 20;

/// The closed set of layer kinds a chain can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// A generic IPv6 extension header, also used for the start of an inner
    /// IPv6 header chain.
    Ipv6Ext,
    /// UDP.
    Udp,
    /// TCP.
    Tcp,
    /// ICMPv6.
    Icmpv6,
    /// IPv4, reached through IP-in-IP.
    Ipv4,
    /// GRE version 0.
    GreV0,
    /// GRE version 1 (PPTP).
    GreV1,
    /// Opaque bytes with no further structure.
    Payload,
}

impl LayerKind {
    /// Smallest region a layer of this kind can be decoded from.
    pub const fn min_len(self) -> usize {
        match self {
            Self::Ipv6Ext => IPV6_EXT_HEADER_LEN,
            Self::Udp => UDP_HEADER_LEN,
            Self::Tcp => TCP_HEADER_LEN,
            Self::Icmpv6 => ICMPV6_HEADER_LEN,
            Self::Ipv4 => IPV4_HEADER_LEN,
            Self::GreV0 => GRE_BASIC_HEADER_LEN,
            Self::GreV1 => GREV1_HEADER_LEN,
            Self::Payload => 0,
        }
    }
}

/// The contract shared by every decoded layer.
///
/// A layer is viewed over a region that starts at its first byte and runs to
/// the end of the packet.
pub trait Layer {
    /// The self-reported header length. It may exceed the region when the
    /// header claims more bytes than the packet holds.
    fn header_len(&self) -> usize;

    /// The kind of the layer that follows the header, or `None` if this layer
    /// terminates the chain.
    fn next_layer(&self) -> Option<LayerKind>;
}

/// A layer whose internals are not decoded here: UDP, TCP, IPv4, GRE and
/// opaque payload.
///
/// Only the header length is read from the bytes. Whatever follows the
/// header is opaque payload.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SiblingLayer<'a> {
    kind: LayerKind,
    buf: Cursor<'a>,
}

impl<'a> SiblingLayer<'a> {
    fn new(kind: LayerKind, buf: Cursor<'a>) -> Self {
        // a region too short for its kind is only good for opaque bytes
        let kind = if buf.remaining() < kind.min_len() {
            LayerKind::Payload
        } else {
            kind
        };
        Self { kind, buf }
    }

    fn indicator_field(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.chunk()[0..2])
    }
}

impl<'a> Layer for SiblingLayer<'a> {
    fn header_len(&self) -> usize {
        let chunk = self.buf.chunk();
        match self.kind {
            LayerKind::Udp => UDP_HEADER_LEN,
            LayerKind::Tcp => TCP_HEADER_LEN.max((chunk[12] >> 4) as usize * 4),
            LayerKind::Ipv4 => IPV4_HEADER_LEN.max((chunk[0] & 0x0f) as usize * 4),
            LayerKind::GreV0 => gre_header_len(self.indicator_field()),
            LayerKind::GreV1 => gre_pptp_header_len(self.indicator_field()),
            _ => self.buf.remaining(),
        }
    }

    fn next_layer(&self) -> Option<LayerKind> {
        if self.kind != LayerKind::Payload && self.buf.remaining() > self.header_len() {
            Some(LayerKind::Payload)
        } else {
            None
        }
    }
}

/// A typed view over the region of one layer.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LayerView<'a> {
    Ipv6Ext(Ipv6ExtPacket<Cursor<'a>>),
    Icmpv6(Icmpv6Packet<Cursor<'a>>),
    Sibling(SiblingLayer<'a>),
}

impl<'a> LayerView<'a> {
    /// View `buf` as a layer of `kind`. A region shorter than the fixed
    /// header of `kind` is viewed as opaque payload.
    pub(crate) fn decode(kind: LayerKind, buf: Cursor<'a>) -> Self {
        match kind {
            LayerKind::Ipv6Ext => match Ipv6ExtPacket::parse(buf) {
                Ok(ext) => Self::Ipv6Ext(ext),
                Err(buf) => Self::Sibling(SiblingLayer::new(LayerKind::Payload, buf)),
            },
            LayerKind::Icmpv6 => match Icmpv6Packet::parse(buf) {
                Ok(icmp) => Self::Icmpv6(icmp),
                Err(buf) => Self::Sibling(SiblingLayer::new(LayerKind::Payload, buf)),
            },
            _ => Self::Sibling(SiblingLayer::new(kind, buf)),
        }
    }
}

impl<'a> Layer for LayerView<'a> {
    fn header_len(&self) -> usize {
        match self {
            Self::Ipv6Ext(ext) => Layer::header_len(ext),
            Self::Icmpv6(icmp) => Layer::header_len(icmp),
            Self::Sibling(sibling) => sibling.header_len(),
        }
    }

    fn next_layer(&self) -> Option<LayerKind> {
        match self {
            Self::Ipv6Ext(ext) => ext.next_layer(),
            Self::Icmpv6(icmp) => icmp.next_layer(),
            Self::Sibling(sibling) => sibling.next_layer(),
        }
    }
}

/// A one-line description of a layer, rendered through [`fmt::Display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSummary {
    kind: LayerKind,
    msg_type: u8,
    len: usize,
}

impl LayerSummary {
    pub(crate) fn new(kind: LayerKind, msg_type: u8, len: usize) -> Self {
        Self {
            kind,
            msg_type,
            len,
        }
    }

    /// Kind of the described layer.
    pub fn kind(&self) -> LayerKind {
        self.kind
    }
}

impl fmt::Display for LayerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LayerKind::Ipv6Ext => f.write_str("IPv6 Extension Header Layer"),
            LayerKind::Icmpv6 => write!(
                f,
                "ICMPv6 Layer, {} (type: {})",
                Icmpv6MsgKind::from_type(self.msg_type),
                self.msg_type
            ),
            LayerKind::Udp => f.write_str("UDP Layer"),
            LayerKind::Tcp => f.write_str("TCP Layer"),
            LayerKind::Ipv4 => f.write_str("IPv4 Layer"),
            LayerKind::GreV0 => f.write_str("GRE Layer, version 0"),
            LayerKind::GreV1 => f.write_str("GRE Layer, version 1"),
            LayerKind::Payload => write!(f, "Payload Layer, Data length: {}", self.len),
        }
    }
}
