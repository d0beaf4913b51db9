use tracing::{debug, trace};

use crate::gre::GreVersion;
use crate::ip::{IpProtocol, IpVersion};
use crate::LayerKind;

use super::IPV6_EXT_HEADER_LEN;

/// Decide the kind of the layer that follows an IPv6 extension header.
///
/// `next_header` is the protocol id carried by the preceding header and
/// `payload` holds every byte after it. The decision is total: unknown ids
/// and anything that cannot be probed resolve to [`LayerKind::Payload`] or to
/// `None`, never to an error.
///
/// Rules, first match wins:
///
/// 1. extension-header ids decode another extension header, or nothing if
///    fewer than 8 bytes remain;
/// 2. UDP, TCP and ICMPv6 decode the respective layer;
/// 3. IP-in-IP probes the version nibble: 4 is IPv4, 6 starts an inner IPv6
///    header chain, anything else is opaque payload;
/// 4. GRE probes the version sub-field: 0 and 1 select the GRE layer of that
///    version, anything else is opaque payload;
/// 5. every other id is opaque payload.
///
/// An empty `payload` never yields a layer. A payload too short for the
/// selected kind's fixed header degrades to opaque payload.
pub fn dispatch_next_header(next_header: IpProtocol, payload: &[u8]) -> Option<LayerKind> {
    if payload.is_empty() {
        trace!(%next_header, "nothing follows the extension header");
        return None;
    }

    let kind = if next_header.is_ipv6_ext_header() {
        if payload.len() < IPV6_EXT_HEADER_LEN {
            debug!(
                %next_header,
                remaining = payload.len(),
                "truncated extension header, stop decoding"
            );
            return None;
        }
        LayerKind::Ipv6Ext
    } else {
        match next_header {
            IpProtocol::UDP => LayerKind::Udp,
            IpProtocol::TCP => LayerKind::Tcp,
            IpProtocol::ICMPV6 => LayerKind::Icmpv6,
            IpProtocol::IPIP => match IpVersion::probe(payload) {
                Some(IpVersion::V4) => LayerKind::Ipv4,
                Some(IpVersion::V6) => LayerKind::Ipv6Ext,
                _ => LayerKind::Payload,
            },
            IpProtocol::GRE => match GreVersion::probe(payload) {
                Some(GreVersion::V0) => LayerKind::GreV0,
                Some(GreVersion::V1) => LayerKind::GreV1,
                None => LayerKind::Payload,
            },
            _ => {
                debug!(%next_header, "unrecognized next header");
                LayerKind::Payload
            }
        }
    };

    if payload.len() < kind.min_len() {
        debug!(
            ?kind,
            remaining = payload.len(),
            "region too short for next layer, treat as payload"
        );
        return Some(LayerKind::Payload);
    }

    trace!(%next_header, ?kind, "next layer");
    Some(kind)
}
