mod common;

use common::*;

use bytes::BufMut;
use pktlayer::ip::IpProtocol;
use pktlayer::ipv6::*;
use pktlayer::Buf;
use pktlayer::{Cursor, CursorMut};
use pktlayer::{Layer, LayerKind, Packet};

fn kinds(pkt: &Packet) -> Vec<LayerKind> {
    pkt.layers().filter_map(|id| pkt.kind(id)).collect()
}

#[test]
fn hop_by_hop_routing_udp_chain() {
    let bytes = file_to_packet("ipv6_ext_chain_udp.dat");
    let pkt = Packet::parse(&bytes, LayerKind::Ipv6Ext);

    assert_eq!(
        kinds(&pkt),
        vec![
            LayerKind::Ipv6Ext,
            LayerKind::Ipv6Ext,
            LayerKind::Udp,
            LayerKind::Payload
        ]
    );

    let ids: Vec<_> = pkt.layers().collect();
    let hop_by_hop = pkt.ext_header(ids[0]).unwrap();
    assert_eq!(hop_by_hop.next_header(), IpProtocol::IPV6_ROUTE);
    assert_eq!(hop_by_hop.header_len(), 8);
    assert_eq!(hop_by_hop.var_header_slice(), &[0x01, 0x04, 0, 0, 0, 0]);

    let routing = pkt.ext_header(ids[1]).unwrap();
    assert_eq!(routing.next_header(), IpProtocol::UDP);
    assert_eq!(routing.buf().cursor(), 8);

    assert_eq!(pkt.offset(ids[2]), Some(16));
    assert_eq!(pkt.header_len(ids[2]), Some(8));
    assert_eq!(pkt.header(ids[3]), Some(&b"abcd"[..]));
}

#[test]
fn ip_in_ip_with_inner_ipv6() {
    let bytes = file_to_packet("ipv6_ext_ipip_inner_ipv6.dat");
    let pkt = Packet::parse(&bytes, LayerKind::Ipv6Ext);

    let outer = pkt.first_layer().unwrap();
    assert_eq!(pkt.ext_header(outer).unwrap().next_header(), IpProtocol::IPIP);

    let inner = pkt.next_layer(outer).unwrap();
    assert_eq!(pkt.kind(inner), Some(LayerKind::Ipv6Ext));
    assert_eq!(pkt.offset(inner), Some(8));
    assert_eq!(pkt.header(inner).unwrap()[0], 0x60);
}

#[test]
fn ip_in_ip_with_inner_ipv4() {
    let bytes = file_to_packet("ipv6_ext_ipip_ipv4.dat");
    let pkt = Packet::parse(&bytes, LayerKind::Ipv6Ext);

    assert_eq!(
        kinds(&pkt),
        vec![LayerKind::Ipv6Ext, LayerKind::Ipv4, LayerKind::Payload]
    );
    let ipv4 = pkt.next_layer(pkt.first_layer().unwrap()).unwrap();
    assert_eq!(pkt.header_len(ipv4), Some(20));

    let wire = smoltcp::wire::Ipv4Packet::new_unchecked(pkt.header(ipv4).unwrap());
    assert_eq!(wire.header_len(), 20);
    assert_eq!(pkt.data_len(pkt.last_layer().unwrap()), Some(4));
}

#[test]
fn gre_version_0() {
    let bytes = file_to_packet("ipv6_ext_gre_v0.dat");
    let pkt = Packet::parse(&bytes, LayerKind::Ipv6Ext);

    assert_eq!(
        kinds(&pkt),
        vec![LayerKind::Ipv6Ext, LayerKind::GreV0, LayerKind::Payload]
    );
    let payload = pkt.last_layer().unwrap();
    assert_eq!(pkt.offset(payload), Some(12));
    assert_eq!(pkt.header_len(payload), Some(20));
}

#[test]
fn truncated_ext_header_ends_chain() {
    let bytes = file_to_packet("ipv6_ext_truncated.dat");
    let pkt = Packet::parse(&bytes, LayerKind::Ipv6Ext);

    assert_eq!(kinds(&pkt), vec![LayerKind::Ipv6Ext]);
    assert_eq!(pkt.data_len(pkt.first_layer().unwrap()), Some(13));
}

#[test]
fn long_chains_have_no_nesting_limit() {
    let depth = 1000;
    let mut bytes = Vec::with_capacity(depth * 8 + 4);
    for i in 0..depth {
        let next = if i + 1 < depth { 60 } else { 17 };
        bytes.put_u8(next);
        bytes.put_u8(0);
        bytes.put_u16(0x0104);
        bytes.put_u32(0);
    }
    bytes.put_slice(&[0xaa; 4]);

    let pkt = Packet::parse(&bytes, LayerKind::Ipv6Ext);
    assert_eq!(pkt.layer_count(), depth + 1);
    // four bytes cannot hold a udp header
    assert_eq!(pkt.kind(pkt.last_layer().unwrap()), Some(LayerKind::Payload));
}

#[test]
fn oversized_length_field() {
    // claims 2048 bytes, only 12 are there
    let bytes = [0x11, 0xff, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4];
    let pkt = Packet::parse(&bytes, LayerKind::Ipv6Ext);
    let ext = pkt.first_layer().unwrap();

    assert_eq!(pkt.layer_count(), 1);
    assert_eq!(pkt.ext_header(ext).unwrap().header_len(), 2048);
    assert_eq!(pkt.header_len(ext), Some(12));

    let view = Ipv6ExtPacket::parse(Cursor::new(&bytes[..])).unwrap();
    assert_eq!(view.next_layer(), None);
}

#[test]
fn build_ext_header_chain() {
    let mut bytes = [0u8; 20];
    let mut buf = CursorMut::new(&mut bytes[..]);
    buf.advance(16);

    let mut routing = Ipv6ExtPacket::prepend_header(buf, &IPV6_EXT_HEADER_TEMPLATE);
    routing.set_next_header(IpProtocol::ICMPV6);
    let buf = routing.release();

    let mut hop_by_hop = Ipv6ExtPacket::prepend_header(buf, &IPV6_EXT_HEADER_TEMPLATE);
    hop_by_hop.set_next_header(IpProtocol::IPV6_ROUTE);
    hop_by_hop.var_header_slice_mut()[..2].copy_from_slice(&[1, 4]);

    bytes[16] = 128;
    let pkt = Packet::parse(&bytes, LayerKind::Ipv6Ext);
    let kinds: Vec<_> = pkt.layers().filter_map(|id| pkt.kind(id)).collect();
    assert_eq!(
        kinds,
        vec![LayerKind::Ipv6Ext, LayerKind::Ipv6Ext, LayerKind::Icmpv6]
    );
}

#[test]
fn fragment_header_in_chain() {
    let bytes = [
        44, 0, 0, 0, 0, 0, 0, 0, // hop-by-hop, next = fragment
        17, 0, 0x05, 0x39, 0xde, 0xad, 0xbe, 0xef, // fragment, next = udp
        0, 53, 0, 53, 0, 8, 0, 0,
    ];
    let pkt = Packet::parse(&bytes, LayerKind::Ipv6Ext);
    let frag_id = pkt.next_layer(pkt.first_layer().unwrap()).unwrap();
    assert_eq!(pkt.kind(frag_id), Some(LayerKind::Ipv6Ext));

    let frag = FragHeader::new(pkt.header(frag_id).unwrap()).unwrap();
    assert_eq!(frag.next_header(), IpProtocol::UDP);
    assert_eq!(frag.ident(), 0xdeadbeef);
    assert!(frag.m_flag());

    assert_eq!(pkt.kind(pkt.last_layer().unwrap()), Some(LayerKind::Udp));
}
