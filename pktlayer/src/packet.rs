use alloc::vec::Vec;
use core::fmt;

use tracing::{debug, trace};

use crate::icmpv6::{Icmpv6MsgKind, Icmpv6Packet, ICMPV6_HEADER_LEN};
use crate::ipv6::Ipv6ExtPacket;
use crate::layer::LayerView;
use crate::{Buf, Cursor, CursorMut};
use crate::{Layer, LayerError, LayerKind, LayerSummary, Result};

/// A stable handle to a layer of a [`Packet`].
///
/// Handles are never reused: once a layer is removed, its handle stays
/// invalid for the lifetime of the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(usize);

#[derive(Debug, Clone)]
struct Node {
    kind: LayerKind,
    offset: usize,
    prev: Option<LayerId>,
    next: Option<LayerId>,
}

/// A packet buffer together with the chain of layers decoded from it.
///
/// Every layer is viewed over the bytes from its offset to the end of the
/// packet. Its header is the first [`header_len`](Packet::header_len) bytes of
/// that region and never overlaps the successor, which starts right after the
/// header when the chain is decoded.
#[derive(Debug, Clone, Default)]
pub struct Packet {
    buf: Vec<u8>,
    nodes: Vec<Option<Node>>,
    first: Option<LayerId>,
    last: Option<LayerId>,
    count: usize,
}

impl Packet {
    /// An empty packet with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `bytes` into a new packet and decode its layer chain, starting
    /// with a layer of kind `first` at offset 0.
    ///
    /// Decoding never fails. A buffer too short for `first` is decoded as
    /// opaque payload, an empty buffer yields no layers.
    pub fn parse(bytes: &[u8], first: LayerKind) -> Self {
        let mut pkt = Self {
            buf: bytes.to_vec(),
            ..Self::default()
        };
        if bytes.is_empty() {
            return pkt;
        }

        let first = if bytes.len() < first.min_len() {
            debug!(?first, len = bytes.len(), "buffer too short, decode as payload");
            LayerKind::Payload
        } else {
            first
        };
        pkt.decode_from(None, first, 0);
        pkt
    }

    // Every layer that names a successor consumes at least one byte, so the
    // walk ends at the latest when the buffer is exhausted.
    fn decode_from(&mut self, mut prev: Option<LayerId>, mut kind: LayerKind, mut offset: usize) {
        loop {
            let id = self.link_after(prev, kind, offset);
            let (header_len, next) = {
                let view = LayerView::decode(kind, self.cursor_at(offset));
                let remaining = self.buf.len() - offset;
                (view.header_len().min(remaining), view.next_layer())
            };
            trace!(?id, ?kind, offset, header_len, ?next, "decoded layer");

            match next {
                Some(next) => {
                    prev = Some(id);
                    kind = next;
                    offset += header_len;
                }
                None => break,
            }
        }
    }

    /// The whole packet buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.buf[..]
    }

    /// Byte length of the packet.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the packet holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// A bounds-checked view over `len` bytes starting at `offset`.
    ///
    /// The returned cursor reports absolute packet offsets through
    /// [`Cursor::cursor`].
    pub fn region(&self, offset: usize, len: usize) -> Result<Cursor<'_>> {
        let end = offset.checked_add(len).ok_or(LayerError::LengthOverflow)?;
        if end > self.buf.len() {
            return Err(LayerError::OutOfBounds {
                offset,
                len,
                size: self.buf.len(),
            });
        }
        let mut cursor = Cursor::new(&self.buf[..end]);
        cursor.advance(offset);
        Ok(cursor)
    }

    /// The first layer of the chain.
    #[inline]
    pub fn first_layer(&self) -> Option<LayerId> {
        self.first
    }

    /// The last layer of the chain.
    #[inline]
    pub fn last_layer(&self) -> Option<LayerId> {
        self.last
    }

    /// The successor of `id`.
    #[inline]
    pub fn next_layer(&self, id: LayerId) -> Option<LayerId> {
        self.node(id)?.next
    }

    /// The predecessor of `id`.
    #[inline]
    pub fn prev_layer(&self, id: LayerId) -> Option<LayerId> {
        self.node(id)?.prev
    }

    /// Number of layers in the chain.
    #[inline]
    pub fn layer_count(&self) -> usize {
        self.count
    }

    /// Iterate over the chain from the first layer to the last.
    pub fn layers(&self) -> Layers<'_> {
        Layers {
            pkt: self,
            cur: self.first,
        }
    }

    /// The kind of `id`, `None` if `id` is not linked in this packet.
    #[inline]
    pub fn kind(&self, id: LayerId) -> Option<LayerKind> {
        Some(self.node(id)?.kind)
    }

    /// Offset of the first byte of `id`.
    #[inline]
    pub fn offset(&self, id: LayerId) -> Option<usize> {
        Some(self.node(id)?.offset.min(self.buf.len()))
    }

    /// Bytes from the start of `id` to the end of the packet.
    #[inline]
    pub fn data_len(&self, id: LayerId) -> Option<usize> {
        Some(self.buf.len() - self.offset(id)?)
    }

    /// The self-reported header length of `id`, limited to the bytes in
    /// front of its successor, or to [`data_len`](Packet::data_len) for the
    /// last layer.
    pub fn header_len(&self, id: LayerId) -> Option<usize> {
        let node = self.node(id)?;
        let offset = node.offset.min(self.buf.len());
        let end = match node.next.and_then(|next| self.node(next)) {
            Some(next) => next.offset.clamp(offset, self.buf.len()),
            None => self.buf.len(),
        };
        let view = LayerView::decode(node.kind, self.cursor_at(offset));
        Some(view.header_len().min(end - offset))
    }

    /// The header bytes of `id`.
    pub fn header(&self, id: LayerId) -> Option<&[u8]> {
        let offset = self.offset(id)?;
        let header_len = self.header_len(id)?;
        Some(&self.buf[offset..offset + header_len])
    }

    /// Mutable access to the header bytes of `id`.
    pub fn header_mut(&mut self, id: LayerId) -> Option<&mut [u8]> {
        let offset = self.offset(id)?;
        let header_len = self.header_len(id)?;
        Some(&mut self.buf[offset..offset + header_len])
    }

    /// A one-line description of `id`.
    pub fn summary(&self, id: LayerId) -> Option<LayerSummary> {
        let kind = self.kind(id)?;
        let offset = self.offset(id)?;
        let msg_type = match kind {
            LayerKind::Icmpv6 => self.buf.get(offset).copied().unwrap_or(0),
            _ => 0,
        };
        Some(LayerSummary::new(kind, msg_type, self.header_len(id)?))
    }

    /// View `id` as an IPv6 extension header.
    pub fn ext_header(&self, id: LayerId) -> Option<Ipv6ExtPacket<Cursor<'_>>> {
        let node = self.node(id)?;
        if node.kind != LayerKind::Ipv6Ext {
            return None;
        }
        Ipv6ExtPacket::parse(self.cursor_at(node.offset)).ok()
    }

    /// View `id` as an ICMPv6 message.
    pub fn icmpv6(&self, id: LayerId) -> Option<Icmpv6Packet<Cursor<'_>>> {
        let node = self.node(id)?;
        if node.kind != LayerKind::Icmpv6 {
            return None;
        }
        Icmpv6Packet::parse(self.cursor_at(node.offset)).ok()
    }

    /// Mutable view of `id` as an ICMPv6 message.
    pub fn icmpv6_mut(&mut self, id: LayerId) -> Option<Icmpv6Packet<CursorMut<'_>>> {
        let node = self.node(id)?;
        if node.kind != LayerKind::Icmpv6 {
            return None;
        }
        let offset = node.offset.min(self.buf.len());
        let mut cursor = CursorMut::new(&mut self.buf[..]);
        cursor.advance(offset);
        Icmpv6Packet::parse(cursor).ok()
    }

    /// Whether `id` is an ICMPv6 layer of the given message kind.
    pub fn is_icmpv6_msg_of_kind(&self, id: LayerId, kind: Icmpv6MsgKind) -> bool {
        self.icmpv6(id)
            .map(|icmp| icmp.msg_kind() == kind)
            .unwrap_or(false)
    }

    /// Insert a layer of `kind` holding `header` right after `after`, or at
    /// the front of the packet if `after` is `None`.
    ///
    /// `header` must be exactly as long as the header it encodes, so that the
    /// new layer ends where its successor starts. The bytes of every following
    /// layer move back by `header.len()`.
    pub fn insert_layer(
        &mut self,
        after: Option<LayerId>,
        kind: LayerKind,
        header: &[u8],
    ) -> Result<LayerId> {
        if header.len() < kind.min_len() {
            return Err(LayerError::OutOfBounds {
                offset: 0,
                len: kind.min_len(),
                size: header.len(),
            });
        }
        let reported = LayerView::decode(kind, Cursor::new(header)).header_len();
        if reported != header.len() {
            debug!(?kind, reported, len = header.len(), "insert: header length mismatch");
            return Err(LayerError::HeaderLenMismatch {
                kind,
                reported,
                len: header.len(),
            });
        }

        let (pos, following) = match after {
            Some(prev) => {
                let following = self.node(prev).ok_or(LayerError::LayerNotFound(prev))?.next;
                let pos = match following.and_then(|next| self.node(next)) {
                    Some(next) => next.offset.min(self.buf.len()),
                    None => self.buf.len(),
                };
                (pos, following)
            }
            None => (0, self.first),
        };

        self.buf.splice(pos..pos, header.iter().copied());
        self.shift_offsets(following, header.len(), 0);

        let id = self.link_after(after, kind, pos);
        trace!(?id, ?kind, offset = pos, len = header.len(), "inserted layer");
        Ok(id)
    }

    /// Append a layer of `kind` holding `header` after the last layer.
    pub fn append_layer(&mut self, kind: LayerKind, header: &[u8]) -> Result<LayerId> {
        let last = self.last;
        self.insert_layer(last, kind, header)
    }

    /// Unlink `id` and delete its header bytes from the packet.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<()> {
        let (offset, header_len) = match (self.offset(id), self.header_len(id)) {
            (Some(offset), Some(header_len)) => (offset, header_len),
            _ => {
                debug!(?id, "remove: no such layer");
                return Err(LayerError::LayerNotFound(id));
            }
        };

        let node = self.nodes[id.0].take().ok_or(LayerError::LayerNotFound(id))?;
        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.first = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.last = node.prev,
        }
        self.count -= 1;

        self.buf.drain(offset..offset + header_len);
        self.shift_offsets(node.next, 0, header_len);
        trace!(?id, kind = ?node.kind, offset, header_len, "removed layer");
        Ok(())
    }

    /// Delete `count` header bytes of `id`, starting `offset_in_layer` bytes
    /// into the layer.
    pub fn shorten_layer(
        &mut self,
        id: LayerId,
        offset_in_layer: usize,
        count: usize,
    ) -> Result<()> {
        let offset = self.offset(id).ok_or(LayerError::LayerNotFound(id))?;
        let header_len = self.header_len(id).ok_or(LayerError::LayerNotFound(id))?;
        let end = offset_in_layer
            .checked_add(count)
            .ok_or(LayerError::LengthOverflow)?;
        if end > header_len {
            debug!(?id, offset_in_layer, count, header_len, "shorten: range outside header");
            return Err(LayerError::OutOfBounds {
                offset: offset_in_layer,
                len: count,
                size: header_len,
            });
        }

        self.buf.drain(offset + offset_in_layer..offset + end);
        let following = self.next_layer(id);
        self.shift_offsets(following, 0, count);
        trace!(?id, offset_in_layer, count, "shortened layer");
        Ok(())
    }

    /// Recompute the derived fields of every layer.
    ///
    /// Only ICMPv6 layers carry one, the checksum. The walk stops at the first
    /// layer that fails and returns its error.
    pub fn compute_calculate_fields(&mut self) -> Result<()> {
        let mut cur = self.first;
        while let Some(id) = cur {
            if self.kind(id) == Some(LayerKind::Icmpv6) {
                if let Err(err) = self.fill_icmpv6_checksum(id) {
                    debug!(?id, %err, "icmpv6 checksum failed");
                    return Err(err);
                }
            }
            cur = self.next_layer(id);
        }
        Ok(())
    }

    /// Number of bytes covered by the checksum of `id`: the header lengths of
    /// `id` and of every layer after it.
    pub fn checksum_extent(&self, id: LayerId) -> Option<usize> {
        let mut extent = self.header_len(id)?;
        let mut cur = self.next_layer(id);
        while let Some(next) = cur {
            extent += self.header_len(next)?;
            cur = self.next_layer(next);
        }
        Some(extent)
    }

    /// Recompute and store the checksum of the ICMPv6 layer `id` over its
    /// checksum extent. Returns the stored value.
    pub fn fill_icmpv6_checksum(&mut self, id: LayerId) -> Result<u16> {
        self.expect_icmpv6(id)?;
        let extent = self
            .checksum_extent(id)
            .ok_or(LayerError::LayerNotFound(id))?;
        let mut icmp = self.icmpv6_view_mut(id)?;
        icmp.fill_checksum(extent);
        Ok(icmp.checksum())
    }

    /// Whether the stored checksum of the ICMPv6 layer `id` matches its
    /// checksum extent.
    pub fn verify_icmpv6_checksum(&self, id: LayerId) -> Result<bool> {
        self.expect_icmpv6(id)?;
        let extent = self
            .checksum_extent(id)
            .ok_or(LayerError::LayerNotFound(id))?;
        match self.icmpv6(id) {
            Some(icmp) => Ok(icmp.verify_checksum(extent)),
            None => Err(LayerError::OutOfBounds {
                offset: 0,
                len: ICMPV6_HEADER_LEN,
                size: extent,
            }),
        }
    }

    /// Bring the ICMPv6 layer `id` to its minimal form: remove every layer
    /// after it and cut its header down to the basic header.
    ///
    /// Successors are removed in chain order. The first failure aborts the
    /// operation and leaves the chain as far as it got.
    pub fn clean_icmpv6_layer(&mut self, id: LayerId) -> Result<()> {
        self.expect_icmpv6(id)?;

        while let Some(next) = self.next_layer(id) {
            self.remove_layer(next)?;
        }

        let header_len = self.header_len(id).ok_or(LayerError::LayerNotFound(id))?;
        if header_len > ICMPV6_HEADER_LEN {
            self.shorten_layer(id, ICMPV6_HEADER_LEN, header_len - ICMPV6_HEADER_LEN)?;
        }
        Ok(())
    }

    /// Re-type the ICMPv6 layer `id`.
    ///
    /// The layer is cleaned first. On success the type and code are written,
    /// the checksum is cleared and a payload layer holding `data` is appended
    /// if `data` is not empty.
    pub fn set_icmpv6_msg(
        &mut self,
        id: LayerId,
        msg_type: u8,
        code: u8,
        data: &[u8],
    ) -> Result<()> {
        self.clean_icmpv6_layer(id)?;

        let mut icmp = self.icmpv6_view_mut(id)?;
        icmp.set_msg_type(msg_type);
        icmp.set_code(code);
        icmp.set_checksum(0);

        if !data.is_empty() {
            self.append_layer(LayerKind::Payload, data)?;
        }
        trace!(?id, msg_type, code, len = data.len(), "set icmpv6 message");
        Ok(())
    }

    fn expect_icmpv6(&self, id: LayerId) -> Result<()> {
        match self.kind(id) {
            Some(LayerKind::Icmpv6) => Ok(()),
            Some(kind) => Err(LayerError::WrongKind { id, kind }),
            None => Err(LayerError::LayerNotFound(id)),
        }
    }

    fn icmpv6_view_mut(&mut self, id: LayerId) -> Result<Icmpv6Packet<CursorMut<'_>>> {
        let offset = self.offset(id).ok_or(LayerError::LayerNotFound(id))?;
        let size = self.buf.len() - offset;
        self.icmpv6_mut(id).ok_or(LayerError::OutOfBounds {
            offset,
            len: ICMPV6_HEADER_LEN,
            size,
        })
    }

    fn node(&self, id: LayerId) -> Option<&Node> {
        self.nodes.get(id.0)?.as_ref()
    }

    // Only called with handles of linked nodes.
    fn node_mut(&mut self, id: LayerId) -> &mut Node {
        match self.nodes[id.0].as_mut() {
            Some(node) => node,
            None => unreachable!("linked layer {id:?} has no node"),
        }
    }

    fn cursor_at(&self, offset: usize) -> Cursor<'_> {
        let mut cursor = Cursor::new(&self.buf[..]);
        cursor.advance(offset.min(self.buf.len()));
        cursor
    }

    fn link_after(&mut self, prev: Option<LayerId>, kind: LayerKind, offset: usize) -> LayerId {
        let id = LayerId(self.nodes.len());
        let next = match prev {
            Some(prev) => self.node(prev).and_then(|node| node.next),
            None => self.first,
        };
        self.nodes.push(Some(Node {
            kind,
            offset,
            prev,
            next,
        }));

        match prev {
            Some(prev) => self.node_mut(prev).next = Some(id),
            None => self.first = Some(id),
        }
        match next {
            Some(next) => self.node_mut(next).prev = Some(id),
            None => self.last = Some(id),
        }
        self.count += 1;
        id
    }

    fn shift_offsets(&mut self, mut cur: Option<LayerId>, added: usize, removed: usize) {
        while let Some(id) = cur {
            let node = self.node_mut(id);
            node.offset = (node.offset + added).saturating_sub(removed);
            cur = node.next;
        }
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.layers().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            if let Some(summary) = self.summary(id) {
                write!(f, "{}", summary)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the layers of a [`Packet`], created by [`Packet::layers`].
#[derive(Debug, Clone)]
pub struct Layers<'a> {
    pkt: &'a Packet,
    cur: Option<LayerId>,
}

impl<'a> Iterator for Layers<'a> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        let id = self.cur?;
        self.cur = self.pkt.next_layer(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::checksum_utils;
    use crate::icmpv6::ICMPV6_HEADER_TEMPLATE;

    fn kinds(pkt: &Packet) -> Vec<LayerKind> {
        pkt.layers().filter_map(|id| pkt.kind(id)).collect()
    }

    #[test]
    fn empty_packet() {
        let pkt = Packet::new();
        assert!(pkt.is_empty());
        assert_eq!(pkt.first_layer(), None);
        assert_eq!(pkt.layer_count(), 0);

        let pkt = Packet::parse(&[], LayerKind::Ipv6Ext);
        assert_eq!(pkt.layers().count(), 0);
    }

    #[test]
    fn short_first_layer_is_payload() {
        let pkt = Packet::parse(&[0x3a, 0x00, 0x00], LayerKind::Ipv6Ext);
        assert_eq!(kinds(&pkt), vec![LayerKind::Payload]);
        let id = pkt.first_layer().unwrap();
        assert_eq!(pkt.header_len(id), Some(3));
    }

    #[test]
    fn links_and_offsets() {
        let bytes = [
            0x3a, 0x00, 0, 0, 0, 0, 0, 0, // dest opts, next = icmpv6
            0x80, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02,
        ];
        let pkt = Packet::parse(&bytes, LayerKind::Ipv6Ext);
        assert_eq!(
            kinds(&pkt),
            vec![LayerKind::Ipv6Ext, LayerKind::Icmpv6, LayerKind::Payload]
        );
        assert_eq!(pkt.layer_count(), 3);

        let ids: Vec<_> = pkt.layers().collect();
        assert_eq!(pkt.offset(ids[1]), Some(8));
        assert_eq!(pkt.data_len(ids[1]), Some(8));
        assert_eq!(pkt.header_len(ids[1]), Some(4));
        assert_eq!(pkt.header(ids[2]), Some(&bytes[12..]));
        assert_eq!(pkt.prev_layer(ids[2]), Some(ids[1]));
        assert_eq!(pkt.prev_layer(ids[0]), None);
        assert_eq!(pkt.last_layer(), Some(ids[2]));

        assert!(pkt.ext_header(ids[0]).is_some());
        assert!(pkt.ext_header(ids[1]).is_none());
        assert!(pkt.icmpv6(ids[1]).is_some());
        assert!(pkt.icmpv6(ids[0]).is_none());

        assert_eq!(
            pkt.to_string(),
            "IPv6 Extension Header Layer\n\
             ICMPv6 Layer, Echo (ping) request (type: 128)\n\
             Payload Layer, Data length: 4"
        );
    }

    #[test]
    fn region_is_bounds_checked() {
        let pkt = Packet::parse(&[1, 2, 3, 4, 5], LayerKind::Payload);
        let region = pkt.region(1, 3).unwrap();
        assert_eq!(region.chunk(), &[2, 3, 4]);
        assert_eq!(region.cursor(), 1);
        assert_eq!(pkt.region(5, 0).unwrap().remaining(), 0);
        assert_eq!(
            pkt.region(3, 3).unwrap_err(),
            LayerError::OutOfBounds {
                offset: 3,
                len: 3,
                size: 5
            }
        );
        assert_eq!(pkt.region(1, usize::MAX).unwrap_err(), LayerError::LengthOverflow);
    }

    #[test]
    fn insert_and_remove() {
        let mut pkt = Packet::new();
        let icmp = pkt.append_layer(LayerKind::Icmpv6, &ICMPV6_HEADER_TEMPLATE).unwrap();
        let payload = pkt.append_layer(LayerKind::Payload, &[9, 9]).unwrap();
        let ext = pkt
            .insert_layer(None, LayerKind::Ipv6Ext, &[58, 0, 0, 0, 0, 0, 0, 0])
            .unwrap();

        assert_eq!(
            kinds(&pkt),
            vec![LayerKind::Ipv6Ext, LayerKind::Icmpv6, LayerKind::Payload]
        );
        assert_eq!(pkt.len(), 14);
        assert_eq!(pkt.offset(icmp), Some(8));
        assert_eq!(pkt.offset(payload), Some(12));

        pkt.remove_layer(ext).unwrap();
        assert_eq!(pkt.first_layer(), Some(icmp));
        assert_eq!(pkt.offset(icmp), Some(0));
        assert_eq!(pkt.offset(payload), Some(4));
        assert_eq!(pkt.data(), &[0, 0, 0, 0, 9, 9]);

        assert_eq!(pkt.remove_layer(ext), Err(LayerError::LayerNotFound(ext)));
        assert_eq!(pkt.kind(ext), None);

        assert_eq!(
            pkt.insert_layer(None, LayerKind::Udp, &[0; 4]),
            Err(LayerError::OutOfBounds {
                offset: 0,
                len: 8,
                size: 4
            })
        );
    }

    #[test]
    fn insert_lands_at_successor_offset() {
        // the truncated header leaves 3 trailing bytes outside the chain
        let mut pkt = Packet::parse(&[60, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3], LayerKind::Ipv6Ext);
        let ext = pkt.first_layer().unwrap();
        assert_eq!(pkt.header_len(ext), Some(8));

        let tail = pkt.append_layer(LayerKind::Payload, &[9]).unwrap();
        assert_eq!(pkt.offset(tail), Some(11));
        assert_eq!(pkt.data(), &[60, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 9]);

        let mid = pkt.insert_layer(Some(ext), LayerKind::Payload, &[7, 7]).unwrap();
        assert_eq!(pkt.offset(mid), Some(11));
        assert_eq!(pkt.offset(tail), Some(13));
        assert_eq!(pkt.next_layer(mid), Some(tail));
    }

    #[test]
    fn insert_checks_reported_length() {
        let mut pkt = Packet::new();
        // length field claims 16 bytes
        assert_eq!(
            pkt.insert_layer(None, LayerKind::Ipv6Ext, &[17, 1, 0, 0, 0, 0, 0, 0]),
            Err(LayerError::HeaderLenMismatch {
                kind: LayerKind::Ipv6Ext,
                reported: 16,
                len: 8
            })
        );
        // data offset of 6 words
        let mut tcp = [0u8; 24];
        tcp[12] = 0x60;
        pkt.insert_layer(None, LayerKind::Tcp, &tcp).unwrap();
        assert_eq!(
            pkt.append_layer(LayerKind::Tcp, &[0u8; 24]),
            Err(LayerError::HeaderLenMismatch {
                kind: LayerKind::Tcp,
                reported: 20,
                len: 24
            })
        );
        assert_eq!(pkt.len(), 24);
    }

    #[test]
    fn shorten_inside_header_only() {
        let mut pkt = Packet::parse(&[0x11, 0x00, 1, 2, 3, 4, 5, 6, 0xaa], LayerKind::Ipv6Ext);
        let ext = pkt.first_layer().unwrap();
        let payload = pkt.next_layer(ext).unwrap();
        // one byte is too short for UDP
        assert_eq!(pkt.kind(payload), Some(LayerKind::Payload));

        assert_eq!(
            pkt.shorten_layer(ext, 6, 3),
            Err(LayerError::OutOfBounds {
                offset: 6,
                len: 3,
                size: 8
            })
        );

        pkt.shorten_layer(ext, 6, 2).unwrap();
        assert_eq!(pkt.data(), &[0x11, 0x00, 1, 2, 3, 4, 0xaa]);
        assert_eq!(pkt.offset(payload), Some(6));
    }

    #[test]
    fn checksum_covers_chain() {
        let bytes = [0x80, 0x00, 0xbe, 0xef, 0x00, 0x01, 0x00, 0x02, 0x61, 0x62];
        let mut pkt = Packet::parse(&bytes, LayerKind::Icmpv6);
        let icmp = pkt.first_layer().unwrap();
        assert_eq!(pkt.checksum_extent(icmp), Some(10));

        let stored = pkt.fill_icmpv6_checksum(icmp).unwrap();
        let mut zeroed = bytes;
        zeroed[2..4].fill(0);
        assert_eq!(stored, checksum_utils::checksum(&zeroed));
        assert_eq!(&pkt.data()[2..4], &stored.to_be_bytes());
        assert_eq!(pkt.verify_icmpv6_checksum(icmp), Ok(true));
    }

    #[test]
    fn recompute_reports_failure() {
        let mut pkt = Packet::new();
        let icmp = pkt.append_layer(LayerKind::Icmpv6, &ICMPV6_HEADER_TEMPLATE).unwrap();
        pkt.shorten_layer(icmp, 0, 2).unwrap();

        assert_eq!(
            pkt.compute_calculate_fields(),
            Err(LayerError::OutOfBounds {
                offset: 0,
                len: ICMPV6_HEADER_LEN,
                size: 2
            })
        );
        assert_eq!(pkt.data(), &[0, 0]);
    }

    #[test]
    fn checksum_rejects_other_kinds() {
        let mut pkt = Packet::parse(&[0u8; 8], LayerKind::Ipv6Ext);
        let ext = pkt.first_layer().unwrap();
        assert_eq!(
            pkt.fill_icmpv6_checksum(ext),
            Err(LayerError::WrongKind {
                id: ext,
                kind: LayerKind::Ipv6Ext
            })
        );
        assert_eq!(
            pkt.clean_icmpv6_layer(ext),
            Err(LayerError::WrongKind {
                id: ext,
                kind: LayerKind::Ipv6Ext
            })
        );
    }

    #[test]
    fn set_msg_replaces_payload() {
        let bytes = [0x80, 0x00, 0x12, 0x34, 0xaa, 0xbb, 0xcc, 0xdd];
        let mut pkt = Packet::parse(&bytes, LayerKind::Icmpv6);
        let icmp = pkt.first_layer().unwrap();

        pkt.set_icmpv6_msg(icmp, 129, 0, &[1, 2]).unwrap();
        assert_eq!(kinds(&pkt), vec![LayerKind::Icmpv6, LayerKind::Payload]);
        assert_eq!(pkt.data(), &[129, 0, 0, 0, 1, 2]);
        assert!(pkt.is_icmpv6_msg_of_kind(icmp, Icmpv6MsgKind::EchoReply));

        pkt.set_icmpv6_msg(icmp, 135, 0, &[]).unwrap();
        assert_eq!(pkt.layer_count(), 1);
        assert_eq!(pkt.data(), &[135, 0, 0, 0]);
    }
}
