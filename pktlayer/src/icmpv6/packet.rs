use byteorder::{ByteOrder, NetworkEndian};
use tracing::{debug, trace};

use crate::checksum_utils;
use crate::{Buf, PktBuf, PktBufMut};
use crate::{Cursor, CursorMut};
use crate::{Layer, LayerKind};

use super::Icmpv6MsgKind;

/// Byte length of the basic ICMPv6 header: type, code and checksum.
pub const ICMPV6_HEADER_LEN: usize = 4;

/// A basic header with all fields zeroed.
pub const ICMPV6_HEADER_TEMPLATE: [u8; ICMPV6_HEADER_LEN] = [0x00; ICMPV6_HEADER_LEN];

/// An ICMPv6 message, viewed through its 4-byte basic header.
#[derive(Debug, Clone, Copy)]
pub struct Icmpv6Packet<T> {
    buf: T,
}

impl<T: Buf> Icmpv6Packet<T> {
    /// Wrap `buf` without checking its length.
    #[inline]
    pub fn parse_unchecked(buf: T) -> Self {
        Self { buf }
    }

    /// The wrapped buffer.
    #[inline]
    pub fn buf(&self) -> &T {
        &self.buf
    }

    /// Give the wrapped buffer back.
    #[inline]
    pub fn release(self) -> T {
        self.buf
    }

    /// Wrap `buf` if it holds a complete basic header.
    #[inline]
    pub fn parse(buf: T) -> Result<Self, T> {
        if buf.chunk().len() < ICMPV6_HEADER_LEN {
            return Err(buf);
        }
        Ok(Self { buf })
    }

    /// The basic header bytes.
    #[inline]
    pub fn fix_header_slice(&self) -> &[u8] {
        &self.buf.chunk()[0..ICMPV6_HEADER_LEN]
    }

    /// The raw type byte.
    #[inline]
    pub fn msg_type(&self) -> u8 {
        self.buf.chunk()[0]
    }

    /// The message kind named by the type byte.
    #[inline]
    pub fn msg_kind(&self) -> Icmpv6MsgKind {
        Icmpv6MsgKind::from_type(self.msg_type())
    }

    /// The code byte.
    #[inline]
    pub fn code(&self) -> u8 {
        self.buf.chunk()[1]
    }

    /// The checksum field, in host order.
    #[inline]
    pub fn checksum(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.chunk()[2..4])
    }

    /// Header length of the message kind.
    #[inline]
    pub fn header_len(&self) -> usize {
        self.msg_kind().header_len()
    }

    /// Bytes following the basic header.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.buf.chunk()[ICMPV6_HEADER_LEN..]
    }

    /// Whether the one's-complement sum over the first `len` bytes of the
    /// chunk, checksum field included, is all ones.
    ///
    /// `len` is clamped to the chunk, as in [`fill_checksum`](Self::fill_checksum).
    #[inline]
    pub fn verify_checksum(&self, len: usize) -> bool {
        checksum_utils::from_buf(self.buf.chunk(), len) == 0xffff
    }
}

impl<T: PktBuf> Icmpv6Packet<T> {
    /// The bytes following the basic header.
    #[inline]
    pub fn payload(self) -> T {
        let mut buf = self.buf;
        buf.advance(ICMPV6_HEADER_LEN);
        buf
    }
}

impl<T: PktBufMut> Icmpv6Packet<T> {
    /// Write `header` in front of `buf`.
    ///
    /// # Panics
    /// Panics if the headroom of `buf` is smaller than the basic header.
    #[inline]
    pub fn prepend_header(mut buf: T, header: &[u8; ICMPV6_HEADER_LEN]) -> Self {
        buf.prepend(&header[..]);
        Self { buf }
    }

    /// Set the raw type byte.
    #[inline]
    pub fn set_msg_type(&mut self, value: u8) {
        self.buf.chunk_mut()[0] = value;
    }

    /// Set the code byte.
    #[inline]
    pub fn set_code(&mut self, value: u8) {
        self.buf.chunk_mut()[1] = value;
    }

    /// Set the checksum field.
    #[inline]
    pub fn set_checksum(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.buf.chunk_mut()[2..4], value);
    }

    /// Recompute the checksum over the first `len` bytes of the chunk.
    ///
    /// `len` is clamped to the chunk. No IPv6 pseudo-header takes part in the
    /// sum.
    #[inline]
    pub fn fill_checksum(&mut self, len: usize) {
        self.set_checksum(0);
        let cksum = !checksum_utils::from_buf(self.buf.chunk(), len);
        trace!(len, cksum, "icmpv6 checksum");
        self.set_checksum(cksum);
    }

    /// Mutable access to the bytes following the basic header.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.buf.chunk_mut()[ICMPV6_HEADER_LEN..]
    }
}

impl<'a> Icmpv6Packet<Cursor<'a>> {
    /// A cursor over the bytes following the basic header.
    #[inline]
    pub fn payload_as_cursor(&self) -> Cursor<'a> {
        let mut cursor = self.buf;
        cursor.advance(ICMPV6_HEADER_LEN);
        cursor
    }
}

impl<'a> Icmpv6Packet<CursorMut<'a>> {
    /// Split into the basic header bytes and the bytes that follow.
    #[inline]
    pub fn split(self) -> (&'a mut [u8], CursorMut<'a>) {
        let buf_mut = self.buf.chunk_mut_shared_lifetime();
        let (hdr, payload) = buf_mut.split_at_mut(ICMPV6_HEADER_LEN);
        (hdr, CursorMut::new(payload))
    }
}

impl<'a> Layer for Icmpv6Packet<Cursor<'a>> {
    #[inline]
    fn header_len(&self) -> usize {
        self.msg_kind().header_len()
    }

    // Error messages quote the offending packet; the quoted headers are left
    // as opaque payload.
    fn next_layer(&self) -> Option<LayerKind> {
        if self.msg_kind() == Icmpv6MsgKind::Unsupported {
            debug!(msg_type = self.msg_type(), "unsupported icmpv6 message type");
        }
        if self.buf.remaining() > Layer::header_len(self) {
            Some(LayerKind::Payload)
        } else {
            None
        }
    }
}
