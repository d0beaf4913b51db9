//! IPv6 extension headers.
//!
//! Every extension header handled here starts with the same two bytes: the
//! protocol id of the following header and the header length in 8-octet units,
//! not counting the first 8 octets.

use crate::ip::IpProtocol;
use crate::{Buf, PktBuf, PktBufMut};
use crate::{Cursor, CursorMut};
use crate::{Layer, LayerKind};

mod dispatch;
pub use dispatch::dispatch_next_header;

mod frag;
pub use frag::{FragHeader, FRAG_HEADER_LEN};

/// The minimal byte length of an IPv6 extension header.
pub const IPV6_EXT_HEADER_LEN: usize = 8;

/// An all-zero extension header, used for freshly constructed layers.
pub const IPV6_EXT_HEADER_TEMPLATE: [u8; IPV6_EXT_HEADER_LEN] = [0x00; IPV6_EXT_HEADER_LEN];

/// Byte length of an extension header whose length field holds `units`.
#[inline]
pub const fn ext_header_len(units: u8) -> usize {
    8 * (1 + units as usize)
}

/// A generic IPv6 extension header.
///
/// The header length is derived from the length field alone. A header that
/// claims more bytes than the buffer holds is still accepted by [`parse`];
/// [`payload`] then yields an empty buffer.
///
/// [`parse`]: Ipv6ExtPacket::parse
/// [`payload`]: Ipv6ExtPacket::payload
#[derive(Debug, Clone, Copy)]
pub struct Ipv6ExtPacket<T> {
    buf: T,
}

impl<T: Buf> Ipv6ExtPacket<T> {
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

    /// Wrap `buf` if it holds at least the minimal extension header.
    #[inline]
    pub fn parse(buf: T) -> Result<Self, T> {
        if buf.chunk().len() < IPV6_EXT_HEADER_LEN {
            return Err(buf);
        }
        Ok(Self { buf })
    }

    /// The first 8 octets.
    #[inline]
    pub fn fix_header_slice(&self) -> &[u8] {
        &self.buf.chunk()[0..IPV6_EXT_HEADER_LEN]
    }

    /// The type-specific bytes beyond the first two, limited to what the
    /// buffer actually holds.
    #[inline]
    pub fn var_header_slice(&self) -> &[u8] {
        let end = self.header_len().min(self.buf.chunk().len());
        &self.buf.chunk()[2..end]
    }

    /// Protocol id of the header that follows.
    #[inline]
    pub fn next_header(&self) -> IpProtocol {
        IpProtocol::from(self.buf.chunk()[0])
    }

    /// The raw length field, in 8-octet units beyond the first 8 octets.
    #[inline]
    pub fn header_len_units(&self) -> u8 {
        self.buf.chunk()[1]
    }

    /// `8 * (1 + header_len_units)`.
    #[inline]
    pub fn header_len(&self) -> usize {
        ext_header_len(self.header_len_units())
    }
}

impl<T: PktBuf> Ipv6ExtPacket<T> {
    /// The bytes following this header.
    #[inline]
    pub fn payload(self) -> T {
        let header_len = self.header_len().min(self.buf.remaining());
        let mut buf = self.buf;
        buf.advance(header_len);
        buf
    }
}

impl<T: PktBufMut> Ipv6ExtPacket<T> {
    /// Write `header` in front of `buf`.
    ///
    /// # Panics
    /// Panics if the headroom of `buf` is smaller than the header.
    #[inline]
    pub fn prepend_header(mut buf: T, header: &[u8]) -> Self {
        assert!(header.len() >= IPV6_EXT_HEADER_LEN);
        buf.prepend(header);
        Self { buf }
    }

    /// Set the protocol id of the header that follows.
    #[inline]
    pub fn set_next_header(&mut self, value: IpProtocol) {
        self.buf.chunk_mut()[0] = u8::from(value);
    }

    /// Set the raw length field.
    #[inline]
    pub fn set_header_len_units(&mut self, value: u8) {
        self.buf.chunk_mut()[1] = value;
    }

    /// Mutable access to the type-specific bytes.
    #[inline]
    pub fn var_header_slice_mut(&mut self) -> &mut [u8] {
        let end = self.header_len().min(self.buf.chunk().len());
        &mut self.buf.chunk_mut()[2..end]
    }
}

impl<'a> Ipv6ExtPacket<Cursor<'a>> {
    /// A cursor over the bytes following this header.
    #[inline]
    pub fn payload_as_cursor(&self) -> Cursor<'a> {
        let mut cursor = self.buf;
        cursor.advance(self.header_len().min(cursor.remaining()));
        cursor
    }
}

impl<'a> Layer for Ipv6ExtPacket<Cursor<'a>> {
    #[inline]
    fn header_len(&self) -> usize {
        ext_header_len(self.header_len_units())
    }

    #[inline]
    fn next_layer(&self) -> Option<LayerKind> {
        dispatch_next_header(
            self.next_header(),
            self.payload_as_cursor().chunk_shared_lifetime(),
        )
    }
}

impl<'a> Ipv6ExtPacket<CursorMut<'a>> {
    /// Split into the header bytes and the bytes that follow.
    #[inline]
    pub fn split(self) -> (&'a mut [u8], CursorMut<'a>) {
        let header_len = self.header_len();
        let buf_mut = self.buf.chunk_mut_shared_lifetime();
        let mid = header_len.min(buf_mut.len());
        let (hdr, payload) = buf_mut.split_at_mut(mid);
        (hdr, CursorMut::new(payload))
    }
}
