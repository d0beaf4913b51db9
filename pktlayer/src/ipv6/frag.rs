use byteorder::{ByteOrder, NetworkEndian};

use crate::ip::IpProtocol;

/// Fixed byte length of the fragment header.
pub const FRAG_HEADER_LEN: usize = 8;

/// The IPv6 fragment header, RFC 8200 section 4.5.
///
/// In a layer chain a fragment header is decoded as a generic extension
/// header; this view gives typed access to its fields.
#[derive(Clone, Copy, Debug)]
pub struct FragHeader<T> {
    buf: T,
}

impl<T: AsRef<[u8]>> FragHeader<T> {
    /// Wrap `buf` if it holds a complete fragment header.
    #[inline]
    pub fn new(buf: T) -> Result<Self, T> {
        if buf.as_ref().len() >= FRAG_HEADER_LEN {
            Ok(Self { buf })
        } else {
            Err(buf)
        }
    }

    /// Wrap `buf` without checking its length.
    #[inline]
    pub fn new_unchecked(buf: T) -> Self {
        Self { buf }
    }

    /// The header bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf.as_ref()[0..FRAG_HEADER_LEN]
    }

    /// Copy the header into an owned array.
    #[inline]
    pub fn to_owned(&self) -> FragHeader<[u8; FRAG_HEADER_LEN]> {
        let mut buf = [0; FRAG_HEADER_LEN];
        buf.copy_from_slice(self.as_bytes());
        FragHeader { buf }
    }

    /// Protocol id of the header that follows.
    #[inline]
    pub fn next_header(&self) -> IpProtocol {
        self.buf.as_ref()[0].into()
    }

    /// Fragment offset in 8-octet units.
    #[inline]
    pub fn frag_off(&self) -> u16 {
        NetworkEndian::read_u16(&self.buf.as_ref()[2..4]) >> 3
    }

    /// true: more fragments follow
    #[inline]
    pub fn m_flag(&self) -> bool {
        (NetworkEndian::read_u16(&self.buf.as_ref()[2..4]) & 1) == 1
    }

    /// Fragment identification.
    #[inline]
    pub fn ident(&self) -> u32 {
        NetworkEndian::read_u32(&self.buf.as_ref()[4..8])
    }
}

impl<T: AsMut<[u8]>> FragHeader<T> {
    /// Set the protocol id of the header that follows.
    #[inline]
    pub fn set_next_header(&mut self, value: IpProtocol) {
        self.buf.as_mut()[0] = value.into();
    }

    /// Zero the reserved byte and the two reserved flag bits.
    #[inline]
    pub fn adjust_reserved(&mut self) {
        self.buf.as_mut()[1] = 0;

        let data = &mut self.buf.as_mut()[2..4];
        let raw = NetworkEndian::read_u16(data);
        NetworkEndian::write_u16(data, raw & 0xfff9);
    }

    /// Set the fragment offset, in 8-octet units.
    ///
    /// # Panics
    /// Panics if `value` does not fit in 13 bits.
    #[inline]
    pub fn set_frag_off(&mut self, value: u16) {
        assert!(value <= 0x1fff);
        let data = &mut self.buf.as_mut()[2..4];
        let low_bits = NetworkEndian::read_u16(data) & 0x7;
        NetworkEndian::write_u16(data, value << 3 | low_bits);
    }

    /// Set the more-fragments flag.
    #[inline]
    pub fn set_m_flag(&mut self, value: bool) {
        let data = &mut self.buf.as_mut()[2..4];
        let raw = NetworkEndian::read_u16(data) & !1;
        NetworkEndian::write_u16(data, raw | value as u16);
    }

    /// Set the fragment identification.
    #[inline]
    pub fn set_ident(&mut self, value: u32) {
        NetworkEndian::write_u32(&mut self.buf.as_mut()[4..8], value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_fields() {
        let bytes = [0x11, 0x00, 0x05, 0x39, 0xde, 0xad, 0xbe, 0xef];
        let frag = FragHeader::new(&bytes[..]).unwrap();
        assert_eq!(frag.next_header(), IpProtocol::UDP);
        assert_eq!(frag.frag_off(), 0x0539 >> 3);
        assert!(frag.m_flag());
        assert_eq!(frag.ident(), 0xdeadbeef);
        assert!(FragHeader::new(&bytes[..7]).is_err());
    }

    #[test]
    fn write_fields() {
        let mut frag = FragHeader::new_unchecked([0xffu8; 8]);
        frag.adjust_reserved();
        frag.set_next_header(IpProtocol::TCP);
        frag.set_frag_off(185);
        frag.set_m_flag(false);
        frag.set_ident(7);

        assert_eq!(frag.next_header(), IpProtocol::TCP);
        assert_eq!(frag.frag_off(), 185);
        assert!(!frag.m_flag());
        assert_eq!(frag.ident(), 7);
        assert_eq!(frag.as_bytes()[1], 0);
        assert_eq!(frag.as_bytes()[3] & 0x06, 0);
    }
}
