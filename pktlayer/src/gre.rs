//! GRE version probing and header-length rules.
//!
//! Version 0 is the generic encapsulation of RFC 2784/2890, version 1 is the
//! enhanced GRE used by PPTP (RFC 2637).

/// Length of the mandatory flags/version + protocol type words.
pub const GRE_BASIC_HEADER_LEN: usize = 4;

/// Length of the fixed GREv1 header (basic header plus payload length and call id).
pub const GREV1_HEADER_LEN: usize = 8;

/// The GRE version found in the low 3 bits of the second header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreVersion {
    /// Generic GRE.
    V0,
    /// Enhanced GRE (PPTP).
    V1,
}

impl GreVersion {
    /// Probe the version sub-field of the GRE header at the start of `buf`.
    ///
    /// Returns `None` if `buf` is shorter than the basic header or carries a
    /// version other than 0 and 1.
    #[inline]
    pub fn probe(buf: &[u8]) -> Option<Self> {
        if buf.len() < GRE_BASIC_HEADER_LEN {
            return None;
        }
        match buf[1] & 0x07 {
            0 => Some(Self::V0),
            1 => Some(Self::V1),
            _ => None,
        }
    }
}

/// Header length of a GREv0 header given its first 16-bit word.
#[inline]
pub fn gre_header_len(indicator_field: u16) -> usize {
    let options = [
        // checksum or routing carries checksum + offset
        ((indicator_field & (1 << 15) != 0) | (indicator_field & (1 << 14) != 0)),
        // key
        indicator_field & (1 << 13) != 0,
        // seq
        indicator_field & (1 << 12) != 0,
    ];

    options
        .iter()
        .fold(GRE_BASIC_HEADER_LEN, |aggre, item| aggre + if *item { 4 } else { 0 })
}

/// Header length of a GREv1 header given its first 16-bit word.
#[inline]
pub fn gre_pptp_header_len(indicator_field: u16) -> usize {
    let options = [
        // seq
        indicator_field & (1 << 12) != 0,
        // ack
        indicator_field & (1 << 7) != 0,
    ];

    options
        .iter()
        .fold(GREV1_HEADER_LEN, |aggre, item| aggre + if *item { 4 } else { 0 })
}
