//! Utility functions for calculating Internet checksums.
//!
//! The summing routines follow smoltcp's `wire::ip::checksum` module.

use byteorder::{ByteOrder, NetworkEndian};
use bytes::Buf;

/// Compute an RFC 1071 compliant checksum (without the final complement) from
/// the first `len` bytes of a possibly multi-segment buffer `buf`.
///
/// A trailing odd byte is treated as the high half of a zero-padded word, even
/// when it sits at the end of an inner segment.
pub fn from_buf<T: Buf>(buf: T, len: usize) -> u16 {
    let mut buf = buf.take(len);
    let mut tail_byte = None;
    let mut accum = 0;

    while buf.has_remaining() {
        let chunk = buf.chunk();
        let chunk_len = chunk.len();

        tail_byte = from_slice_with_tail_byte(chunk, &mut accum, tail_byte);

        buf.advance(chunk_len);
    }

    if let Some(byte) = tail_byte {
        accum += (byte as u32) << 8;
    }

    propagate_carries(accum)
}

/// Compute an RFC 1071 compliant checksum (without the final complement).
///
/// The empty slice sums to zero.
pub fn from_slice(mut data: &[u8]) -> u16 {
    let mut accum = 0;

    // For each 32-byte chunk...
    const CHUNK_SIZE: usize = 32;
    while data.len() >= CHUNK_SIZE {
        let mut d = &data[..CHUNK_SIZE];
        // ... take by 2 bytes and sum them.
        while d.len() >= 2 {
            accum += NetworkEndian::read_u16(d) as u32;
            d = &d[2..];
        }

        data = &data[CHUNK_SIZE..];
    }

    // Sum the rest that does not fit the last 32-byte chunk,
    // taking by 2 bytes.
    while data.len() >= 2 {
        accum += NetworkEndian::read_u16(data) as u32;
        data = &data[2..];
    }

    // Add the last remaining odd byte, if any.
    if let Some(&value) = data.first() {
        accum += (value as u32) << 8;
    }

    propagate_carries(accum)
}

/// The Internet checksum of `data`: the complemented one's-complement sum.
///
/// This is the value that goes on the wire.
#[inline]
pub fn checksum(data: &[u8]) -> u16 {
    !from_slice(data)
}

fn from_slice_with_tail_byte(
    mut data: &[u8],
    accum: &mut u32,
    tail_byte: Option<u8>,
) -> Option<u8> {
    if let Some(byte) = tail_byte {
        match data.first() {
            Some(&next) => {
                *accum += NetworkEndian::read_u16(&[byte, next][..]) as u32;
                data = &data[1..];
            }
            None => return Some(byte),
        }
    }

    let mut words = data.chunks_exact(2);
    for word in &mut words {
        *accum += NetworkEndian::read_u16(word) as u32;
    }

    words.remainder().first().copied()
}

fn propagate_carries(word: u32) -> u16 {
    let sum = (word >> 16) + (word & 0xffff);
    ((sum >> 16) as u16) + (sum as u16)
}
