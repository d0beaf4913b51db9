use crate::{Buf, PktBuf, PktBufMut};

/// A read-only view over a contiguous packet buffer.
///
/// The cursor keeps the whole underlying slice, so it can move back into the
/// bytes it has already advanced over and report its absolute position with
/// [`Cursor::cursor`]. The layer arena relies on that position to locate a
/// layer inside the packet.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    start: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor covering all of `buf`.
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, start: 0 }
    }

    /// The whole underlying slice.
    #[inline]
    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    /// The current chunk, carrying the lifetime of the underlying buffer.
    #[inline]
    pub fn chunk_shared_lifetime(&self) -> &'a [u8] {
        &self.buf[self.start..]
    }

    /// Absolute position of the chunk start inside the underlying buffer.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.start
    }
}

impl<'a> Buf for Cursor<'a> {
    #[inline]
    fn remaining(&self) -> usize {
        self.buf.len() - self.start
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.start += cnt;
    }
}

impl<'a> PktBuf for Cursor<'a> {
    #[inline]
    fn move_back(&mut self, cnt: usize) {
        assert!(cnt <= self.start);
        self.start -= cnt;
    }
}

/// A mutable view over a contiguous packet buffer.
#[derive(Debug)]
pub struct CursorMut<'a> {
    buf: &'a mut [u8],
    start: usize,
}

impl<'a> CursorMut<'a> {
    /// Create a cursor covering all of `buf`.
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        CursorMut { buf, start: 0 }
    }

    /// The whole underlying slice.
    #[inline]
    pub fn buf(&self) -> &[u8] {
        self.buf
    }

    /// Consume the cursor and return the current chunk with the lifetime of
    /// the underlying buffer.
    #[inline]
    pub fn chunk_mut_shared_lifetime(self) -> &'a mut [u8] {
        let CursorMut { buf, start } = self;
        &mut buf[start..]
    }

    /// Absolute position of the chunk start inside the underlying buffer.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.start
    }
}

impl<'a> Buf for CursorMut<'a> {
    #[inline]
    fn remaining(&self) -> usize {
        self.buf.len() - self.start
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.start += cnt;
    }
}

impl<'a> PktBuf for CursorMut<'a> {
    #[inline]
    fn move_back(&mut self, cnt: usize) {
        assert!(cnt <= self.start);
        self.start -= cnt;
    }
}

impl<'a> PktBufMut for CursorMut<'a> {
    #[inline]
    fn chunk_headroom(&self) -> usize {
        self.start
    }

    #[inline]
    fn chunk_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.start..]
    }
}
