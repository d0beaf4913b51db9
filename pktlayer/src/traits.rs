pub use bytes::Buf;

/// A packet buffer whose read cursor can step back into bytes it has
/// already passed, so that a header can be placed in front of a payload.
pub trait PktBuf: Buf {
    /// Move the cursor back by `cnt` bytes.
    fn move_back(&mut self, cnt: usize);
}

/// A packet buffer with write access to its current chunk.
pub trait PktBufMut: PktBuf {
    /// Number of bytes in front of the current chunk.
    fn chunk_headroom(&self) -> usize;

    /// The current chunk.
    fn chunk_mut(&mut self) -> &mut [u8];

    /// Step back over `header.len()` bytes of headroom and write `header`
    /// there. The chunk then starts with the new header.
    ///
    /// # Panics
    /// Panics if the headroom is smaller than `header`.
    #[inline]
    fn prepend(&mut self, header: &[u8]) {
        assert!(self.chunk_headroom() >= header.len());
        self.move_back(header.len());
        self.chunk_mut()[..header.len()].copy_from_slice(header);
    }
}

impl<T: PktBuf + ?Sized> PktBuf for &mut T {
    #[inline]
    fn move_back(&mut self, cnt: usize) {
        (**self).move_back(cnt)
    }
}

impl<T: PktBufMut + ?Sized> PktBufMut for &mut T {
    #[inline]
    fn chunk_headroom(&self) -> usize {
        (**self).chunk_headroom()
    }

    #[inline]
    fn chunk_mut(&mut self) -> &mut [u8] {
        (**self).chunk_mut()
    }
}
