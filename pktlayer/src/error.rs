use crate::{LayerId, LayerKind};

/// Alias for results returned by the structural operations of a [`Packet`](crate::Packet).
pub type Result<T> = core::result::Result<T, LayerError>;

/// Failures of structural operations on a layer chain.
///
/// Malformed or unknown protocol data is never reported through this type;
/// decoding degrades to an opaque payload layer instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayerError {
    /// The handle does not name a layer currently linked in the packet.
    #[error("layer {0:?} is not part of the packet")]
    LayerNotFound(LayerId),

    /// The layer exists but is not of the kind the operation works on.
    #[error("layer {id:?} is a {kind:?} layer")]
    WrongKind {
        /// The offending layer.
        id: LayerId,
        /// Its actual kind.
        kind: LayerKind,
    },

    /// A byte range falls outside the region it was checked against.
    #[error("range {offset}..{offset}+{len} exceeds region of {size} bytes")]
    OutOfBounds {
        /// Start of the requested range.
        offset: usize,
        /// Length of the requested range.
        len: usize,
        /// Size of the region the range was checked against.
        size: usize,
    },

    /// The bytes handed in for a new layer differ in length from the header
    /// length the layer reports for itself.
    #[error("{kind:?} header reports {reported} bytes, {len} given")]
    HeaderLenMismatch {
        /// Kind of the layer being inserted.
        kind: LayerKind,
        /// Header length decoded from the given bytes.
        reported: usize,
        /// Number of bytes given.
        len: usize,
    },

    /// Offset arithmetic would overflow `usize`.
    #[error("offset arithmetic overflowed")]
    LengthOverflow,
}
