#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![no_std]

//! Decode a contiguous packet buffer into a chain of zero-copy protocol layers.
//!
//! The crate covers IPv6 extension-header chains and ICMPv6 messages. A
//! [`Packet`] owns the backing bytes together with an arena of layer nodes,
//! each node describing a region of the buffer. Decoding walks forward from
//! the first layer, letting every layer decide the kind of its successor from
//! an untrusted protocol id, until a terminal layer is reached.
//!
//! # Example
//!
//! ```rust
//! use pktlayer::icmpv6::Icmpv6MsgKind;
//! use pktlayer::{LayerKind, Packet};
//!
//! // echo request with a 4-byte body
//! let bytes = [0x80, 0x00, 0x00, 0x00, 0xde, 0xad, 0xbe, 0xef];
//! let mut pkt = Packet::parse(&bytes[..], LayerKind::Icmpv6);
//!
//! let icmp = pkt.first_layer().unwrap();
//! assert!(pkt.is_icmpv6_msg_of_kind(icmp, Icmpv6MsgKind::EchoRequest));
//! assert_eq!(pkt.kind(pkt.next_layer(icmp).unwrap()), Some(LayerKind::Payload));
//!
//! pkt.compute_calculate_fields().unwrap();
//! assert_ne!(pkt.icmpv6(icmp).unwrap().checksum(), 0);
//! ```

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

mod traits;
pub use traits::{Buf, PktBuf, PktBufMut};

mod cursors;
pub use cursors::{Cursor, CursorMut};

mod error;
pub use error::{LayerError, Result};

pub mod checksum_utils;

pub mod gre;
pub mod icmpv6;
pub mod ip;
pub mod ipv6;

mod layer;
pub use layer::{Layer, LayerKind, LayerSummary};

mod packet;
pub use packet::{LayerId, Layers, Packet};
