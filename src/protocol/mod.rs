//! ZMTP handshake protocol primitives.
//!
//! # Handshake Metadata
//!
//! During the security handshake each peer sends a command (READY,
//! INITIATE, ...) whose body ends in a metadata block:
//!
//! ```text
//! Peer A                                   Peer B
//!    |                                        |
//!    |-- READY  Socket-Type=REQ ------------->|  check REQ against B's type
//!    |          Identity=<routing id>         |  capture routing id
//!    |                                        |
//!    |<-------- READY  Socket-Type=ROUTER ----|  check ROUTER against A's type
//!    |          Identity=<routing id>         |
//! ```
//!
//! ## Reserved Properties
//!
//! | Name          | Handling                                            |
//! |---------------|-----------------------------------------------------|
//! | `Socket-Type` | Checked against the local socket type               |
//! | `Identity`    | Captured as peer routing id when enabled            |
//! | (other)       | Passed to the mechanism's property handler          |
//!
//! All properties, reserved or not, are then recorded in the selected
//! [`Metadata`] dictionary.

pub mod metadata;
mod message;
mod socket_type;

pub use message::{Frame, FrameFlags};
pub use metadata::{Metadata, PropertyKind, PropertyReader, PropertyScope, RawProperty};
pub use socket_type::SocketType;

/// Maximum routing id length in bytes.
pub const MAX_ROUTING_ID_LEN: usize = 255;
