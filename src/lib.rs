//! # ZMTP Core - Security Mechanism Negotiation
//!
//! Shared logic used by every ZMTP security mechanism (NULL, PLAIN, CURVE,
//! ...) to exchange socket metadata before a connection is admitted.
//!
//! ## Features
//!
//! - **Metadata codec**: exact-size TLV property encoding
//! - **Bounds-checked parser**: scans untrusted metadata blocks with an
//!   explicit cursor, never reading past the buffer
//! - **Socket-type matching**: which socket types may connect to which
//! - **Identity state**: peer routing id, authenticated user id, and the
//!   ZMTP / ZAP property dictionaries
//!
//! ## Wire Format
//!
//! A metadata block is zero or more properties:
//!
//! | Field       | Size             | Encoding             |
//! |-------------|------------------|----------------------|
//! | name length | 1 byte           | unsigned             |
//! | name        | name length      | case-sensitive text  |
//! | value length| 4 bytes          | big-endian u32       |
//! | value       | value length     | opaque bytes         |
//!
//! Reserved names:
//!
//! | Name          | Meaning                                   |
//! |---------------|-------------------------------------------|
//! | `Socket-Type` | Sender's socket type (`REQ`, `ROUTER`, ...)|
//! | `Identity`    | Sender's routing id                       |
//! | `User-Id`     | Authenticated user (ZAP properties only)  |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zmtp::{MechanismCore, MechanismOptions, PropertyScope, SocketType};
//!
//! let options = MechanismOptions::new(SocketType::Router).with_recv_routing_id(true);
//! let mut core = MechanismCore::new(options);
//!
//! // Outgoing READY command
//! let ready = core.make_command_with_basic_properties(b"\x05READY");
//!
//! // Incoming READY metadata from the peer
//! core.parse_metadata(&peer_metadata, PropertyScope::Zmtp)?;
//! let peer = core.peer_routing_id();
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: Property encoding and command assembly
//! - [`protocol`]: Socket types, metadata scanning, frames
//! - [`mechanism`]: Mechanism interface and shared mechanism state
//! - [`config`]: Configuration management
//! - [`error`]: Error types and result aliases

pub mod codec;
pub mod config;
pub mod error;
pub mod mechanism;
pub mod protocol;

// Re-exports for convenience
pub use codec::{add_property, build_handshake_command, property_len};
pub use config::Config;
pub use error::{Result, ZmtpError};
pub use mechanism::{AcceptAll, Mechanism, MechanismCore, MechanismOptions, MechanismStatus, PropertyHandler};
pub use protocol::{Frame, FrameFlags, Metadata, PropertyScope, SocketType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
