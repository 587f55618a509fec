//! Handshake wire codec.
//!
//! Encodes metadata properties and assembles handshake commands. Decoding
//! lives in [`crate::protocol::metadata`], which applies protocol
//! semantics while it scans.

mod command;
mod property;

pub use command::{add_basic_properties, basic_properties_len, build_handshake_command};
pub use property::{add_property, property_len, MAX_NAME_LEN, MAX_VALUE_LEN, NAME_LEN_SIZE, VALUE_LEN_SIZE};

/// Property carrying the sender's socket type.
pub const PROPERTY_SOCKET_TYPE: &str = "Socket-Type";

/// Property carrying the sender's routing id.
pub const PROPERTY_IDENTITY: &str = "Identity";

/// Authentication-backend property holding the authenticated user id.
pub const PROPERTY_USER_ID: &str = "User-Id";
