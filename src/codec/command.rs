//! Handshake command assembly.
//!
//! A handshake command (READY, INITIATE, ...) is a mechanism-specific
//! prefix followed by the basic properties: `Socket-Type` always, and
//! `Identity` for socket types that carry a routing id. The buffer is
//! sized exactly before anything is written.

use bytes::{Bytes, BytesMut};

use super::property::{add_property, property_len};
use super::{PROPERTY_IDENTITY, PROPERTY_SOCKET_TYPE};
use crate::protocol::SocketType;

/// Encoded size of the basic properties for `socket_type`.
pub fn basic_properties_len(socket_type: SocketType, routing_id: &[u8]) -> usize {
    let mut len = property_len(PROPERTY_SOCKET_TYPE, socket_type.as_str().len());
    if socket_type.carries_routing_id() {
        len += property_len(PROPERTY_IDENTITY, routing_id.len());
    }
    len
}

/// Write the basic properties into `dst`, returning the bytes written.
///
/// # Panics
///
/// Panics if `dst` is shorter than [`basic_properties_len`].
pub fn add_basic_properties(dst: &mut [u8], socket_type: SocketType, routing_id: &[u8]) -> usize {
    let mut offset = add_property(dst, PROPERTY_SOCKET_TYPE, socket_type.as_str().as_bytes());

    if socket_type.carries_routing_id() {
        offset += add_property(&mut dst[offset..], PROPERTY_IDENTITY, routing_id);
    }

    offset
}

/// Build a complete handshake command: `prefix` followed by the basic
/// properties. The result has no slack bytes.
pub fn build_handshake_command(prefix: &[u8], socket_type: SocketType, routing_id: &[u8]) -> Bytes {
    let command_size = prefix.len() + basic_properties_len(socket_type, routing_id);
    let mut buf = BytesMut::zeroed(command_size);

    buf[..prefix.len()].copy_from_slice(prefix);
    let written = add_basic_properties(&mut buf[prefix.len()..], socket_type, routing_id);
    debug_assert_eq!(prefix.len() + written, command_size);

    buf.freeze()
}
