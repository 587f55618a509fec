//! Socket options consumed by the mechanism core.

use bytes::Bytes;

use crate::error::{Result, ZmtpError};
use crate::protocol::{SocketType, MAX_ROUTING_ID_LEN};

/// Read-only socket options a mechanism is constructed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MechanismOptions {
    /// Local socket type
    pub socket_type: SocketType,
    /// Local routing id, sent as `Identity` by REQ, DEALER and ROUTER
    pub routing_id: Bytes,
    /// Capture the peer's `Identity` property as its routing id
    pub recv_routing_id: bool,
}

impl MechanismOptions {
    /// Create options with an empty routing id and capture disabled
    pub fn new(socket_type: SocketType) -> Self {
        Self {
            socket_type,
            routing_id: Bytes::new(),
            recv_routing_id: false,
        }
    }

    /// Set the local routing id
    pub fn with_routing_id(mut self, routing_id: impl Into<Bytes>) -> Result<Self> {
        let routing_id = routing_id.into();
        if routing_id.len() > MAX_ROUTING_ID_LEN {
            return Err(ZmtpError::Config(format!(
                "Routing id is {} bytes, maximum is {}",
                routing_id.len(),
                MAX_ROUTING_ID_LEN
            )));
        }
        self.routing_id = routing_id;
        Ok(self)
    }

    /// Enable or disable peer routing id capture
    pub fn with_recv_routing_id(mut self, enabled: bool) -> Self {
        self.recv_routing_id = enabled;
        self
    }
}
