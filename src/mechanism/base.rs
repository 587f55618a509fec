//! Identity, credential and metadata state shared by every mechanism.

use bytes::Bytes;

use super::options::MechanismOptions;
use super::{AcceptAll, PropertyHandler};
use crate::codec::{self, PROPERTY_USER_ID};
use crate::error::{Result, ZmtpError};
use crate::protocol::{Frame, Metadata, PropertyKind, PropertyReader, PropertyScope, RawProperty};

/// State one mechanism instance keeps for one connection attempt.
///
/// Holds the peer routing id, the authenticated user id and two property
/// dictionaries:
///
/// - **ZMTP properties**: received from the peer during the handshake.
/// - **ZAP properties**: exposed to the authentication backend, including
///   the authoritative `User-Id` entry.
///
/// Both dictionaries only grow. Property values from the wire are recorded
/// first-wins; [`set_user_id`](Self::set_user_id) is the one overwrite.
#[derive(Debug)]
pub struct MechanismCore<H = AcceptAll> {
    options: MechanismOptions,
    handler: H,
    zmtp_properties: Metadata,
    zap_properties: Metadata,
    routing_id: Bytes,
    user_id: Bytes,
}

impl MechanismCore<AcceptAll> {
    /// Create a core whose handler accepts every property
    pub fn new(options: MechanismOptions) -> Self {
        Self::with_handler(options, AcceptAll)
    }
}

impl<H: PropertyHandler> MechanismCore<H> {
    /// Create a core with a mechanism-specific property handler
    pub fn with_handler(options: MechanismOptions, handler: H) -> Self {
        Self {
            options,
            handler,
            zmtp_properties: Metadata::new(),
            zap_properties: Metadata::new(),
            routing_id: Bytes::new(),
            user_id: Bytes::new(),
        }
    }

    /// Socket options this core was built with
    pub fn options(&self) -> &MechanismOptions {
        &self.options
    }

    /// Property handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutable property handler
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Replace the peer routing id
    pub fn set_peer_routing_id(&mut self, routing_id: &[u8]) {
        self.routing_id = Bytes::copy_from_slice(routing_id);
    }

    /// Peer routing id, empty if none was received
    pub fn peer_routing_id(&self) -> &Bytes {
        &self.routing_id
    }

    /// Peer routing id as a frame tagged with [`FrameFlags::ROUTING_ID`].
    ///
    /// [`FrameFlags::ROUTING_ID`]: crate::protocol::FrameFlags::ROUTING_ID
    pub fn peer_routing_id_frame(&self) -> Frame {
        Frame::routing_id(self.routing_id.clone())
    }

    /// Record the authenticated user id.
    ///
    /// Also overwrites `User-Id` in the ZAP properties.
    pub fn set_user_id(&mut self, user_id: &[u8]) {
        self.user_id = Bytes::copy_from_slice(user_id);
        self.zap_properties.set(PROPERTY_USER_ID.as_bytes(), self.user_id.clone());
    }

    /// Authenticated user id, empty if none was set
    pub fn user_id(&self) -> &Bytes {
        &self.user_id
    }

    /// Properties received from the ZMTP peer
    pub fn zmtp_properties(&self) -> &Metadata {
        &self.zmtp_properties
    }

    /// Properties exposed to the ZAP backend
    pub fn zap_properties(&self) -> &Metadata {
        &self.zap_properties
    }

    /// Wire name of the local socket type
    pub fn socket_type_string(&self) -> &'static str {
        self.options.socket_type.as_str()
    }

    /// Encoded size of this socket's basic properties
    pub fn basic_properties_len(&self) -> usize {
        codec::basic_properties_len(self.options.socket_type, &self.options.routing_id)
    }

    /// Write this socket's basic properties into `dst`
    pub fn add_basic_properties(&self, dst: &mut [u8]) -> usize {
        codec::add_basic_properties(dst, self.options.socket_type, &self.options.routing_id)
    }

    /// Build a command frame from `prefix` and the basic properties
    pub fn make_command_with_basic_properties(&self, prefix: &[u8]) -> Frame {
        Frame::command(codec::build_handshake_command(
            prefix,
            self.options.socket_type,
            &self.options.routing_id,
        ))
    }

    /// Parse a metadata block and record its properties into `scope`.
    ///
    /// Properties are applied in wire order and the first failure stops the
    /// parse. Effects of properties before the failing one (a captured
    /// routing id, recorded entries) are kept; the caller is expected to
    /// drop the connection.
    pub fn parse_metadata(&mut self, data: &[u8], scope: PropertyScope) -> Result<()> {
        for property in PropertyReader::new(data) {
            let property = property.map_err(|err| {
                tracing::warn!(len = data.len(), "Malformed metadata: {}", err);
                err
            })?;
            self.apply_property(property, scope)?;
        }
        Ok(())
    }

    fn apply_property(&mut self, property: RawProperty<'_>, scope: PropertyScope) -> Result<()> {
        let RawProperty { name, value } = property;
        tracing::debug!(
            name = %String::from_utf8_lossy(name),
            len = value.len(),
            "metadata property"
        );

        match PropertyKind::classify(name) {
            PropertyKind::RoutingId if self.options.recv_routing_id => {
                self.set_peer_routing_id(value);
                tracing::debug!(len = value.len(), "captured peer routing id");
            },
            PropertyKind::SocketType => {
                if !self.check_socket_type(value) {
                    let peer = String::from_utf8_lossy(value).into_owned();
                    tracing::warn!(
                        local = self.socket_type_string(),
                        peer = %peer,
                        "Rejecting incompatible peer socket type"
                    );
                    return Err(ZmtpError::SocketTypeMismatch {
                        local: self.socket_type_string(),
                        peer,
                    });
                }
            },
            _ => self.handler.property(name, value).map_err(|err| {
                tracing::warn!(
                    name = %String::from_utf8_lossy(name),
                    "Property handler rejected property: {}",
                    err
                );
                err
            })?,
        }

        let properties = match scope {
            PropertyScope::Zmtp => &mut self.zmtp_properties,
            PropertyScope::Zap => &mut self.zap_properties,
        };
        properties.insert_if_absent(name, value);
        Ok(())
    }

    fn check_socket_type(&self, peer: &[u8]) -> bool {
        std::str::from_utf8(peer).is_ok_and(|peer| self.options.socket_type.is_compatible(peer))
    }
}
