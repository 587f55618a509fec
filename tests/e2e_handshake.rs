//! End-to-end handshake tests.
//!
//! These tests drive two mechanism cores through a READY exchange using a
//! minimal mechanism, the way a session would.

use zmtp::codec::{PROPERTY_IDENTITY, PROPERTY_SOCKET_TYPE, PROPERTY_USER_ID};
use zmtp::mechanism::{Mechanism, MechanismCore, MechanismOptions, MechanismStatus, PropertyHandler};
use zmtp::protocol::{Frame, PropertyScope, SocketType};
use zmtp::{Result, ZmtpError};

const READY: &[u8] = b"\x05READY";

/// Mechanism that exchanges one READY command each way.
struct ReadyMechanism<H: PropertyHandler> {
    core: MechanismCore<H>,
    ready_sent: bool,
    ready_received: bool,
    failed: bool,
}

impl<H: PropertyHandler> ReadyMechanism<H> {
    fn new(core: MechanismCore<H>) -> Self {
        Self {
            core,
            ready_sent: false,
            ready_received: false,
            failed: false,
        }
    }
}

impl<H: PropertyHandler> Mechanism for ReadyMechanism<H> {
    fn next_handshake_command(&mut self) -> Result<Option<Frame>> {
        if self.ready_sent {
            return Ok(None);
        }
        self.ready_sent = true;
        Ok(Some(self.core.make_command_with_basic_properties(READY)))
    }

    fn process_handshake_command(&mut self, command: &Frame) -> Result<()> {
        if !command.data.starts_with(READY) {
            self.failed = true;
            return Err(ZmtpError::Protocol("expected READY".to_string()));
        }
        if let Err(err) = self
            .core
            .parse_metadata(&command.data[READY.len()..], PropertyScope::Zmtp)
        {
            self.failed = true;
            return Err(err);
        }
        self.ready_received = true;
        Ok(())
    }

    fn status(&self) -> MechanismStatus {
        if self.failed {
            MechanismStatus::Error
        } else if self.ready_sent && self.ready_received {
            MechanismStatus::Ready
        } else {
            MechanismStatus::Handshaking
        }
    }
}

fn options(socket_type: SocketType, routing_id: &'static [u8]) -> MechanismOptions {
    MechanismOptions::new(socket_type)
        .with_routing_id(routing_id)
        .unwrap()
        .with_recv_routing_id(true)
}

/// Run both sides of the exchange, returning each side's processing result.
fn exchange<A: Mechanism, B: Mechanism>(a: &mut A, b: &mut B) -> (Result<()>, Result<()>) {
    let from_a = a.next_handshake_command().unwrap().unwrap();
    let from_b = b.next_handshake_command().unwrap().unwrap();
    (a.process_handshake_command(&from_b), b.process_handshake_command(&from_a))
}

#[test]
fn test_req_router_handshake() {
    let mut client = ReadyMechanism::new(MechanismCore::new(options(SocketType::Req, b"client-1")));
    let mut broker = ReadyMechanism::new(MechanismCore::new(options(SocketType::Router, b"broker")));

    let (client_result, broker_result) = exchange(&mut client, &mut broker);
    client_result.unwrap();
    broker_result.unwrap();

    assert_eq!(client.status(), MechanismStatus::Ready);
    assert_eq!(broker.status(), MechanismStatus::Ready);

    assert_eq!(broker.core.peer_routing_id().as_ref(), b"client-1");
    assert_eq!(client.core.peer_routing_id().as_ref(), b"broker");
    assert_eq!(
        broker.core.zmtp_properties().get_str(PROPERTY_SOCKET_TYPE),
        Some("REQ")
    );

    let envelope = broker.core.peer_routing_id_frame();
    assert!(envelope.is_routing_id());
    assert_eq!(envelope.data.as_ref(), b"client-1");

    assert!(client.next_handshake_command().unwrap().is_none());
}

#[test]
fn test_pub_sub_handshake_without_identity() {
    let mut publisher = ReadyMechanism::new(MechanismCore::new(options(SocketType::Pub, b"unused")));
    let mut subscriber = ReadyMechanism::new(MechanismCore::new(options(SocketType::Sub, b"unused")));

    let (pub_result, sub_result) = exchange(&mut publisher, &mut subscriber);
    pub_result.unwrap();
    sub_result.unwrap();

    // PUB and SUB never advertise an Identity
    assert!(publisher.core.peer_routing_id().is_empty());
    assert!(!subscriber.core.zmtp_properties().contains(PROPERTY_IDENTITY));
}

#[test]
fn test_incompatible_sockets_fail() {
    let mut push = ReadyMechanism::new(MechanismCore::new(options(SocketType::Push, b"")));
    let mut rep = ReadyMechanism::new(MechanismCore::new(options(SocketType::Rep, b"")));

    let (push_result, rep_result) = exchange(&mut push, &mut rep);
    assert!(push_result.unwrap_err().is_authentication());
    assert!(rep_result.unwrap_err().is_authentication());
    assert_eq!(push.status(), MechanismStatus::Error);
    assert_eq!(rep.status(), MechanismStatus::Error);
}

#[test]
fn test_req_to_push_keeps_identity_before_mismatch() {
    // REQ sends Socket-Type before Identity, so reorder by hand:
    // Identity first, then an incompatible Socket-Type.
    let len = zmtp::property_len(PROPERTY_IDENTITY, 3) + zmtp::property_len(PROPERTY_SOCKET_TYPE, 3);
    let mut metadata = vec![0u8; len];
    let offset = zmtp::add_property(&mut metadata, PROPERTY_IDENTITY, &[0xAA, 0xBB, 0xCC]);
    zmtp::add_property(&mut metadata[offset..], PROPERTY_SOCKET_TYPE, b"REP");

    let mut push = MechanismCore::new(options(SocketType::Push, b""));
    push.set_peer_routing_id(b"old");
    let err = push.parse_metadata(&metadata, PropertyScope::Zmtp).unwrap_err();

    assert!(matches!(err, ZmtpError::SocketTypeMismatch { .. }));
    assert_eq!(push.peer_routing_id().as_ref(), &[0xAA, 0xBB, 0xCC]);
}

struct ResourceCheck {
    allowed: &'static [u8],
}

impl PropertyHandler for ResourceCheck {
    fn property(&mut self, name: &[u8], value: &[u8]) -> Result<()> {
        if name == b"Resource" && value != self.allowed {
            return Err(ZmtpError::rejected(name, "unknown resource"));
        }
        Ok(())
    }
}

#[test]
fn test_property_handler_rejects_resource() {
    let handler = ResourceCheck { allowed: b"/jobs" };
    let mut server = MechanismCore::with_handler(options(SocketType::Router, b""), handler);

    let command = zmtp::build_handshake_command(b"", SocketType::Dealer, b"w1");
    let mut metadata = command.to_vec();
    let start = metadata.len();
    metadata.resize(start + zmtp::property_len("Resource", 6), 0);
    zmtp::add_property(&mut metadata[start..], "Resource", b"/admin");

    let err = server.parse_metadata(&metadata, PropertyScope::Zmtp).unwrap_err();
    assert!(matches!(err, ZmtpError::PropertyRejected { ref name, .. } if name == "Resource"));
    assert!(err.is_authentication());

    // Basic properties before the rejected one were applied
    assert_eq!(server.peer_routing_id().as_ref(), b"w1");
    assert!(server.zmtp_properties().contains(PROPERTY_SOCKET_TYPE));
}

#[test]
fn test_zap_properties_for_backend() {
    let mut server = MechanismCore::new(options(SocketType::Rep, b""));

    let command = zmtp::build_handshake_command(b"", SocketType::Req, b"c1");
    server.parse_metadata(&command, PropertyScope::Zmtp).unwrap();

    // Re-derive accepted properties for the ZAP backend, then authenticate
    server.parse_metadata(&command, PropertyScope::Zap).unwrap();
    server.set_user_id(b"alice");

    let zap = server.zap_properties();
    assert_eq!(zap.get_str(PROPERTY_SOCKET_TYPE), Some("REQ"));
    assert_eq!(zap.get_str(PROPERTY_IDENTITY), Some("c1"));
    assert_eq!(zap.get_str(PROPERTY_USER_ID), Some("alice"));
    assert_eq!(server.user_id().as_ref(), b"alice");
    assert!(!server.zmtp_properties().contains(PROPERTY_USER_ID));
}

#[test]
fn test_trailing_garbage_is_structural() {
    let mut server = MechanismCore::new(options(SocketType::Router, b""));
    let mut metadata = zmtp::build_handshake_command(b"", SocketType::Dealer, b"w1").to_vec();
    metadata.push(0x00);

    let err = server.parse_metadata(&metadata, PropertyScope::Zmtp).unwrap_err();
    assert!(err.is_structural());
}
