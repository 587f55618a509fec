//! Security mechanism framework.
//!
//! Concrete mechanisms (NULL, PLAIN, CURVE, GSSAPI) live outside this
//! crate. Each one owns a [`MechanismCore`] for the connection it is
//! negotiating and implements [`Mechanism`] so the session can drive it:
//!
//! ```text
//!     Session                        Mechanism
//!        |                               |
//!        |--- next_handshake_command --->|  core.make_command_with_basic_properties()
//!        |<-------- Frame ---------------|
//!        |                               |
//!        |--- process_handshake_command->|  core.parse_metadata()
//!        |                               |
//!        |--- status() ----------------->|  Handshaking | Ready | Error
//! ```
//!
//! Mechanism-specific properties reach the mechanism through its
//! [`PropertyHandler`], which the core calls for every property it does
//! not handle itself.
//!
//! # Usage
//!
//! ```rust,ignore
//! use zmtp::mechanism::{MechanismCore, MechanismOptions};
//! use zmtp::protocol::{PropertyScope, SocketType};
//!
//! let options = MechanismOptions::new(SocketType::Dealer).with_routing_id(&b"worker-1"[..])?;
//! let mut core = MechanismCore::new(options);
//!
//! let ready = core.make_command_with_basic_properties(b"\x05READY");
//! // ... send `ready`, receive the peer's READY body ...
//! core.parse_metadata(&peer_metadata, PropertyScope::Zmtp)?;
//! ```

mod base;
mod options;

pub use base::MechanismCore;
pub use options::MechanismOptions;

use crate::error::Result;
use crate::protocol::Frame;

/// Handshake status reported by a mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MechanismStatus {
    /// Handshake in progress
    #[default]
    Handshaking,
    /// Handshake complete, messages may flow
    Ready,
    /// Handshake failed
    Error,
}

/// Interface a session uses to drive a security mechanism
pub trait Mechanism {
    /// Prepare the next handshake command, or `None` if there is nothing
    /// to send yet.
    fn next_handshake_command(&mut self) -> Result<Option<Frame>>;

    /// Process a handshake command received from the peer.
    fn process_handshake_command(&mut self, command: &Frame) -> Result<()>;

    /// Transform an outgoing frame after the handshake.
    fn encode(&mut self, frame: Frame) -> Result<Frame> {
        Ok(frame)
    }

    /// Transform an incoming frame after the handshake.
    fn decode(&mut self, frame: Frame) -> Result<Frame> {
        Ok(frame)
    }

    /// Notify the mechanism that a ZAP reply is available.
    fn zap_msg_available(&mut self) -> Result<()> {
        Ok(())
    }

    /// Current handshake status.
    fn status(&self) -> MechanismStatus;
}

/// Mechanism hook for properties the core does not handle itself.
///
/// Names are passed as raw bytes, exactly as received. Returning an error stops the metadata parse; the error is passed to the
/// caller unchanged. Use [`ZmtpError::rejected`] for refusals.
///
/// [`ZmtpError::rejected`]: crate::error::ZmtpError::rejected
pub trait PropertyHandler {
    /// Inspect one property. The default accepts everything.
    fn property(&mut self, name: &[u8], value: &[u8]) -> Result<()> {
        let _ = (name, value);
        Ok(())
    }
}

/// Handler that accepts every property
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl PropertyHandler for AcceptAll {}

impl<F> PropertyHandler for F
where
    F: FnMut(&[u8], &[u8]) -> Result<()>,
{
    fn property(&mut self, name: &[u8], value: &[u8]) -> Result<()> {
        self(name, value)
    }
}
