//! ZMTP mechanism error types.
//!
//! # Error Classification
//!
//! Errors surfaced by the mechanism core fall into two connection-level
//! classes. Both abort the current metadata parse and require the owning
//! session to close the connection without acting on partial state.
//!
//! | Class          | Variants                                  | ZMQ errno |
//! |----------------|-------------------------------------------|-----------|
//! | Structural     | `Protocol`                                | `EPROTO`  |
//! | Authentication | `SocketTypeMismatch`, `PropertyRejected`  | `EINVAL`  |
//!
//! Violated encoding preconditions (property name longer than 255 bytes,
//! value longer than `0x7FFFFFFF`, undersized destination buffer) are
//! programmer errors and panic instead of returning a variant here.

use thiserror::Error;

/// ZMTP mechanism errors.
#[derive(Error, Debug)]
pub enum ZmtpError {
    /// Malformed metadata framing.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Peer advertised a socket type the local socket cannot talk to.
    #[error("Socket type mismatch: {local} cannot connect to {peer}")]
    SocketTypeMismatch {
        /// Local socket type name.
        local: &'static str,
        /// Socket type reported by the peer (lossily decoded).
        peer: String,
    },

    /// A mechanism-specific property handler refused a property.
    #[error("Property rejected: {name}: {reason}")]
    PropertyRejected {
        /// Property name (lossily decoded).
        name: String,
        /// Why the handler refused it.
        reason: String,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ZmtpError {
    /// Build a [`ZmtpError::PropertyRejected`] from a handler.
    ///
    /// The name is decoded lossily for display.
    pub fn rejected(name: &[u8], reason: impl Into<String>) -> Self {
        ZmtpError::PropertyRejected {
            name: String::from_utf8_lossy(name).into_owned(),
            reason: reason.into(),
        }
    }

    /// True for malformed-framing errors.
    pub fn is_structural(&self) -> bool {
        matches!(self, ZmtpError::Protocol(_))
    }

    /// True for errors raised by role validation or a property handler.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            ZmtpError::SocketTypeMismatch { .. } | ZmtpError::PropertyRejected { .. }
        )
    }
}

/// Result type alias for ZMTP mechanism operations
pub type Result<T> = std::result::Result<T, ZmtpError>;

impl From<toml::de::Error> for ZmtpError {
    fn from(err: toml::de::Error) -> Self {
        ZmtpError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let structural = ZmtpError::Protocol("truncated value".to_string());
        assert!(structural.is_structural());
        assert!(!structural.is_authentication());

        let mismatch = ZmtpError::SocketTypeMismatch {
            local: "PUSH",
            peer: "REP".to_string(),
        };
        assert!(mismatch.is_authentication());
        assert!(!mismatch.is_structural());

        let rejected = ZmtpError::rejected(b"X-Token", "expired");
        assert!(rejected.is_authentication());
        assert_eq!(rejected.to_string(), "Property rejected: X-Token: expired");
    }

    #[test]
    fn test_toml_error_maps_to_config() {
        let err: ZmtpError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        assert!(matches!(err, ZmtpError::Config(_)));
    }
}
