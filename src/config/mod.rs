//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//!
//! ```toml
//! [socket]
//! socket_type = "ROUTER"
//! routing_id = "broker-1"
//! recv_routing_id = true
//! ```

use std::path::PathBuf;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ZmtpError};
use crate::mechanism::MechanismOptions;
use crate::protocol::SocketType;

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Socket configuration
    #[serde(default)]
    pub socket: SocketConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Read failures surface as [`ZmtpError::Io`], parse failures as
    /// [`ZmtpError::Config`].
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;

        toml::from_str(&content)
            .map_err(|e| ZmtpError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a configuration from a variable lookup.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(socket_type) = lookup("ZMTP_SOCKET_TYPE") {
            match socket_type.parse() {
                Ok(socket_type) => config.socket.socket_type = socket_type,
                Err(e) => tracing::warn!("Ignoring ZMTP_SOCKET_TYPE: {}", e),
            }
        }
        if let Some(routing_id) = lookup("ZMTP_ROUTING_ID") {
            config.socket.routing_id = routing_id;
        }
        if let Some(val) = lookup("ZMTP_RECV_ROUTING_ID") {
            match val.parse() {
                Ok(val) => config.socket.recv_routing_id = val,
                Err(e) => tracing::warn!("Ignoring ZMTP_RECV_ROUTING_ID={:?}: {}", val, e),
            }
        }

        config
    }

    /// Default config file location (`<config dir>/zmtp/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zmtp").join("config.toml"))
    }

    /// Load the default config file if it exists, then apply environment
    /// overrides
    pub fn load() -> Result<Self> {
        let file_config = match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(path)?
            },
            _ => Self::default(),
        };
        Ok(file_config.merge(Self::from_env()))
    }

    /// Merge with another config (other takes precedence)
    pub fn merge(self, other: Self) -> Self {
        let defaults = SocketConfig::default();
        Self {
            socket: SocketConfig {
                socket_type: if other.socket.socket_type != defaults.socket_type {
                    other.socket.socket_type
                } else {
                    self.socket.socket_type
                },
                routing_id: if other.socket.routing_id != defaults.routing_id {
                    other.socket.routing_id
                } else {
                    self.socket.routing_id
                },
                recv_routing_id: if other.socket.recv_routing_id != defaults.recv_routing_id {
                    other.socket.recv_routing_id
                } else {
                    self.socket.recv_routing_id
                },
            },
        }
    }

    /// Validated options for constructing a mechanism
    pub fn mechanism_options(&self) -> Result<MechanismOptions> {
        let options = MechanismOptions::new(self.socket.socket_type)
            .with_routing_id(Bytes::from(self.socket.routing_id.clone().into_bytes()))?
            .with_recv_routing_id(self.socket.recv_routing_id);
        Ok(options)
    }
}

/// Socket configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketConfig {
    /// Local socket type
    pub socket_type: SocketType,

    /// Routing id advertised by REQ, DEALER and ROUTER sockets
    pub routing_id: String,

    /// Capture the routing id advertised by the peer
    pub recv_routing_id: bool,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            socket_type: SocketType::Dealer,
            routing_id: String::new(),
            recv_routing_id: false,
        }
    }
}
