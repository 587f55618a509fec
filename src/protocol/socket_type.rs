//! Socket types and the peer compatibility matrix.
//!
//! Every socket advertises its type in the `Socket-Type` handshake
//! property. A connection is admitted only when the local type accepts
//! the peer's advertised name:
//!
//! | Local            | Accepted peers              |
//! |------------------|-----------------------------|
//! | `REQ`            | `REP`, `ROUTER`             |
//! | `REP`            | `REQ`, `DEALER`             |
//! | `DEALER`         | `REP`, `DEALER`, `ROUTER`   |
//! | `ROUTER`         | `REQ`, `DEALER`, `ROUTER`   |
//! | `PUB`, `XPUB`    | `SUB`, `XSUB`               |
//! | `SUB`, `XSUB`    | `PUB`, `XPUB`               |
//! | `PUSH` / `PULL`  | `PULL` / `PUSH`             |
//! | `PAIR`           | `PAIR`                      |
//! | `SERVER`/`CLIENT`| `CLIENT` / `SERVER`         |
//! | `RADIO` / `DISH` | `DISH` / `RADIO`            |
//! | `GATHER`/`SCATTER`| `SCATTER` / `GATHER`       |
//! | `DGRAM`          | `DGRAM`                     |
//! | `STREAM`         | (none)                      |
//!
//! Matching is exact and case-sensitive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ZmtpError;

/// Socket type (messaging pattern role)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum SocketType {
    /// Exclusive pair
    Pair = 0,
    /// Publisher
    Pub = 1,
    /// Subscriber
    Sub = 2,
    /// Request
    Req = 3,
    /// Reply
    Rep = 4,
    /// Asynchronous request
    Dealer = 5,
    /// Addressed asynchronous reply
    Router = 6,
    /// Pipeline sink
    Pull = 7,
    /// Pipeline source
    Push = 8,
    /// Publisher with subscription upstream
    Xpub = 9,
    /// Subscriber with subscription upstream
    Xsub = 10,
    /// Raw TCP stream
    Stream = 11,
    /// Thread-safe server
    Server = 12,
    /// Thread-safe client
    Client = 13,
    /// Group publisher
    Radio = 14,
    /// Group subscriber
    Dish = 15,
    /// Fair-queued sink
    Gather = 16,
    /// Round-robin source
    Scatter = 17,
    /// Datagram
    Dgram = 18,
}

impl SocketType {
    /// All socket types in numeric order.
    pub const ALL: [SocketType; 19] = [
        SocketType::Pair,
        SocketType::Pub,
        SocketType::Sub,
        SocketType::Req,
        SocketType::Rep,
        SocketType::Dealer,
        SocketType::Router,
        SocketType::Pull,
        SocketType::Push,
        SocketType::Xpub,
        SocketType::Xsub,
        SocketType::Stream,
        SocketType::Server,
        SocketType::Client,
        SocketType::Radio,
        SocketType::Dish,
        SocketType::Gather,
        SocketType::Scatter,
        SocketType::Dgram,
    ];

    /// Wire name used in the `Socket-Type` property.
    pub fn as_str(&self) -> &'static str {
        match self {
            SocketType::Pair => "PAIR",
            SocketType::Pub => "PUB",
            SocketType::Sub => "SUB",
            SocketType::Req => "REQ",
            SocketType::Rep => "REP",
            SocketType::Dealer => "DEALER",
            SocketType::Router => "ROUTER",
            SocketType::Pull => "PULL",
            SocketType::Push => "PUSH",
            SocketType::Xpub => "XPUB",
            SocketType::Xsub => "XSUB",
            SocketType::Stream => "STREAM",
            SocketType::Server => "SERVER",
            SocketType::Client => "CLIENT",
            SocketType::Radio => "RADIO",
            SocketType::Dish => "DISH",
            SocketType::Gather => "GATHER",
            SocketType::Scatter => "SCATTER",
            SocketType::Dgram => "DGRAM",
        }
    }

    /// Look up a socket type by its numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Numeric code of this socket type.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Peer socket types this socket may connect to.
    pub fn compatible_peers(&self) -> &'static [&'static str] {
        match self {
            SocketType::Req => &["REP", "ROUTER"],
            SocketType::Rep => &["REQ", "DEALER"],
            SocketType::Dealer => &["REP", "DEALER", "ROUTER"],
            SocketType::Router => &["REQ", "DEALER", "ROUTER"],
            SocketType::Push => &["PULL"],
            SocketType::Pull => &["PUSH"],
            SocketType::Pub | SocketType::Xpub => &["SUB", "XSUB"],
            SocketType::Sub | SocketType::Xsub => &["PUB", "XPUB"],
            SocketType::Pair => &["PAIR"],
            SocketType::Server => &["CLIENT"],
            SocketType::Client => &["SERVER"],
            SocketType::Radio => &["DISH"],
            SocketType::Dish => &["RADIO"],
            SocketType::Gather => &["SCATTER"],
            SocketType::Scatter => &["GATHER"],
            SocketType::Dgram => &["DGRAM"],
            SocketType::Stream => &[],
        }
    }

    /// Check whether a peer advertising `peer` may connect to this socket.
    pub fn is_compatible(&self, peer: &str) -> bool {
        self.compatible_peers().contains(&peer)
    }

    /// Whether handshakes from this socket carry the `Identity` property.
    pub fn carries_routing_id(&self) -> bool {
        matches!(self, SocketType::Req | SocketType::Dealer | SocketType::Router)
    }
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocketType {
    type Err = ZmtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| ZmtpError::Config(format!("Unknown socket type: {}", s)))
    }
}
