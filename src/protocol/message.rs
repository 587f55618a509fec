//! Frames exchanged between a mechanism and its session.

use bytes::Bytes;

/// Frame flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameFlags(u8);

impl FrameFlags {
    /// More frames follow in this message
    pub const MORE: u8 = 1 << 0;
    /// Frame is a ZMTP command
    pub const COMMAND: u8 = 1 << 1;
    /// Frame carries a peer routing id
    pub const ROUTING_ID: u8 = 1 << 6;

    /// Create new empty flags
    pub fn new() -> Self {
        Self(0)
    }

    /// Create from raw bits
    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Get raw bits
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Set a flag
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    /// Clear a flag
    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    /// Check if flag is set
    pub fn has(&self, flag: u8) -> bool {
        self.0 & flag != 0
    }
}

/// A single frame with its flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Frame payload
    pub data: Bytes,
    /// Frame flags
    pub flags: FrameFlags,
}

impl Frame {
    /// Create a frame with no flags set
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            flags: FrameFlags::new(),
        }
    }

    /// Create a command frame
    pub fn command(data: impl Into<Bytes>) -> Self {
        let mut frame = Self::new(data);
        frame.flags.set(FrameFlags::COMMAND);
        frame
    }

    /// Create a frame tagged as a peer routing id
    pub fn routing_id(data: impl Into<Bytes>) -> Self {
        let mut frame = Self::new(data);
        frame.flags.set(FrameFlags::ROUTING_ID);
        frame
    }

    /// Whether this frame is a command
    pub fn is_command(&self) -> bool {
        self.flags.has(FrameFlags::COMMAND)
    }

    /// Whether this frame carries a routing id
    pub fn is_routing_id(&self) -> bool {
        self.flags.has(FrameFlags::ROUTING_ID)
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
