//! Metadata property scanning and storage.
//!
//! A metadata block is a sequence of TLV properties (see
//! [`crate::codec::add_property`] for the wire form). [`PropertyReader`]
//! walks a block with an explicit cursor and checks every length field
//! against the unread remainder before slicing, so adversarial lengths can
//! never read past the buffer. The reader stops at the first violation.
//!
//! [`Metadata`] is the append-only dictionary properties are recorded in.

use std::collections::HashMap;

use bytes::Bytes;

use crate::codec::{NAME_LEN_SIZE, VALUE_LEN_SIZE};
use crate::error::{Result, ZmtpError};

/// How the mechanism core treats a property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// `Identity`: the peer's routing id.
    RoutingId,
    /// `Socket-Type`: validated against the local socket type.
    SocketType,
    /// Anything else, forwarded to the mechanism's property handler.
    Ordinary,
}

static RESERVED_PROPERTIES: phf::Map<&'static [u8], PropertyKind> = phf::phf_map! {
    b"Identity" => PropertyKind::RoutingId,
    b"Socket-Type" => PropertyKind::SocketType,
};

impl PropertyKind {
    /// Classify a property name. Matching is exact and case-sensitive.
    pub fn classify(name: &[u8]) -> Self {
        RESERVED_PROPERTIES
            .get(name)
            .copied()
            .unwrap_or(PropertyKind::Ordinary)
    }
}

/// One decoded property, borrowed from the scanned buffer.
///
/// Names are opaque bytes; the wire does not constrain their encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawProperty<'a> {
    /// Property name
    pub name: &'a [u8],
    /// Property value
    pub value: &'a [u8],
}

/// Bounds-checked cursor over a metadata block.
///
/// Yields properties in wire order. After the first error the reader is
/// exhausted.
///
/// A block of zero or one byte holds no properties. Once at least one
/// property has been read, any leftover bytes that do not form a complete
/// property are a framing error.
#[derive(Debug, Clone)]
pub struct PropertyReader<'a> {
    data: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> PropertyReader<'a> {
    /// Create a reader over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            done: false,
        }
    }

    /// Unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.offset
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(ZmtpError::Protocol(format!(
                "{} at offset {} needs {} bytes, {} left",
                what,
                self.offset,
                len,
                self.remaining()
            )));
        }
        let slice = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn read_property(&mut self) -> Result<RawProperty<'a>> {
        let name_len = self.take(NAME_LEN_SIZE, "property name length")?[0] as usize;
        let name = self.take(name_len, "property name")?;

        let len_field = self.take(VALUE_LEN_SIZE, "property value length")?;
        let value_len = u32::from_be_bytes([len_field[0], len_field[1], len_field[2], len_field[3]]);
        let value = self.take(value_len as usize, "property value")?;

        Ok(RawProperty { name, value })
    }
}

impl<'a> Iterator for PropertyReader<'a> {
    type Item = Result<RawProperty<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.remaining() {
            0 => {
                self.done = true;
                None
            },
            1 if self.offset == 0 => {
                self.offset = 1;
                self.done = true;
                None
            },
            1 => {
                self.done = true;
                Some(Err(ZmtpError::Protocol(format!(
                    "trailing byte at offset {}",
                    self.offset
                ))))
            },
            _ => {
                let result = self.read_property();
                if result.is_err() {
                    self.done = true;
                }
                Some(result)
            },
        }
    }
}

/// Which dictionary a parse records into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyScope {
    /// Properties received from the ZMTP peer during the handshake.
    #[default]
    Zmtp,
    /// Properties visible to the ZAP authentication backend.
    Zap,
}

/// Append-only property dictionary.
///
/// Names are case-sensitive byte strings. Wire input is recorded
/// first-wins; only the mechanism itself may overwrite an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: HashMap<Bytes, Bytes>,
}

impl Metadata {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a property
    pub fn get(&self, name: impl AsRef<[u8]>) -> Option<&Bytes> {
        self.entries.get(name.as_ref())
    }

    /// Value of a property as UTF-8 text
    pub fn get_str(&self, name: impl AsRef<[u8]>) -> Option<&str> {
        self.get(name).and_then(|v| std::str::from_utf8(v).ok())
    }

    /// Check if a property is present
    pub fn contains(&self, name: impl AsRef<[u8]>) -> bool {
        self.entries.contains_key(name.as_ref())
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over properties in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Bytes)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Record a property unless the name is already present.
    ///
    /// Returns `true` if the property was inserted.
    pub(crate) fn insert_if_absent(&mut self, name: &[u8], value: &[u8]) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(Bytes::copy_from_slice(name), Bytes::copy_from_slice(value));
        true
    }

    /// Record a property, replacing any existing value.
    pub(crate) fn set(&mut self, name: &[u8], value: Bytes) {
        self.entries.insert(Bytes::copy_from_slice(name), value);
    }
}
