//! Metadata property TLV encoding.
//!
//! Wire form of a single property:
//!
//! ```text
//! +----------+-----------------+------------------+----------------------+
//! | name_len |      name       |    value_len     |        value         |
//! |  1 byte  | name_len bytes  | 4 bytes, BE u32  |   value_len bytes    |
//! +----------+-----------------+------------------+----------------------+
//! ```
//!
//! Encoding is only ever driven by local configuration, so its
//! preconditions are asserted rather than reported.

/// Maximum property name length in bytes
pub const MAX_NAME_LEN: usize = 255;

/// Maximum property value length in bytes
pub const MAX_VALUE_LEN: usize = 0x7FFF_FFFF;

/// Size of the name length prefix
pub const NAME_LEN_SIZE: usize = 1;

/// Size of the big-endian value length field
pub const VALUE_LEN_SIZE: usize = 4;

fn name_len(name: &str) -> usize {
    let len = name.len();
    assert!(len <= MAX_NAME_LEN, "property name exceeds {MAX_NAME_LEN} bytes");
    len
}

/// Exact encoded size of a property with the given name and value length.
pub fn property_len(name: &str, value_len: usize) -> usize {
    NAME_LEN_SIZE + name_len(name) + VALUE_LEN_SIZE + value_len
}

/// Write one property at the start of `dst` and return the bytes written.
///
/// `dst.len()` is the available capacity.
///
/// # Panics
///
/// Panics if the name is longer than [`MAX_NAME_LEN`], the value is longer
/// than [`MAX_VALUE_LEN`], or `dst` cannot hold the encoded property.
pub fn add_property(dst: &mut [u8], name: &str, value: &[u8]) -> usize {
    let name_len = name_len(name);
    let total_len = property_len(name, value.len());
    assert!(
        total_len <= dst.len(),
        "property {name:?} needs {total_len} bytes, {} available",
        dst.len()
    );
    assert!(value.len() <= MAX_VALUE_LEN, "property value exceeds 0x7FFFFFFF bytes");

    let (len_byte, rest) = dst.split_at_mut(NAME_LEN_SIZE);
    len_byte[0] = name_len as u8;
    let (name_dst, rest) = rest.split_at_mut(name_len);
    name_dst.copy_from_slice(name.as_bytes());
    let (value_len_dst, rest) = rest.split_at_mut(VALUE_LEN_SIZE);
    value_len_dst.copy_from_slice(&(value.len() as u32).to_be_bytes());
    rest[..value.len()].copy_from_slice(value);

    total_len
}
