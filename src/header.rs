//! The fixed 7-byte tag header (spec §3, §4.1): `type(1) + body_size(4,
//! big-endian) + name_len(2, big-endian)`, followed by `name_len` bytes of
//! UTF-8 name.
//!
//! Decoding and the scout/editor both need to read this header directly
//! out of a `&[u8]` at an arbitrary offset (the editor never materializes
//! a full tag tree just to patch a length field), so this module works on
//! slices plus an explicit position rather than a `Read` stream.

use crate::error::{Error, Result};
use crate::tag::TagType;
use byteorder::{BigEndian, ByteOrder};

/// `type(1) + body_size(4) + name_len(2)`.
pub const HEADER_LEN: usize = 7;

#[derive(Copy, Clone, Debug)]
pub struct TagHeader {
    pub tag_type: TagType,
    pub body_size: i32,
    pub name_len: u16,
}

impl TagHeader {
    /// Length of the value region that follows the name, in bytes.
    pub fn value_len(&self) -> usize {
        self.body_size as usize - 2 - self.name_len as usize
    }
}

/// Reads the 7-byte header at `buf[pos..]`. Does not read the name or
/// value bytes.
pub fn read_header(buf: &[u8], pos: usize) -> Result<TagHeader> {
    if buf.len() < pos + HEADER_LEN {
        return Err(Error::Malformed(format!(
            "truncated tag header at offset {pos}"
        )));
    }
    let tag_type = TagType::from_id(buf[pos]);
    let body_size = BigEndian::read_i32(&buf[pos + 1..pos + 5]);
    let name_len = BigEndian::read_u16(&buf[pos + 5..pos + 7]);
    if (body_size as i64) < 2 + name_len as i64 {
        return Err(Error::Malformed(format!(
            "body_size {body_size} too small for name_len {name_len} at offset {pos}"
        )));
    }
    Ok(TagHeader {
        tag_type,
        body_size,
        name_len,
    })
}

/// Reads the name immediately following the header at `pos`.
pub fn read_name(buf: &[u8], pos: usize, name_len: u16) -> Result<&str> {
    let start = pos + HEADER_LEN;
    let end = start + name_len as usize;
    if buf.len() < end {
        return Err(Error::Malformed(format!(
            "truncated tag name at offset {pos}"
        )));
    }
    std::str::from_utf8(&buf[start..end])
        .map_err(|_| Error::Malformed(format!("invalid UTF-8 tag name at offset {pos}")))
}

/// Writes the 7-byte header plus `name`, given the already-known
/// `body_size` of the tag being written.
pub fn write_header(out: &mut Vec<u8>, tag_type: TagType, name: &str, body_size: i32) {
    out.push(tag_type.id());
    let mut size_buf = [0u8; 4];
    BigEndian::write_i32(&mut size_buf, body_size);
    out.extend_from_slice(&size_buf);
    let mut len_buf = [0u8; 2];
    BigEndian::write_u16(&mut len_buf, name.len() as u16);
    out.extend_from_slice(&len_buf);
    out.extend_from_slice(name.as_bytes());
}

/// The `body_size` of a tag given its name and value-payload length.
pub fn body_size_for(name: &str, value_len: usize) -> i32 {
    (2 + name.len() + value_len) as i32
}

/// Reads the 4-byte big-endian `body_size` field whose first byte sits at
/// `start_index` (the convention scout frames use: one past the type
/// byte).
pub fn read_body_size_at(buf: &[u8], start_index: usize) -> Result<i32> {
    if buf.len() < start_index + 4 {
        return Err(Error::Malformed(format!(
            "truncated body_size field at offset {start_index}"
        )));
    }
    Ok(BigEndian::read_i32(&buf[start_index..start_index + 4]))
}

/// Overwrites the 4-byte big-endian `body_size` field at `start_index`.
pub fn write_body_size_at(buf: &mut [u8], start_index: usize, value: i32) {
    BigEndian::write_i32(&mut buf[start_index..start_index + 4], value);
}
