//! Tag encoding (spec §4.1, §9): each tag's body is assembled into a
//! scratch buffer so its length is known before `body_size` is written,
//! the "buffer the body, prepend its length" pattern the design notes
//! call out explicitly (as opposed to NBT's terminator-based compounds,
//! which is why this doesn't reuse the teacher's `bin_encode` builder
//! shape).

use crate::compressor::compress_all;
use crate::error::Result;
use crate::header::{body_size_for, write_header};
use crate::registry::Registries;
use crate::tag::{NamedTag, Tag};
use byteorder::{BigEndian, ByteOrder};

/// Encodes a whole container's top-level tag sequence: structurally
/// identical to an `Object`'s value, with no wrapping header.
pub fn encode_document(tags: &[NamedTag], registries: &Registries) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for tag in tags {
        encode_tag(&mut out, tag, registries)?;
    }
    Ok(out)
}

pub fn encode_tag(out: &mut Vec<u8>, tag: &NamedTag, registries: &Registries) -> Result<()> {
    encode_named(out, &tag.name, &tag.value, registries)
}

/// Encodes one tag's full header + body (name is passed separately from
/// the value rather than requiring a [`NamedTag`], so `List` elements
/// don't need to be wrapped just to pick up an empty name).
pub fn encode_named(
    out: &mut Vec<u8>,
    name: &str,
    value: &Tag,
    registries: &Registries,
) -> Result<()> {
    let mut body = Vec::new();
    encode_value(&mut body, value, registries)?;
    let body_size = body_size_for(name, body.len());
    write_header(out, value.tag_type(), name, body_size);
    out.extend_from_slice(&body);
    Ok(())
}

fn write_i32(out: &mut Vec<u8>, value: i32) {
    let mut buf = [0u8; 4];
    BigEndian::write_i32(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn write_i16(out: &mut Vec<u8>, value: i16) {
    let mut buf = [0u8; 2];
    BigEndian::write_i16(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn write_i64(out: &mut Vec<u8>, value: i64) {
    let mut buf = [0u8; 8];
    BigEndian::write_i64(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn write_f32(out: &mut Vec<u8>, value: f32) {
    let mut buf = [0u8; 4];
    BigEndian::write_f32(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn write_f64(out: &mut Vec<u8>, value: f64) {
    let mut buf = [0u8; 8];
    BigEndian::write_f64(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn write_u16(out: &mut Vec<u8>, value: u16) {
    let mut buf = [0u8; 2];
    BigEndian::write_u16(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn encode_value(out: &mut Vec<u8>, value: &Tag, registries: &Registries) -> Result<()> {
    match value {
        Tag::Invalid(data) => out.extend_from_slice(data),
        Tag::String(s) => out.extend_from_slice(s.as_bytes()),
        Tag::Int(v) => write_i32(out, *v),
        Tag::Float(v) => write_f32(out, *v),
        Tag::Double(v) => write_f64(out, *v),
        Tag::Short(v) => write_i16(out, *v),
        Tag::Long(v) => write_i64(out, *v),
        Tag::Char(v) => write_u16(out, *v),
        Tag::Byte(v) => out.push(*v as u8),
        Tag::List(items) => {
            for item in items {
                encode_named(out, "", item, registries)?;
            }
        }
        Tag::Map(entries) => {
            for (key, item) in entries {
                encode_named(out, key, item, registries)?;
            }
        }
        Tag::Object(children) => {
            for child in children {
                encode_tag(out, child, registries)?;
            }
        }
        Tag::CompressedObject {
            compressor,
            children,
        } => {
            let mut inner = Vec::new();
            for child in children {
                encode_tag(&mut inner, child, registries)?;
            }
            let compressor_obj = registries.compressor(compressor)?;
            let compressed = compress_all(compressor_obj.as_ref(), &inner)?;
            write_u16(out, compressor.len() as u16);
            out.extend_from_slice(compressor.as_bytes());
            out.extend_from_slice(&compressed);
        }
        Tag::Custom { data, .. } => out.extend_from_slice(data),
    }
    Ok(())
}
