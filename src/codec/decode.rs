//! Value decoding (spec §4.1): polymorphic on type-id. Primitives consume
//! a fixed number of bytes; `List`/`Object`/`Map` consume the entire
//! remaining value region as a sequence of child tags, terminating on
//! "position reached value-region end" rather than any end-marker byte
//! (unlike the teacher's NBT, which terminates compounds with `TAG_End`).

use crate::compressor::decompress_all;
use crate::error::{Error, Result};
use crate::header::{read_header, read_name, HEADER_LEN};
use crate::registry::Registries;
use crate::tag::{NamedTag, Tag, TagType};
use byteorder::{BigEndian, ByteOrder};

/// Decodes the top-level tag sequence of a whole container: structurally
/// identical to an `Object`'s value region.
pub fn decode_document(buf: &[u8], registries: &Registries) -> Result<Vec<NamedTag>> {
    decode_children(buf, 0, buf.len(), registries)
}

/// Decodes one named tag starting at `pos`, requiring it (and everything
/// it contains) to fit within `[pos, limit)`. Returns the tag and the
/// offset immediately past it.
pub fn decode_named_tag(
    buf: &[u8],
    pos: usize,
    limit: usize,
    registries: &Registries,
) -> Result<(NamedTag, usize)> {
    if pos + HEADER_LEN > limit {
        return Err(Error::Malformed(format!(
            "tag header at offset {pos} runs past its enclosing region"
        )));
    }
    let header = read_header(buf, pos)?;
    let name = read_name(buf, pos, header.name_len)?.to_string();
    let value_start = pos + HEADER_LEN + header.name_len as usize;
    let value_len = header.value_len();
    let value_end = value_start + value_len;
    if value_end > limit {
        return Err(Error::Malformed(format!(
            "tag {name:?} at offset {pos} runs past its enclosing region"
        )));
    }
    let value = decode_value(header.tag_type, &name, buf, value_start, value_end, registries)?;
    Ok((NamedTag { name, value }, value_end))
}

fn expect_len(value_len: usize, expected: usize, what: &str) -> Result<()> {
    if value_len != expected {
        Err(Error::Malformed(format!(
            "{what} value must be {expected} bytes, got {value_len}"
        )))
    } else {
        Ok(())
    }
}

fn decode_value(
    tag_type: TagType,
    name: &str,
    buf: &[u8],
    start: usize,
    end: usize,
    registries: &Registries,
) -> Result<Tag> {
    let value_len = end - start;
    match tag_type {
        TagType::Invalid => {
            if registries.is_tolerant() {
                Ok(Tag::Invalid(buf[start..end].to_vec()))
            } else {
                Err(Error::UnknownType(0))
            }
        }
        TagType::String => std::str::from_utf8(&buf[start..end])
            .map(|s| Tag::String(s.to_string()))
            .map_err(|_| Error::Malformed(format!("invalid UTF-8 in string tag {name:?}"))),
        TagType::Int => {
            expect_len(value_len, 4, "int")?;
            Ok(Tag::Int(BigEndian::read_i32(&buf[start..end])))
        }
        TagType::Float => {
            expect_len(value_len, 4, "float")?;
            Ok(Tag::Float(BigEndian::read_f32(&buf[start..end])))
        }
        TagType::Double => {
            expect_len(value_len, 8, "double")?;
            Ok(Tag::Double(BigEndian::read_f64(&buf[start..end])))
        }
        TagType::Short => {
            expect_len(value_len, 2, "short")?;
            Ok(Tag::Short(BigEndian::read_i16(&buf[start..end])))
        }
        TagType::Long => {
            expect_len(value_len, 8, "long")?;
            Ok(Tag::Long(BigEndian::read_i64(&buf[start..end])))
        }
        TagType::Char => {
            expect_len(value_len, 2, "char")?;
            Ok(Tag::Char(BigEndian::read_u16(&buf[start..end])))
        }
        TagType::Byte => {
            expect_len(value_len, 1, "byte")?;
            Ok(Tag::Byte(buf[start] as i8))
        }
        TagType::List => {
            let children = decode_children(buf, start, end, registries)?;
            Ok(Tag::List(children.into_iter().map(|c| c.value).collect()))
        }
        TagType::Map => {
            let children = decode_children(buf, start, end, registries)?;
            Ok(Tag::Map(
                children.into_iter().map(|c| (c.name, c.value)).collect(),
            ))
        }
        TagType::Object => {
            let children = decode_children(buf, start, end, registries)?;
            Ok(Tag::Object(children))
        }
        TagType::CompressedObject => decode_compressed_object(buf, start, end, registries),
        TagType::Custom(id) => match registries.custom_decoder(id) {
            Some(decoder) => decoder(name, &buf[start..end])
                .map_err(|_| Error::InvalidCustomTag(name.to_string())),
            None => {
                if registries.is_tolerant() {
                    Ok(Tag::Invalid(buf[start..end].to_vec()))
                } else {
                    Err(Error::UnknownType(id))
                }
            }
        },
    }
}

fn decode_compressed_object(
    buf: &[u8],
    start: usize,
    end: usize,
    registries: &Registries,
) -> Result<Tag> {
    if end - start < 2 {
        return Err(Error::Malformed(
            "truncated CompressedObject compressor name length".to_string(),
        ));
    }
    let name_len = BigEndian::read_u16(&buf[start..start + 2]) as usize;
    let name_start = start + 2;
    let name_end = name_start + name_len;
    if name_end > end {
        return Err(Error::Malformed(
            "truncated CompressedObject compressor name".to_string(),
        ));
    }
    let compressor_name = std::str::from_utf8(&buf[name_start..name_end])
        .map_err(|_| Error::Malformed("invalid UTF-8 compressor name".to_string()))?
        .to_string();
    let compressor = registries.compressor(&compressor_name)?;
    let decompressed = decompress_all(compressor.as_ref(), &buf[name_end..end])?;
    let children = decode_children(&decompressed, 0, decompressed.len(), registries)?;
    Ok(Tag::CompressedObject {
        compressor: compressor_name,
        children,
    })
}

/// Decodes `[start, end)` as a sequence of named tags, stopping only when
/// the cursor lands exactly on `end`.
pub fn decode_children(
    buf: &[u8],
    start: usize,
    end: usize,
    registries: &Registries,
) -> Result<Vec<NamedTag>> {
    let mut pos = start;
    let mut children = Vec::new();
    while pos < end {
        let (tag, next) = decode_named_tag(buf, pos, end, registries)?;
        children.push(tag);
        pos = next;
    }
    if pos != end {
        return Err(Error::Malformed(format!(
            "child tags did not exactly fill the region ending at {end}"
        )));
    }
    Ok(children)
}
