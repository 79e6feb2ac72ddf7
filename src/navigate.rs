//! The path navigator (spec §4.2): `get`/`find`/`getAll`, built on top of
//! [`scout`](crate::scout) plus a single materializing decode of whatever
//! the scout resolved to.

use crate::codec::decode::{decode_document, decode_named_tag};
use crate::error::Result;
use crate::registry::Registries;
use crate::scout::scout;
use crate::tag::{NamedTag, Tag};

/// Resolves `key` against the encoded container `buf` and materializes
/// the matching tag, or `None` if the key is absent. An empty key
/// materializes the whole container as an unnamed `Object`.
pub fn get(buf: &[u8], key: &str, registries: &Registries) -> Result<Option<NamedTag>> {
    if key.is_empty() {
        let children = decode_document(buf, registries)?;
        return Ok(Some(NamedTag::new("", Tag::Object(children))));
    }
    let trail = scout(buf, key)?;
    match trail.end {
        None => Ok(None),
        Some(frame) => {
            let limit = frame.value_region_end();
            let (tag, _) = decode_named_tag(buf, frame.tag_pos(), limit, registries)?;
            Ok(Some(tag))
        }
    }
}

/// Like [`get`], but never materializes a value — just reports whether
/// `key` resolves to anything.
pub fn find(buf: &[u8], key: &str) -> Result<bool> {
    if key.is_empty() {
        return Ok(true);
    }
    let trail = scout(buf, key)?;
    Ok(trail.end.is_some())
}

/// The full, ordered top-level tag sequence of the container.
pub fn get_all(buf: &[u8], registries: &Registries) -> Result<Vec<NamedTag>> {
    decode_document(buf, registries)
}
