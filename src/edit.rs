//! The in-place editor (spec §4.4): splices bytes and patches every
//! ancestor's `body_size` field, without re-encoding untouched siblings.
//!
//! Ancestor patches are independent (disjoint 4-byte ranges) and are
//! always applied to the *output* buffer, never the input — the
//! ancestors all lie within the unchanged prefix relative to the splice
//! point, since by construction the splice is always deeper in the tree
//! than any ancestor header (spec §4.4 "Ancestor-patch ordering").

use crate::codec::encode::encode_tag;
use crate::error::{Error, Result};
use crate::header::write_body_size_at;
use crate::path;
use crate::registry::Registries;
use crate::scout::{scout, Frame};
use crate::tag::NamedTag;
use byteorder::{BigEndian, ByteOrder};

fn patch_ancestors(buf: &mut [u8], ancestors: &[Frame], delta: i64) {
    for ancestor in ancestors {
        let current = BigEndian::read_i32(&buf[ancestor.start_index..ancestor.start_index + 4]);
        let updated = (current as i64 + delta) as i32;
        write_body_size_at(buf, ancestor.start_index, updated);
    }
}

fn splice_delete(buf: &[u8], end: &Frame, ancestors: &[Frame]) -> Vec<u8> {
    let prefix_end = end.tag_pos();
    let suffix_start = end.value_region_end();
    let mut out = Vec::with_capacity(buf.len() - (suffix_start - prefix_end));
    out.extend_from_slice(&buf[..prefix_end]);
    out.extend_from_slice(&buf[suffix_start..]);
    patch_ancestors(&mut out, ancestors, -(end.span() as i64));
    out
}

fn splice_replace(buf: &[u8], end: &Frame, ancestors: &[Frame], new_bytes: &[u8]) -> Vec<u8> {
    let prefix_end = end.tag_pos();
    let suffix_start = end.value_region_end();
    let delta = new_bytes.len() as i64 - end.span() as i64;
    let mut out = Vec::with_capacity((buf.len() as i64 + delta).max(0) as usize);
    out.extend_from_slice(&buf[..prefix_end]);
    out.extend_from_slice(new_bytes);
    out.extend_from_slice(&buf[suffix_start..]);
    patch_ancestors(&mut out, ancestors, delta);
    out
}

fn splice_insert(buf: &[u8], ancestors: &[Frame], new_bytes: &[u8]) -> Vec<u8> {
    let insert_at = ancestors
        .last()
        .map(|c| c.value_region_end())
        .unwrap_or(buf.len());
    let mut out = Vec::with_capacity(buf.len() + new_bytes.len());
    out.extend_from_slice(&buf[..insert_at]);
    out.extend_from_slice(new_bytes);
    out.extend_from_slice(&buf[insert_at..]);
    patch_ancestors(&mut out, ancestors, new_bytes.len() as i64);
    out
}

/// Deletes `key` from `buf`, returning the new buffer and whether
/// anything was removed. An empty key clears the whole container.
pub fn delete(buf: &[u8], key: &str) -> Result<(Vec<u8>, bool)> {
    if key.is_empty() {
        return Ok((Vec::new(), !buf.is_empty()));
    }
    let trail = scout(buf, key)?;
    match trail.end {
        None => Ok((buf.to_vec(), false)),
        Some(end) => Ok((splice_delete(buf, &end, &trail.children), true)),
    }
}

/// Replaces the tag at `key` with `new_tag`, writing `new_tag`'s own name
/// onto the wire (not the trailing key segment). Returns the new buffer
/// and whether anything was replaced. An empty key overwrites the entire
/// container with `new_tag` as the sole top-level entry.
pub fn replace(
    buf: &[u8],
    key: &str,
    new_tag: &NamedTag,
    registries: &Registries,
) -> Result<(Vec<u8>, bool)> {
    let mut new_bytes = Vec::new();
    encode_tag(&mut new_bytes, new_tag, registries)?;
    if key.is_empty() {
        return Ok((new_bytes, true));
    }
    let trail = scout(buf, key)?;
    match trail.end {
        None => Ok((buf.to_vec(), false)),
        Some(end) => Ok((splice_replace(buf, &end, &trail.children, &new_bytes), true)),
    }
}

/// The unified `set` entry point (spec §4.4).
///
/// - `tag` is `None` ⇒ behaves as [`delete`], failing with
///   [`Error::KeyNotFound`] if the key is absent.
/// - `key` is `""` ⇒ overwrites the whole container with `tag`.
/// - `key` fully resolves ⇒ behaves as [`replace`].
/// - `key` partially resolves ⇒ auto-creates the missing intermediate
///   `Object`s and inserts `tag` as the leaf, named after `tag` itself
///   (the final key segment is ignored).
/// - `key` does not resolve at all ⇒ appends `tag` at the container's
///   top level.
pub fn set(
    buf: &[u8],
    key: &str,
    tag: Option<NamedTag>,
    registries: &Registries,
) -> Result<Vec<u8>> {
    let Some(new_tag) = tag else {
        let (new_buf, removed) = delete(buf, key)?;
        return if removed {
            Ok(new_buf)
        } else {
            Err(Error::KeyNotFound(key.to_string()))
        };
    };

    if key.is_empty() {
        let (new_buf, _) = replace(buf, key, &new_tag, registries)?;
        return Ok(new_buf);
    }

    let trail = scout(buf, key)?;
    match trail.end {
        Some(end) => {
            let mut new_bytes = Vec::new();
            encode_tag(&mut new_bytes, &new_tag, registries)?;
            Ok(splice_replace(buf, &end, &trail.children, &new_bytes))
        }
        None if trail.children.is_empty() => {
            let mut new_bytes = Vec::new();
            encode_tag(&mut new_bytes, &new_tag, registries)?;
            Ok(splice_insert(buf, &[], &new_bytes))
        }
        None => {
            let segments = path::split(key);
            let remaining = &segments[trail.children.len()..];
            let chain_names = &remaining[..remaining.len() - 1];
            let mut chain = new_tag;
            for name in chain_names.iter().rev() {
                chain = NamedTag::object((*name).to_string(), vec![chain]);
            }
            let mut chain_bytes = Vec::new();
            encode_tag(&mut chain_bytes, &chain, registries)?;
            Ok(splice_insert(buf, &trail.children, &chain_bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_document, encode_document};
    use crate::tag::Tag;

    fn car_document() -> Vec<NamedTag> {
        vec![NamedTag::object(
            "Car",
            vec![
                NamedTag::string("type", "Jeep"),
                NamedTag::int("gas", 30),
                NamedTag::object(
                    "Owner",
                    vec![
                        NamedTag::string("firstName", "Jeff"),
                        NamedTag::string("lastName", "Bob"),
                        NamedTag::int("Age", 30),
                    ],
                ),
            ],
        )]
    }

    #[test]
    fn delete_shrinks_ancestor_body_sizes() {
        let registries = Registries::new();
        let buf = encode_document(&car_document(), &registries).unwrap();

        let (new_buf, removed) = delete(&buf, "Car.gas").unwrap();
        assert!(removed);
        assert_eq!(buf.len() - new_buf.len(), "gas".len() + 2 + 4 + 5);

        let decoded = decode_document(&new_buf, &registries).unwrap();
        let Tag::Object(car) = &decoded[0].value else {
            panic!("expected Car to still be an Object");
        };
        assert!(car.iter().all(|c| c.name != "gas"));
    }

    #[test]
    fn delete_on_missing_key_is_a_no_op() {
        let registries = Registries::new();
        let buf = encode_document(&car_document(), &registries).unwrap();
        let (new_buf, removed) = delete(&buf, "Car.nonexistent").unwrap();
        assert!(!removed);
        assert_eq!(buf, new_buf);
    }

    #[test]
    fn replace_with_longer_value_grows_ancestor_body_sizes() {
        let registries = Registries::new();
        let buf = encode_document(&car_document(), &registries).unwrap();

        let new_tag = NamedTag::string("firstName", "Jeffrey");
        let (new_buf, replaced) = replace(&buf, "Car.Owner.firstName", &new_tag, &registries).unwrap();
        assert!(replaced);
        assert_eq!(new_buf.len() - buf.len(), 3);

        decode_document(&new_buf, &registries).unwrap();
        let value = crate::navigate::get(&new_buf, "Car.Owner.firstName", &registries)
            .unwrap()
            .unwrap();
        assert_eq!(value.value.as_str(), Some("Jeffrey"));
    }

    #[test]
    fn set_auto_creates_missing_intermediate_objects() {
        let registries = Registries::new();
        let buf = encode_document(&car_document(), &registries).unwrap();

        let leaf = NamedTag::string("Test", "test");
        let new_buf = set(
            &buf,
            "Car.Owner.MEGAOOF.MULTIPLEFILES.test",
            Some(leaf),
            &registries,
        )
        .unwrap();

        let resolved = crate::navigate::get(
            &new_buf,
            "Car.Owner.MEGAOOF.MULTIPLEFILES.Test",
            &registries,
        )
        .unwrap()
        .unwrap();
        assert_eq!(resolved.value.as_str(), Some("test"));
        decode_document(&new_buf, &registries).unwrap();
    }

    #[test]
    fn set_with_null_deletes_and_fails_on_absent_key() {
        let registries = Registries::new();
        let buf = encode_document(&car_document(), &registries).unwrap();

        let new_buf = set(&buf, "Car.gas", None, &registries).unwrap();
        assert!(!crate::navigate::find(&new_buf, "Car.gas").unwrap());

        let err = set(&new_buf, "Car.gas", None, &registries).unwrap_err();
        assert!(matches!(err, Error::KeyNotFound(_)));
    }

    #[test]
    fn set_with_empty_key_overwrites_whole_container() {
        let registries = Registries::new();
        let buf = encode_document(&car_document(), &registries).unwrap();
        let replacement = NamedTag::int("Replacement", 1);
        let new_buf = set(&buf, "", Some(replacement), &registries).unwrap();
        let decoded = decode_document(&new_buf, &registries).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].name, "Replacement");
    }
}
