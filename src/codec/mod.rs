//! The tag codec (spec §4.1): encode and decode primitives. Everything
//! else (navigation, editing) works directly on encoded bytes and only
//! calls into here to materialize a single resolved tag.

pub mod decode;
pub mod encode;

pub use decode::{decode_children, decode_document, decode_named_tag};
pub use encode::{encode_document, encode_named, encode_tag};
