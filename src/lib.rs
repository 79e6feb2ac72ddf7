//! ODS (Object Data Structure): a self-describing, nested, tagged binary
//! container format inspired by NBT.
//!
//! A container holds a sequence of typed, named tags; composite tags
//! (`Object`, `Map`, `List`, `CompressedObject`) recursively contain more
//! tags. On top of the encode/decode codec, this crate provides keyed
//! dotted-path navigation directly over the encoded byte image
//! ([`navigate::get`]/[`navigate::find`]) and in-place structural edits
//! ([`edit::delete`]/[`edit::replace`]/[`edit::set`]) that patch the
//! `body_size` of every ancestor tag without re-encoding untouched
//! siblings.
//!
//! [`Container`] ties the codec, navigator, and editor together into a
//! single facade over either an in-memory buffer or a file on disk.

pub mod codec;
pub mod compressor;
pub mod container;
pub mod edit;
pub mod error;
pub mod header;
pub mod navigate;
pub mod path;
pub mod registry;
pub mod scout;
pub mod tag;

pub use container::Container;
pub use error::{Error, Result};
pub use registry::Registries;
pub use tag::{NamedTag, Tag, TagType};
