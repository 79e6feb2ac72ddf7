//! The tag data model (spec §3): a typed, named unit of encoded data, and
//! the 12 built-in type-ids plus the custom-tag extension point.

use std::fmt;

/// One of the 12 built-in wire type-ids, or a custom type registered
/// outside the reserved `0..=15` range.
///
/// Unlike the teacher's `mem::transmute`-based `TagType`, conversion here
/// goes through an explicit match in both directions, the way the
/// teacher's own later iteration (`bin_decode::read_type`) does it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TagType {
    Invalid,
    String,
    Int,
    Float,
    Double,
    Short,
    Long,
    Char,
    Byte,
    List,
    Map,
    Object,
    CompressedObject,
    /// A type-id outside the built-in range. May also land inside the
    /// reserved `13..=15` band, in which case it will simply never be
    /// found in the custom-tag registry.
    Custom(u8),
}

/// Type-ids `0..=15` are reserved; built-ins occupy `0..=12`, `13..=15`
/// are reserved for future built-ins.
pub const MAX_RESERVED_TYPE_ID: u8 = 15;

impl TagType {
    pub fn from_id(id: u8) -> TagType {
        match id {
            0 => TagType::Invalid,
            1 => TagType::String,
            2 => TagType::Int,
            3 => TagType::Float,
            4 => TagType::Double,
            5 => TagType::Short,
            6 => TagType::Long,
            7 => TagType::Char,
            8 => TagType::Byte,
            9 => TagType::List,
            10 => TagType::Map,
            11 => TagType::Object,
            12 => TagType::CompressedObject,
            other => TagType::Custom(other),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            TagType::Invalid => 0,
            TagType::String => 1,
            TagType::Int => 2,
            TagType::Float => 3,
            TagType::Double => 4,
            TagType::Short => 5,
            TagType::Long => 6,
            TagType::Char => 7,
            TagType::Byte => 8,
            TagType::List => 9,
            TagType::Map => 10,
            TagType::Object => 11,
            TagType::CompressedObject => 12,
            TagType::Custom(id) => id,
        }
    }

    pub fn is_composite(self) -> bool {
        matches!(
            self,
            TagType::List | TagType::Map | TagType::Object | TagType::CompressedObject
        )
    }

    pub fn is_reserved(self) -> bool {
        self.id() <= MAX_RESERVED_TYPE_ID
    }
}

/// An owned tag value. Composite variants own their children recursively;
/// this is the tree shape user code builds by hand and that `get` and
/// `getAll` materialize into.
///
/// Re-parenting a tag into a `List` clears its name on encode (spec §9);
/// since `Tag` itself carries no name (names live on [`NamedTag`], the
/// way the teacher's `bin_decode::compound::Entry` attaches a name only at
/// the point a tag is nested), this falls out naturally rather than
/// needing an explicit reset.
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    /// Only ever materialized when the tolerant-parsing flag is set;
    /// carries the type-id alongside since it's otherwise unrecoverable.
    Invalid(Vec<u8>),
    String(String),
    Int(i32),
    Float(f32),
    Double(f64),
    Short(i16),
    Long(i64),
    /// A UTF-16 code unit. Surrogate pairs are not representable in a
    /// single `CharTag` (spec §9).
    Char(u16),
    Byte(i8),
    /// Children's names are cleared before encoding; on decode the names
    /// are discarded (always empty on the wire).
    List(Vec<Tag>),
    /// Each entry's key doubles as that entry's on-wire tag name (spec §9
    /// "map-as-named-list"); the key is not duplicated as both a
    /// `HashMap` key and an embedded tag name.
    Map(Vec<(String, Tag)>),
    Object(Vec<NamedTag>),
    CompressedObject {
        compressor: String,
        children: Vec<NamedTag>,
    },
    Custom {
        type_id: u8,
        data: Vec<u8>,
    },
}

impl Tag {
    pub fn tag_type(&self) -> TagType {
        match self {
            Tag::Invalid(_) => TagType::Invalid,
            Tag::String(_) => TagType::String,
            Tag::Int(_) => TagType::Int,
            Tag::Float(_) => TagType::Float,
            Tag::Double(_) => TagType::Double,
            Tag::Short(_) => TagType::Short,
            Tag::Long(_) => TagType::Long,
            Tag::Char(_) => TagType::Char,
            Tag::Byte(_) => TagType::Byte,
            Tag::List(_) => TagType::List,
            Tag::Map(_) => TagType::Map,
            Tag::Object(_) => TagType::Object,
            Tag::CompressedObject { .. } => TagType::CompressedObject,
            Tag::Custom { type_id, .. } => TagType::Custom(*type_id),
        }
    }

    /// Children of `List`/`Map`/`Object`/decompressed `CompressedObject`,
    /// as `(name, &Tag)` pairs (`List`/`Map` synthesize the name).
    pub fn children(&self) -> Option<Vec<(&str, &Tag)>> {
        match self {
            Tag::List(items) => Some(items.iter().map(|t| ("", t)).collect()),
            Tag::Map(entries) => Some(entries.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            Tag::Object(entries) => Some(
                entries
                    .iter()
                    .map(|e| (e.name.as_str(), &e.value))
                    .collect(),
            ),
            Tag::CompressedObject { children, .. } => Some(
                children
                    .iter()
                    .map(|e| (e.name.as_str(), &e.value))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Tag::Int(v) => Some(*v),
            _ => None,
        }
    }
}

/// A tag paired with the name it has within its parent. The wire grammar
/// only ever stores a name next to a value when the value is nested
/// inside a `List`/`Map`/`Object`/`CompressedObject`; this is that
/// pairing, mirroring the teacher's `bin_decode::compound::Entry`.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTag {
    pub name: String,
    pub value: Tag,
}

impl NamedTag {
    pub fn new(name: impl Into<String>, value: Tag) -> NamedTag {
        NamedTag {
            name: name.into(),
            value,
        }
    }

    pub fn string(name: impl Into<String>, value: impl Into<String>) -> NamedTag {
        NamedTag::new(name, Tag::String(value.into()))
    }

    pub fn int(name: impl Into<String>, value: i32) -> NamedTag {
        NamedTag::new(name, Tag::Int(value))
    }

    pub fn float(name: impl Into<String>, value: f32) -> NamedTag {
        NamedTag::new(name, Tag::Float(value))
    }

    pub fn double(name: impl Into<String>, value: f64) -> NamedTag {
        NamedTag::new(name, Tag::Double(value))
    }

    pub fn short(name: impl Into<String>, value: i16) -> NamedTag {
        NamedTag::new(name, Tag::Short(value))
    }

    pub fn long(name: impl Into<String>, value: i64) -> NamedTag {
        NamedTag::new(name, Tag::Long(value))
    }

    pub fn char(name: impl Into<String>, value: u16) -> NamedTag {
        NamedTag::new(name, Tag::Char(value))
    }

    pub fn byte(name: impl Into<String>, value: i8) -> NamedTag {
        NamedTag::new(name, Tag::Byte(value))
    }

    pub fn object(name: impl Into<String>, children: Vec<NamedTag>) -> NamedTag {
        NamedTag::new(name, Tag::Object(children))
    }

    pub fn list(name: impl Into<String>, children: Vec<Tag>) -> NamedTag {
        NamedTag::new(name, Tag::List(children))
    }

    pub fn map(name: impl Into<String>, entries: Vec<(String, Tag)>) -> NamedTag {
        NamedTag::new(name, Tag::Map(entries))
    }

    pub fn compressed_object(
        name: impl Into<String>,
        compressor: impl Into<String>,
        children: Vec<NamedTag>,
    ) -> NamedTag {
        NamedTag::new(
            name,
            Tag::CompressedObject {
                compressor: compressor.into(),
                children,
            },
        )
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
