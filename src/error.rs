use std::io;

/// Failures that can occur while decoding, navigating, or editing an ODS
/// container.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Header fields were inconsistent, or a structured read ran past the
    /// bounds it was given (truncated tag, bad `body_size`, bad `name_len`).
    #[error("malformed ODS data: {0}")]
    Malformed(String),

    /// A key tried to descend through a `CompressedObject` tag. Callers
    /// must materialize the tag and decompress it themselves before
    /// continuing the walk in memory.
    #[error("cannot traverse into compressed tag {0:?} by key; materialize it first")]
    CompressedTraversal(String),

    /// A type-id with no built-in or registered custom handler was seen,
    /// and tolerant mode is off.
    #[error("unknown tag type id {0}")]
    UnknownType(u8),

    /// A custom tag was registered under one of the reserved type-ids
    /// (0..=15).
    #[error("type id {0} is reserved and cannot be registered")]
    ReservedTypeId(u8),

    /// A `CompressedObject` (or a save path) named a compressor that has
    /// not been registered.
    #[error("unknown compressor {0:?}")]
    UnknownCompressor(String),

    /// A custom tag type does not expose the required constructor.
    #[error("custom tag type {0:?} does not expose the required constructor")]
    InvalidCustomTag(String),

    /// `set(key, None)` was called with a key that does not resolve to
    /// anything.
    #[error("key {0:?} does not exist")]
    KeyNotFound(String),

    /// An underlying stream, file, or compression operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
