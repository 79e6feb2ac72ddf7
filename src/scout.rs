//! The scout (spec §4.3): a lightweight variant of the navigator that
//! records offset/size breadcrumbs for each ancestor along a key instead
//! of materializing values. The editor uses these breadcrumbs to patch
//! every ancestor's `body_size` field after a splice.
//!
//! Unlike the teacher's own `scoutObjectData` (per spec §9, which
//! recurses on the same buffer relying on absolute `position()` moves and
//! not restoring position on mismatch), this passes explicit `(start,
//! end)` slices down the recursion, so there's nothing to restore.

use crate::error::{Error, Result};
use crate::header::{read_header, read_name, HEADER_LEN};
use crate::path;
use crate::tag::TagType;

/// One ancestor (or the final matched tag) along a scouted key: its name,
/// its on-wire `body_size`, and the byte offset of its `body_size` field
/// (one past its type byte).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub body_size: i32,
    pub start_index: usize,
}

impl Frame {
    /// Offset of this tag's type byte.
    pub fn tag_pos(&self) -> usize {
        self.start_index - 1
    }

    /// Total bytes this tag occupies on the wire (`body_size + 5`).
    pub fn span(&self) -> usize {
        self.body_size as usize + 5
    }

    /// Offset immediately past this tag's value region
    /// (`start_index + 4 + body_size`).
    pub fn value_region_end(&self) -> usize {
        self.start_index + 4 + self.body_size as usize
    }
}

/// The result of a scout: ancestors walked through, and the final tag if
/// the key fully resolved.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    pub children: Vec<Frame>,
    pub end: Option<Frame>,
}

/// Scouts `key` (must be non-empty; callers handle the "whole container"
/// key specially) through the top-level tag sequence of `buf`.
pub fn scout(buf: &[u8], key: &str) -> Result<Trail> {
    let segments = path::split(key);
    scout_region(buf, 0, buf.len(), &segments)
}

fn scout_region(buf: &[u8], start: usize, end: usize, segments: &[&str]) -> Result<Trail> {
    if segments.is_empty() {
        return Ok(Trail::default());
    }
    let seg = segments[0];
    let rest = &segments[1..];
    let mut pos = start;
    while pos < end {
        let header = read_header(buf, pos)?;
        let span = header.body_size as usize + 5;
        if header.name_len as usize != seg.len() {
            pos += span;
            continue;
        }
        let name = read_name(buf, pos, header.name_len)?;
        if name != seg {
            pos += span;
            continue;
        }

        let frame = Frame {
            name: name.to_string(),
            body_size: header.body_size,
            start_index: pos + 1,
        };

        if rest.is_empty() {
            return Ok(Trail {
                children: Vec::new(),
                end: Some(frame),
            });
        }

        if header.tag_type == TagType::CompressedObject {
            return Err(Error::CompressedTraversal(frame.name));
        }
        if !header.tag_type.is_composite() {
            return Err(Error::Malformed(format!(
                "key segment {:?} cannot descend into non-composite tag {:?}",
                rest[0], frame.name
            )));
        }

        let value_start = pos + HEADER_LEN + header.name_len as usize;
        let value_end = value_start + header.value_len();
        let mut inner = scout_region(buf, value_start, value_end, rest)?;
        inner.children.insert(0, frame);
        return Ok(inner);
    }

    Ok(Trail {
        children: Vec::new(),
        end: None,
    })
}
