//! The container facade (spec §4.6): uniform Get/Save/Append/Delete/
//! Replace/Set/Export/Import/Clear over either an in-memory buffer or an
//! on-disk file, the latter optionally wrapped by a whole-file
//! compressor chosen independently of any `CompressedObject` tags inside
//! it.
//!
//! Per §9's recommended redesign, registries are passed in explicitly at
//! construction rather than always going through [`crate::registry::global`].

use crate::codec::{decode_document, encode_document};
use crate::compressor::{compress_all, decompress_all};
use crate::edit;
use crate::error::{Error, Result};
use crate::navigate;
use crate::registry::Registries;
use crate::tag::NamedTag;
use log::debug;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

enum Backing {
    Buffer(Vec<u8>),
    File {
        path: PathBuf,
        compressor: String,
    },
}

/// A container bound to either a `Vec<u8>` or a file on disk.
pub struct Container<'r> {
    backing: Backing,
    registries: &'r Registries,
}

impl<'r> Container<'r> {
    /// A purely in-memory container holding an already-encoded tag
    /// sequence (use [`Container::save`] to populate an empty one).
    pub fn buffer(data: Vec<u8>, registries: &'r Registries) -> Container<'r> {
        Container {
            backing: Backing::Buffer(data),
            registries,
        }
    }

    /// A file-backed container. `compressor` names the whole-file
    /// compression the file is (or will be) stored under; `"identity"`
    /// enables memory-mapped reads. The file need not exist yet —
    /// [`Container::save`] or [`Container::set`] will create it.
    pub fn file(
        path: impl Into<PathBuf>,
        compressor: impl Into<String>,
        registries: &'r Registries,
    ) -> Container<'r> {
        Container {
            backing: Backing::File {
                path: path.into(),
                compressor: compressor.into(),
            },
            registries,
        }
    }

    /// Runs `f` against the current decompressed byte image without
    /// necessarily copying it: file-backed containers using the
    /// `identity` compressor are memory-mapped for the duration of the
    /// call instead.
    fn with_bytes<T>(&self, f: impl FnOnce(&[u8]) -> Result<T>) -> Result<T> {
        match &self.backing {
            Backing::Buffer(data) => f(data),
            Backing::File { path, compressor } => {
                if compressor == "identity" {
                    if !path.exists() {
                        return f(&[]);
                    }
                    let file = File::open(path)?;
                    let mmap = unsafe { Mmap::map(&file)? };
                    f(&mmap)
                } else {
                    let data = self.read_all_bytes()?;
                    f(&data)
                }
            }
        }
    }

    /// Like [`Self::with_bytes`], but always yields an owned copy —
    /// needed whenever the caller is about to produce an edited buffer
    /// of its own.
    fn read_all_bytes(&self) -> Result<Vec<u8>> {
        match &self.backing {
            Backing::Buffer(data) => Ok(data.clone()),
            Backing::File { path, compressor } => {
                if !path.exists() {
                    return Ok(Vec::new());
                }
                let raw = std::fs::read(path)?;
                if compressor == "identity" {
                    Ok(raw)
                } else {
                    let comp = self.registries.compressor(compressor)?;
                    decompress_all(comp.as_ref(), &raw)
                }
            }
        }
    }

    /// Replaces the container's content with `data` (already decoded tag
    /// bytes, uncompressed): an in-place buffer swap, or a recompress +
    /// atomic rename for a file.
    fn persist(&mut self, data: Vec<u8>) -> Result<()> {
        match &mut self.backing {
            Backing::Buffer(buf) => {
                *buf = data;
                Ok(())
            }
            Backing::File { path, compressor } => {
                let comp = self.registries.compressor(compressor)?;
                let compressed = compress_all(comp.as_ref(), &data)?;
                let mut tmp_name = path.as_os_str().to_os_string();
                tmp_name.push(".tmp");
                let tmp_path = PathBuf::from(tmp_name);
                std::fs::write(&tmp_path, compressed)?;
                std::fs::rename(&tmp_path, &*path)?;
                debug!("persisted {} bytes to {}", data.len(), path.display());
                Ok(())
            }
        }
    }

    /// Resolves `key` to a materialized tag, or `None` if absent.
    pub fn get(&self, key: &str) -> Result<Option<NamedTag>> {
        self.with_bytes(|buf| navigate::get(buf, key, self.registries))
    }

    /// The full, ordered top-level tag sequence.
    pub fn get_all(&self) -> Result<Vec<NamedTag>> {
        self.with_bytes(|buf| decode_document(buf, self.registries))
    }

    /// Whether `key` resolves to anything, without materializing it.
    pub fn find(&self, key: &str) -> Result<bool> {
        self.with_bytes(|buf| navigate::find(buf, key))
    }

    /// Replaces the entire container's content with `tags`.
    pub fn save(&mut self, tags: &[NamedTag]) -> Result<()> {
        let data = encode_document(tags, self.registries)?;
        self.persist(data)
    }

    /// Appends `tag` after the existing content.
    pub fn append(&mut self, tag: &NamedTag) -> Result<()> {
        self.append_all(std::slice::from_ref(tag))
    }

    /// Appends `tags` after the existing content, rewriting the whole
    /// backing store (the format has no framing that permits mid-stream
    /// append without a full rewrite once compression is involved).
    pub fn append_all(&mut self, tags: &[NamedTag]) -> Result<()> {
        let mut data = self.read_all_bytes()?;
        for tag in tags {
            crate::codec::encode_tag(&mut data, tag, self.registries)?;
        }
        self.persist(data)
    }

    /// Deletes `key`, returning whether anything was removed. Per spec
    /// §7, a pure I/O failure is swallowed to `false`; malformed data
    /// still surfaces as an error.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        let buf = match self.read_all_bytes() {
            Ok(buf) => buf,
            Err(Error::Io(_)) => return Ok(false),
            Err(e) => return Err(e),
        };
        let (new_buf, removed) = edit::delete(&buf, key)?;
        if removed {
            if let Err(e) = self.persist(new_buf) {
                return match e {
                    Error::Io(_) => Ok(false),
                    other => Err(other),
                };
            }
        }
        Ok(removed)
    }

    /// Replaces the tag at `key` with `new_tag`, returning whether
    /// anything was replaced. Soft-fails to `false` on pure I/O failure,
    /// like [`Self::delete`].
    pub fn replace(&mut self, key: &str, new_tag: &NamedTag) -> Result<bool> {
        let buf = match self.read_all_bytes() {
            Ok(buf) => buf,
            Err(Error::Io(_)) => return Ok(false),
            Err(e) => return Err(e),
        };
        let (new_buf, replaced) = edit::replace(&buf, key, new_tag, self.registries)?;
        if replaced {
            if let Err(e) = self.persist(new_buf) {
                return match e {
                    Error::Io(_) => Ok(false),
                    other => Err(other),
                };
            }
        }
        Ok(replaced)
    }

    /// The unified set entry point (spec §4.4): deletes on `None`,
    /// overwrites on an empty key, replaces/auto-creates/appends
    /// otherwise. Unlike [`Self::delete`]/[`Self::replace`], every error
    /// surfaces, including [`Error::KeyNotFound`].
    pub fn set(&mut self, key: &str, tag: Option<NamedTag>) -> Result<()> {
        let buf = self.read_all_bytes()?;
        let new_buf = edit::set(&buf, key, tag, self.registries)?;
        self.persist(new_buf)
    }

    /// Decompresses the current content and re-emits it under
    /// `compressor_name`, without mutating this container. Used for bulk
    /// transcoding between whole-file compression schemes.
    pub fn export(&self, compressor_name: &str) -> Result<Vec<u8>> {
        let data = self.read_all_bytes()?;
        let target = self.registries.compressor(compressor_name)?;
        compress_all(target.as_ref(), &data)
    }

    /// Reads `path` (compressed under `compressor_name`), decompresses
    /// it, and replaces this container's content.
    pub fn import_file(&mut self, path: impl AsRef<Path>, compressor_name: &str) -> Result<()> {
        let raw = std::fs::read(path)?;
        let comp = self.registries.compressor(compressor_name)?;
        let data = decompress_all(comp.as_ref(), &raw)?;
        self.persist(data)
    }

    /// Writes the current content to `path`, compressed under
    /// `compressor_name`, without mutating this container.
    pub fn save_to_file(&self, path: impl AsRef<Path>, compressor_name: &str) -> Result<()> {
        let data = self.read_all_bytes()?;
        let comp = self.registries.compressor(compressor_name)?;
        let compressed = compress_all(comp.as_ref(), &data)?;
        std::fs::write(path, compressed)?;
        Ok(())
    }

    /// Truncates the container to empty.
    pub fn clear(&mut self) -> Result<()> {
        self.persist(Vec::new())
    }
}
