//! The compressor port (spec §4.5): a named pair of streaming adapters
//! selectable per container and per `CompressedObject` tag.
//!
//! Built on `flate2`, the same compression crate the teacher already
//! depends on for gzip support in `bin_decode::Document::load`.

use crate::error::Result;
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io::{self, Read, Write};

/// A named, bidirectional stream adapter. `wrap_reader`/`wrap_writer` are
/// the "only their stream-in/stream-out contract matters" boundary named
/// in spec §1 — callers never need to know which concrete compressor
/// they're holding.
pub trait Compressor: Send + Sync + std::fmt::Debug {
    /// The name this compressor is registered and referenced under (in
    /// `CompressedObject` headers and container configuration).
    fn name(&self) -> &str;

    /// Wraps a reader so that reads from it yield decompressed bytes.
    fn wrap_reader<'a>(&self, source: Box<dyn Read + 'a>) -> Box<dyn Read + 'a>;

    /// Wraps a writer so that writes to it are compressed before being
    /// forwarded. The returned box must have [`finish`](CompressingWriter::finish)
    /// called on it once writing is complete so any trailer flushes.
    fn wrap_writer<'a>(&self, sink: Box<dyn Write + 'a>) -> Box<dyn CompressingWriter + 'a>;
}

/// A compressing sink may buffer internally; `finish` signals completion
/// so trailers (checksums, end markers) flush. Spec §4.5's finalization
/// contract.
pub trait CompressingWriter: Write {
    fn finish(self: Box<Self>) -> io::Result<()>;
}

/// No-op compressor. Used for containers stored uncompressed, which lets
/// the facade memory-map the backing file directly (spec §4.6).
#[derive(Debug, Default)]
pub struct IdentityCompressor;

impl Compressor for IdentityCompressor {
    fn name(&self) -> &str {
        "identity"
    }

    fn wrap_reader<'a>(&self, source: Box<dyn Read + 'a>) -> Box<dyn Read + 'a> {
        source
    }

    fn wrap_writer<'a>(&self, sink: Box<dyn Write + 'a>) -> Box<dyn CompressingWriter + 'a> {
        struct Passthrough<'a>(Box<dyn Write + 'a>);
        impl<'a> Write for Passthrough<'a> {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.write(buf)
            }
            fn flush(&mut self) -> io::Result<()> {
                self.0.flush()
            }
        }
        impl<'a> CompressingWriter for Passthrough<'a> {
            fn finish(self: Box<Self>) -> io::Result<()> {
                Ok(())
            }
        }
        Box::new(Passthrough(sink))
    }
}

#[derive(Debug, Default)]
pub struct GzipCompressor;

impl Compressor for GzipCompressor {
    fn name(&self) -> &str {
        "gzip"
    }

    fn wrap_reader<'a>(&self, source: Box<dyn Read + 'a>) -> Box<dyn Read + 'a> {
        Box::new(GzDecoder::new(source))
    }

    fn wrap_writer<'a>(&self, sink: Box<dyn Write + 'a>) -> Box<dyn CompressingWriter + 'a> {
        struct GzFinish<'a>(GzEncoder<Box<dyn Write + 'a>>);
        impl<'a> Write for GzFinish<'a> {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.write(buf)
            }
            fn flush(&mut self) -> io::Result<()> {
                self.0.flush()
            }
        }
        impl<'a> CompressingWriter for GzFinish<'a> {
            fn finish(self: Box<Self>) -> io::Result<()> {
                self.0.finish().map(|_| ())
            }
        }
        Box::new(GzFinish(GzEncoder::new(sink, Compression::default())))
    }
}

#[derive(Debug, Default)]
pub struct ZlibCompressor;

impl Compressor for ZlibCompressor {
    fn name(&self) -> &str {
        "zlib"
    }

    fn wrap_reader<'a>(&self, source: Box<dyn Read + 'a>) -> Box<dyn Read + 'a> {
        Box::new(ZlibDecoder::new(source))
    }

    fn wrap_writer<'a>(&self, sink: Box<dyn Write + 'a>) -> Box<dyn CompressingWriter + 'a> {
        struct ZlibFinish<'a>(ZlibEncoder<Box<dyn Write + 'a>>);
        impl<'a> Write for ZlibFinish<'a> {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.write(buf)
            }
            fn flush(&mut self) -> io::Result<()> {
                self.0.flush()
            }
        }
        impl<'a> CompressingWriter for ZlibFinish<'a> {
            fn finish(self: Box<Self>) -> io::Result<()> {
                self.0.finish().map(|_| ())
            }
        }
        Box::new(ZlibFinish(ZlibEncoder::new(sink, Compression::default())))
    }
}

/// Fully decompresses `data` through `compressor`, returning the plain
/// bytes. Used by `CompressedObject` decoding and by the container facade
/// when reading a whole compressed file into memory.
pub fn decompress_all(compressor: &dyn Compressor, data: &[u8]) -> Result<Vec<u8>> {
    let mut reader = compressor.wrap_reader(Box::new(data));
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}

/// Fully compresses `data` through `compressor`, including finalization.
pub fn compress_all(compressor: &dyn Compressor, data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut writer = compressor.wrap_writer(Box::new(&mut out));
        writer.write_all(data)?;
        writer.finish()?;
    }
    Ok(out)
}
