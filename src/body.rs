// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

use std::fmt::{self, Formatter, Write as _};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use sha1::{Digest, Sha1};

use crate::{ByteRange, ChunkedWriter, Error, GzipChunkedWriter, RangePart};

/// Minimum read size when streaming a file to the connection.
const FILE_CHUNK_SIZE: usize = 8192;

/// A prepared response body.
///
/// The four variants share one contract: a known-or-unknown content length,
/// an optional strong entity tag, whether byte ranges can be served, and the
/// write strategies of which the finalizer binds exactly one. Bodies are
/// single-use; the write methods consume the body, and the underlying
/// resources (an open file handle, buffers) are released when it is dropped,
/// written or not.
pub enum ResponseBody {
    /// A seekable file on disk. Supports every write strategy.
    File(FileBody),

    /// An in-memory buffer produced by a request handler.
    Buffer(BufferBody),

    /// A producer of successive chunks of unknown total length.
    Generator(GeneratorBody),

    /// A cached, fully-materialized generated entity (see [`crate::cache`]).
    StaticGenerated(StaticGeneratedBody),
}

impl ResponseBody {
    /// The exact body length in bytes, or `None` for generator bodies.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        match self {
            Self::File(file) => Some(file.size),
            Self::Buffer(buffer) => Some(buffer.data.len() as u64),
            Self::Generator(..) => None,
            Self::StaticGenerated(body) => Some(body.data.len() as u64),
        }
    }

    /// The strong entity tag, quotes included, when the body has one.
    #[must_use]
    pub fn etag(&self) -> Option<&str> {
        match self {
            Self::File(file) => Some(&file.etag),
            Self::StaticGenerated(body) => Some(&body.etag),
            Self::Buffer(..) | Self::Generator(..) => None,
        }
    }

    /// Whether byte-range serving is supported. `None` for generator bodies,
    /// where the question does not apply.
    #[must_use]
    pub fn accept_ranges(&self) -> Option<bool> {
        match self {
            Self::File(..) => Some(true),
            Self::Buffer(..) | Self::StaticGenerated(..) => Some(false),
            Self::Generator(..) => None,
        }
    }

    /// Streams the entire body once. Generator bodies frame every non-empty
    /// chunk as a chunked transfer-encoding frame; the other variants write
    /// raw bytes, the caller having announced a `Content-Length`.
    pub fn write<W: Write>(self, writer: &mut W) -> Result<(), Error> {
        match self {
            Self::File(mut file) => {
                let mut buf = [0u8; FILE_CHUNK_SIZE];
                loop {
                    let len = file.handle.read(&mut buf)?;
                    if len == 0 {
                        break;
                    }
                    writer.write_all(&buf[..len])?;
                }
                Ok(())
            }
            Self::Buffer(buffer) => Ok(writer.write_all(&buffer.data)?),
            Self::StaticGenerated(body) => Ok(writer.write_all(&body.data)?),
            Self::Generator(generator) => {
                let mut chunked = ChunkedWriter::new(&mut *writer);
                for chunk in generator.chunks {
                    chunked.write_all(&chunk)?;
                }
                chunked.finish()?;
                Ok(())
            }
        }
    }

    /// Streams the entire body through gzip, framed as chunked
    /// transfer-encoding. Not available for generator bodies.
    pub fn write_compressed<W: Write>(self, writer: &mut W) -> Result<(), Error> {
        let mut gzip = GzipChunkedWriter::new(&mut *writer)?;
        match self {
            Self::File(mut file) => {
                let mut buf = [0u8; FILE_CHUNK_SIZE];
                loop {
                    let len = file.handle.read(&mut buf)?;
                    if len == 0 {
                        break;
                    }
                    gzip.write_data(&buf[..len])?;
                }
            }
            Self::Buffer(buffer) => gzip.write_data(&buffer.data)?,
            Self::StaticGenerated(body) => gzip.write_data(&body.data)?,
            Self::Generator(..) => {
                return Err(Error::WriteNotSupported("compressing a generator body"));
            }
        }
        gzip.finish()?;
        Ok(())
    }

    /// Streams a single contiguous byte range. Only file-backed bodies
    /// support range serving.
    pub fn write_ranges_single<W: Write>(self, range: ByteRange, writer: &mut W) -> Result<(), Error> {
        match self {
            Self::File(mut file) => file.write_range_to(range, writer),
            _ => Err(Error::WriteNotSupported("range write on a non-file body")),
        }
    }

    /// Streams a `multipart/byteranges` body: each part's header verbatim,
    /// then CRLF, the range bytes, CRLF. The closing-boundary part carries no
    /// range. Only file-backed bodies support range serving.
    pub fn write_ranges_multipart<W: Write>(
        self,
        parts: Vec<RangePart>,
        writer: &mut W,
    ) -> Result<(), Error> {
        let Self::File(mut file) = self else {
            return Err(Error::WriteNotSupported("range write on a non-file body"));
        };

        for part in parts {
            writer.write_all(&part.header)?;
            if let Some(range) = part.range {
                writer.write_all(b"\r\n")?;
                file.write_range_to(range, writer)?;
                writer.write_all(b"\r\n")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(file) => f
                .debug_struct("File")
                .field("size", &file.size)
                .field("etag", &file.etag)
                .finish(),
            Self::Buffer(buffer) => f.debug_struct("Buffer").field("len", &buffer.data.len()).finish(),
            Self::Generator(..) => f.debug_struct("Generator").finish_non_exhaustive(),
            Self::StaticGenerated(body) => f
                .debug_struct("StaticGenerated")
                .field("len", &body.data.len())
                .field("etag", &body.etag)
                .finish(),
        }
    }
}

/// A body backed by a seekable file, owned exclusively by this body; the
/// handle closes when the body is dropped.
pub struct FileBody {
    handle: File,
    size: u64,
    etag: String,
}

impl FileBody {
    /// Wraps an already-open file. The entity tag is derived from the
    /// modification time and the path, so it changes whenever the file does
    /// and stays stable across requests in between.
    pub fn new(handle: File, path: &Path) -> Result<FileBody, Error> {
        let metadata = handle.metadata()?;
        let mtime = metadata
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());

        let mut hasher = Sha1::new();
        hasher.update(format!("{mtime}:{}", path.display()).as_bytes());

        Ok(FileBody {
            handle,
            size: metadata.len(),
            etag: quoted_hex(&hasher.finalize()),
        })
    }

    /// Opens the file at `path` and wraps it.
    pub fn open(path: &Path) -> Result<FileBody, Error> {
        FileBody::new(File::open(path)?, path)
    }

    /// Seeks to the range start and copies exactly `range.size()` bytes to
    /// the writer. A file that shrank under us surfaces as an I/O error.
    fn write_range_to<W: Write>(&mut self, range: ByteRange, writer: &mut W) -> Result<(), Error> {
        self.handle.seek(SeekFrom::Start(range.start))?;

        let mut buf = [0u8; FILE_CHUNK_SIZE];
        let mut remaining = range.size();
        while remaining > 0 {
            let want = buf.len().min(remaining as usize);
            let len = self.handle.read(&mut buf[..want])?;
            if len == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "file ended before the requested range did",
                )
                .into());
            }
            writer.write_all(&buf[..len])?;
            remaining -= len as u64;
        }
        Ok(())
    }
}

/// A body wrapping an in-memory byte buffer produced by a handler.
#[derive(Clone, Debug, Default)]
pub struct BufferBody {
    data: Vec<u8>,
}

impl From<Vec<u8>> for BufferBody {
    fn from(data: Vec<u8>) -> Self {
        BufferBody { data }
    }
}

impl From<String> for BufferBody {
    fn from(data: String) -> Self {
        BufferBody { data: data.into_bytes() }
    }
}

/// A body of unknown total length, produced chunk by chunk.
///
/// No backpressure is expressed at this layer; the producer is pulled from
/// the writing loop itself.
pub struct GeneratorBody {
    chunks: Box<dyn Iterator<Item = Vec<u8>> + Send>,
}

impl GeneratorBody {
    pub fn new(chunks: impl Iterator<Item = Vec<u8>> + Send + 'static) -> GeneratorBody {
        GeneratorBody { chunks: Box::new(chunks) }
    }
}

/// A fully-materialized generated entity, shared with the process-wide cache
/// so repeated requests serve the same bytes without regeneration.
#[derive(Clone)]
pub struct StaticGeneratedBody {
    data: Arc<[u8]>,
    etag: String,
}

impl StaticGeneratedBody {
    pub fn new(data: Vec<u8>) -> StaticGeneratedBody {
        let mut hasher = Sha1::new();
        hasher.update(&data);
        StaticGeneratedBody {
            data: data.into(),
            etag: quoted_hex(&hasher.finalize()),
        }
    }
}

/// Formats a digest as a quoted lowercase hex token, the strong entity-tag
/// form used everywhere in this crate.
fn quoted_hex(digest: &[u8]) -> String {
    let mut etag = String::with_capacity(digest.len() * 2 + 2);
    etag.push('"');
    for byte in digest {
        _ = write!(etag, "{byte:02x}");
    }
    etag.push('"');
    etag
}
