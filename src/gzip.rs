// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use flate2::write::DeflateEncoder;
use flate2::{Compression, Crc};

use crate::{ChunkedWriter, Error};

/// Produces an [RFC 1952](https://datatracker.ietf.org/doc/html/rfc1952)
/// gzip stream incrementally, emitting it as chunked transfer-encoding
/// frames.
///
/// The framing is built by hand rather than with `flate2::write::GzEncoder`
/// so the header is bit-exact: `MTIME` carries the actual time the response
/// was produced, `XFL` advertises maximum compression, and `OS` is the
/// "unknown" value `0xFF`. The deflate payload itself is raw (no zlib
/// wrapper), followed by the CRC32 and ISIZE trailer, both little-endian.
pub struct GzipChunkedWriter<W: Write> {
    encoder: DeflateEncoder<ChunkedWriter<W>>,
    crc: Crc,
}

impl<W: Write> GzipChunkedWriter<W> {
    /// Starts the stream by framing the 10-byte gzip header.
    pub fn new(writer: W) -> Result<GzipChunkedWriter<W>, Error> {
        let mtime = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs() as u32);

        let mut header = [0u8; 10];
        header[0] = 0x1F; // ID1
        header[1] = 0x8B; // ID2
        header[2] = 0x08; // CM: deflate
        header[3] = 0x00; // FLG
        header[4..8].copy_from_slice(&mtime.to_le_bytes());
        header[8] = 0x02; // XFL: maximum compression
        header[9] = 0xFF; // OS: unknown

        let mut chunked = ChunkedWriter::new(writer);
        chunked.write_all(&header)?;

        Ok(GzipChunkedWriter {
            encoder: DeflateEncoder::new(chunked, Compression::best()),
            crc: Crc::new(),
        })
    }

    /// Compresses and frames the next slice of the logical body.
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), Error> {
        self.crc.update(data);
        self.encoder.write_all(data)?;
        Ok(())
    }

    /// Flushes the compressor, frames the 8-byte trailer and the chunked
    /// terminator, and hands the underlying writer back.
    pub fn finish(self) -> Result<W, Error> {
        let GzipChunkedWriter { encoder, crc } = self;
        let mut chunked = encoder.finish()?;

        let mut trailer = [0u8; 8];
        trailer[..4].copy_from_slice(&crc.sum().to_le_bytes());
        trailer[4..].copy_from_slice(&crc.amount().to_le_bytes());
        chunked.write_all(&trailer)?;

        Ok(chunked.finish()?)
    }
}
