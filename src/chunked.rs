// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

use std::io::{self, Write};

/// A writer that frames everything written to it as `Transfer-Encoding:
/// chunked` frames: `<length-in-hex>\r\n<data>\r\n`.
///
/// Empty writes are swallowed, because a zero-length frame is the stream
/// terminator; that one is produced by [`ChunkedWriter::finish`], which must
/// be called exactly once when the body is complete. No trailer fields are
/// emitted.
///
/// ### References
/// * [RFC 9112 Section 7.1](https://www.rfc-editor.org/rfc/rfc9112.html#section-7.1)
#[derive(Debug)]
pub struct ChunkedWriter<W: Write> {
    inner: W,
}

impl<W: Write> ChunkedWriter<W> {
    pub fn new(inner: W) -> ChunkedWriter<W> {
        ChunkedWriter { inner }
    }

    /// Writes the terminating zero-length frame and hands the underlying
    /// writer back.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.write_all(b"0\r\n\r\n")?;
        Ok(self.inner)
    }
}

impl<W: Write> Write for ChunkedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        write!(self.inner, "{:X}\r\n", buf.len())?;
        self.inner.write_all(buf)?;
        self.inner.write_all(b"\r\n")?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Decodes a complete chunked stream back into the logical body bytes,
/// returning `None` when the framing is invalid or the terminator is
/// missing.
#[cfg(test)]
pub(crate) fn dechunk(mut stream: &[u8]) -> Option<Vec<u8>> {
    let mut body = Vec::new();
    loop {
        let line_end = stream.windows(2).position(|window| window == b"\r\n")?;
        let size = usize::from_str_radix(std::str::from_utf8(&stream[..line_end]).ok()?, 16).ok()?;
        stream = &stream[line_end + 2..];

        if size == 0 {
            return (stream == b"\r\n").then_some(body);
        }

        if stream.len() < size + 2 || &stream[size..size + 2] != b"\r\n" {
            return None;
        }
        body.extend_from_slice(&stream[..size]);
        stream = &stream[size + 2..];
    }
}
