// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

//! Construction of `multipart/byteranges` responses, as defined by
//! [RFC 7233 Section 4.1](https://www.rfc-editor.org/rfc/rfc7233.html#section-4.1).

use std::fmt::Write;

use lazy_static::lazy_static;
use rand::Rng;

use crate::ByteRange;

lazy_static! {
    /// The part boundary, chosen once per process. 128 random bits in hex is
    /// long enough that a collision with range body bytes is not a concern,
    /// and a constant token lets `Content-Length` be computed up front.
    pub static ref MULTIPART_BOUNDARY: String = {
        let token: [u8; 16] = rand::thread_rng().gen();
        let mut boundary = String::with_capacity(32);
        for byte in token {
            _ = write!(boundary, "{byte:02x}");
        }
        boundary
    };
}

/// One element of a multipart body: the verbatim header bytes, and the range
/// whose body follows them. The closing `--boundary--` element carries no
/// range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangePart {
    pub range: Option<ByteRange>,
    pub header: Vec<u8>,
}

/// Builds the per-part headers for the given ranges, ending with the closing
/// boundary element.
///
/// `content_type` is the entity's own media type; in a multipart response
/// the outer `Content-Type` becomes `multipart/byteranges`, so the original
/// type is repeated inside each part instead.
#[must_use]
pub fn range_parts(
    ranges: &[ByteRange],
    content_type: Option<&str>,
    content_length: u64,
) -> Vec<RangePart> {
    let boundary = &*MULTIPART_BOUNDARY;
    let mut parts = Vec::with_capacity(ranges.len() + 1);

    for range in ranges {
        let mut header = format!(
            "--{boundary}\r\nContent-Range: bytes {}-{}/{content_length}\r\n",
            range.start, range.stop
        );
        if let Some(content_type) = content_type {
            _ = write!(header, "Content-Type: {content_type}\r\n");
        }
        parts.push(RangePart {
            range: Some(*range),
            header: header.into_bytes(),
        });
    }

    parts.push(RangePart {
        range: None,
        header: format!("--{boundary}--").into_bytes(),
    });

    parts
}

/// The exact `Content-Length` of a multipart body built from `parts`: the
/// header bytes, plus each part's payload and the CRLF on either side of it.
#[must_use]
pub fn multipart_content_length(parts: &[RangePart]) -> u64 {
    parts
        .iter()
        .map(|part| {
            part.header.len() as u64
                + part.range.map_or(0, |range| range.size() + 4)
        })
        .sum()
}
