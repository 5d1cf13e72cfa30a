// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

/// A single contiguous byte range, normalized against a known content length.
///
/// Both endpoints are inclusive, and a range is never empty:
/// `0 <= start <= stop < content_length`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteRange {
    pub start: u64,
    pub stop: u64,
}

impl ByteRange {
    #[must_use]
    pub fn new(start: u64, stop: u64) -> ByteRange {
        debug_assert!(start <= stop, "byte ranges are never empty");
        ByteRange { start, stop }
    }

    /// The number of bytes the range covers.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.stop - self.start + 1
    }
}

/// The outcome of interpreting a request's `Range` header.
///
/// The distinction between [`NotSpecified`](RangeRequest::NotSpecified) and
/// [`Unsatisfiable`](RangeRequest::Unsatisfiable) matters: the former means
/// range semantics are ignored entirely and the full entity is served, the
/// latter demands a `416` response with `Content-Range: bytes */<length>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RangeRequest {
    /// The header was absent, empty, or used a unit other than `bytes`.
    NotSpecified,

    /// At least one specifier was satisfiable. Order mirrors the header.
    Ranges(Vec<ByteRange>),

    /// The header was a well-formed `bytes=` request, but every specifier
    /// asked for bytes outside the entity.
    Unsatisfiable,
}

/// Parses a `Range` request header against a known content length.
///
/// Individual specifiers that are malformed or out of bounds are skipped
/// silently, per [RFC 9110 Section 14.2](https://www.rfc-editor.org/rfc/rfc9110.html#section-14.2):
/// a recipient is free to ignore ranges it cannot satisfy, and a header it
/// does not understand altogether.
#[must_use]
pub fn parse_range_header(value: Option<&str>, content_length: u64) -> RangeRequest {
    let Some(value) = value else {
        return RangeRequest::NotSpecified;
    };
    if value.is_empty() {
        return RangeRequest::NotSpecified;
    }

    let Some((unit, specifiers)) = value.split_once('=') else {
        return RangeRequest::NotSpecified;
    };
    if !unit.trim().eq_ignore_ascii_case("bytes") {
        return RangeRequest::NotSpecified;
    }

    let mut ranges = Vec::new();
    for specifier in specifiers.split(',') {
        if let Some(range) = parse_specifier(specifier.trim(), content_length) {
            ranges.push(range);
        }
    }

    if ranges.is_empty() {
        RangeRequest::Unsatisfiable
    } else {
        RangeRequest::Ranges(ranges)
    }
}

/// Parses a single `first-last` specifier, returning `None` when it is
/// malformed or unsatisfiable.
fn parse_specifier(specifier: &str, content_length: u64) -> Option<ByteRange> {
    if content_length == 0 {
        return None;
    }

    let (first, last) = specifier.split_once('-')?;

    if first.is_empty() {
        // Suffix form `-N`: the final N bytes of the entity.
        let suffix: u64 = last.parse().ok()?;
        if suffix == 0 {
            return None;
        }
        if suffix >= content_length {
            return Some(ByteRange::new(0, content_length - 1));
        }
        return Some(ByteRange::new(content_length - suffix, content_length - 1));
    }

    let start: u64 = first.parse().ok()?;
    if start >= content_length {
        return None;
    }

    let stop = if last.is_empty() {
        content_length - 1
    } else {
        last.parse().ok()?
    };
    if stop < start {
        return None;
    }

    Some(ByteRange::new(start, stop.min(content_length - 1)))
}
