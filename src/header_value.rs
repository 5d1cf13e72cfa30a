// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

use std::fmt::Write;

/// Represents the value of a header.
///
/// Values the pipeline produces itself (sizes, content ranges) stay in their
/// typed form until the header block is serialized, which keeps the
/// finalizer free of string formatting on the hot path and makes the tests
/// precise about what was set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderValue {
    StaticString(&'static str),
    String(String),
    Size(u64),
    ContentRange(ContentRangeHeaderValue),
}

impl HeaderValue {
    /// Returns the value as a string, but does not convert it to a string if
    /// it is some other non-convertible type.
    #[must_use]
    pub fn as_str_no_convert(&self) -> Option<&str> {
        match self {
            HeaderValue::StaticString(string) => Some(string),
            HeaderValue::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn append_to_message(&self, response_text: &mut String) {
        match self {
            HeaderValue::StaticString(string) => response_text.push_str(string),
            HeaderValue::String(string) => response_text.push_str(string),
            HeaderValue::Size(size) => _ = write!(response_text, "{size}"),
            HeaderValue::ContentRange(content_range) => {
                content_range.append_to_message(response_text);
            }
        }
    }

    /// Get the header value in string form.
    #[allow(clippy::inherent_to_string)]
    #[must_use]
    pub fn to_string(&self) -> String {
        let mut result = String::new();
        self.append_to_message(&mut result);
        result
    }

    /// Parses the value as a number.
    #[must_use]
    pub fn parse_number(&self) -> Option<u64> {
        match self {
            HeaderValue::StaticString(string) => string.parse().ok(),
            HeaderValue::String(string) => string.parse().ok(),
            HeaderValue::Size(size) => Some(*size),
            HeaderValue::ContentRange(..) => None,
        }
    }
}

impl From<&'static str> for HeaderValue {
    fn from(value: &'static str) -> Self {
        HeaderValue::StaticString(value)
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::String(value)
    }
}

/// The `Content-Range` header field indicates where in a full body a partial
/// message belongs.
///
/// ### References
/// * [RFC 9110](https://httpwg.org/specs/rfc9110.html#field.content-range)
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentRangeHeaderValue {
    Range {
        /// The start of the range, inclusive.
        start: u64,

        /// The end of the range, inclusive.
        end: u64,

        /// Complete length of the **resource**, not the body.
        complete_length: u64,
    },

    /// Used for 416 Range Not Satisfiable.
    ///
    /// ### RFC 9110, section 14.4:
    /// > A server generating a 416 (Range Not Satisfiable) response to a
    /// > byte-range request SHOULD send a Content-Range header field with an
    /// > unsatisfied-range value, as in the following example:
    /// > ```text
    /// > Content-Range: bytes */1234
    /// > ```
    Unsatisfied {
        /// The complete length of the resource.
        complete_length: u64,
    },
}

impl ContentRangeHeaderValue {
    pub fn append_to_message(&self, response_text: &mut String) {
        match self {
            ContentRangeHeaderValue::Range { start, end, complete_length } => {
                debug_assert!(start <= end, "`start` must not exceed `end` for Content-Range");
                debug_assert!(
                    end < complete_length,
                    "`end` must be less than `complete_length` for Content-Range"
                );
                _ = write!(response_text, "bytes {start}-{end}/{complete_length}");
            }
            ContentRangeHeaderValue::Unsatisfied { complete_length } => {
                _ = write!(response_text, "bytes */{complete_length}");
            }
        }
    }
}
