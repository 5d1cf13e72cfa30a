// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

use phf::phf_map;
use unicase::UniCase;

/// The name of a request or response header.
///
/// Header names are compared case-insensitively, as per
/// [RFC 9110 Section 5.1](https://www.rfc-editor.org/rfc/rfc9110.html#section-5.1):
/// > Field names are case-insensitive [...]
///
/// Names the pipeline does not know about are kept in [`HeaderName::Other`]
/// with the casing of their first insertion preserved.
#[derive(Clone, Debug)]
pub enum HeaderName {
    Other(String),

    AcceptEncoding,
    AcceptRanges,
    CacheControl,
    Connection,
    ContentEncoding,
    ContentLength,
    ContentRange,
    ContentType,
    Date,
    ETag,
    Expires,
    IfMatch,
    IfModifiedSince,
    IfNoneMatch,
    IfRange,
    LastModified,
    Range,
    Server,
    TransferEncoding,
    Vary,
}

static STRING_TO_HEADER_NAME_MAP: phf::Map<UniCase<&'static str>, HeaderName> = phf_map!(
    UniCase::ascii("accept-encoding") => HeaderName::AcceptEncoding,
    UniCase::ascii("accept-ranges") => HeaderName::AcceptRanges,
    UniCase::ascii("cache-control") => HeaderName::CacheControl,
    UniCase::ascii("connection") => HeaderName::Connection,
    UniCase::ascii("content-encoding") => HeaderName::ContentEncoding,
    UniCase::ascii("content-length") => HeaderName::ContentLength,
    UniCase::ascii("content-range") => HeaderName::ContentRange,
    UniCase::ascii("content-type") => HeaderName::ContentType,
    UniCase::ascii("date") => HeaderName::Date,
    UniCase::ascii("etag") => HeaderName::ETag,
    UniCase::ascii("expires") => HeaderName::Expires,
    UniCase::ascii("if-match") => HeaderName::IfMatch,
    UniCase::ascii("if-modified-since") => HeaderName::IfModifiedSince,
    UniCase::ascii("if-none-match") => HeaderName::IfNoneMatch,
    UniCase::ascii("if-range") => HeaderName::IfRange,
    UniCase::ascii("last-modified") => HeaderName::LastModified,
    UniCase::ascii("range") => HeaderName::Range,
    UniCase::ascii("server") => HeaderName::Server,
    UniCase::ascii("transfer-encoding") => HeaderName::TransferEncoding,
    UniCase::ascii("vary") => HeaderName::Vary,
);

impl HeaderName {
    /// Parses the header name. Unknown names are preserved verbatim in
    /// [`HeaderName::Other`].
    #[must_use]
    pub fn from_str(name: &str) -> HeaderName {
        match STRING_TO_HEADER_NAME_MAP.get(&UniCase::ascii(name)) {
            Some(header_name) => header_name.clone(),
            None => HeaderName::Other(name.to_owned()),
        }
    }

    /// Get the header name in its canonical HTTP/1.x casing.
    #[must_use]
    pub fn to_string_h1(&self) -> &str {
        match self {
            Self::Other(name) => name,
            Self::AcceptEncoding => "Accept-Encoding",
            Self::AcceptRanges => "Accept-Ranges",
            Self::CacheControl => "Cache-Control",
            Self::Connection => "Connection",
            Self::ContentEncoding => "Content-Encoding",
            Self::ContentLength => "Content-Length",
            Self::ContentRange => "Content-Range",
            Self::ContentType => "Content-Type",
            Self::Date => "Date",
            Self::ETag => "ETag",
            Self::Expires => "Expires",
            Self::IfMatch => "If-Match",
            Self::IfModifiedSince => "If-Modified-Since",
            Self::IfNoneMatch => "If-None-Match",
            Self::IfRange => "If-Range",
            Self::LastModified => "Last-Modified",
            Self::Range => "Range",
            Self::Server => "Server",
            Self::TransferEncoding => "Transfer-Encoding",
            Self::Vary => "Vary",
        }
    }
}

impl PartialEq for HeaderName {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Other(a), Self::Other(b)) => a.eq_ignore_ascii_case(b),
            (a, b) => core::mem::discriminant(a) == core::mem::discriminant(b),
        }
    }
}

impl Eq for HeaderName {}

impl From<&str> for HeaderName {
    fn from(name: &str) -> Self {
        HeaderName::from_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ETag", HeaderName::ETag)]
    #[case("etag", HeaderName::ETag)]
    #[case("ETAG", HeaderName::ETag)]
    #[case("content-range", HeaderName::ContentRange)]
    #[case("If-None-Match", HeaderName::IfNoneMatch)]
    fn from_str_known(#[case] input: &str, #[case] expected: HeaderName) {
        assert_eq!(HeaderName::from_str(input), expected);
    }

    #[test]
    fn from_str_unknown_preserves_casing() {
        let name = HeaderName::from_str("X-Library-Uuid");
        assert_eq!(name.to_string_h1(), "X-Library-Uuid");
        assert_eq!(name, HeaderName::from_str("x-library-uuid"));
        assert_ne!(name, HeaderName::from_str("x-library-id"));
    }

    #[test]
    fn other_never_equals_known() {
        assert_ne!(HeaderName::Other("ETag".into()), HeaderName::Other("Range".into()));
        assert_ne!(HeaderName::ETag, HeaderName::Range);
    }
}
