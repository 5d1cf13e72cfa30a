// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

use phf::phf_map;

/// An HTTP request method.
///
/// # Notes
/// The method token is case-sensitive, as per
/// [RFC 9110 - Section 9.1](https://www.rfc-editor.org/rfc/rfc9110.html#section-9.1-5).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    Other(String),
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
}

static STRING_TO_METHOD_MAP: phf::Map<&'static str, Method> = phf_map!(
    "CONNECT" => Method::Connect,
    "DELETE" => Method::Delete,
    "GET" => Method::Get,
    "HEAD" => Method::Head,
    "OPTIONS" => Method::Options,
    "PATCH" => Method::Patch,
    "POST" => Method::Post,
    "PUT" => Method::Put,
    "TRACE" => Method::Trace,
);

impl Method {
    #[must_use]
    pub fn from_str(method: &str) -> Method {
        match STRING_TO_METHOD_MAP.get(method) {
            Some(method) => method.clone(),
            None => Method::Other(method.to_owned()),
        }
    }

    /// Get the method in string form.
    #[must_use]
    pub fn as_string(&self) -> &str {
        match self {
            Self::Other(string) => string,
            Self::Connect => "CONNECT",
            Self::Delete => "DELETE",
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Patch => "PATCH",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Trace => "TRACE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_is_case_sensitive() {
        assert_eq!(Method::from_str("GET"), Method::Get);
        assert_eq!(Method::from_str("get"), Method::Other("get".to_owned()));
    }

    #[test]
    fn as_string_round_trips() {
        assert_eq!(Method::from_str("HEAD").as_string(), "HEAD");
        assert_eq!(Method::from_str("BREW").as_string(), "BREW");
    }
}
