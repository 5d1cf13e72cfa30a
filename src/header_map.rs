// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

use crate::{HeaderName, HeaderValue};

/// An insertion-ordered, multi-valued header container.
///
/// Serialization of the header block preserves insertion order, and repeated
/// names (e.g. `Set-Cookie`) are kept as separate entries. Lookups compare
/// names case-insensitively via [`HeaderName`].
#[derive(Clone, Debug, Default)]
pub struct HeaderMap {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl HeaderMap {
    #[must_use]
    pub fn new() -> HeaderMap {
        HeaderMap::default()
    }

    #[must_use]
    pub fn new_with_vec(headers: Vec<(HeaderName, HeaderValue)>) -> HeaderMap {
        HeaderMap { headers }
    }

    /// Appends a header to the list of headers, even when the name is already
    /// present. This is used for headers that can be duplicated.
    pub fn append_possible_duplicate(&mut self, header_name: HeaderName, value: HeaderValue) {
        self.headers.push((header_name, value));
    }

    #[must_use]
    pub fn contains(&self, header_name: &HeaderName) -> bool {
        self.headers.iter().any(|(name, _)| name == header_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns the first value for the given name, or `None`.
    #[must_use]
    pub fn get(&self, header_name: &HeaderName) -> Option<&HeaderValue> {
        self.headers
            .iter()
            .find(|(name, _)| name == header_name)
            .map(|(_, value)| value)
    }

    /// Returns every value for the given name, in insertion order.
    #[must_use]
    pub fn get_all(&self, header_name: &HeaderName) -> Vec<&HeaderValue> {
        self.headers
            .iter()
            .filter(|(name, _)| name == header_name)
            .map(|(_, value)| value)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(HeaderName, HeaderValue)> {
        self.headers.iter()
    }

    /// Removes every entry with the given name.
    pub fn remove(&mut self, header_name: &HeaderName) {
        self.headers.retain(|(name, _)| name != header_name);
    }

    /// Sets the given header to a single value, replacing the first existing
    /// entry in place and dropping any further duplicates.
    pub fn set(&mut self, header_name: HeaderName, value: HeaderValue) {
        let mut replaced = false;
        self.headers.retain_mut(|(name, existing_value)| {
            if *name != header_name {
                return true;
            }
            if replaced {
                return false;
            }
            *existing_value = value.clone();
            replaced = true;
            true
        });

        if !replaced {
            self.headers.push((header_name, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.set("Content-Type".into(), "text/html".into());
        assert_eq!(
            headers.get(&"content-type".into()).map(HeaderValue::to_string),
            Some("text/html".to_owned())
        );
    }

    #[test]
    fn set_replaces_in_place_and_deduplicates() {
        let mut headers = HeaderMap::new();
        headers.append_possible_duplicate(HeaderName::Vary, "Accept-Encoding".into());
        headers.append_possible_duplicate(HeaderName::ETag, "\"a\"".into());
        headers.append_possible_duplicate(HeaderName::Vary, "Origin".into());

        headers.set(HeaderName::Vary, "User-Agent".into());

        let order: Vec<&str> = headers.iter().map(|(name, _)| name.to_string_h1()).collect();
        assert_eq!(order, ["Vary", "ETag"]);
        assert_eq!(headers.get(&HeaderName::Vary).unwrap().to_string(), "User-Agent");
    }

    #[test]
    fn get_all_and_remove() {
        let mut headers = HeaderMap::new();
        headers.append_possible_duplicate(HeaderName::Vary, "A".into());
        headers.append_possible_duplicate(HeaderName::ETag, "\"x\"".into());
        headers.append_possible_duplicate(HeaderName::Vary, "B".into());

        let all: Vec<String> = headers
            .get_all(&HeaderName::Vary)
            .into_iter()
            .map(HeaderValue::to_string)
            .collect();
        assert_eq!(all, ["A", "B"]);

        headers.remove(&HeaderName::Vary);
        assert!(!headers.contains(&HeaderName::Vary));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut headers = HeaderMap::new();
        headers.set(HeaderName::ContentType, "text/plain".into());
        headers.set(HeaderName::ContentLength, HeaderValue::Size(5));
        headers.set(HeaderName::ETag, "\"e\"".into());

        let order: Vec<&str> = headers.iter().map(|(name, _)| name.to_string_h1()).collect();
        assert_eq!(order, ["Content-Type", "Content-Length", "ETag"]);
    }
}
