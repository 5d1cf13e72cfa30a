// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

use std::sync::{Mutex, PoisonError};

use hashbrown::HashMap;
use lazy_static::lazy_static;
use log::debug;

use crate::{ResponseBody, StaticGeneratedBody};

lazy_static! {
    /// Process-wide memoization of generated bodies, keyed by a
    /// caller-chosen name. There is no eviction: entries live for the
    /// process lifetime, so this suits only a small, bounded set of
    /// generated outputs, such as the top-level catalog pages.
    static ref GENERATED_CACHE: Mutex<HashMap<String, StaticGeneratedBody>> =
        Mutex::new(HashMap::new());
}

/// Returns the cached body for `name`, running `generate` on the first
/// request.
///
/// The generator runs while the cache mutex is held, so concurrent misses on
/// the same key serialize and the generator runs at most once per key. The
/// generators handed in here are expected to be cheap and bounded.
pub fn generated<F>(name: &str, generate: F) -> ResponseBody
where
    F: FnOnce() -> Vec<u8>,
{
    let mut cache = GENERATED_CACHE
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(body) = cache.get(name) {
        return ResponseBody::StaticGenerated(body.clone());
    }

    debug!("generating static entity {name:?}");
    let body = StaticGeneratedBody::new(generate());
    cache.insert(name.to_owned(), body.clone());
    ResponseBody::StaticGenerated(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn generator_runs_at_most_once_per_key() {
        let calls = AtomicUsize::new(0);
        let generate = || {
            calls.fetch_add(1, Ordering::SeqCst);
            b"generated catalog".to_vec()
        };

        let first = generated("cache-test-once", generate);
        let second = generated("cache-test-once", generate);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Both handles serve the same entity with the same tag.
        assert_eq!(first.etag(), second.etag());
        assert_eq!(first.content_length(), Some(17));
    }

    #[test]
    fn distinct_keys_generate_independently() {
        let first = generated("cache-test-a", || b"aaa".to_vec());
        let second = generated("cache-test-b", || b"bbb".to_vec());
        assert_ne!(first.etag(), second.etag());

        let mut sink = Vec::new();
        second.write(&mut sink).unwrap();
        assert_eq!(sink, b"bbb");
    }
}
