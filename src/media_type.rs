// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

use std::path::Path;

use phf::phf_map;
use unicase::UniCase;

/// Maps a file extension to its media type.
///
/// The table covers the formats the content server actually ships: the web
/// front-end assets, the e-book container formats, and the cover images.
/// Textual types carry an explicit charset so user agents don't have to
/// sniff.
///
/// ### References
/// * [IANA Media Types](https://www.iana.org/assignments/media-types/media-types.xhtml)
static MEDIA_TYPE_BY_EXTENSION: phf::Map<UniCase<&'static str>, &'static str> = phf_map!(
    UniCase::ascii("azw3") => "application/x-mobi8-ebook",
    UniCase::ascii("cbz") => "application/x-cbz",
    UniCase::ascii("css") => "text/css; charset=UTF-8",
    UniCase::ascii("epub") => "application/epub+zip",
    UniCase::ascii("gif") => "image/gif",
    UniCase::ascii("htm") => "text/html; charset=UTF-8",
    UniCase::ascii("html") => "text/html; charset=UTF-8",
    UniCase::ascii("ico") => "image/x-icon",
    UniCase::ascii("jpeg") => "image/jpeg",
    UniCase::ascii("jpg") => "image/jpeg",
    UniCase::ascii("js") => "text/javascript; charset=UTF-8",
    UniCase::ascii("json") => "application/json",
    UniCase::ascii("mobi") => "application/x-mobipocket-ebook",
    UniCase::ascii("opf") => "application/oebps-package+xml",
    UniCase::ascii("pdf") => "application/pdf",
    UniCase::ascii("png") => "image/png",
    UniCase::ascii("svg") => "image/svg+xml",
    UniCase::ascii("ttf") => "font/ttf",
    UniCase::ascii("txt") => "text/plain; charset=UTF-8",
    UniCase::ascii("webp") => "image/webp",
    UniCase::ascii("woff") => "font/woff",
    UniCase::ascii("woff2") => "font/woff2",
    UniCase::ascii("xml") => "application/xml",
    UniCase::ascii("zip") => "application/zip",
);

/// Returns the media type for the given extension, or `None` when the
/// extension is not recognized.
#[must_use]
pub fn media_type_for_extension(extension: &str) -> Option<&'static str> {
    MEDIA_TYPE_BY_EXTENSION.get(&UniCase::ascii(extension)).copied()
}

/// Returns the media type for the given path, based on its extension.
/// `None` when the path has no extension or the extension is unknown.
#[must_use]
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|extension| extension.to_str())
        .and_then(media_type_for_extension)
}
