// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

//! The response finalizer: given the parsed request headers and a prepared
//! body, it negotiates conditional requests, byte ranges, transfer
//! compression and chunking, mutates the outgoing header map accordingly,
//! and binds the body to the one write strategy that matches.
//!
//! The finalizer performs no I/O itself. All streaming happens inside
//! [`FinalizedBody::commit`], against the writer the connection loop
//! supplies; for a `HEAD` request the caller simply never calls `commit`.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use log::debug;

use crate::{
    acceptable_encoding,
    media_type_for_path,
    multipart_content_length,
    parse_range_header,
    range_parts,
    BufferBody,
    ByteRange,
    ContentRangeHeaderValue,
    Error,
    FileBody,
    GeneratorBody,
    HeaderMap,
    HeaderName,
    HeaderValue,
    Method,
    RangePart,
    RangeRequest,
    ResponseBody,
    StatusCode,
    MULTIPART_BOUNDARY,
};

/// Knobs the connection loop passes down per request.
#[derive(Clone, Debug)]
pub struct FinalizeOptions {
    /// True for HTTP/1.0, where chunked transfer-encoding is forbidden, and
    /// with it compression and range serving.
    pub is_http1: bool,

    /// Bodies smaller than this are not worth compressing. Negative
    /// disables compression outright.
    pub compress_min_size: i64,
}

impl Default for FinalizeOptions {
    fn default() -> Self {
        FinalizeOptions {
            is_http1: false,
            compress_min_size: 1024,
        }
    }
}

/// What a request handler hands to the finalizer.
pub enum HandlerOutput {
    /// An already-constructed body, e.g. from [`crate::cache::generated`].
    Body(ResponseBody),

    /// Raw bytes; served as `text/plain` unless the handler set a type.
    Bytes(Vec<u8>),

    /// A string; served as `text/plain` unless the handler set a type.
    Str(String),

    /// An open file. The media type is inferred from the extension unless
    /// the handler set one.
    File { handle: File, path: PathBuf },

    /// A producer of chunks of unknown total length.
    Generator(GeneratorBody),
}

/// The write strategy the finalizer bound. Exactly one per response.
enum CommitStrategy {
    /// Nothing to write (304, 416).
    Empty,
    Full,
    Compressed,
    SingleRange(ByteRange),
    Multipart(Vec<RangePart>),
}

/// A body with its write strategy bound, ready to stream exactly once.
pub struct FinalizedBody {
    body: Option<ResponseBody>,
    strategy: CommitStrategy,
}

impl FinalizedBody {
    fn empty() -> FinalizedBody {
        FinalizedBody {
            body: None,
            strategy: CommitStrategy::Empty,
        }
    }

    /// Streams the body to the connection writer.
    ///
    /// Errors are propagated after the body's resources are released; the
    /// caller must tear the connection down on failure, because the header
    /// block has already been sent.
    pub fn commit<W: Write>(self, writer: &mut W) -> Result<(), Error> {
        let FinalizedBody { body, strategy } = self;
        let Some(body) = body else {
            return Ok(());
        };

        match strategy {
            CommitStrategy::Empty => Ok(()),
            CommitStrategy::Full => body.write(writer),
            CommitStrategy::Compressed => body.write_compressed(writer),
            CommitStrategy::SingleRange(range) => body.write_ranges_single(range, writer),
            CommitStrategy::Multipart(parts) => body.write_ranges_multipart(parts, writer),
        }
    }
}

/// Finalizes a response: negotiates the transfer strategy, rewrites the
/// outgoing headers, and returns the possibly revised status code together
/// with the body bound to its strategy.
///
/// `outheaders` is mutated in place and must not be observed concurrently.
/// The headers this pipeline owns — `Accept-Ranges`, `Content-Encoding`,
/// `Transfer-Encoding`, `ETag`, `Content-Length`, `Content-Range`, and
/// `Content-Type` for multipart responses — are stripped of any value a
/// handler may have left and rewritten here.
pub fn finalize_response(
    inheaders: &HeaderMap,
    outheaders: &mut HeaderMap,
    status: StatusCode,
    method: &Method,
    output: HandlerOutput,
    options: &FinalizeOptions,
) -> Result<(StatusCode, FinalizedBody), Error> {
    let body = coerce_body(output, outheaders)?;

    debug_assert!(
        body.content_length().is_some() || !outheaders.contains(&HeaderName::ContentLength),
        "a generator body cannot be paired with a Content-Length header"
    );

    let get_or_head = matches!(method, Method::Get | Method::Head);

    // Transfer compression: only for 200 responses over textual entities of
    // known, worthwhile size, and never on HTTP/1.0 since the compressed
    // length is unknown and must be chunked.
    let compressible_type = match outheaders
        .get(&HeaderName::ContentType)
        .and_then(HeaderValue::as_str_no_convert)
    {
        None => true,
        Some(content_type) => {
            content_type.starts_with("text/")
                || content_type.starts_with("image/svg")
                || content_type == "application/json"
        }
    };
    let accept_encoding = inheaders
        .get(&HeaderName::AcceptEncoding)
        .and_then(HeaderValue::as_str_no_convert)
        .unwrap_or("");
    let compress = status == StatusCode::Ok
        && compressible_type
        && options.compress_min_size >= 0
        && body
            .content_length()
            .map_or(false, |len| len >= options.compress_min_size as u64)
        && acceptable_encoding(accept_encoding, &["gzip"]) == Some("gzip")
        && !options.is_http1;

    // Range serving is mutually exclusive with compression: compressing
    // changes the byte offsets the client asked about.
    let range_capable = !compress
        && body.accept_ranges() == Some(true)
        && status == StatusCode::Ok
        && get_or_head
        && !options.is_http1;

    let mut ranges: Option<Vec<ByteRange>> = None;
    if range_capable {
        // Range-capable bodies always know their length.
        let total = body.content_length().unwrap_or(0);
        let mut parsed = parse_range_header(
            inheaders
                .get(&HeaderName::Range)
                .and_then(HeaderValue::as_str_no_convert),
            total,
        );

        // An If-Range mismatch serves the whole entity, even when the
        // requested ranges would have been unsatisfiable. Only the literal
        // strong-etag form is supported.
        if let Some(if_range) = inheaders
            .get(&HeaderName::IfRange)
            .and_then(HeaderValue::as_str_no_convert)
        {
            if body.etag() != Some(if_range) {
                parsed = RangeRequest::NotSpecified;
            }
        }

        match parsed {
            RangeRequest::NotSpecified => {}
            RangeRequest::Ranges(list) => ranges = Some(list),
            RangeRequest::Unsatisfiable => {
                debug!("range request unsatisfiable against {total} bytes, responding 416");
                strip_pipeline_headers(outheaders);
                outheaders.set(
                    HeaderName::ContentRange,
                    HeaderValue::ContentRange(ContentRangeHeaderValue::Unsatisfied {
                        complete_length: total,
                    }),
                );
                outheaders.set(HeaderName::ContentLength, HeaderValue::Size(0));
                return Ok((StatusCode::RangeNotSatisfiable, FinalizedBody::empty()));
            }
        }
    }

    // Conditional GET.
    if get_or_head {
        if let Some(if_none_match) = inheaders
            .get(&HeaderName::IfNoneMatch)
            .and_then(HeaderValue::as_str_no_convert)
        {
            let matched = if_none_match
                .split(',')
                .map(str::trim)
                .any(|token| token == "*" || Some(token) == body.etag());
            if matched {
                debug!("entity tag matched If-None-Match, responding 304");
                let etag = body.etag().map(str::to_owned);
                drop(body);
                strip_pipeline_headers(outheaders);
                outheaders.remove(&HeaderName::ContentType);
                if let Some(etag) = etag {
                    outheaders.set(HeaderName::ETag, HeaderValue::String(etag));
                }
                return Ok((StatusCode::NotModified, FinalizedBody::empty()));
            }
        }
    }

    strip_pipeline_headers(outheaders);

    if get_or_head {
        if let Some(etag) = body.etag() {
            outheaders.set(HeaderName::ETag, HeaderValue::String(etag.to_owned()));
        }
    }

    if range_capable {
        outheaders.set(HeaderName::AcceptRanges, "bytes".into());
    } else if compress {
        outheaders.set(HeaderName::ContentEncoding, "gzip".into());
    }

    let content_length = body.content_length();
    if let Some(len) = content_length {
        if !compress && ranges.is_none() {
            outheaders.set(HeaderName::ContentLength, HeaderValue::Size(len));
        }
    }
    if compress || content_length.is_none() {
        outheaders.set(HeaderName::TransferEncoding, "chunked".into());
    }

    let (status, strategy) = match ranges {
        Some(mut list) if list.len() == 1 => {
            let range = list.remove(0);
            let total = content_length.unwrap_or(0);
            outheaders.set(HeaderName::ContentLength, HeaderValue::Size(range.size()));
            outheaders.set(
                HeaderName::ContentRange,
                HeaderValue::ContentRange(ContentRangeHeaderValue::Range {
                    start: range.start,
                    end: range.stop,
                    complete_length: total,
                }),
            );
            debug!("serving single byte range {}-{}/{total}", range.start, range.stop);
            (StatusCode::PartialContent, CommitStrategy::SingleRange(range))
        }
        Some(list) => {
            let total = content_length.unwrap_or(0);
            // The entity's own type moves into the per-part headers; the
            // outer type becomes multipart/byteranges.
            let content_type = outheaders
                .get(&HeaderName::ContentType)
                .map(HeaderValue::to_string);
            let parts = range_parts(&list, content_type.as_deref(), total);
            outheaders.set(
                HeaderName::ContentLength,
                HeaderValue::Size(multipart_content_length(&parts)),
            );
            outheaders.set(
                HeaderName::ContentType,
                HeaderValue::String(format!(
                    "multipart/byteranges; boundary={}",
                    &*MULTIPART_BOUNDARY
                )),
            );
            debug!("serving {} byte ranges as multipart/byteranges", list.len());
            (StatusCode::PartialContent, CommitStrategy::Multipart(parts))
        }
        None if compress => (status, CommitStrategy::Compressed),
        None => (status, CommitStrategy::Full),
    };

    Ok((
        status,
        FinalizedBody {
            body: Some(body),
            strategy,
        },
    ))
}

/// Coerces raw handler output into a body object, defaulting the
/// `Content-Type` where the handler did not set one.
fn coerce_body(output: HandlerOutput, outheaders: &mut HeaderMap) -> Result<ResponseBody, Error> {
    match output {
        HandlerOutput::Body(body) => Ok(body),
        HandlerOutput::File { handle, path } => {
            // An unrecognized extension leaves the type unset rather than
            // guessing octet-stream.
            if !outheaders.contains(&HeaderName::ContentType) {
                if let Some(media_type) = media_type_for_path(&path) {
                    outheaders.set(HeaderName::ContentType, media_type.into());
                }
            }
            Ok(ResponseBody::File(FileBody::new(handle, &path)?))
        }
        HandlerOutput::Bytes(data) => {
            if !outheaders.contains(&HeaderName::ContentType) {
                outheaders.set(HeaderName::ContentType, "text/plain; charset=UTF-8".into());
            }
            Ok(ResponseBody::Buffer(BufferBody::from(data)))
        }
        HandlerOutput::Str(data) => {
            if !outheaders.contains(&HeaderName::ContentType) {
                outheaders.set(HeaderName::ContentType, "text/plain; charset=UTF-8".into());
            }
            Ok(ResponseBody::Buffer(BufferBody::from(data)))
        }
        HandlerOutput::Generator(generator) => Ok(ResponseBody::Generator(generator)),
    }
}

/// Removes every header this pipeline owns, regardless of what a handler or
/// middleware left behind.
fn strip_pipeline_headers(outheaders: &mut HeaderMap) {
    for name in [
        HeaderName::AcceptRanges,
        HeaderName::ContentEncoding,
        HeaderName::TransferEncoding,
        HeaderName::ETag,
        HeaderName::ContentLength,
        HeaderName::ContentRange,
    ] {
        outheaders.remove(&name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunked::dechunk;
    use std::io::Read as _;
    use std::io::Write as _;

    fn request(headers: &[(&str, String)]) -> HeaderMap {
        HeaderMap::new_with_vec(
            headers
                .iter()
                .map(|(name, value)| (HeaderName::from_str(name), HeaderValue::String(value.clone())))
                .collect(),
        )
    }

    fn header(headers: &HeaderMap, name: &str) -> Option<String> {
        headers.get(&HeaderName::from_str(name)).map(HeaderValue::to_string)
    }

    fn hello_file() -> (tempfile::NamedTempFile, HandlerOutput) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Hello").unwrap();
        file.flush().unwrap();
        let handle = File::open(file.path()).unwrap();
        let path = file.path().to_path_buf();
        (file, HandlerOutput::File { handle, path })
    }

    fn file_etag(file: &tempfile::NamedTempFile) -> String {
        ResponseBody::File(FileBody::open(file.path()).unwrap())
            .etag()
            .unwrap()
            .to_owned()
    }

    fn finalize(
        inheaders: &HeaderMap,
        outheaders: &mut HeaderMap,
        output: HandlerOutput,
        options: &FinalizeOptions,
    ) -> (StatusCode, Vec<u8>, bool) {
        let (status, body) =
            finalize_response(inheaders, outheaders, StatusCode::Ok, &Method::Get, output, options)
                .unwrap();
        let mut sink = Vec::new();
        body.commit(&mut sink).unwrap();

        // Pipeline-wide exclusions hold for every finalized response.
        let exclusive = !(outheaders.contains(&HeaderName::ContentEncoding)
            && outheaders.contains(&HeaderName::ContentRange))
            && !(outheaders.contains(&HeaderName::ContentLength)
                && outheaders.contains(&HeaderName::TransferEncoding));
        (status, sink, exclusive)
    }

    #[test]
    fn full_body_small_file() {
        let (_guard, output) = hello_file();
        let mut out = HeaderMap::new();
        let (status, body, exclusive) =
            finalize(&request(&[]), &mut out, output, &FinalizeOptions::default());

        assert_eq!(status, StatusCode::Ok);
        assert_eq!(header(&out, "Content-Length").as_deref(), Some("5"));
        assert_eq!(header(&out, "Accept-Ranges").as_deref(), Some("bytes"));
        assert!(header(&out, "ETag").is_some());
        assert_eq!(header(&out, "Content-Encoding"), None);
        assert_eq!(header(&out, "Transfer-Encoding"), None);
        // Extensionless file, so no type is inferred.
        assert_eq!(header(&out, "Content-Type"), None);
        assert_eq!(body, b"Hello");
        assert!(exclusive);
    }

    #[test]
    fn single_range() {
        let (_guard, output) = hello_file();
        let mut out = HeaderMap::new();
        let inheaders = request(&[("Range", "bytes=1-3".to_owned())]);
        let (status, body, exclusive) =
            finalize(&inheaders, &mut out, output, &FinalizeOptions::default());

        assert_eq!(status, StatusCode::PartialContent);
        assert_eq!(header(&out, "Content-Length").as_deref(), Some("3"));
        assert_eq!(header(&out, "Content-Range").as_deref(), Some("bytes 1-3/5"));
        assert_eq!(body, b"ell");
        assert!(exclusive);
    }

    #[test]
    fn multipart_ranges() {
        let (_guard, output) = hello_file();
        let mut out = HeaderMap::new();
        let inheaders = request(&[("Range", "bytes=0-0,4-4".to_owned())]);
        let (status, body, exclusive) =
            finalize(&inheaders, &mut out, output, &FinalizeOptions::default());

        let boundary = &*MULTIPART_BOUNDARY;
        assert_eq!(status, StatusCode::PartialContent);
        assert_eq!(
            header(&out, "Content-Type"),
            Some(format!("multipart/byteranges; boundary={boundary}"))
        );
        // The file has no extension, so the parts carry no Content-Type.
        let expected = format!(
            "--{boundary}\r\nContent-Range: bytes 0-0/5\r\n\r\nH\r\n\
             --{boundary}\r\nContent-Range: bytes 4-4/5\r\n\r\no\r\n\
             --{boundary}--"
        );
        assert_eq!(String::from_utf8(body.clone()).unwrap(), expected);
        assert_eq!(header(&out, "Content-Length"), Some(body.len().to_string()));
        assert!(exclusive);
    }

    #[test]
    fn compression() {
        let data = vec![b'a'; 10_000];
        let mut out = HeaderMap::new();
        let inheaders = request(&[("Accept-Encoding", "gzip".to_owned())]);
        let (status, body, exclusive) = finalize(
            &inheaders,
            &mut out,
            HandlerOutput::Bytes(data.clone()),
            &FinalizeOptions::default(),
        );

        assert_eq!(status, StatusCode::Ok);
        assert_eq!(header(&out, "Content-Encoding").as_deref(), Some("gzip"));
        assert_eq!(header(&out, "Transfer-Encoding").as_deref(), Some("chunked"));
        assert_eq!(header(&out, "Content-Length"), None);
        assert!(exclusive);

        let mut decoded = Vec::new();
        flate2::read::GzDecoder::new(&dechunk(&body).unwrap()[..])
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn conditional_get_not_modified() {
        let (guard, output) = hello_file();
        let etag = file_etag(&guard);
        let mut out = HeaderMap::new();
        let inheaders = request(&[("If-None-Match", etag.clone())]);
        let (status, body, _) =
            finalize(&inheaders, &mut out, output, &FinalizeOptions::default());

        assert_eq!(status, StatusCode::NotModified);
        assert_eq!(header(&out, "ETag"), Some(etag));
        assert_eq!(header(&out, "Content-Length"), None);
        assert!(body.is_empty());
    }

    #[test]
    fn conditional_get_wildcard() {
        let (_guard, output) = hello_file();
        let mut out = HeaderMap::new();
        let inheaders = request(&[("If-None-Match", "\"other\", *".to_owned())]);
        let (status, body, _) =
            finalize(&inheaders, &mut out, output, &FinalizeOptions::default());
        assert_eq!(status, StatusCode::NotModified);
        assert!(body.is_empty());
    }

    #[test]
    fn unsatisfiable_range() {
        let (_guard, output) = hello_file();
        let mut out = HeaderMap::new();
        let inheaders = request(&[("Range", "bytes=10-20".to_owned())]);
        let (status, body, _) =
            finalize(&inheaders, &mut out, output, &FinalizeOptions::default());

        assert_eq!(status, StatusCode::RangeNotSatisfiable);
        assert_eq!(header(&out, "Content-Range").as_deref(), Some("bytes */5"));
        assert_eq!(header(&out, "Content-Length").as_deref(), Some("0"));
        assert!(body.is_empty());
    }

    #[test]
    fn refused_encoding_disables_compression() {
        let data = vec![b'a'; 10_000];
        let mut out = HeaderMap::new();
        let inheaders = request(&[("Accept-Encoding", "gzip;q=0".to_owned())]);
        let (status, body, exclusive) = finalize(
            &inheaders,
            &mut out,
            HandlerOutput::Bytes(data.clone()),
            &FinalizeOptions::default(),
        );

        assert_eq!(status, StatusCode::Ok);
        assert_eq!(header(&out, "Content-Encoding"), None);
        assert_eq!(header(&out, "Content-Length").as_deref(), Some("10000"));
        assert_eq!(body, data);
        assert!(exclusive);
    }

    #[test]
    fn if_range_mismatch_serves_full_entity() {
        let (_guard, output) = hello_file();
        let mut out = HeaderMap::new();
        let inheaders = request(&[
            ("Range", "bytes=1-3".to_owned()),
            ("If-Range", "\"stale\"".to_owned()),
        ]);
        let (status, body, _) =
            finalize(&inheaders, &mut out, output, &FinalizeOptions::default());

        assert_eq!(status, StatusCode::Ok);
        assert_eq!(header(&out, "Content-Length").as_deref(), Some("5"));
        assert_eq!(header(&out, "Accept-Ranges").as_deref(), Some("bytes"));
        assert_eq!(body, b"Hello");
    }

    #[test]
    fn if_range_match_serves_range() {
        let (guard, output) = hello_file();
        let etag = file_etag(&guard);
        let mut out = HeaderMap::new();
        let inheaders = request(&[
            ("Range", "bytes=1-3".to_owned()),
            ("If-Range", etag),
        ]);
        let (status, body, _) =
            finalize(&inheaders, &mut out, output, &FinalizeOptions::default());

        assert_eq!(status, StatusCode::PartialContent);
        assert_eq!(body, b"ell");
    }

    #[test]
    fn if_range_mismatch_suppresses_416() {
        let (_guard, output) = hello_file();
        let mut out = HeaderMap::new();
        let inheaders = request(&[
            ("Range", "bytes=10-20".to_owned()),
            ("If-Range", "\"stale\"".to_owned()),
        ]);
        let (status, body, _) =
            finalize(&inheaders, &mut out, output, &FinalizeOptions::default());
        assert_eq!(status, StatusCode::Ok);
        assert_eq!(body, b"Hello");
    }

    #[test]
    fn http10_disables_ranges_and_compression() {
        let (_guard, output) = hello_file();
        let mut out = HeaderMap::new();
        let inheaders = request(&[
            ("Range", "bytes=1-3".to_owned()),
            ("Accept-Encoding", "gzip".to_owned()),
        ]);
        let options = FinalizeOptions {
            is_http1: true,
            compress_min_size: 0,
        };
        let (status, body, _) = finalize(&inheaders, &mut out, output, &options);

        assert_eq!(status, StatusCode::Ok);
        assert_eq!(header(&out, "Accept-Ranges"), None);
        assert_eq!(header(&out, "Content-Encoding"), None);
        assert_eq!(body, b"Hello");
    }

    #[test]
    fn unsafe_method_ignores_ranges_and_etag() {
        let (_guard, output) = hello_file();
        let mut out = HeaderMap::new();
        let inheaders = request(&[("Range", "bytes=1-3".to_owned())]);
        let (status, body) = finalize_response(
            &inheaders,
            &mut out,
            StatusCode::Ok,
            &Method::Post,
            output,
            &FinalizeOptions::default(),
        )
        .unwrap();

        assert_eq!(status, StatusCode::Ok);
        assert_eq!(header(&out, "Accept-Ranges"), None);
        assert_eq!(header(&out, "ETag"), None);
        let mut sink = Vec::new();
        body.commit(&mut sink).unwrap();
        assert_eq!(sink, b"Hello");
    }

    #[test]
    fn generator_body_is_chunked() {
        let chunks = vec![b"page one".to_vec(), b"page two".to_vec()];
        let generator = HandlerOutput::Generator(GeneratorBody::new(chunks.into_iter()));
        let mut out = HeaderMap::new();
        // Even an explicit gzip offer cannot compress an unknown length.
        let inheaders = request(&[("Accept-Encoding", "gzip".to_owned())]);
        let (status, body, exclusive) =
            finalize(&inheaders, &mut out, generator, &FinalizeOptions::default());

        assert_eq!(status, StatusCode::Ok);
        assert_eq!(header(&out, "Transfer-Encoding").as_deref(), Some("chunked"));
        assert_eq!(header(&out, "Content-Length"), None);
        assert_eq!(header(&out, "Content-Encoding"), None);
        assert_eq!(dechunk(&body), Some(b"page onepage two".to_vec()));
        assert!(exclusive);
    }

    #[test]
    fn stale_handler_headers_are_stripped() {
        let (_guard, output) = hello_file();
        let mut out = HeaderMap::new();
        out.set(HeaderName::ContentLength, HeaderValue::Size(999));
        out.set(HeaderName::TransferEncoding, "chunked".into());
        out.set(HeaderName::ContentEncoding, "br".into());
        out.set(HeaderName::ETag, "\"handler\"".into());
        out.set(HeaderName::ContentRange, "bytes 0-0/1".into());

        let (status, body, exclusive) =
            finalize(&request(&[]), &mut out, output, &FinalizeOptions::default());

        assert_eq!(status, StatusCode::Ok);
        assert_eq!(header(&out, "Content-Length").as_deref(), Some("5"));
        assert_eq!(header(&out, "Transfer-Encoding"), None);
        assert_eq!(header(&out, "Content-Encoding"), None);
        assert_eq!(header(&out, "Content-Range"), None);
        assert_ne!(header(&out, "ETag").as_deref(), Some("\"handler\""));
        assert_eq!(body, b"Hello");
        assert!(exclusive);
    }

    #[test]
    fn string_output_defaults_to_plain_text() {
        let mut out = HeaderMap::new();
        let (status, body, _) = finalize(
            &request(&[]),
            &mut out,
            HandlerOutput::Str("not found".to_owned()),
            &FinalizeOptions::default(),
        );

        assert_eq!(status, StatusCode::Ok);
        assert_eq!(
            header(&out, "Content-Type").as_deref(),
            Some("text/plain; charset=UTF-8")
        );
        assert_eq!(body, b"not found");
    }

    #[test]
    fn file_output_infers_media_type_from_extension() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("book.epub");
        std::fs::write(&path, b"PK\x03\x04").unwrap();
        let handle = File::open(&path).unwrap();

        let mut out = HeaderMap::new();
        let (_, _, _) = finalize(
            &request(&[]),
            &mut out,
            HandlerOutput::File { handle, path },
            &FinalizeOptions::default(),
        );
        assert_eq!(
            header(&out, "Content-Type").as_deref(),
            Some("application/epub+zip")
        );
    }

    #[test]
    fn cached_generated_body_serves_with_etag() {
        let output = HandlerOutput::Body(crate::cache::generated("finalize-test-catalog", || {
            b"<html>catalog</html>".to_vec()
        }));
        let mut out = HeaderMap::new();
        let (status, body, _) =
            finalize(&request(&[]), &mut out, output, &FinalizeOptions::default());

        assert_eq!(status, StatusCode::Ok);
        assert_eq!(body, b"<html>catalog</html>");
        let etag = header(&out, "ETag").unwrap();

        // A revalidation with that tag is a 304.
        let output = HandlerOutput::Body(crate::cache::generated("finalize-test-catalog", || {
            unreachable!("the cache must not regenerate")
        }));
        let mut out = HeaderMap::new();
        let inheaders = request(&[("If-None-Match", etag)]);
        let (status, body, _) =
            finalize(&inheaders, &mut out, output, &FinalizeOptions::default());
        assert_eq!(status, StatusCode::NotModified);
        assert!(body.is_empty());
    }
}
