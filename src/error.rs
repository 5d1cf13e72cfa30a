// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

use std::fmt;
use std::io;

/// An error produced by the response pipeline.
///
/// Parse problems in request headers never surface here: a malformed `Range`
/// or `Accept-Encoding` header is treated as absent, per
/// [RFC 9110 Section 14.2](https://www.rfc-editor.org/rfc/rfc9110.html#section-14.2).
/// The conditional-request outcomes (304, 416) are plain status codes, not
/// errors. What remains is I/O during `commit`, which the caller must
/// translate into a connection teardown because the header block has already
/// been sent by then.
#[derive(Debug)]
pub enum Error {
    /// An I/O failure while streaming the body, either reading the source
    /// file or writing to the connection.
    Io(io::Error),

    /// A write strategy was invoked on a body variant that does not support
    /// it, e.g. a range write on a generator body. The finalizer never binds
    /// such a combination, so observing this means a caller bypassed it.
    WriteNotSupported(&'static str),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(error) => write!(f, "I/O error: {error}"),
            Error::WriteNotSupported(what) => {
                write!(f, "write strategy not supported by this body: {what}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            Error::WriteNotSupported(..) => None,
        }
    }
}
