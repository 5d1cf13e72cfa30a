// Copyright (C) 2026 Folioserve Contributors.
// All Rights Reserved.

//! This crate contains the response pipeline of a content server: typed
//! headers, byte-range and content-coding negotiation, the response body
//! variants, and the finalizer that binds a body to its transfer strategy
//! before streaming it to the connection.

pub mod body;
pub mod cache;
pub mod chunked;
pub mod coding;
pub mod error;
pub mod finalize;
pub mod gzip;
pub mod header_map;
pub mod header_name;
pub mod header_value;
pub mod media_type;
pub mod method;
pub mod multipart;
pub mod range;
pub mod status;

pub use body::*;
pub use chunked::*;
pub use coding::*;
pub use error::*;
pub use finalize::*;
pub use gzip::*;
pub use header_map::*;
pub use header_name::*;
pub use header_value::*;
pub use media_type::*;
pub use method::*;
pub use multipart::*;
pub use range::*;
pub use status::*;
