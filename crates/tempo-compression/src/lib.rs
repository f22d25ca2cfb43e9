//! Response compression for the Tempo demo service
//!
//! Applies gzip to response bodies when, and only when, all of the
//! following hold:
//! - the response is not a streaming media type (`text/event-stream`
//!   is never compressed, regardless of size or client capability)
//! - the client listed gzip in `Accept-Encoding`
//! - the body meets the configured minimum size
//! - the content type is text-based (JSON, XML, plain text, ...)
//!
//! When a body is compressed, `Content-Encoding: gzip` is set,
//! `Vary: accept-encoding` is appended, and `Content-Length` is
//! dropped in favor of chunked framing. Uncompressed bodies always
//! carry an accurate `Content-Length` and no encoding marker.

pub mod compressor;
pub mod config;
pub mod middleware;

pub use compressor::Compressor;
pub use config::CompressionConfig;
pub use middleware::compress_response;
