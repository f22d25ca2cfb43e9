//! Gzip encoding and Accept-Encoding negotiation

use bytes::Bytes;
use std::io::Write;

/// Gzip encoder for response bodies
#[derive(Debug)]
pub struct Compressor;

impl Compressor {
    /// Gzip-encode `data` at the given level (clamped to 9).
    pub fn gzip(data: &[u8], level: u32) -> Result<Bytes, std::io::Error> {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut encoder = GzEncoder::new(
            Vec::with_capacity(data.len() / 2),
            Compression::new(level.min(9)),
        );
        encoder.write_all(data)?;
        let compressed = encoder.finish()?;
        Ok(Bytes::from(compressed))
    }

    /// Check whether an `Accept-Encoding` header value names gzip.
    ///
    /// Parses comma-separated codings (e.g. `"gzip, deflate, br"`);
    /// a `q=0` parameter opts the coding out.
    pub fn accepts_gzip(accept_encoding: Option<&str>) -> bool {
        let Some(accept) = accept_encoding else {
            return false;
        };

        accept.split(',').any(|part| {
            let mut params = part.trim().split(';');
            let coding = params.next().unwrap_or("").trim();
            if !coding.eq_ignore_ascii_case("gzip") {
                return false;
            }
            !params.any(|p| p.trim().eq_ignore_ascii_case("q=0"))
        })
    }
}
