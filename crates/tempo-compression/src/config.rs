//! Configuration and eligibility rules for response compression

use serde::{Deserialize, Serialize};

/// Compression configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompressionConfig {
    /// Enable compression
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Gzip compression level (1-9)
    #[serde(default = "default_level")]
    pub level: u32,

    /// Minimum response size to compress (in bytes)
    #[serde(default = "default_min_size")]
    pub min_size: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: 6,
            min_size: 1024, // 1KB
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_level() -> u32 {
    6
}

fn default_min_size() -> usize {
    1024
}

impl CompressionConfig {
    /// Decide whether a response body should be gzip-encoded.
    ///
    /// The decision is a pure function of its inputs. Precedence:
    /// streaming media types are excluded first (compressing them
    /// requires buffering the whole body, which breaks incremental
    /// delivery for consumers that parse events as they arrive), then
    /// client capability, then the size threshold, then the content
    /// type allowlist. Unknown content types fall through to "do not
    /// compress".
    pub fn should_compress(
        &self,
        body_len: usize,
        content_type: &str,
        client_accepts_gzip: bool,
    ) -> bool {
        if !self.enabled || Self::is_streaming_media_type(content_type) {
            return false;
        }
        if !client_accepts_gzip {
            return false;
        }
        if body_len < self.min_size {
            return false;
        }
        Self::is_compressible_content_type(content_type)
    }

    /// Check if a content type is delivered incrementally and must
    /// never be buffered for whole-body compression
    pub fn is_streaming_media_type(content_type: &str) -> bool {
        content_type
            .trim()
            .to_lowercase()
            .starts_with("text/event-stream")
    }

    /// Check if a content type benefits from compression
    pub fn is_compressible_content_type(content_type: &str) -> bool {
        if Self::is_streaming_media_type(content_type) {
            return false;
        }

        let ct = content_type.to_lowercase();

        // Text-based content types that benefit from compression
        ct.starts_with("text/")
            || ct.contains("json")
            || ct.contains("xml")
            || ct.contains("javascript")
            || ct == "image/svg+xml"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompressionConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, 6);
        assert_eq!(config.min_size, 1024);
    }

    #[test]
    fn test_small_bodies_never_compressed() {
        let config = CompressionConfig::default();
        for len in [0, 1, 15, 512, 1023] {
            assert!(!config.should_compress(len, "application/json", true));
            assert!(!config.should_compress(len, "text/plain", true));
            assert!(!config.should_compress(len, "application/json", false));
        }
    }

    #[test]
    fn test_event_stream_never_compressed() {
        let config = CompressionConfig::default();
        // Above threshold and gzip accepted: the streaming exclusion
        // still wins.
        assert!(!config.should_compress(2000, "text/event-stream", true));
        assert!(!config.should_compress(1_000_000, "text/event-stream", true));
        assert!(!config.should_compress(2000, "text/event-stream; charset=utf-8", true));
        assert!(!config.should_compress(2000, "TEXT/EVENT-STREAM", true));
        assert!(!config.should_compress(2000, "text/event-stream", false));
    }

    #[test]
    fn test_no_gzip_acceptance_never_compressed() {
        let config = CompressionConfig::default();
        assert!(!config.should_compress(2000, "application/json", false));
        assert!(!config.should_compress(1_000_000, "text/html", false));
    }

    #[test]
    fn test_large_text_bodies_compressed() {
        let config = CompressionConfig::default();
        assert!(config.should_compress(1024, "application/json", true));
        assert!(config.should_compress(2000, "application/json", true));
        assert!(config.should_compress(2000, "application/vnd.tempo+json", true));
        assert!(config.should_compress(2000, "text/html", true));
    }

    #[test]
    fn test_unknown_content_types_not_compressed() {
        let config = CompressionConfig::default();
        assert!(!config.should_compress(2000, "image/png", true));
        assert!(!config.should_compress(2000, "application/octet-stream", true));
        assert!(!config.should_compress(2000, "", true));
    }

    #[test]
    fn test_disabled_config_never_compresses() {
        let config = CompressionConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(!config.should_compress(2000, "application/json", true));
    }

    #[test]
    fn test_compressible_content_types() {
        assert!(CompressionConfig::is_compressible_content_type("text/html"));
        assert!(CompressionConfig::is_compressible_content_type(
            "application/json"
        ));
        assert!(CompressionConfig::is_compressible_content_type(
            "application/vnd.tempo+json"
        ));
        assert!(CompressionConfig::is_compressible_content_type(
            "image/svg+xml"
        ));

        assert!(!CompressionConfig::is_compressible_content_type(
            "text/event-stream"
        ));
        assert!(!CompressionConfig::is_compressible_content_type(
            "image/png"
        ));
        assert!(!CompressionConfig::is_compressible_content_type(
            "video/mp4"
        ));
    }
}
