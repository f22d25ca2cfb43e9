//! Configuration types

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use tempo_compression::CompressionConfig;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Response compression configuration
    #[serde(default)]
    pub compression: CompressionConfig,

    /// Server-sent-events configuration
    #[serde(default)]
    pub sse: SseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            compression: CompressionConfig::default(),
            sse: SseConfig::default(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Host advertised in the generated API documentation
    #[serde(default = "default_public_host")]
    pub public_host: String,

    /// TLS is terminated by an external proxy; this flag only selects
    /// the scheme advertised in the API documentation.
    #[serde(default)]
    pub tls_enabled: bool,

    /// Graceful shutdown timeout (wait for in-flight requests)
    #[serde(default = "default_shutdown_timeout", with = "humantime_serde")]
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            public_host: default_public_host(),
            tls_enabled: false,
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl ServerConfig {
    /// Base URL advertised in the generated API documentation.
    pub fn public_url(&self) -> String {
        let scheme = if self.tls_enabled { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.public_host, self.listen.port())
    }
}

/// Server-sent-events configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SseConfig {
    /// Deadline for a stream to reach a terminal state before the
    /// transport closes it
    #[serde(default = "default_sse_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for SseConfig {
    fn default() -> Self {
        Self {
            timeout: default_sse_timeout(),
        }
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_public_host() -> String {
    "localhost".to_string()
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_sse_timeout() -> Duration {
    Duration::from_secs(10)
}
