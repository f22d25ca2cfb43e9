//! Configuration for the Tempo demo service
//!
//! Configuration is loaded once at startup (YAML, TOML, or JSON,
//! selected by file extension), validated, and then treated as
//! read-only for the life of the process.

pub mod loader;
pub mod types;
pub mod validator;

pub use loader::{load_config, load_from_file, load_from_str, ConfigFormat};
pub use types::{Config, ServerConfig, SseConfig};
pub use validator::validate_config;
