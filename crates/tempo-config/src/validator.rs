//! Configuration validation

use crate::Config;
use tempo_core::{Error, Result};

/// Validate a loaded configuration before the server starts
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.public_host.is_empty() {
        return Err(Error::Config(
            "server.public_host must not be empty".to_string(),
        ));
    }

    if config.compression.level == 0 || config.compression.level > 9 {
        return Err(Error::Config(format!(
            "compression.level must be between 1 and 9, got {}",
            config.compression.level
        )));
    }

    if config.compression.min_size == 0 {
        return Err(Error::Config(
            "compression.min_size must be greater than zero".to_string(),
        ));
    }

    if config.sse.timeout.is_zero() {
        return Err(Error::Config(
            "sse.timeout must be greater than zero".to_string(),
        ));
    }

    Ok(())
}
