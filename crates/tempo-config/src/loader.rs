//! Configuration loading

use crate::Config;
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;
use tempo_core::{Error, Result};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML (`.yaml` / `.yml`)
    Yaml,
    /// TOML (`.toml`)
    Toml,
    /// JSON (`.json`)
    Json,
}

impl ConfigFormat {
    /// Derive the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            other => Err(Error::Config(format!(
                "Unsupported config extension: {other:?}"
            ))),
        }
    }
}

/// Load configuration from a file
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

    let format = ConfigFormat::from_path(path)?;

    load_from_str(&content, format)
}

/// Expand environment variables in a configuration string
/// Supports syntax: ${VAR} and ${VAR:-default}
fn expand_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}")
        .map_err(|e| Error::Config(format!("Invalid regex: {e}")))?;

    let mut result = String::new();
    let mut last_match = 0;

    for cap in re.captures_iter(content) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let var_name = cap.get(1).map(|m| m.as_str()).unwrap_or("");
        let default_value = cap.get(3).map(|m| m.as_str());

        let value = match env::var(var_name) {
            Ok(val) => val,
            Err(_) => match default_value {
                Some(default) => default.to_string(),
                None => {
                    return Err(Error::Config(format!(
                        "Environment variable '{var_name}' not set and no default provided"
                    )));
                }
            },
        };

        result.push_str(&content[last_match..full_match.start()]);
        result.push_str(&value);
        last_match = full_match.end();
    }

    result.push_str(&content[last_match..]);

    Ok(result)
}

/// Load configuration from a string
pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<Config> {
    // Expand environment variables first
    let expanded = expand_env_vars(content)?;

    let config = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse YAML: {e}")))?,
        ConfigFormat::Toml => toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {e}")))?,
        ConfigFormat::Json => serde_json::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse JSON: {e}")))?,
    };

    Ok(config)
}

/// Load and validate a configuration file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = load_from_file(path)?;

    crate::validator::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const YAML_CONFIG: &str = r#"
server:
  listen: "127.0.0.1:9090"
  public_host: "demo.local"
  tls_enabled: true
  shutdown_timeout: "15s"

compression:
  enabled: true
  level: 4
  min_size: 512

sse:
  timeout: "5s"
"#;

    #[test]
    fn test_load_yaml() {
        let config = load_from_str(YAML_CONFIG, ConfigFormat::Yaml).unwrap();

        assert_eq!(config.server.listen.port(), 9090);
        assert_eq!(config.server.public_host, "demo.local");
        assert!(config.server.tls_enabled);
        assert_eq!(config.server.shutdown_timeout, Duration::from_secs(15));
        assert_eq!(config.compression.level, 4);
        assert_eq!(config.compression.min_size, 512);
        assert_eq!(config.sse.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_sections_default_when_absent() {
        let minimal = r#"
server:
  listen: "127.0.0.1:8080"
"#;
        let config = load_from_str(minimal, ConfigFormat::Yaml).unwrap();
        assert!(config.compression.enabled);
        assert_eq!(config.compression.min_size, 1024);
        assert_eq!(config.sse.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_yaml() {
        let invalid = "invalid: [yaml";
        let result = load_from_str(invalid, ConfigFormat::Yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yaml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(ConfigFormat::from_path(Path::new("config.ini")).is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        env::set_var("TEMPO_TEST_PORT", "7070");

        let config_with_vars = r#"
server:
  listen: "127.0.0.1:${TEMPO_TEST_PORT}"
"#;

        let config = load_from_str(config_with_vars, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.server.listen.port(), 7070);

        env::remove_var("TEMPO_TEST_PORT");
    }

    #[test]
    fn test_env_var_with_default() {
        env::remove_var("TEMPO_UNDEFINED_VAR");

        let config_with_default = r#"
server:
  listen: "${TEMPO_UNDEFINED_VAR:-127.0.0.1:8080}"
"#;

        let config = load_from_str(config_with_default, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.server.listen.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_missing_env_var_no_default() {
        env::remove_var("TEMPO_MISSING_VAR");

        let config_no_default = r#"
server:
  listen: "${TEMPO_MISSING_VAR}"
"#;

        let result = load_from_str(config_no_default, ConfigFormat::Yaml);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("TEMPO_MISSING_VAR"));
    }
}
