//! # Configuration
//!
//! JSON configuration file. Every field has a default, so `{}` is a valid
//! configuration and a missing file means "all defaults".

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::LoggingConfig;
use crate::query::DEFAULT_LIMIT;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudifyConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// JSON file with documents to load at startup
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

impl StudifyConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: StudifyConfig = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".to_string()));
        }

        if self.query.max_limit < DEFAULT_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "query.max_limit must be at least the default page size ({})",
                DEFAULT_LIMIT
            )));
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(), // Next.js dev server
        "https://studify.in".to_string(),
    ]
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// List-query limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Largest page size a client may request (default: 100)
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
}

fn default_max_limit() -> u64 {
    100
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_limit: default_max_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = StudifyConfig::default();
        assert_eq!(config.server.socket_addr(), "0.0.0.0:5000");
        assert_eq!(config.query.max_limit, 100);
        assert!(config.seed_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_is_all_defaults() {
        let file = write_config("{}");
        assert_eq!(StudifyConfig::load(file.path()).unwrap(), StudifyConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let file = write_config(r#"{"server": {"port": 8080}, "seed_path": "seed.json"}"#);
        let config = StudifyConfig::load(file.path()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.seed_path, Some(PathBuf::from("seed.json")));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = write_config(r#"{"query": {"max_limit": 5}}"#);
        assert!(matches!(
            StudifyConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));

        let file = write_config(r#"{"server": {"port": 0}}"#);
        assert!(matches!(
            StudifyConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let file = write_config("{not json");
        assert!(matches!(
            StudifyConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config =
            StudifyConfig::load_or_default(Path::new("/nonexistent/studify.json")).unwrap();
        assert_eq!(config, StudifyConfig::default());
    }
}
