//! Client configuration system.
//!
//! Configuration can be loaded from:
//! - TOML files (default: ~/.config/fablab/client.toml)
//! - Environment variables (FABLAB_* prefixed)
//!
//! # Example
//!
//! ```rust,no_run
//! use fablab_client::config::ClientConfig;
//!
//! // Load from the default path or fall back to env vars
//! let config = ClientConfig::load().expect("Failed to load config");
//!
//! // Or explicitly from a file
//! let config = ClientConfig::from_file(std::path::Path::new("client.toml")).expect("Failed to load");
//!
//! // Or from environment variables
//! let config = ClientConfig::from_env();
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use fablab_core::LanguageTag;

/// Default backend endpoint.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Default request timeout (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the FabLab REST backend.
    pub base_url: String,
    /// Bearer token for authenticated (dashboard) endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "ClientConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Display language for summaries, chat, and lexicon resolution.
    #[serde(default)]
    pub language: LanguageTag,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            language: LanguageTag::default(),
        }
    }
}

impl ClientConfig {
    fn default_timeout_secs() -> u64 {
        DEFAULT_TIMEOUT_SECS
    }

    /// Get the default config file path.
    ///
    /// Returns: ~/.config/fablab/client.toml
    pub fn default_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push("fablab");
        path.push("client.toml");
        path
    }

    /// Load configuration from the default path, falling back to environment
    /// variables if the file does not exist.
    pub fn load() -> ConfigResult<Self> {
        let path = Self::default_config_path();

        if path.exists() {
            info!("Loading client config from: {}", path.display());
            Self::from_file(&path)
        } else {
            debug!(
                "Config file not found at {}, using environment variables",
                path.display()
            );
            Ok(Self::from_env())
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let content = Self::substitute_env_vars(&content);

        #[derive(Deserialize)]
        struct TomlRoot {
            client: ClientConfig,
        }

        let root: TomlRoot = toml::from_str(&content)?;
        root.client.validate()?;
        Ok(root.client)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let base_url = env::var("FABLAB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = env::var("FABLAB_API_KEY").ok().filter(|k| !k.is_empty());
        let timeout_secs = env::var("FABLAB_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let language = env::var("FABLAB_LANGUAGE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self {
            base_url,
            api_key,
            timeout_secs,
            language,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Substitute environment variables in the format ${VAR_NAME}.
    fn substitute_env_vars(content: &str) -> String {
        let re = regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.language.as_str(), "en");
        assert!(config.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
            [client]
            base_url = "https://lab.example.com"
            api_key = "sk-test"
            timeout_secs = 10
            language = "pt-BR"
        "#;

        #[derive(Deserialize)]
        struct TomlRoot {
            client: ClientConfig,
        }
        let root: TomlRoot = toml::from_str(toml_str).unwrap();
        assert_eq!(root.client.base_url, "https://lab.example.com");
        assert_eq!(root.client.api_key.as_deref(), Some("sk-test"));
        assert_eq!(root.client.timeout_secs, 10);
        assert_eq!(root.client.language.as_str(), "pt-BR");
    }

    #[test]
    fn test_toml_defaults_applied() {
        let toml_str = r#"
            [client]
            base_url = "http://localhost:9000"
        "#;

        #[derive(Deserialize)]
        struct TomlRoot {
            client: ClientConfig,
        }
        let root: TomlRoot = toml::from_str(toml_str).unwrap();
        assert_eq!(root.client.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(root.client.language.as_str(), "en");
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let config = ClientConfig {
            base_url: "ftp://lab.example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution_with_value() {
        let content = "api_key = \"${TEST_FABLAB_SUBST_VAR}\"";

        env::set_var("TEST_FABLAB_SUBST_VAR", "test-value");
        let result = ClientConfig::substitute_env_vars(content);
        env::remove_var("TEST_FABLAB_SUBST_VAR");

        assert_eq!(result, "api_key = \"test-value\"");
    }

    #[test]
    fn test_env_var_substitution_missing() {
        let content = "api_key = \"${NONEXISTENT_FABLAB_VAR_12345}\"";
        let result = ClientConfig::substitute_env_vars(content);
        assert_eq!(result, "api_key = \"${NONEXISTENT_FABLAB_VAR_12345}\"");
    }

    #[test]
    fn test_from_file_with_substitution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(
            &path,
            "[client]\nbase_url = \"https://lab.example.com\"\napi_key = \"${TEST_FABLAB_FILE_KEY}\"\n",
        )
        .unwrap();

        env::set_var("TEST_FABLAB_FILE_KEY", "sk-from-env");
        let config = ClientConfig::from_file(&path).unwrap();
        env::remove_var("TEST_FABLAB_FILE_KEY");

        assert_eq!(config.base_url, "https://lab.example.com");
        assert_eq!(config.api_key.as_deref(), Some("sk-from-env"));
    }

    #[test]
    fn test_from_file_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "[client]\nbase_url = \"\"\n").unwrap();

        assert!(matches!(
            ClientConfig::from_file(&path),
            Err(ConfigError::Validation(_))
        ));
    }
}
