//! Client configuration.
//!
//! Loaded from `flockloop.yaml` and then overridden from the environment:
//!
//! ```yaml
//! api_url: https://api.flockloop.example
//! request_timeout_secs: 30
//! refresh_timeout_secs: 10
//! session_file: /home/dj/.local/share/flockloop/session.json
//! storage:
//!   internal_origin: http://minio:9000
//!   public_origin: https://media.flockloop.example
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use flockloop_domain::StorageUrlRewriter;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "flockloop.yaml";

/// Overrides `api_url`.
pub const API_URL_ENV: &str = "FLOCKLOOP_API_URL";

/// Overrides `session_file`.
pub const SESSION_FILE_ENV: &str = "FLOCKLOOP_SESSION_FILE";

/// Backend used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const APP_DIR: &str = "flockloop";
const SESSION_FILE_NAME: &str = "session.json";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for this schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// `api_url` is not a usable URL.
    #[error("invalid api_url '{url}': {reason}")]
    InvalidApiUrl {
        /// Offending value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No session file was configured and no data directory exists.
    #[error("no session file configured and no data directory found")]
    NoSessionPath,
}

/// Settings of the API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend.
    pub api_url: String,
    /// Object-storage origin rewrite.
    pub storage: StorageUrlRewriter,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Upper bound for a token refresh. Unset waits indefinitely.
    pub refresh_timeout_secs: Option<u64>,
    /// Where the session is persisted. Defaults to the platform data dir.
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            storage: StorageUrlRewriter::default(),
            request_timeout_secs: 30,
            refresh_timeout_secs: None,
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from `path`, or from the default location when
    /// `path` is `None`, then applies environment overrides.
    ///
    /// An explicit path must exist; a missing default file yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.exists()),
        };

        let config = match file {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration");
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                Self::from_yaml(&text)?
            }
            None => Self::default(),
        };

        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Parses configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not match the schema.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Applies `FLOCKLOOP_*` overrides read through `lookup`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(path) = lookup(SESSION_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            self.session_file = Some(PathBuf::from(path));
        }
        self
    }

    /// `<config dir>/flockloop/flockloop.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
    }

    /// Parsed `api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error unless `api_url` is an absolute http(s) URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            reason,
        };
        let url = Url::parse(&self.api_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }

    /// Configured session file, or `<data dir>/flockloop/session.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither is available.
    pub fn session_path(&self) -> Result<PathBuf, ConfigError> {
        self.session_file
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR).join(SESSION_FILE_NAME)))
            .ok_or(ConfigError::NoSessionPath)
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Refresh timeout, if bounded.
    #[must_use]
    pub fn refresh_timeout(&self) -> Option<Duration> {
        self.refresh_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_yaml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url().unwrap().as_str(), "http://localhost:8000/");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.refresh_timeout(), None);
        assert_eq!(
            config.storage.rewrite("http://minio:9000/a.jpg"),
            "http://localhost:9000/a.jpg"
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ClientConfig::from_yaml(
            "api_url: https://api.example.com\nrefresh_timeout_secs: 5\nstorage:\n  public_origin: https://cdn.example.com\n",
        )
        .unwrap();

        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.refresh_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.storage.internal_origin, "http://minio:9000");
        assert_eq!(config.storage.public_origin, "https://cdn.example.com");
    }

    #[test]
    fn test_unknown_types_are_rejected() {
        let err = ClientConfig::from_yaml("request_timeout_secs: soon").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::default().with_env_overrides(|key| match key {
            API_URL_ENV => Some("https://staging.example.com".to_string()),
            SESSION_FILE_ENV => Some("/tmp/flockloop-session.json".to_string()),
            _ => None,
        });

        assert_eq!(config.api_url, "https://staging.example.com");
        assert_eq!(
            config.session_path().unwrap(),
            PathBuf::from("/tmp/flockloop-session.json")
        );
    }

    #[test]
    fn test_blank_env_value_is_ignored() {
        let config = ClientConfig::default().with_env_overrides(|_| Some("  ".to_string()));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.session_file, None);
    }

    #[test]
    fn test_invalid_api_url() {
        let config = ClientConfig {
            api_url: "ftp://files.example.com".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.base_url(),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = ClientConfig::load(Some(&dir.path().join("absent.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "request_timeout_secs: 5\n").unwrap();

        let config = ClientConfig::load(Some(&path)).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }
}
