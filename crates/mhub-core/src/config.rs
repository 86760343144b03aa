//! Configuration management.
//!
//! Loads configuration from ${MHUB_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::SessionFilter;

fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for mhub configuration and data directories.
    //!
    //! MHUB_HOME resolution order:
    //! 1. MHUB_HOME environment variable (if set)
    //! 2. ~/.config/mhub (default)

    use std::path::PathBuf;

    /// Returns the mhub home directory.
    ///
    /// Checks MHUB_HOME env var first, falls back to ~/.config/mhub
    pub fn mhub_home() -> PathBuf {
        if let Ok(home) = std::env::var("MHUB_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("mhub"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        mhub_home().join("config.toml")
    }

    /// Returns the directory TUI log files are written to.
    pub fn logs_dir() -> PathBuf {
        mhub_home().join("logs")
    }
}

/// API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the MentorHub API.
    pub base_url: String,

    /// Bearer token for authenticated requests. The MHUB_TOKEN environment
    /// variable takes precedence when set.
    pub token: Option<String>,

    /// Request timeout in seconds (0 disables)
    pub timeout_secs: u64,
}

impl ApiConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: crate::api::DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Web front-end settings (browser navigation targets).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Base URL of the MentorHub web app.
    pub base_url: String,
}

impl WebConfig {
    const DEFAULT_BASE_URL: &str = "https://mentorhub.app";
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// TUI behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UiConfig {
    /// Filter the session list opens with.
    pub default_filter: SessionFilter,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// API connection settings.
    pub api: ApiConfig,

    /// Web front-end settings.
    pub web: WebConfig,

    /// TUI behavior settings.
    pub ui: UiConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// The bearer token to authenticate with, if any.
    ///
    /// MHUB_TOKEN wins over the config file; empty values count as unset.
    pub fn auth_token(&self) -> Option<String> {
        if let Ok(token) = std::env::var("MHUB_TOKEN")
            && !token.is_empty()
        {
            return Some(token);
        }
        self.api.token.clone().filter(|token| !token.is_empty())
    }

    /// Request timeout, or None when disabled (timeout_secs = 0).
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.api.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.api.timeout_secs))
        }
    }

    /// Resolves a path against the web front-end base URL.
    pub fn web_url(&self, path: &str) -> Result<Url> {
        let mut base = self.web.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base)
            .and_then(|b| b.join(path.trim_start_matches('/')))
            .with_context(|| format!("Invalid web.base_url: {}", self.web.base_url))
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// This is used by `xtask update-default-config` to keep
    /// `default_config.toml` in sync with Rust default values.
    ///
    /// Uses the embedded template for structure/comments and merges
    /// generated values from `Config::default()` into it.
    pub fn generate() -> Result<String> {
        use toml_edit::{DocumentMut, Item};

        let config = Config::default();
        let generated_toml =
            toml::to_string(&config).context("Failed to serialize default config to TOML")?;

        // Parse template as base (preserves comments)
        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;

        // Parse generated values
        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        // Merge generated values into template (overwrites values, keeps comments)
        fn merge(target: &mut toml_edit::Table, source: &toml_edit::Table) {
            for (key, value) in source.iter() {
                match value {
                    Item::Value(v) => {
                        target[key] = Item::Value(v.clone());
                    }
                    Item::Table(src_table) => {
                        if let Some(Item::Table(target_table)) = target.get_mut(key) {
                            merge(target_table, src_table);
                        } else {
                            target[key] = Item::Table(src_table.clone());
                        }
                    }
                    Item::ArrayOfTables(arr) => {
                        target[key] = Item::ArrayOfTables(arr.clone());
                    }
                    Item::None => {}
                }
            }
        }

        merge(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, crate::api::DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, ApiConfig::DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.ui.default_filter, SessionFilter::All);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api]\nbase_url = \"http://localhost:5000\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        // Untouched sections keep their defaults
        assert_eq!(config.api.timeout_secs, ApiConfig::DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.web.base_url, WebConfig::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_parses_default_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\ndefault_filter = \"completed\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ui.default_filter, SessionFilter::Completed);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::init(&path).unwrap();
        assert!(path.exists());

        // The template must parse back into the default config.
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, crate::api::DEFAULT_BASE_URL);
        assert_eq!(config.ui.default_filter, SessionFilter::All);
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let err = Config::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_generate_round_trips_defaults() {
        let generated = Config::generate().unwrap();
        let config: Config = toml::from_str(&generated).unwrap();
        assert_eq!(config.api.base_url, crate::api::DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, ApiConfig::DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.web.base_url, WebConfig::DEFAULT_BASE_URL);
        // Comments from the template survive the merge
        assert!(generated.contains('#'));
    }

    #[test]
    fn test_request_timeout_zero_disables() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.request_timeout().is_none());

        config.api.timeout_secs = 15;
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_web_url_joins_paths() {
        let config = Config::default();
        let url = config.web_url("/search").unwrap();
        assert_eq!(url.as_str(), "https://mentorhub.app/search");

        let mut nested = Config::default();
        nested.web.base_url = "https://host.example/app".to_string();
        let url = nested.web_url("sessions/abc123").unwrap();
        assert_eq!(url.as_str(), "https://host.example/app/sessions/abc123");
    }

    #[test]
    fn test_web_url_rejects_invalid_base() {
        let mut config = Config::default();
        config.web.base_url = "not a url".to_string();
        assert!(config.web_url("/search").is_err());
    }
}
