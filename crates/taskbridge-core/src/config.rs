//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/taskbridge/config.toml)
//! 3. Environment variables (TASKBRIDGE_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Collection, TagMapping};
use crate::remote::DEFAULT_BASE_URL;

/// Environment variable prefix
const ENV_PREFIX: &str = "TASKBRIDGE";

/// Configuration that is not ready for a sync
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Configure API token in settings")]
    MissingToken,

    #[error("Configure tag mappings in settings")]
    NoMappings,
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Bearer token for the remote service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Remote API base URL (defaults to Todoist REST v2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Write logs here instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Ordered tag -> collection rules; first match wins
    #[serde(default)]
    pub tag_mappings: Vec<TagMapping>,

    /// Last fetched collection list
    #[serde(default)]
    pub cached_collections: Vec<Collection>,
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (TASKBRIDGE_API_TOKEN, TASKBRIDGE_BASE_URL)
    /// 2. Config file (~/.config/taskbridge/config.toml or TASKBRIDGE_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load from `--config` when given, else the default location
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // TASKBRIDGE_API_TOKEN
        if let Ok(val) = std::env::var(format!("{}_API_TOKEN", ENV_PREFIX)) {
            self.api_token = if val.is_empty() { None } else { Some(val) };
        }

        // TASKBRIDGE_BASE_URL
        if let Ok(val) = std::env::var(format!("{}_BASE_URL", ENV_PREFIX)) {
            self.base_url = if val.is_empty() { None } else { Some(val) };
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with TASKBRIDGE_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskbridge")
            .join("config.toml")
    }

    /// Base URL to talk to
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Token with all but the last four characters hidden
    pub fn masked_token(&self) -> Option<String> {
        self.api_token.as_ref().map(|token| {
            let chars: Vec<char> = token.chars().collect();
            let visible = chars.len().min(4);
            let tail: String = chars[chars.len() - visible..].iter().collect();
            format!("{}{}", "*".repeat(chars.len() - visible), tail)
        })
    }

    /// Check the settings a sync needs, token first
    pub fn validate_for_sync(&self) -> Result<(), ConfigError> {
        if self.api_token.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingToken);
        }
        if self.tag_mappings.is_empty() {
            return Err(ConfigError::NoMappings);
        }
        Ok(())
    }

    /// Add a mapping, or retarget an existing one in place
    ///
    /// Returns true if a mapping for the tag already existed.
    pub fn add_mapping(&mut self, mapping: TagMapping) -> bool {
        match self.tag_mappings.iter_mut().find(|m| m.tag == mapping.tag) {
            Some(existing) => {
                *existing = mapping;
                true
            }
            None => {
                self.tag_mappings.push(mapping);
                false
            }
        }
    }

    /// Remove the mapping for a tag; returns false if there was none
    pub fn remove_mapping(&mut self, tag: &str) -> bool {
        let before = self.tag_mappings.len();
        self.tag_mappings.retain(|m| m.tag != tag);
        self.tag_mappings.len() != before
    }

    /// Name of a collection from the cached list
    pub fn collection_name(&self, collection_id: &str) -> Option<&str> {
        self.cached_collections
            .iter()
            .find(|c| c.id == collection_id)
            .map(|c| c.name.as_str())
    }
}

/// Ensure a tag starts with `#`
pub fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim();
    if tag.starts_with('#') {
        tag.to_string()
    } else {
        format!("#{}", tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "TASKBRIDGE_API_TOKEN",
        "TASKBRIDGE_BASE_URL",
        "TASKBRIDGE_CONFIG",
    ];

    fn configured() -> Config {
        Config {
            api_token: Some("secret-token-1234".to_string()),
            tag_mappings: vec![TagMapping::new("#work", "proj-work", "Work")],
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_token.is_none());
        assert!(config.tag_mappings.is_empty());
        assert_eq!(config.effective_base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_default_config_path() {
        let _guard = EnvGuard::new(ENV_VARS);
        assert!(Config::config_file_path().ends_with("taskbridge/config.toml"));

        env::set_var("TASKBRIDGE_CONFIG", "/tmp/custom.toml");
        assert_eq!(Config::config_file_path(), PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn test_env_override_token() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("TASKBRIDGE_API_TOKEN", "from-env");
        config.apply_env_overrides();
        assert_eq!(config.api_token.as_deref(), Some("from-env"));

        // Empty string clears it
        env::set_var("TASKBRIDGE_API_TOKEN", "");
        config.apply_env_overrides();
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_env_override_base_url() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("TASKBRIDGE_BASE_URL", "http://localhost:9000");
        config.apply_env_overrides();
        assert_eq!(config.effective_base_url(), "http://localhost:9000");

        env::set_var("TASKBRIDGE_BASE_URL", "");
        config.apply_env_overrides();
        assert_eq!(config.effective_base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r##"
            api_token = "abc"

            [[tag_mappings]]
            tag = "#work"
            collection_id = "proj-work"
            name = "Work"

            [[tag_mappings]]
            tag = "#home"
            collection_id = "proj-home"
        "##;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.api_token.as_deref(), Some("abc"));
        assert_eq!(config.tag_mappings.len(), 2);
        assert_eq!(config.tag_mappings[0].tag, "#work");
        assert_eq!(config.tag_mappings[1].name, "");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let _guard = EnvGuard::new(ENV_VARS);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = configured();
        config.log_file = Some(PathBuf::from("/tmp/taskbridge.log"));
        config.cached_collections = vec![Collection {
            id: "proj-work".to_string(),
            name: "Work".to_string(),
        }];
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_with_cli_override() {
        let _guard = EnvGuard::new(ENV_VARS);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        configured().save_to_path(&path).unwrap();

        let config = Config::load_with_cli_override(Some(&path)).unwrap();
        assert_eq!(config.tag_mappings.len(), 1);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_path_invalid_toml() {
        let _guard = EnvGuard::new(ENV_VARS);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tag_mappings = 3").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_validate_for_sync_order() {
        assert_eq!(
            Config::default().validate_for_sync(),
            Err(ConfigError::MissingToken)
        );

        let no_mappings = Config {
            api_token: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(no_mappings.validate_for_sync(), Err(ConfigError::NoMappings));
        assert_eq!(
            ConfigError::NoMappings.to_string(),
            "Configure tag mappings in settings"
        );

        assert_eq!(configured().validate_for_sync(), Ok(()));
    }

    #[test]
    fn test_empty_token_is_missing() {
        let config = Config {
            api_token: Some(String::new()),
            ..configured()
        };
        assert_eq!(config.validate_for_sync(), Err(ConfigError::MissingToken));
    }

    #[test]
    fn test_add_mapping_replaces_in_place() {
        let mut config = configured();
        assert!(!config.add_mapping(TagMapping::new("#home", "proj-home", "Home")));
        assert!(config.add_mapping(TagMapping::new("#work", "proj-office", "Office")));

        let tags: Vec<(&str, &str)> = config
            .tag_mappings
            .iter()
            .map(|m| (m.tag.as_str(), m.collection_id.as_str()))
            .collect();
        assert_eq!(tags, vec![("#work", "proj-office"), ("#home", "proj-home")]);
    }

    #[test]
    fn test_remove_mapping() {
        let mut config = configured();
        assert!(!config.remove_mapping("#home"));
        assert!(config.remove_mapping("#work"));
        assert!(config.tag_mappings.is_empty());
    }

    #[test]
    fn test_masked_token() {
        assert_eq!(configured().masked_token().as_deref(), Some("*************1234"));

        let short = Config {
            api_token: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(short.masked_token().as_deref(), Some("abc"));
        assert_eq!(Config::default().masked_token(), None);
    }

    #[test]
    fn test_collection_name_from_cache() {
        let config = Config {
            cached_collections: vec![Collection {
                id: "p1".to_string(),
                name: "Inbox".to_string(),
            }],
            ..Default::default()
        };
        assert_eq!(config.collection_name("p1"), Some("Inbox"));
        assert_eq!(config.collection_name("p2"), None);
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("work"), "#work");
        assert_eq!(normalize_tag("#work"), "#work");
        assert_eq!(normalize_tag(" home "), "#home");
    }
}
