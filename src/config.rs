//! Application configuration, persisted as TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use voxcart_search::{ProviderConfig, ProviderKind, SearchConfig};

use crate::error::{AppError, Result};
use crate::history::DEFAULT_MAX_ENTRIES;

/// Environment variable holding the shared RapidAPI credential.
pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchSection,
    pub providers: ProvidersSection,
    pub history: HistorySection,
}

/// `[search]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Upper bound on each provider call.
    pub timeout_seconds: u64,
    /// Live response cache lifetime. 0 disables caching.
    pub cache_ttl_seconds: u64,
    pub user_agent: Option<String>,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            timeout_seconds: 8,
            cache_ttl_seconds: 3600,
            user_agent: None,
        }
    }
}

/// `[providers.<name>]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    pub enabled: bool,
    /// Takes precedence over [`API_KEY_ENV`].
    pub api_key: Option<String>,
    /// Endpoint origin override, e.g. a local mock server.
    pub base_url: Option<String>,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            base_url: None,
        }
    }
}

/// `[providers]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersSection {
    pub google_shopping: ProviderSection,
    pub amazon: ProviderSection,
    pub walmart: ProviderSection,
}

impl ProvidersSection {
    pub fn get(&self, kind: ProviderKind) -> &ProviderSection {
        match kind {
            ProviderKind::GoogleShopping => &self.google_shopping,
            ProviderKind::Amazon => &self.amazon,
            ProviderKind::Walmart => &self.walmart,
        }
    }

    pub fn get_mut(&mut self, kind: ProviderKind) -> &mut ProviderSection {
        match kind {
            ProviderKind::GoogleShopping => &mut self.google_shopping,
            ProviderKind::Amazon => &mut self.amazon,
            ProviderKind::Walmart => &mut self.walmart,
        }
    }
}

/// `[history]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySection {
    pub max_entries: usize,
}

impl Default for HistorySection {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load `path` if it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/voxcart/config.toml`.
    pub fn default_config_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Returns the default history file path, next to the config file.
    pub fn default_history_path() -> PathBuf {
        config_dir().join("history.json")
    }

    /// Library search configuration, with credentials taken from the config
    /// file or else from [`API_KEY_ENV`].
    pub fn search_config(&self) -> SearchConfig {
        let env_key = std::env::var(API_KEY_ENV).ok();
        self.search_config_with_env_key(env_key.as_deref())
    }

    /// Like [`search_config`](Self::search_config) with the environment
    /// credential passed in.
    pub fn search_config_with_env_key(&self, env_key: Option<&str>) -> SearchConfig {
        let env_key = env_key.map(str::trim).filter(|k| !k.is_empty());

        let providers = ProviderKind::all()
            .iter()
            .filter_map(|&kind| {
                let section = self.providers.get(kind);
                if !section.enabled {
                    return None;
                }
                let mut provider = ProviderConfig::new(kind);
                let key = section
                    .api_key
                    .as_deref()
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .or(env_key);
                if let Some(key) = key {
                    provider = provider.with_api_key(key);
                }
                if let Some(ref url) = section.base_url {
                    provider = provider.with_base_url(url.clone());
                }
                Some(provider)
            })
            .collect();

        SearchConfig {
            providers,
            timeout_seconds: self.search.timeout_seconds,
            cache_ttl_seconds: self.search.cache_ttl_seconds,
            user_agent: self.search.user_agent.clone(),
        }
    }
}

fn config_dir() -> PathBuf {
    if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(config).join("voxcart")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config").join("voxcart")
    } else {
        PathBuf::from("/tmp/voxcart-config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.search.timeout_seconds, 8);
        assert_eq!(config.search.cache_ttl_seconds, 3600);
        assert_eq!(config.history.max_entries, 5);
        assert!(config.providers.google_shopping.enabled);
        assert!(config.providers.amazon.enabled);
        assert!(config.providers.walmart.enabled);
    }

    #[test]
    fn default_config_path_ends_with_config_toml() {
        let path = AppConfig::default_config_path();
        assert!(path.ends_with("voxcart/config.toml"));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = AppConfig::default();
        config.search.timeout_seconds = 3;
        config.providers.amazon.enabled = false;
        config.providers.walmart.api_key = Some("wm-key".into());
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let toml_str = r#"
            [search]
            timeout_seconds = 2

            [providers.walmart]
            enabled = false
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.timeout_seconds, 2);
        assert_eq!(config.search.cache_ttl_seconds, 3600);
        assert!(!config.providers.walmart.enabled);
        assert!(config.providers.amazon.enabled);
        assert_eq!(config.history.max_entries, 5);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search\ntimeout_seconds = ").unwrap();
        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn search_config_keeps_registration_order_and_skips_disabled() {
        let mut config = AppConfig::default();
        config.providers.amazon.enabled = false;
        let search = config.search_config_with_env_key(None);
        let kinds: Vec<_> = search.providers.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, [ProviderKind::GoogleShopping, ProviderKind::Walmart]);
    }

    #[test]
    fn file_key_takes_precedence_over_env_key() {
        let mut config = AppConfig::default();
        config.providers.google_shopping.api_key = Some("file-key".into());
        let search = config.search_config_with_env_key(Some("env-key"));

        assert_eq!(search.providers[0].credential(), Some("file-key"));
        assert_eq!(search.providers[1].credential(), Some("env-key"));
        assert_eq!(search.providers[2].credential(), Some("env-key"));
    }

    #[test]
    fn blank_keys_mean_no_credential() {
        let mut config = AppConfig::default();
        config.providers.amazon.api_key = Some("   ".into());
        let search = config.search_config_with_env_key(Some(""));
        assert!(search.providers.iter().all(|p| p.credential().is_none()));
    }

    #[test]
    fn search_section_and_base_url_carry_over() {
        let mut config = AppConfig::default();
        config.search.timeout_seconds = 4;
        config.search.cache_ttl_seconds = 0;
        config.providers.walmart.base_url = Some("http://127.0.0.1:9000".into());

        let search = config.search_config_with_env_key(None);
        assert_eq!(search.timeout_seconds, 4);
        assert_eq!(search.cache_ttl_seconds, 0);
        assert_eq!(
            search.providers[2].base_url.as_deref(),
            Some("http://127.0.0.1:9000")
        );
        assert!(search.validate().is_ok());
    }
}
