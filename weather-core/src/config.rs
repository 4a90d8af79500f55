use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::provider::ProviderId;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://weather.db";

/// Configuration for a single provider (API key and optional endpoint override).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,

    /// Overrides the provider's public endpoint, e.g. for a gateway or a mock server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level service configuration.
///
/// Built once at startup from defaults, an optional TOML file and the
/// environment, then passed by reference to whatever needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Optional default provider id, e.g. "openweather" or "weatherapi".
    #[serde(default)]
    pub default_provider: Option<String>,

    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: default_database_url(),
            default_provider: None,
            providers: HashMap::new(),
        }
    }
}

impl Config {
    /// The configured default provider, or OpenWeather when none is set.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        match self.default_provider.as_deref() {
            Some(s) => ProviderId::try_from(s),
            None => Ok(ProviderId::OpenWeather),
        }
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Store default provider as string.
    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Load config from the platform config file, or defaults if it doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit TOML file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay values looked up through `lookup`.
    ///
    /// Recognised keys: `PORT`, `DATABASE_URL`, `WEATHER_PROVIDER`,
    /// `WEATHER_API_KEY` and `WEATHER_BASE_URL`. The last two apply to the
    /// default provider after `WEATHER_PROVIDER` has been taken into account.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got '{port}'"))?;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }

        if let Some(provider) = lookup("WEATHER_PROVIDER") {
            let id = ProviderId::try_from(provider.as_str())?;
            self.set_default_provider(id);
        }

        let id = self.default_provider_id()?;

        if let Some(api_key) = lookup("WEATHER_API_KEY") {
            self.upsert_provider_api_key(id, api_key);
        }

        if let Some(base_url) = lookup("WEATHER_BASE_URL") {
            self.providers
                .entry(id.as_str().to_string())
                .or_default()
                .base_url = Some(base_url);
        }

        Ok(())
    }

    /// Set/replace a provider API key, keeping any endpoint override.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers
            .entry(provider_id.as_str().to_string())
            .or_default()
            .api_key = api_key;
    }

    /// Returns API key for a provider, if present and non-empty.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.provider_config(provider_id)
            .map(|cfg| cfg.api_key.as_str())
            .filter(|key| !key.is_empty())
    }

    pub fn provider_base_url(&self, provider_id: ProviderId) -> Option<&str> {
        self.provider_config(provider_id)
            .and_then(|cfg| cfg.base_url.as_deref())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderId;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_port_3000_and_local_sqlite() {
        let cfg = Config::default();

        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.database_url, "sqlite://weather.db");
        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::OpenWeather);
        assert!(!cfg.is_provider_configured(ProviderId::OpenWeather));
    }

    #[test]
    fn parses_toml_with_missing_fields() {
        let cfg: Config = toml::from_str(
            r#"
            default_provider = "weatherapi"

            [providers.weatherapi]
            api_key = "WA_KEY"
            base_url = "http://localhost:9999"
            "#,
        )
        .expect("config must parse");

        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::WeatherApi);
        assert_eq!(cfg.provider_api_key(ProviderId::WeatherApi), Some("WA_KEY"));
        assert_eq!(
            cfg.provider_base_url(ProviderId::WeatherApi),
            Some("http://localhost:9999")
        );
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "port = 8081\n[providers.openweather]\napi_key = \"K\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.provider_api_key(ProviderId::OpenWeather), Some("K"));
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn env_overrides_port_database_and_key() {
        let mut cfg = Config::default();
        cfg.apply_env_with(env(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("WEATHER_API_KEY", "OPEN_KEY"),
        ]))
        .unwrap();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.provider_api_key(ProviderId::OpenWeather), Some("OPEN_KEY"));
    }

    #[test]
    fn env_key_follows_selected_provider() {
        let mut cfg = Config::default();
        cfg.apply_env_with(env(&[
            ("WEATHER_PROVIDER", "weatherapi"),
            ("WEATHER_API_KEY", "WA_KEY"),
            ("WEATHER_BASE_URL", "http://127.0.0.1:1"),
        ]))
        .unwrap();

        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::WeatherApi);
        assert_eq!(cfg.provider_api_key(ProviderId::WeatherApi), Some("WA_KEY"));
        assert_eq!(
            cfg.provider_base_url(ProviderId::WeatherApi),
            Some("http://127.0.0.1:1")
        );
        assert!(!cfg.is_provider_configured(ProviderId::OpenWeather));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut cfg = Config::default();
        let err = cfg.apply_env_with(env(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT must be a valid port number"));
    }

    #[test]
    fn unknown_provider_in_env_is_rejected() {
        let mut cfg = Config::default();
        let err = cfg
            .apply_env_with(env(&[("WEATHER_PROVIDER", "darksky")]))
            .unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn upsert_keeps_base_url() {
        let mut cfg = Config::default();
        cfg.providers.insert(
            "openweather".into(),
            ProviderConfig {
                api_key: String::new(),
                base_url: Some("http://gateway".into()),
            },
        );

        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OPEN_KEY".into());

        assert_eq!(cfg.provider_api_key(ProviderId::OpenWeather), Some("OPEN_KEY"));
        assert_eq!(cfg.provider_base_url(ProviderId::OpenWeather), Some("http://gateway"));
    }

    #[test]
    fn empty_api_key_counts_as_unconfigured() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, String::new());
        assert!(!cfg.is_provider_configured(ProviderId::OpenWeather));
    }
}
