//! Application Configuration
//!
//! Defaults, then an optional JSON file, then environment variables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/wanted";
pub const DEFAULT_FBI_API: &str = "https://api.fbi.gov/wanted/v1/list";
pub const DEFAULT_PAGE_COUNT: u32 = 4;
pub const DEFAULT_PAGE_DELAY_MS: u64 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },
    #[error("invalid config file {path}: {message}")]
    Format { path: String, message: String },
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Whether a page's create requests run one after another or together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopulateMode {
    Sequential,
    #[default]
    Concurrent,
}

impl std::str::FromStr for PopulateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(PopulateMode::Sequential),
            "concurrent" => Ok(PopulateMode::Concurrent),
            other => Err(format!("unknown populate mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Local store collection endpoint
    pub api_url: Url,
    /// External source list endpoint
    pub fbi_api: Url,
    pub page_count: u32,
    pub page_delay_ms: u64,
    pub page_retries: u32,
    pub populate_mode: PopulateMode,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API_URL is valid"),
            fbi_api: Url::parse(DEFAULT_FBI_API).expect("default FBI_API is valid"),
            page_count: DEFAULT_PAGE_COUNT,
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            page_retries: 0,
            populate_mode: PopulateMode::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then `file` if given, then environment
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Format {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply overrides from a variable lookup
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("API_URL") {
            self.api_url = parse_url("API_URL", &v)?;
        }
        if let Some(v) = get("FBI_API") {
            self.fbi_api = parse_url("FBI_API", &v)?;
        }
        if let Some(v) = get("SYNC_PAGES") {
            self.page_count = parse_number("SYNC_PAGES", &v)?;
        }
        if let Some(v) = get("SYNC_PAGE_DELAY_MS") {
            self.page_delay_ms = parse_number("SYNC_PAGE_DELAY_MS", &v)?;
        }
        if let Some(v) = get("SYNC_PAGE_RETRIES") {
            self.page_retries = parse_number("SYNC_PAGE_RETRIES", &v)?;
        }
        if let Some(v) = get("SYNC_POPULATE_MODE") {
            self.populate_mode = v
                .parse()
                .map_err(|message| ConfigError::Invalid { key: "SYNC_POPULATE_MODE", message })?;
        }
        if let Some(v) = get("REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_number("REQUEST_TIMEOUT_SECS", &v)?;
        }

        Ok(self)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|e| ConfigError::Invalid {
        key,
        message: e.to_string(),
    })
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.fbi_api.as_str(), DEFAULT_FBI_API);
        assert_eq!(config.page_count, 4);
        assert_eq!(config.page_delay(), Duration::from_millis(1000));
        assert_eq!(config.page_retries, 0);
        assert_eq!(config.populate_mode, PopulateMode::Concurrent);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .with_env(lookup(&[
                ("API_URL", "http://store:4000/people"),
                ("FBI_API", "http://mirror/list"),
                ("SYNC_PAGES", "2"),
                ("SYNC_PAGE_DELAY_MS", "0"),
                ("SYNC_POPULATE_MODE", "sequential"),
            ]))
            .unwrap();

        assert_eq!(config.api_url.as_str(), "http://store:4000/people");
        assert_eq!(config.fbi_api.as_str(), "http://mirror/list");
        assert_eq!(config.page_count, 2);
        assert_eq!(config.page_delay_ms, 0);
        assert_eq!(config.populate_mode, PopulateMode::Sequential);
    }

    #[test]
    fn test_blank_env_value_keeps_default() {
        let config = AppConfig::default()
            .with_env(lookup(&[("API_URL", "  ")]))
            .unwrap();
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_env_values() {
        let err = AppConfig::default()
            .with_env(lookup(&[("API_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "API_URL", .. }));

        let err = AppConfig::default()
            .with_env(lookup(&[("SYNC_PAGES", "four")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SYNC_PAGES", .. }));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wanted_config.json");
        std::fs::write(&path, r#"{"page_count": 1, "populate_mode": "sequential"}"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.page_count, 1);
        assert_eq!(config.populate_mode, PopulateMode::Sequential);
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file(Path::new("/nonexistent/wanted_config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    #[serial]
    fn test_load_reads_process_env() {
        std::env::set_var("SYNC_PAGE_RETRIES", "3");
        let config = AppConfig::load(None);
        std::env::remove_var("SYNC_PAGE_RETRIES");

        assert_eq!(config.unwrap().page_retries, 3);
    }
}
