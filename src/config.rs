//! Configuration handling for the TUI

use crate::api::DEFAULT_API_URL;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the matching service URL
pub const API_URL_ENV: &str = "SECTION_SWAP_API_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Matching service base URL
    pub api_url: Option<String>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("ph", "section-swap", "section-swap")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Where the log file goes
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("section-swap.log"))
    }

    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Base URL to use: environment, then config file, then the default
    pub fn resolve_api_url(&self) -> String {
        let from_env = std::env::var(API_URL_ENV).ok();
        self.resolve_api_url_with(from_env.as_deref())
    }

    fn resolve_api_url_with(&self, from_env: Option<&str>) -> String {
        from_env
            .or(self.api_url.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.api_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"api_url": "http://localhost:3000/api", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_url.as_deref(), Some("http://localhost:3000/api"));
    }

    #[test]
    fn test_resolve_defaults_to_deployment() {
        let config = TuiConfig::default();
        assert_eq!(config.resolve_api_url_with(None), DEFAULT_API_URL);
    }

    #[test]
    fn test_resolve_prefers_env_over_file() {
        let config = TuiConfig {
            api_url: Some("http://file.test/api".to_string()),
        };
        assert_eq!(
            config.resolve_api_url_with(Some("http://env.test/api/")),
            "http://env.test/api"
        );
        assert_eq!(config.resolve_api_url_with(None), "http://file.test/api");
    }

    #[test]
    fn test_resolve_ignores_blank_values() {
        let config = TuiConfig {
            api_url: Some("   ".to_string()),
        };
        assert_eq!(config.resolve_api_url_with(Some("")), DEFAULT_API_URL);
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let path = std::env::temp_dir().join("section-swap-missing-config.json");
        let config = TuiConfig::load_from(&path).unwrap();
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "section-swap-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"api_url": "http://localhost:3000/api"}"#).unwrap();
        let config = TuiConfig::load_from(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.api_url.as_deref(), Some("http://localhost:3000/api"));
    }

    #[test]
    fn test_load_from_invalid_file_is_error() {
        let path = std::env::temp_dir().join(format!(
            "section-swap-bad-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, "not json").unwrap();
        let result = TuiConfig::load_from(&path);
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_paths_return_option() {
        let _config = TuiConfig::config_path();
        let _log = TuiConfig::log_path();
    }
}
