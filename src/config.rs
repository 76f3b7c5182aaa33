//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides the submission endpoint
pub const ENDPOINT_ENV: &str = "ONBOARD_ENDPOINT";

/// Delay used by the simulated endpoint when none is configured
const DEFAULT_SIMULATED_DELAY_MS: u64 = 1500;

/// Request timeout for the HTTP endpoint
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OnboardConfig {
    /// Submission endpoint URL; the simulated endpoint is used when unset
    pub endpoint_url: Option<String>,
    /// Delay of the simulated endpoint in milliseconds
    pub simulated_delay_ms: Option<u64>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Flat JSON file of message overrides
    pub messages_path: Option<PathBuf>,
    /// Session store location
    pub store_path: Option<PathBuf>,
}

impl OnboardConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "onboard", "onboard-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                config = serde_json::from_str(&content)?;
            }
        }

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.endpoint_url = Some(endpoint);
            }
        }

        Ok(config)
    }

    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(
            self.simulated_delay_ms
                .unwrap_or(DEFAULT_SIMULATED_DELAY_MS),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OnboardConfig::default();
        assert!(config.endpoint_url.is_none());
        assert!(config.simulated_delay_ms.is_none());
        assert!(config.messages_path.is_none());
        assert!(config.store_path.is_none());
        assert_eq!(config.simulated_delay(), Duration::from_millis(1500));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_serialization() {
        let config = OnboardConfig {
            endpoint_url: Some("https://kyc.example.com/applications".to_string()),
            simulated_delay_ms: Some(10),
            request_timeout_secs: Some(5),
            messages_path: Some(PathBuf::from("/tmp/messages.json")),
            store_path: None,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: OnboardConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.endpoint_url,
            Some("https://kyc.example.com/applications".to_string())
        );
        assert_eq!(parsed.simulated_delay(), Duration::from_millis(10));
        assert_eq!(parsed.request_timeout(), Duration::from_secs(5));
        assert_eq!(parsed.messages_path, Some(PathBuf::from("/tmp/messages.json")));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: OnboardConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.endpoint_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"endpoint_url": "http://localhost:8080", "unknown_field": "value"}"#;
        let parsed: OnboardConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.endpoint_url, Some("http://localhost:8080".to_string()));
    }

    #[test]
    fn test_load_returns_ok_without_file() {
        let result = OnboardConfig::load();
        assert!(result.is_ok());
    }
}
