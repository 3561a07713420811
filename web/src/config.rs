use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://kadunamarkets.kdsg.gov.ng/hall";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

const BASE_URL_VAR: &str = "HALL_API_BASE_URL";
const TIMEOUT_VAR: &str = "HALL_API_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("HALL_API_BASE_URL must be an http(s) URL, got {0:?}")]
    InvalidBaseUrl(String),
    #[error("HALL_API_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

/// Where the upstream hall booking API lives and how long we wait on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Reads `HALL_API_BASE_URL` and `HALL_API_TIMEOUT_SECS`, falling back to the defaults
    /// when either is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = match std::env::var(BASE_URL_VAR) {
            Ok(raw) => parse_base_url(&raw)?,
            Err(_) => DEFAULT_BASE_URL.to_string(),
        };

        let timeout = match std::env::var(TIMEOUT_VAR) {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self { base_url, timeout })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl(raw.to_string()))
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidTimeout(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(BASE_URL_VAR);
        std::env::remove_var(TIMEOUT_VAR);
    }

    #[test]
    #[serial]
    fn defaults_when_unset() {
        clear_env();

        let config = ApiConfig::from_env().unwrap();

        assert_eq!(config, ApiConfig::default());
        assert_eq!(
            config.endpoint("get_hall.php"),
            "https://kadunamarkets.kdsg.gov.ng/hall/get_hall.php"
        );
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear_env();
        std::env::set_var(BASE_URL_VAR, "http://localhost:8080/api/");
        std::env::set_var(TIMEOUT_VAR, "3");

        let config = ApiConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(
            config.endpoint("/check_coupon.php"),
            "http://localhost:8080/api/check_coupon.php"
        );
    }

    #[test]
    #[serial]
    fn rejects_bad_values() {
        clear_env();
        std::env::set_var(BASE_URL_VAR, "kadunamarkets.kdsg.gov.ng");
        assert_eq!(
            ApiConfig::from_env(),
            Err(ConfigError::InvalidBaseUrl("kadunamarkets.kdsg.gov.ng".to_string()))
        );

        clear_env();
        std::env::set_var(TIMEOUT_VAR, "0");
        assert_eq!(
            ApiConfig::from_env(),
            Err(ConfigError::InvalidTimeout("0".to_string()))
        );
        clear_env();
    }
}
