//! Backend endpoint configuration
//!
//! A single base-URL value resolved once at startup; everything else about
//! the HTTP stack stays at its defaults.

use std::env;

/// Default backend endpoint for local development
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable that overrides the backend endpoint
pub const BASE_URL_ENV: &str = "MEETING_API_URL";

/// Connection settings for the dashboard backend
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Resolve the backend endpoint from the environment, falling back to
    /// the local development default when unset or blank.
    pub fn from_env() -> Self {
        match env::var(BASE_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::with_base_url(value),
            _ => Self::default(),
        }
    }

    /// Config for an explicit endpoint. Trailing slashes are trimmed so
    /// path joining stays predictable.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(ApiConfig::default().base_url, "http://localhost:8080");
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ApiConfig::with_base_url("http://backend:9000///");
        assert_eq!(config.base_url, "http://backend:9000");
    }

    #[test]
    fn from_env_reads_override() {
        env::set_var(BASE_URL_ENV, "http://staging:8080/");
        let config = ApiConfig::from_env();
        env::remove_var(BASE_URL_ENV);
        assert_eq!(config.base_url, "http://staging:8080");
    }
}
