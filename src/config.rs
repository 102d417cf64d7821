//! Configuration types.

use std::time::Duration;

/// Remote deal API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the CRM API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Build from environment variables.
    ///
    /// Returns `None` when `DEAL_API_BASE_URL` is unset — the remote
    /// variant is optional; local analysis needs no configuration.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("DEAL_API_BASE_URL").ok()?;

        let timeout_secs: u64 = std::env::var("DEAL_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_trims_trailing_slash_and_defaults_timeout() {
        // SAFETY: no other test in this crate reads DEAL_API_BASE_URL concurrently.
        unsafe { std::env::set_var("DEAL_API_BASE_URL", "https://crm.example.com/api/") };
        let config = ApiConfig::from_env().expect("config");
        assert_eq!(config.base_url, "https://crm.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
        unsafe { std::env::remove_var("DEAL_API_BASE_URL") };
        assert!(ApiConfig::from_env().is_none());
    }
}
