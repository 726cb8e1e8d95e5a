//! Connection settings for the cloud client.

use std::time::Duration;

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Well-known account server used for login and device directory calls.
pub const DEFAULT_CLOUD_URL: &str = "https://wap.tplinkcloud.com";

/// Where directory calls go and how long any single call may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudConfig {
    /// Fixed account-server endpoint
    pub endpoint: String,
    /// Per-request timeout applied by the HTTP client
    pub timeout: Duration,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CLOUD_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CloudConfig {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
