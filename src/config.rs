// Scan configuration for devflow-check
// Defaults mirror the known Salesforce first-party connected apps

use std::time::Duration;

/// Client IDs of first-party connected apps known to accept device flow requests.
pub const DEFAULT_CLIENT_IDS: &[&str] = &[
    "PlatformCLI",
    "SfdcInsights",
    "SfdcWaveWeb",
    "SfdcMobileChatteriOS",
    "DataLoaderBulkUI/",
    "DataLoaderPartnerUI/",
];

/// Relative path of the token endpoint on the target instance.
pub const TOKEN_PATH: &str = "/services/oauth2/token";

/// Scope requested alongside the device code.
pub const DEFAULT_SCOPE: &str = "refresh_token api";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Everything the scanner needs besides the target itself.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Candidates to test, in order.
    pub client_ids: Vec<String>,
    pub scope: String,
    pub user_agent: String,
    /// Upper bound on a single request, connect included.
    pub timeout: Duration,
    /// Pause between two consecutive candidates.
    pub delay: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            client_ids: DEFAULT_CLIENT_IDS.iter().map(|s| s.to_string()).collect(),
            scope: DEFAULT_SCOPE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            delay: DEFAULT_DELAY,
        }
    }
}

impl ScanConfig {
    /// Replace the candidate list. An empty list keeps the defaults.
    pub fn with_client_ids(mut self, client_ids: Vec<String>) -> Self {
        if !client_ids.is_empty() {
            self.client_ids = client_ids;
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}
