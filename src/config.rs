//! Configuration for the E-utilities client

use std::time::Duration;

use crate::rate_limit::RateLimiter;

/// Default E-utilities base URL
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default pause between consecutive requests
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(200);

const DEFAULT_TOOL: &str = "pubmed-report";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration options for [`PubMedClient`](crate::PubMedClient)
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pubmed_report::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_email("researcher@university.edu")
///     .with_request_interval(Duration::from_millis(350));
///
/// assert_eq!(config.request_interval, Duration::from_millis(350));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Override for the E-utilities base URL (mock servers, mirrors)
    pub base_url: Option<String>,
    /// Contact email sent with every request
    pub email: Option<String>,
    /// Tool name sent with every request
    pub tool: Option<String>,
    /// Custom User-Agent header
    pub user_agent: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Minimum interval between two dispatched requests
    pub request_interval: Duration,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: None,
            email: None,
            tool: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            request_interval: DEFAULT_REQUEST_INTERVAL,
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pause enforced between consecutive requests
    ///
    /// `Duration::ZERO` disables pacing, which is what the mocked tests use.
    pub fn with_request_interval(mut self, interval: Duration) -> Self {
        self.request_interval = interval;
        self
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("pubmed-report/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Query parameters NCBI asks every client to identify itself with
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
        params.push(("tool".to_string(), self.effective_tool().to_string()));

        params
    }

    pub fn create_rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.request_interval)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
