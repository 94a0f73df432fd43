//! Configuration for the Openwhyd adapter.
//!
//! All components receive an immutable [`ApiConfig`] at construction time;
//! nothing reads process-wide mutable state after startup. The configuration
//! can be built from environment variables for applications that prefer
//! `OPENWHYD_*` variables over hardcoded values.

use std::{env, time::Duration};

/// Default upstream base URL.
pub const DEFAULT_API_URL: &str = "https://openwhyd.org";

/// Immutable configuration shared by the request builder and the query facade.
///
/// The upstream expects browser-like requests; the header-related fields here
/// feed the fixed header set attached to every outgoing call.
///
/// # Example
///
/// ```
/// use openwhyd_client::config::ApiConfig;
///
/// let config = ApiConfig::default();
/// assert_eq!(config.api_url, "https://openwhyd.org");
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the upstream platform, without a trailing slash.
    pub api_url: String,
    /// Value sent in the `User-Agent` header.
    pub user_agent: String,
    /// Request timeout applied to the underlying HTTP client.
    /// `None` leaves the transport without a deadline.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: format!("openwhyd-client/{}", env!("CARGO_PKG_VERSION")),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ApiConfig {
    /// Builds a configuration from `OPENWHYD_API_URL`, `OPENWHYD_USER_AGENT`
    /// and `OPENWHYD_TIMEOUT_SECS`, falling back to the defaults for any
    /// variable that is unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = env::var("OPENWHYD_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);
        let user_agent = env::var("OPENWHYD_USER_AGENT").unwrap_or(defaults.user_agent);
        let timeout = env::var("OPENWHYD_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.parse::<u64>().ok())
            .map(Duration::from_secs)
            .or(defaults.timeout);

        Self {
            api_url,
            user_agent,
            timeout,
        }
    }

    /// Builds a configuration pointing at a custom base URL, keeping the
    /// remaining defaults. Used by tests to target a local mock server.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}
