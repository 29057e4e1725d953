//! Client configuration.

/// Where the serverless endpoints live and how long to wait for them.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the deployment (e.g., "https://invoice-ai.example.app").
    /// Paths `/api/parse-invoice` and `/api/create-payment` hang off it.
    pub base_url: String,

    /// Request timeout in seconds. The extraction endpoint proxies a
    /// language-model call, so this needs headroom.
    pub timeout_secs: u64,
}

/// Extraction calls wait on a language model; 30s matches the serverless
/// function ceiling.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl ClientConfig {
    /// Creates a configuration with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
