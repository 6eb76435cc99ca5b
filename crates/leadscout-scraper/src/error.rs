use chromiumoxide::error::CdpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to launch browser: {reason}")]
    Launch { reason: String },

    #[error("navigation to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("navigation to {url} failed: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: CdpError,
    },

    #[error("results selector {selector:?} did not appear within {timeout_secs}s")]
    SelectorNotFound { selector: String, timeout_secs: u64 },

    #[error("browser session error: {0}")]
    Browser(#[from] CdpError),
}
