use crate::config::HttpConfig;
use crate::error::{Result, StandupError};
use std::time::Duration;

const USER_AGENT: &str = concat!("standup/", env!("CARGO_PKG_VERSION"));

/// Longest response-body prefix ever written to the log.
pub const DIAGNOSTIC_LEN: usize = 100;

/// Shared outbound client. Redirects are followed; the Apps Script endpoint
/// answers every call with a 302 to the real response.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()
        .map_err(StandupError::HttpClient)
}

/// First [`DIAGNOSTIC_LEN`] characters of a response body.
pub fn diagnostic(body: &str) -> &str {
    match body.char_indices().nth(DIAGNOSTIC_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
