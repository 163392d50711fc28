//! Client configuration.
//!
//! The auth token is the only required setting. `from_env` reads the same
//! variables the mock server binary uses, so a local setup only needs
//! `VERO_BASE_URL` pointed at the mock.

use std::fmt;
use std::time::Duration;

use crate::client::DEFAULT_BASE_URL;
use crate::error::ApiError;

pub const AUTH_TOKEN_ENV: &str = "VERO_AUTH_TOKEN";
pub const BASE_URL_ENV: &str = "VERO_BASE_URL";
pub const TIMEOUT_ENV: &str = "VERO_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub auth_token: String,
    pub base_url: String,
    /// Whole-request timeout for the default transport. `None` keeps the
    /// transport's own default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(auth_token: &str) -> Self {
        Self {
            auth_token: auth_token.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let auth_token = lookup(AUTH_TOKEN_ENV)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ApiError::Config(format!("{AUTH_TOKEN_ENV} is not set")))?;

        let mut config = Self::new(&auth_token);
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ApiError::Config(format!("{TIMEOUT_ENV} must be a positive integer, got {raw:?}")))?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("auth_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
