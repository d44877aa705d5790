//! Console configuration resolved from build-time environment variables.
//!
//! The bundle is static, so values are captured with `option_env!` when the
//! crate is compiled. Parsing goes through a lookup function so the rules can
//! be exercised without touching the process environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_POLL_SECS: u64 = 30;

/// localStorage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// localStorage key holding the denormalized user profile JSON.
pub const PROFILE_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// REST base URL without a trailing slash.
    pub api_url: String,
    /// WebSocket URL of the push channel (socket.io endpoint).
    pub socket_url: String,
    /// Interval of the background refresh on polling pages.
    pub poll_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Build config from variables captured at compile time.
    ///
    /// Optional:
    /// - `JUNGLE_API_URL`: REST base URL (default `http://localhost:3000`)
    /// - `JUNGLE_SOCKET_URL`: push channel URL (derived from the API URL)
    /// - `JUNGLE_POLL_SECS`: poll interval in seconds (default 30)
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            "JUNGLE_API_URL" => option_env!("JUNGLE_API_URL").map(str::to_owned),
            "JUNGLE_SOCKET_URL" => option_env!("JUNGLE_SOCKET_URL").map(str::to_owned),
            "JUNGLE_POLL_SECS" => option_env!("JUNGLE_POLL_SECS").map(str::to_owned),
            _ => None,
        })
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("JUNGLE_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
            .trim()
            .trim_end_matches('/')
            .to_owned();
        let socket_url = lookup("JUNGLE_SOCKET_URL")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| socket_url_for(&api_url), |v| v.trim().to_owned());
        let poll_secs = lookup("JUNGLE_POLL_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_POLL_SECS);

        Self { api_url, socket_url, poll_interval: Duration::from_secs(poll_secs) }
    }
}

/// Derive the socket.io WebSocket endpoint from the REST base URL.
pub(crate) fn socket_url_for(api_url: &str) -> String {
    let ws_base = if let Some(rest) = api_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = api_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        api_url.to_owned()
    };
    format!("{ws_base}/socket.io/?EIO=4&transport=websocket")
}
