//! One-shot position lookup over the machine's public IP.
//!
//! Stands in for a device positioning service: one request, a fixed
//! timeout, and no reuse of earlier answers.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "http://ip-api.com";
const LOOKUP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Ways a position lookup can fail. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("position lookup timed out")]
    Timeout,

    #[error("position service unreachable: {0}")]
    Unavailable(#[source] reqwest::Error),

    #[error("position service returned status {0}")]
    Status(StatusCode),

    #[error("position lookup refused: {0}")]
    Refused(String),

    #[error("malformed position response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct IpLocator {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl IpLocator {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            timeout: Duration::from_secs(LOOKUP_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Look up the current position. Every call is a fresh request; no
    /// earlier answer is ever reused.
    pub async fn current_position(&self) -> Result<Coordinates, LocateError> {
        let url = format!("{}/json", self.base_url);

        let res = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(send_error)?;

        let status = res.status();
        if !status.is_success() {
            return Err(LocateError::Status(status));
        }

        let body = res.text().await.map_err(send_error)?;
        let parsed: IpApiResponse = serde_json::from_str(&body)?;

        match parsed {
            IpApiResponse::Success { lat, lon } => {
                debug!(lat, lon, "position lookup succeeded");
                Ok(Coordinates {
                    latitude: lat,
                    longitude: lon,
                })
            }
            IpApiResponse::Fail { message } => Err(LocateError::Refused(
                message.unwrap_or_else(|| "no reason given".to_string()),
            )),
        }
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

fn send_error(err: reqwest::Error) -> LocateError {
    if err.is_timeout() {
        LocateError::Timeout
    } else {
        LocateError::Unavailable(err)
    }
}

/// Wire shape of the lookup service's answer. The service reports errors
/// as a 200 with `"status": "fail"`.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum IpApiResponse {
    Success { lat: f64, lon: f64 },
    Fail { message: Option<String> },
}
