use crate::model::{WeatherQuery, WeatherReport};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Failure modes of a weather fetch.
///
/// Callers that only care about presence can collapse any of these to
/// "no report"; the variants exist so the distinction still reaches the log.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("weather request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("weather service returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed weather response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherReport, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code_and_body() {
        let err = ProviderError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            body: "{\"message\":\"city not found\"}".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("city not found"));
    }

    #[test]
    fn parse_error_wraps_serde_failure() {
        let serde_err = serde_json::from_str::<WeatherReport>("{").unwrap_err();
        let err = ProviderError::from(serde_err);

        assert!(err.to_string().starts_with("malformed weather response"));
    }
}
