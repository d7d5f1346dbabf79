use thiserror::Error;

/// Sum type representing every possible unexceptional fail state.
#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Slack API request failed: {0}")]
    APIRequestFailed(#[from] reqwest::Error),
    #[error("Slack API returned error: {0}")]
    APIResponseError(String),
}

impl SlackError {
    /// Whether Slack rejected the request with the given error code, for
    /// example `not_in_channel`.
    pub fn is_api_error(&self, code: &str) -> bool {
        match self {
            SlackError::APIResponseError(e) => e == code,
            _ => false,
        }
    }
}
