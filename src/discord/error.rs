use thiserror::Error;

/// Everything that can go wrong talking to a Discord webhook.
#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Discord webhook request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// The webhook answered with a status of 300 or more.
    #[error("Discord webhook returned {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
    /// As [DiscordError::Rejected], but while sending a message, which is
    /// kept for the logs.
    #[error("Discord webhook rejected message with {status}: {body}, message={message}")]
    MessageRejected {
        status: reqwest::StatusCode,
        body: String,
        message: String,
    },
    /// As [DiscordError::RequestFailed], but while sending a message.
    #[error("Discord webhook request failed: {source}, message={message}")]
    MessageFailed {
        source: reqwest::Error,
        message: String,
    },
}
