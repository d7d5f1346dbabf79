use crate::{config::ConfigError, discord::DiscordError, notifier::NotifyError, slack::SlackError};
use std::fmt;
use thiserror::Error;

/// Anything that stops the server from starting. None of these are
/// recoverable.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not load config: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid excluded field pattern: {0}")]
    ExcludedField(#[from] regex::Error),
    #[error("could not build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("Slack auth failed: {0}")]
    SlackAuth(#[source] SlackError),
    #[error("failed to check Discord webhook: {0}")]
    DiscordProbe(#[source] DiscordError),
    #[error("failed to listen on {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}

/// Every platform that failed to receive a single alert.
#[derive(Debug)]
pub struct DispatchFailure(pub Vec<(&'static str, NotifyError)>);

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (platform, e)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", platform, e)?;
        }

        Ok(())
    }
}

impl std::error::Error for DispatchFailure {}
