//! The onward platforms a Sentry alert can be relayed to.

use crate::{
    discord::{message::build_message, DiscordClient, DiscordError},
    sentry::Summary,
    slack::{attachment::build_attachment, channel::ChannelId, SlackClient, SlackError},
};
use chrono::Utc;
use thiserror::Error;

/// A configured destination. Destinations which aren't configured simply
/// aren't constructed.
#[derive(Clone)]
pub enum Notifier {
    /// Post an attachment to the channel named in the request.
    Slack(SlackClient),
    /// Execute a fixed webhook; the requested channel is ignored.
    Discord(DiscordClient),
}

/// What went wrong during forwarding, specifically in communication with the
/// onward platform.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error(transparent)]
    Slack(#[from] SlackError),
    #[error(transparent)]
    Discord(#[from] DiscordError),
}

impl Notifier {
    pub fn name(&self) -> &'static str {
        match self {
            Notifier::Slack(_) => "slack",
            Notifier::Discord(_) => "discord",
        }
    }

    /// Format the summary for this platform and send it.
    pub async fn send(&self, channel: &ChannelId, summary: &Summary) -> Result<(), NotifyError> {
        match self {
            Notifier::Slack(client) => {
                let attachment = build_attachment(summary, Utc::now());
                client.post_attachment(channel, &attachment).await?;
            }
            Notifier::Discord(client) => {
                client.execute(&build_message(summary)).await?;
            }
        }

        Ok(())
    }
}
