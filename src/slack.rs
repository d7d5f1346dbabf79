//! Supports posting a Sentry [Summary](crate::sentry::Summary) to any Slack
//! channel as a message attachment.
//!
//! See [message] and [attachment].

pub mod api;
pub mod attachment;
pub mod auth;
pub mod channel;
pub mod error;
pub mod message;

pub use api::SlackClient;
pub use error::SlackError;
