//! Supports posting a Sentry [Summary](crate::sentry::Summary) to a Discord
//! channel through an incoming webhook.
//!
//! <https://discord.com/developers/docs/resources/webhook#execute-webhook>

pub mod client;
pub mod error;
pub mod message;

pub use client::DiscordClient;
pub use error::DiscordError;
