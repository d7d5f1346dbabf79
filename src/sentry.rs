//! Receive alert webhooks from Sentry and relay a summary of each onward.
//!
//! Webhooks must be configured in Sentry's legacy "WebHooks" integration,
//! supplying Herald's `/webhook/sentry/:channel` endpoint as a callback URL.
//! The channel is passed through to Slack; Discord webhooks are bound to a
//! channel already and ignore it.

pub mod payload;
pub mod router;
pub mod summary;

pub use summary::{Field, FieldKind, Summary};
