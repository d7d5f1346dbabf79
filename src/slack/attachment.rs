//! Render a [Summary] as a legacy Slack message attachment. Attachments are
//! still the only Slack layout with compact, side-by-side fields.
//!
//! <https://api.slack.com/reference/messaging/attachments>

use crate::sentry::Summary;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Sentry's red.
const COLOR: &str = "#f43f20";

/// Sentry's GitHub avatar.
const FOOTER_ICON: &str = "https://avatars.githubusercontent.com/u/1396951?s=200&v=4";

#[derive(Debug, PartialEq, Serialize)]
pub struct Attachment {
    pub title: String,
    pub title_link: String,
    pub color: &'static str,
    pub fields: Vec<AttachmentField>,
    pub footer: String,
    pub footer_icon: &'static str,
    /// When the message was sent, in Unix seconds.
    pub ts: i64,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

/// Build the attachment for a summary, stamped with the time it's sent at.
pub fn build_attachment(summary: &Summary, sent_at: DateTime<Utc>) -> Attachment {
    Attachment {
        title: summary.title.to_owned(),
        title_link: summary.url.to_owned(),
        color: COLOR,
        fields: summary
            .fields
            .iter()
            .map(|f| AttachmentField {
                title: f.title.to_owned(),
                value: f.value.to_owned(),
                short: f.short,
            })
            .collect(),
        footer: format!("Herald v{}", env!("CARGO_PKG_VERSION")),
        footer_icon: FOOTER_ICON,
        ts: sent_at.timestamp(),
    }
}
