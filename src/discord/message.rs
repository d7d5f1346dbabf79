//! Render a [Summary] as a Discord webhook message. Discord has no compact
//! fields, so everything is folded into Markdown content.

use crate::sentry::{FieldKind, Summary};
use serde::Serialize;
use std::fmt::Write;
use url::Url;

/// Discord rejects message content longer than this many characters.
pub const MAX_CONTENT_CHARS: usize = 2000;

/// <https://discord.com/developers/docs/resources/webhook#execute-webhook-jsonform-params>
#[derive(Debug, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub content: String,
    pub embeds: Vec<Embed>,
}

/// <https://discord.com/developers/docs/resources/message#embed-object>
#[derive(Debug, PartialEq, Serialize)]
pub struct Embed {
    pub title: &'static str,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}

pub fn build_message(summary: &Summary) -> WebhookMessage {
    let mut content = summary.title.to_owned();
    content.push('\n');

    for field in &summary.fields {
        // Writing to a `String` can't fail.
        let _ = match field.kind {
            FieldKind::Fixed => writeln!(content, "### {}\n`{}`", field.title, field.value),
            FieldKind::Stacktrace => writeln!(content, "### {}\n{}", field.title, field.value),
            FieldKind::Tag => writeln!(content, "**{}**: `{}`", field.title, field.value),
        };
    }

    WebhookMessage {
        content: truncate(content, MAX_CONTENT_CHARS),
        embeds: vec![Embed {
            title: "Sentry",
            description: summary.url.to_owned(),
            // Discord refuses the whole message over an invalid embed URL.
            url: Url::parse(&summary.url).ok(),
        }],
    }
}

/// Cut `s` down to at most `max` characters.
fn truncate(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }

    s
}
