//! The payload Sentry's webhook integration POSTs for each triggered alert.
//!
//! Sentry documents this loosely and omits or nulls fields freely, so every
//! field here is optional: missing and `null` values read as their zero value.
//!
//! <https://docs.sentry.io/product/integrations/integration-platform/webhooks/>

// Not every field is read; they're kept to document the payload and for the
// debug log.
#![allow(dead_code)]

use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};
use std::fmt;

#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HookPayload {
    #[serde_as(as = "DefaultOnNull")]
    pub project_name: String,
    /// Usually empty. When present its first line makes a better title than
    /// the event's own.
    #[serde_as(as = "DefaultOnNull")]
    pub message: String,
    #[serde_as(as = "DefaultOnNull")]
    pub id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub culprit: String,
    #[serde_as(as = "DefaultOnNull")]
    pub project_slug: String,
    #[serde_as(as = "DefaultOnNull")]
    pub url: String,
    #[serde_as(as = "DefaultOnNull")]
    pub level: String,
    #[serde_as(as = "DefaultOnNull")]
    pub triggering_rules: Vec<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub event: Event,
}

#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde_as(as = "DefaultOnNull")]
    pub culprit: String,
    #[serde_as(as = "DefaultOnNull")]
    pub title: String,
    #[serde_as(as = "DefaultOnNull")]
    pub event_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub environment: String,
    #[serde_as(as = "DefaultOnNull")]
    pub platform: String,
    #[serde_as(as = "DefaultOnNull")]
    pub version: String,
    #[serde_as(as = "DefaultOnNull")]
    pub location: String,
    #[serde_as(as = "DefaultOnNull")]
    pub logger: String,
    #[serde(rename = "type")]
    #[serde_as(as = "DefaultOnNull")]
    pub typ: String,
    #[serde_as(as = "DefaultOnNull")]
    pub metadata: Metadata,
    #[serde_as(as = "DefaultOnNull")]
    pub tags: Vec<Tag>,
    /// Unix seconds, with a fractional part.
    #[serde_as(as = "DefaultOnNull")]
    pub timestamp: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub received: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub level: String,
    #[serde_as(as = "DefaultOnNull")]
    pub project: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub release: String,
    #[serde_as(as = "DefaultOnNull")]
    pub user: User,
    #[serde_as(as = "DefaultOnNull")]
    pub sdk: Sdk,
    #[serde_as(as = "DefaultOnNull")]
    pub exception: Exception,
}

#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde_as(as = "DefaultOnNull")]
    pub function: String,
    #[serde(rename = "type")]
    #[serde_as(as = "DefaultOnNull")]
    pub typ: String,
    #[serde_as(as = "DefaultOnNull")]
    pub value: String,
    #[serde_as(as = "DefaultOnNull")]
    pub filename: String,
}

/// A single Sentry tag. On the wire this is a `[key, value]` array. Missing
/// or `null` elements read as empty and anything past the value is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<Option<String>>")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl From<Vec<Option<String>>> for Tag {
    fn from(raw: Vec<Option<String>>) -> Self {
        let mut parts = raw.into_iter().map(Option::unwrap_or_default);

        Tag {
            key: parts.next().unwrap_or_default(),
            value: parts.next().unwrap_or_default(),
        }
    }
}

#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde_as(as = "DefaultOnNull")]
    pub id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub username: String,
    #[serde_as(as = "DefaultOnNull")]
    pub email: String,
    #[serde_as(as = "DefaultOnNull")]
    pub ip_address: String,
    #[serde_as(as = "DefaultOnNull")]
    pub geo: Geo,
}

#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Geo {
    #[serde_as(as = "DefaultOnNull")]
    pub region: String,
    #[serde_as(as = "DefaultOnNull")]
    pub country_code: String,
}

#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Sdk {
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub version: String,
}

#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Exception {
    #[serde_as(as = "DefaultOnNull")]
    pub values: Vec<ExceptionValue>,
}

#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExceptionValue {
    #[serde_as(as = "DefaultOnNull")]
    pub stacktrace: Stacktrace,
    #[serde(rename = "type")]
    #[serde_as(as = "DefaultOnNull")]
    pub typ: String,
    #[serde_as(as = "DefaultOnNull")]
    pub value: String,
    #[serde_as(as = "DefaultOnNull")]
    pub mechanism: Mechanism,
}

#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Mechanism {
    #[serde(rename = "type")]
    #[serde_as(as = "DefaultOnNull")]
    pub typ: String,
    #[serde_as(as = "DefaultOnNull")]
    pub handled: bool,
}

#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Stacktrace {
    /// Ordered outermost call first, so the last frame is where the error was
    /// raised.
    #[serde_as(as = "DefaultOnNull")]
    pub frames: Vec<Frame>,
}

#[serde_as]
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Frame {
    #[serde_as(as = "DefaultOnNull")]
    pub abs_path: String,
    #[serde_as(as = "DefaultOnNull")]
    pub filename: String,
    #[serde_as(as = "DefaultOnNull")]
    pub lineno: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub context_line: String,
    #[serde_as(as = "DefaultOnNull")]
    pub pre_context: Vec<Option<String>>,
    #[serde_as(as = "DefaultOnNull")]
    pub post_context: Vec<Option<String>>,
    #[serde_as(as = "DefaultOnNull")]
    pub in_app: bool,
}

impl HookPayload {
    /// The innermost frame of the first exception which carries a stacktrace.
    pub fn top_frame(&self) -> Option<&Frame> {
        self.event
            .exception
            .values
            .iter()
            .find_map(|v| v.stacktrace.frames.last())
    }
}

/// A Markdown block describing where in the source the frame sits.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "filename: `{}`\nline: `{}`\nabs_path: `{}`\ncontext_line:\n```\n{}\n```\n",
            self.filename, self.lineno, self.abs_path, self.context_line
        )
    }
}
