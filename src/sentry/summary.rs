//! Flatten a [HookPayload] into a titled list of labelled fields, independent
//! of where the result will be posted.

use super::payload::HookPayload;
use crate::filter::ExclusionFilter;
use chrono::{DateTime, SecondsFormat, Utc};

/// Tag keys already represented by a fixed field.
const RESERVED_TAGS: [&str; 7] = [
    "culprit",
    "project",
    "level",
    "location",
    "environment",
    "release",
    "sentry:release",
];

/// Where a [Field] came from, which decides how platforms render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One of the fixed event properties.
    Fixed,
    /// A preformatted Markdown block describing a stack frame.
    Stacktrace,
    /// An arbitrary Sentry tag.
    Tag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub title: String,
    pub value: String,
    /// Whether the field is short enough to share a row with another.
    pub short: bool,
    pub kind: FieldKind,
}

impl Field {
    fn fixed<T: ToString>(title: &str, value: T, short: bool) -> Self {
        Field {
            title: title.to_owned(),
            value: value.to_string(),
            short,
            kind: FieldKind::Fixed,
        }
    }
}

/// Everything an onward platform needs to describe a Sentry alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub title: String,
    /// Link to the issue in Sentry.
    pub url: String,
    pub fields: Vec<Field>,
}

impl Summary {
    pub fn new(hook: &HookPayload, filter: &ExclusionFilter) -> Self {
        Summary {
            title: resolve_title(hook),
            url: hook.url.clone(),
            fields: build_fields(hook, filter),
        }
    }
}

/// The first line of the message if there is one, otherwise the event's
/// location and title.
pub fn resolve_title(hook: &HookPayload) -> String {
    match hook.message.split('\n').next() {
        Some(line) if !line.is_empty() => line.to_owned(),
        _ => format!("[{}] {}", hook.event.location, hook.event.title),
    }
}

fn build_fields(hook: &HookPayload, filter: &ExclusionFilter) -> Vec<Field> {
    let event = &hook.event;

    let mut fields = vec![
        Field::fixed("Culprit", &hook.culprit, false),
        Field::fixed("Project", &hook.project_name, true),
        Field::fixed("Level", &hook.level, true),
    ];

    if !event.location.is_empty() {
        fields.push(Field::fixed("Location", &event.location, true));
    }

    if event.timestamp != 0.0 {
        fields.push(Field::fixed("Timestamp", fmt_timestamp(event.timestamp), true));
    }

    if !event.environment.is_empty() {
        fields.push(Field::fixed("Environment", &event.environment, true));
    }

    if !event.release.is_empty() {
        fields.push(Field::fixed("Release", &event.release, true));
    }

    if let Some(frame) = hook.top_frame() {
        fields.push(Field {
            title: "Stacktrace".to_owned(),
            value: frame.to_string(),
            short: false,
            kind: FieldKind::Stacktrace,
        });
    }

    fields.extend(
        event
            .tags
            .iter()
            .filter(|tag| !RESERVED_TAGS.contains(&tag.key.as_str()))
            .filter(|tag| !filter.matches(&tag.key))
            .map(|tag| Field {
                title: fmt_label(&tag.key),
                value: tag.value.clone(),
                short: true,
                kind: FieldKind::Tag,
            }),
    );

    fields
}

/// Format fractional Unix seconds as RFC 3339 in UTC, dropping the fraction.
/// Out of range values are shown as they came.
fn fmt_timestamp(secs: f64) -> String {
    DateTime::<Utc>::from_timestamp(secs.trunc() as i64, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| secs.to_string())
}

/// Humanise a tag key: underscores become spaces and each word is capitalised.
///
/// ```
/// assert_eq!(fmt_label("server_name"), "Server Name");
/// assert_eq!(fmt_label("os.name"), "Os.Name");
/// ```
fn fmt_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut word_start = true;

    for c in key.chars().map(|c| if c == '_' { ' ' } else { c }) {
        if word_start {
            label.extend(c.to_uppercase());
        } else {
            label.push(c);
        }

        word_start = !c.is_alphanumeric();
    }

    label
}
